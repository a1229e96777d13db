//! # PDF Document Backend
//!
//! A [`DocumentRenderer`] that lays text out top to bottom on US Letter
//! pages and writes a PDF with `lopdf` when the document ends.
//!
//! Text uses the standard Helvetica font with WinAnsi encoding, so no font
//! file is embedded. Characters outside Latin-1 render as `?`. Lines wider
//! than the text column wrap, preferring the last space; a new page starts
//! when the next line would cross the bottom margin.
//!
//! The output carries no creation date, so identical input produces an
//! identical file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::certificate::DocumentRenderer;
use crate::error::RenderError;

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 50;

const TITLE_SIZE: i64 = 20;
const TITLE_LEADING: i64 = 24;
const BODY_SIZE: i64 = 12;
const BODY_LEADING: i64 = 15;

/// Distance from the bottom of a line box up to the text baseline.
const BASELINE_RISE: i64 = 3;
/// Distance below the baseline of a heading's underline.
const UNDERLINE_DROP: i64 = 2;

const FONT_NAME: &[u8] = b"F1";

/// Helvetica advance widths (1/1000 em) for WinAnsi codes 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Width used for codes outside the table.
const DEFAULT_WIDTH: u16 = 556;

/// Writes a PDF document to a file path.
#[derive(Debug)]
pub struct PdfRenderer {
    output: PathBuf,
    layout: Option<Layout>,
    finished: bool,
}

#[derive(Debug)]
struct Layout {
    pages: Vec<Vec<Operation>>,
    /// Top of the next line box, in points from the page bottom.
    cursor: i64,
}

impl PdfRenderer {
    /// A renderer that will write to `output` when [`end`](DocumentRenderer::end)
    /// is called. Nothing touches the filesystem before then.
    pub fn create(output: impl AsRef<Path>) -> Self {
        Self {
            output: output.as_ref().to_path_buf(),
            layout: None,
            finished: false,
        }
    }

    fn layout(&mut self) -> Result<&mut Layout, RenderError> {
        if self.finished {
            return Err(RenderError::State("document already ended"));
        }
        self.layout
            .as_mut()
            .ok_or(RenderError::State("begin_document must be called first"))
    }
}

impl DocumentRenderer for PdfRenderer {
    fn begin_document(&mut self, title: &str) -> Result<(), RenderError> {
        if self.layout.is_some() || self.finished {
            return Err(RenderError::State("document already begun"));
        }
        let mut layout = Layout::new();
        let max_width = (PAGE_WIDTH - 2 * MARGIN) as f32;
        for line in wrap(title, TITLE_SIZE, max_width) {
            let width = text_width(&line, TITLE_SIZE);
            let x = ((PAGE_WIDTH as f32 - width) / 2.0).round() as i64;
            layout.place_text(&line, x, TITLE_SIZE, TITLE_LEADING);
        }
        // One body line of space under the title.
        layout.advance(BODY_LEADING);
        self.layout = Some(layout);
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<(), RenderError> {
        let layout = self.layout()?;
        let max_width = (PAGE_WIDTH - 2 * MARGIN) as f32;
        for line in wrap(text, BODY_SIZE, max_width) {
            if line.is_empty() {
                layout.advance(BODY_LEADING);
            } else {
                layout.place_text(&line, MARGIN, BODY_SIZE, BODY_LEADING);
            }
        }
        Ok(())
    }

    fn write_heading(&mut self, text: &str) -> Result<(), RenderError> {
        let layout = self.layout()?;
        let max_width = (PAGE_WIDTH - 2 * MARGIN) as f32;
        for line in wrap(text, BODY_SIZE, max_width) {
            let baseline = layout.place_text(&line, MARGIN, BODY_SIZE, BODY_LEADING);
            let width = text_width(&line, BODY_SIZE).round() as i64;
            let y = baseline - UNDERLINE_DROP;
            layout.current_page().extend([
                Operation::new("w", vec![Object::Integer(1)]),
                Operation::new("m", vec![Object::Integer(MARGIN), Object::Integer(y)]),
                Operation::new("l", vec![Object::Integer(MARGIN + width), Object::Integer(y)]),
                Operation::new("S", vec![]),
            ]);
        }
        Ok(())
    }

    fn end(&mut self) -> Result<(), RenderError> {
        if self.finished {
            return Err(RenderError::State("document already ended"));
        }
        let layout = self
            .layout
            .take()
            .ok_or(RenderError::State("begin_document must be called first"))?;
        self.finished = true;

        let mut doc = assemble(layout.pages)?;
        let file = File::create(&self.output)?;
        let mut writer = BufWriter::new(file);
        doc.save_to(&mut writer)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    fn current_page(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Reserve a line box of height `leading`, breaking the page if needed.
    /// Returns the bottom of the box.
    fn reserve(&mut self, leading: i64) -> i64 {
        if self.cursor - leading < MARGIN {
            self.pages.push(Vec::new());
            self.cursor = PAGE_HEIGHT - MARGIN;
        }
        self.cursor -= leading;
        self.cursor
    }

    fn advance(&mut self, leading: i64) {
        self.reserve(leading);
    }

    /// Place one line of text and return its baseline.
    fn place_text(&mut self, text: &str, x: i64, size: i64, leading: i64) -> i64 {
        let baseline = self.reserve(leading) + BASELINE_RISE;
        self.current_page().extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(FONT_NAME.to_vec()), Object::Integer(size)],
            ),
            Operation::new("Td", vec![Object::Integer(x), Object::Integer(baseline)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
        baseline
    }
}

fn assemble(pages: Vec<Vec<Operation>>) -> Result<Document, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(crate::certificate::CERTIFICATE_TITLE),
        "Producer" => Object::string_literal("ReleaseShield"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();
    Ok(doc)
}

/// Map text to single-byte WinAnsi codes; anything outside Latin-1 is `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7e | code @ 0xa0..=0xff => code as u8,
            _ => b'?',
        })
        .collect()
}

fn char_width(code: u8, size: i64) -> f32 {
    let units = match code {
        32..=126 => HELVETICA_WIDTHS[usize::from(code - 32)],
        _ => DEFAULT_WIDTH,
    };
    f32::from(units) * size as f32 / 1000.0
}

/// Rendered width of `text` in points.
fn text_width(text: &str, size: i64) -> f32 {
    encode_win_ansi(text)
        .into_iter()
        .map(|code| char_width(code, size))
        .sum()
}

/// Greedy wrap at `max_width`, breaking after the last space when there is
/// one and mid-word otherwise. Always returns at least one line.
fn wrap(text: &str, size: i64, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0.0_f32;
    let mut last_space: Option<usize> = None;

    for c in text.chars() {
        let w = text_width(c.encode_utf8(&mut [0u8; 4]), size);
        if width + w > max_width && !current.is_empty() {
            match last_space {
                Some(at) if at > 0 => {
                    let rest = current.split_off(at + 1);
                    lines.push(current.trim_end().to_string());
                    current = rest;
                }
                _ => lines.push(std::mem::take(&mut current)),
            }
            width = text_width(&current, size);
            last_space = None;
        }
        if c == ' ' {
            last_space = Some(current.len());
        }
        current.push(c);
        width += w;
    }
    lines.push(current);
    lines
}

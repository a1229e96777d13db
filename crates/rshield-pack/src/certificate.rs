//! # Release Certificate
//!
//! The human-readable summary of a release pack: the release metadata
//! followed by the exact evidence lines from `sha256.txt`.
//!
//! ## Layout
//!
//! ```text
//!            ReleaseShield Certificate          (centered title)
//! Artist: …
//! Track Title: …
//! Release Title: …
//! Genre: …
//! Language: …
//! Explicit: Yes | No
//! Release Date: …                               (only when present)
//!
//! SHA-256 Evidence                              (underlined)
//! <hash line 1>
//! …
//! ```
//!
//! The layout is expressed against [`DocumentRenderer`], a four-call
//! capability. [`PdfRenderer`](crate::PdfRenderer) is the production
//! backend; any other document format can be swapped in without touching
//! the builder.

use std::path::Path;

use rshield_core::ReleaseMetadata;

use crate::error::RenderError;
use crate::evidence::HashLine;
use crate::pdf::PdfRenderer;

/// Certificate title line.
pub const CERTIFICATE_TITLE: &str = "ReleaseShield Certificate";

/// Heading above the evidence lines.
pub const EVIDENCE_HEADING: &str = "SHA-256 Evidence";

/// Append-only, top-to-bottom document writer.
pub trait DocumentRenderer {
    /// Start the document with a centered title.
    fn begin_document(&mut self, title: &str) -> Result<(), RenderError>;

    /// Append a left-aligned body line. An empty string is a blank line.
    fn write_line(&mut self, text: &str) -> Result<(), RenderError>;

    /// Append an underlined heading.
    fn write_heading(&mut self, text: &str) -> Result<(), RenderError>;

    /// Finish the document and flush it to its destination.
    fn end(&mut self) -> Result<(), RenderError>;
}

/// Drive `renderer` through the certificate layout.
pub fn render_certificate(
    renderer: &mut dyn DocumentRenderer,
    metadata: &ReleaseMetadata,
    hash_lines: &[HashLine],
) -> Result<(), RenderError> {
    renderer.begin_document(CERTIFICATE_TITLE)?;
    for line in metadata_lines(metadata) {
        renderer.write_line(&line)?;
    }
    renderer.write_line("")?;
    renderer.write_heading(EVIDENCE_HEADING)?;
    for line in hash_lines {
        renderer.write_line(&line.to_string())?;
    }
    renderer.end()
}

/// Render the certificate as a PDF at `output_path`.
pub fn render(
    output_path: &Path,
    metadata: &ReleaseMetadata,
    hash_lines: &[HashLine],
) -> Result<(), RenderError> {
    let mut renderer = PdfRenderer::create(output_path);
    render_certificate(&mut renderer, metadata, hash_lines)
}

fn metadata_lines(metadata: &ReleaseMetadata) -> Vec<String> {
    let mut lines = vec![
        format!("Artist: {}", metadata.primary_artist()),
        format!("Track Title: {}", metadata.track_title()),
        format!("Release Title: {}", metadata.release_title()),
        format!("Genre: {}", metadata.genre()),
        format!("Language: {}", metadata.language()),
        format!(
            "Explicit: {}",
            if metadata.explicit() { "Yes" } else { "No" }
        ),
    ];
    // An empty date is treated like a missing one.
    if let Some(date) = metadata.release_date().filter(|d| !d.is_empty()) {
        lines.push(format!("Release Date: {date}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rshield_core::sha256_bytes;

    #[derive(Debug, PartialEq)]
    enum Call {
        Begin(String),
        Line(String),
        Heading(String),
        End,
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl DocumentRenderer for Recorder {
        fn begin_document(&mut self, title: &str) -> Result<(), RenderError> {
            self.0.push(Call::Begin(title.into()));
            Ok(())
        }
        fn write_line(&mut self, text: &str) -> Result<(), RenderError> {
            self.0.push(Call::Line(text.into()));
            Ok(())
        }
        fn write_heading(&mut self, text: &str) -> Result<(), RenderError> {
            self.0.push(Call::Heading(text.into()));
            Ok(())
        }
        fn end(&mut self) -> Result<(), RenderError> {
            self.0.push(Call::End);
            Ok(())
        }
    }

    fn metadata(explicit: bool, date: Option<&str>) -> ReleaseMetadata {
        ReleaseMetadata::new(
            "Artist",
            "Track",
            "Release",
            "Pop",
            "English",
            explicit,
            date.map(String::from),
        )
        .unwrap()
    }

    fn hashes() -> Vec<HashLine> {
        vec![
            HashLine {
                relative_path: "Masters/01 - Track.wav".into(),
                digest: sha256_bytes(b"audio"),
            },
            HashLine {
                relative_path: "Artwork/cover.png".into(),
                digest: sha256_bytes(b"cover"),
            },
        ]
    }

    #[test]
    fn layout_in_fixed_order() {
        let mut recorder = Recorder::default();
        let lines = hashes();
        render_certificate(&mut recorder, &metadata(true, Some("2025-01-01")), &lines).unwrap();
        assert_eq!(
            recorder.0,
            vec![
                Call::Begin("ReleaseShield Certificate".into()),
                Call::Line("Artist: Artist".into()),
                Call::Line("Track Title: Track".into()),
                Call::Line("Release Title: Release".into()),
                Call::Line("Genre: Pop".into()),
                Call::Line("Language: English".into()),
                Call::Line("Explicit: Yes".into()),
                Call::Line("Release Date: 2025-01-01".into()),
                Call::Line(String::new()),
                Call::Heading("SHA-256 Evidence".into()),
                Call::Line(lines[0].to_string()),
                Call::Line(lines[1].to_string()),
                Call::End,
            ]
        );
    }

    #[test]
    fn release_date_line_only_when_present() {
        for date in [None, Some("")] {
            let mut recorder = Recorder::default();
            render_certificate(&mut recorder, &metadata(false, date), &[]).unwrap();
            assert!(!recorder
                .0
                .iter()
                .any(|c| matches!(c, Call::Line(l) if l.starts_with("Release Date"))));
            assert!(recorder.0.contains(&Call::Line("Explicit: No".into())));
        }
    }

    #[test]
    fn renderer_errors_propagate() {
        struct Failing;
        impl DocumentRenderer for Failing {
            fn begin_document(&mut self, _: &str) -> Result<(), RenderError> {
                Ok(())
            }
            fn write_line(&mut self, _: &str) -> Result<(), RenderError> {
                Err(RenderError::Encode("disk on fire".into()))
            }
            fn write_heading(&mut self, _: &str) -> Result<(), RenderError> {
                Ok(())
            }
            fn end(&mut self) -> Result<(), RenderError> {
                Ok(())
            }
        }
        let err = render_certificate(&mut Failing, &metadata(false, None), &[]).unwrap_err();
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn render_writes_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("release-certificate.pdf");
        render(&path, &metadata(false, None), &hashes()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn pdf_text_follows_layout_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("release-certificate.pdf");
        let lines = hashes();
        render(&path, &metadata(true, Some("2025-01-01")), &lines).unwrap();

        let doc = lopdf::Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        let text = doc.extract_text(&[1]).unwrap();

        let mut expected = vec![
            CERTIFICATE_TITLE.to_string(),
            "Artist: Artist".into(),
            "Track Title: Track".into(),
            "Release Title: Release".into(),
            "Genre: Pop".into(),
            "Language: English".into(),
            "Explicit: Yes".into(),
            "Release Date: 2025-01-01".into(),
            EVIDENCE_HEADING.to_string(),
        ];
        for line in &lines {
            expected.push(line.relative_path.clone());
            expected.push(line.digest.to_hex());
        }

        let mut rest = text.as_str();
        for needle in &expected {
            let at = rest
                .find(needle.as_str())
                .unwrap_or_else(|| panic!("{needle:?} missing or out of order in {text:?}"));
            rest = &rest[at + needle.len()..];
        }
    }
}

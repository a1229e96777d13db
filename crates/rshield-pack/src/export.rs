//! # Metadata Exports
//!
//! Byte-exact renderings of [`ReleaseMetadata`] written into the pack's
//! `Metadata/` folder.
//!
//! - `metadata.json`: pretty JSON, two-space indent, keys in schema order,
//!   `releaseDate` omitted when absent, no trailing newline.
//! - `metadata.csv`: a fixed header row and one value row joined by `\n`,
//!   no trailing newline.
//!
//! CSV fields containing a comma, double quote, CR or LF are quoted per
//! RFC 4180. Every other field is written bare, so ordinary metadata
//! produces the plain `a,b,c` form.

use rshield_core::{ReleaseMetadata, CSV_HEADER_FIELDS};

/// Render `metadata.json`.
pub fn metadata_json(metadata: &ReleaseMetadata) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(metadata)
}

/// The fixed `metadata.csv` header row.
pub fn csv_header() -> String {
    CSV_HEADER_FIELDS.join(",")
}

/// Render `metadata.csv`.
pub fn metadata_csv(metadata: &ReleaseMetadata) -> String {
    let values = metadata
        .field_values()
        .iter()
        .map(|value| csv_field(value))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}\n{values}", csv_header())
}

/// Quote a single CSV field when it needs it.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(genre: &str, release_date: Option<&str>) -> ReleaseMetadata {
        ReleaseMetadata::new(
            "Artist",
            "Track Title",
            "Release Title",
            genre,
            "English",
            false,
            release_date.map(String::from),
        )
        .unwrap()
    }

    #[test]
    fn json_is_pretty_and_ordered() {
        let json = metadata_json(&sample("Pop", Some("2025-01-01"))).unwrap();
        assert_eq!(
            json,
            "{\n  \"primaryArtist\": \"Artist\",\n  \"trackTitle\": \"Track Title\",\n  \
             \"releaseTitle\": \"Release Title\",\n  \"genre\": \"Pop\",\n  \
             \"language\": \"English\",\n  \"explicit\": false,\n  \
             \"releaseDate\": \"2025-01-01\"\n}"
        );
    }

    #[test]
    fn json_omits_missing_release_date() {
        let json = metadata_json(&sample("Pop", None)).unwrap();
        assert!(!json.contains("releaseDate"));
        assert!(json.ends_with("\"explicit\": false\n}"));
    }

    #[test]
    fn csv_has_header_and_one_row() {
        let csv = metadata_csv(&sample("Pop", Some("2025-01-01")));
        assert_eq!(
            csv,
            "primaryArtist,trackTitle,releaseTitle,genre,language,explicit,releaseDate\n\
             Artist,Track Title,Release Title,Pop,English,false,2025-01-01"
        );
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn csv_missing_date_is_empty_column() {
        let csv = metadata_csv(&sample("Pop", None));
        assert!(csv.ends_with("English,false,"));
    }

    #[test]
    fn csv_explicit_literal() {
        let metadata =
            ReleaseMetadata::new("A", "T", "R", "Rap", "English", true, None).unwrap();
        assert!(metadata_csv(&metadata).ends_with(",true,"));
    }

    #[test]
    fn csv_quotes_embedded_commas() {
        let csv = metadata_csv(&sample("Rock, Alternative", None));
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "Artist,Track Title,Release Title,\"Rock, Alternative\",English,false,");
    }

    #[test]
    fn csv_field_escapes_quotes_and_newlines() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(csv_field(""), "");
    }
}

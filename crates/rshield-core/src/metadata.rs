//! # Release Metadata — Validated Submission Record
//!
//! Defines `ReleaseMetadata`, the seven-field record describing a
//! single-track release, and the validation gate that produces it.
//!
//! ## Invariants
//!
//! - `primaryArtist`, `trackTitle`, `releaseTitle`, `genre` and `language`
//!   are non-empty after trimming. Values are stored verbatim, untrimmed.
//! - `explicit` is a JSON boolean. Strings such as `"true"` are rejected.
//! - `releaseDate` is optional free-form text, passed through unparsed.
//!
//! The fields are private: the only ways to obtain a `ReleaseMetadata` are
//! [`validate_metadata()`], [`ReleaseMetadata::new()`] and deserialization,
//! and all three run the same checks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FieldIssue, IssueKind, ValidationError};

/// Column order of `metadata.csv`, which is also the key order of
/// `metadata.json`.
pub const CSV_HEADER_FIELDS: [&str; 7] = [
    "primaryArtist",
    "trackTitle",
    "releaseTitle",
    "genre",
    "language",
    "explicit",
    "releaseDate",
];

/// The five required text fields, in schema order.
const REQUIRED_TEXT_FIELDS: [&str; 5] = [
    "primaryArtist",
    "trackTitle",
    "releaseTitle",
    "genre",
    "language",
];

/// Metadata for a single-track music release.
///
/// Serializes to JSON with camelCase keys in schema order; `releaseDate`
/// is omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct ReleaseMetadata {
    primary_artist: String,
    track_title: String,
    release_title: String,
    genre: String,
    language: String,
    explicit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_date: Option<String>,
}

impl ReleaseMetadata {
    /// Construct metadata from typed values, applying the non-empty checks.
    pub fn new(
        primary_artist: impl Into<String>,
        track_title: impl Into<String>,
        release_title: impl Into<String>,
        genre: impl Into<String>,
        language: impl Into<String>,
        explicit: bool,
        release_date: Option<String>,
    ) -> Result<Self, ValidationError> {
        let metadata = Self {
            primary_artist: primary_artist.into(),
            track_title: track_title.into(),
            release_title: release_title.into(),
            genre: genre.into(),
            language: language.into(),
            explicit,
            release_date,
        };
        let issues: Vec<FieldIssue> = REQUIRED_TEXT_FIELDS
            .iter()
            .zip(metadata.required_text())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| FieldIssue {
                field: *field,
                kind: IssueKind::Empty,
            })
            .collect();
        if issues.is_empty() {
            Ok(metadata)
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Credited primary artist.
    pub fn primary_artist(&self) -> &str {
        &self.primary_artist
    }

    /// Title of the single track.
    pub fn track_title(&self) -> &str {
        &self.track_title
    }

    /// Title of the release; names the pack folder.
    pub fn release_title(&self) -> &str {
        &self.release_title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the track carries explicit content.
    pub fn explicit(&self) -> bool {
        self.explicit
    }

    /// Free-form release date, if supplied.
    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }

    /// Field values as text, in [`CSV_HEADER_FIELDS`] order.
    ///
    /// `explicit` renders as `true`/`false`; a missing date is empty.
    pub fn field_values(&self) -> [String; 7] {
        [
            self.primary_artist.clone(),
            self.track_title.clone(),
            self.release_title.clone(),
            self.genre.clone(),
            self.language.clone(),
            self.explicit.to_string(),
            self.release_date.clone().unwrap_or_default(),
        ]
    }

    fn required_text(&self) -> [&str; 5] {
        [
            &self.primary_artist,
            &self.track_title,
            &self.release_title,
            &self.genre,
            &self.language,
        ]
    }
}

impl TryFrom<Value> for ReleaseMetadata {
    type Error = ValidationError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        validate_metadata(&raw)
    }
}

/// Validate an untyped metadata record.
///
/// Every offending field is reported, in schema order. Unknown keys are
/// ignored. A `null` `releaseDate` is treated as absent.
pub fn validate_metadata(raw: &Value) -> Result<ReleaseMetadata, ValidationError> {
    let Some(object) = raw.as_object() else {
        return Err(ValidationError {
            issues: vec![FieldIssue {
                field: "$",
                kind: IssueKind::NotAnObject,
            }],
        });
    };

    let mut issues = Vec::new();
    let mut text = Vec::with_capacity(REQUIRED_TEXT_FIELDS.len());
    for field in REQUIRED_TEXT_FIELDS {
        match required_text(object, field) {
            Ok(value) => text.push(value),
            Err(kind) => {
                issues.push(FieldIssue { field, kind });
                text.push(String::new());
            }
        }
    }

    let explicit = match object.get("explicit") {
        Some(Value::Bool(flag)) => *flag,
        Some(_) => {
            issues.push(FieldIssue {
                field: "explicit",
                kind: IssueKind::WrongType { expected: "boolean" },
            });
            false
        }
        None => {
            issues.push(FieldIssue {
                field: "explicit",
                kind: IssueKind::Missing,
            });
            false
        }
    };

    let release_date = match object.get("releaseDate") {
        None | Some(Value::Null) => None,
        Some(Value::String(date)) => Some(date.clone()),
        Some(_) => {
            issues.push(FieldIssue {
                field: "releaseDate",
                kind: IssueKind::WrongType { expected: "string" },
            });
            None
        }
    };

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    let mut text = text.into_iter();
    let mut next = || text.next().unwrap_or_default();
    Ok(ReleaseMetadata {
        primary_artist: next(),
        track_title: next(),
        release_title: next(),
        genre: next(),
        language: next(),
        explicit,
        release_date,
    })
}

fn required_text(object: &Map<String, Value>, field: &str) -> Result<String, IssueKind> {
    match object.get(field) {
        None | Some(Value::Null) => Err(IssueKind::Missing),
        Some(Value::String(value)) if value.trim().is_empty() => Err(IssueKind::Empty),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(IssueKind::WrongType { expected: "string" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full() -> Value {
        json!({
            "primaryArtist": "Artist",
            "trackTitle": "Track Title",
            "releaseTitle": "Release Title",
            "genre": "Pop",
            "language": "English",
            "explicit": false,
            "releaseDate": "2025-01-01"
        })
    }

    #[test]
    fn accepts_fully_specified_record() {
        let metadata = validate_metadata(&full()).unwrap();
        assert_eq!(metadata.primary_artist(), "Artist");
        assert_eq!(metadata.track_title(), "Track Title");
        assert_eq!(metadata.release_title(), "Release Title");
        assert_eq!(metadata.genre(), "Pop");
        assert_eq!(metadata.language(), "English");
        assert!(!metadata.explicit());
        assert_eq!(metadata.release_date(), Some("2025-01-01"));
    }

    #[test]
    fn accepts_record_without_release_date() {
        let mut raw = full();
        raw.as_object_mut().unwrap().remove("releaseDate");
        let metadata = validate_metadata(&raw).unwrap();
        assert_eq!(metadata.release_date(), None);
    }

    #[test]
    fn null_release_date_is_absent() {
        let mut raw = full();
        raw["releaseDate"] = Value::Null;
        assert_eq!(validate_metadata(&raw).unwrap().release_date(), None);
    }

    #[test]
    fn release_date_passes_through_verbatim() {
        let mut raw = full();
        raw["releaseDate"] = json!("sometime in spring");
        assert_eq!(
            validate_metadata(&raw).unwrap().release_date(),
            Some("sometime in spring")
        );
    }

    #[test]
    fn rejects_each_missing_required_field() {
        for field in REQUIRED_TEXT_FIELDS {
            let mut raw = full();
            raw.as_object_mut().unwrap().remove(field);
            let err = validate_metadata(&raw).unwrap_err();
            assert_eq!(
                err.issues,
                vec![FieldIssue {
                    field,
                    kind: IssueKind::Missing
                }],
                "field {field}"
            );
        }
    }

    #[test]
    fn rejects_whitespace_only_fields() {
        let mut raw = full();
        raw["genre"] = json!("   ");
        raw["language"] = json!("");
        let err = validate_metadata(&raw).unwrap_err();
        assert_eq!(err.fields(), vec!["genre", "language"]);
        assert!(err.issues.iter().all(|i| i.kind == IssueKind::Empty));
    }

    #[test]
    fn stores_values_untrimmed() {
        let mut raw = full();
        raw["trackTitle"] = json!("  Padded ");
        assert_eq!(validate_metadata(&raw).unwrap().track_title(), "  Padded ");
    }

    #[test]
    fn rejects_non_boolean_explicit() {
        for bad in [json!("true"), json!(1), json!(null)] {
            let mut raw = full();
            raw["explicit"] = bad.clone();
            let err = validate_metadata(&raw).unwrap_err();
            assert!(err.has_issue("explicit"), "explicit = {bad}");
        }
    }

    #[test]
    fn rejects_missing_explicit() {
        let mut raw = full();
        raw.as_object_mut().unwrap().remove("explicit");
        let err = validate_metadata(&raw).unwrap_err();
        assert_eq!(err.issues[0].kind, IssueKind::Missing);
    }

    #[test]
    fn rejects_non_string_text_and_date() {
        let mut raw = full();
        raw["primaryArtist"] = json!(42);
        raw["releaseDate"] = json!(20250101);
        let err = validate_metadata(&raw).unwrap_err();
        assert_eq!(err.fields(), vec!["primaryArtist", "releaseDate"]);
    }

    #[test]
    fn reports_every_problem_at_once() {
        let err = validate_metadata(&json!({"explicit": "no"})).unwrap_err();
        assert_eq!(
            err.fields(),
            vec![
                "primaryArtist",
                "trackTitle",
                "releaseTitle",
                "genre",
                "language",
                "explicit"
            ]
        );
    }

    #[test]
    fn rejects_non_object() {
        let err = validate_metadata(&json!(["Artist"])).unwrap_err();
        assert_eq!(err.issues[0].kind, IssueKind::NotAnObject);
    }

    #[test]
    fn ignores_unknown_keys() {
        let mut raw = full();
        raw["audioPath"] = json!("/tmp/a.wav");
        assert!(validate_metadata(&raw).is_ok());
    }

    #[test]
    fn deserialize_runs_validation() {
        let ok: ReleaseMetadata = serde_json::from_value(full()).unwrap();
        assert_eq!(ok.genre(), "Pop");

        let mut raw = full();
        raw["genre"] = json!("");
        let err = serde_json::from_value::<ReleaseMetadata>(raw).unwrap_err();
        assert!(err.to_string().contains("genre must not be empty"));
    }

    #[test]
    fn serializes_in_schema_order() {
        let metadata = validate_metadata(&full()).unwrap();
        let json = serde_json::to_string(&metadata).unwrap();
        let positions: Vec<usize> = CSV_HEADER_FIELDS
            .iter()
            .map(|key| json.find(&format!("\"{key}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn serialization_omits_absent_release_date() {
        let metadata =
            ReleaseMetadata::new("A", "T", "R", "Pop", "English", true, None).unwrap();
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(!json.contains("releaseDate"));
    }

    #[test]
    fn new_applies_empty_checks() {
        let err = ReleaseMetadata::new("A", " ", "R", "", "English", false, None).unwrap_err();
        assert_eq!(err.fields(), vec!["trackTitle", "genre"]);
    }

    #[test]
    fn field_values_follow_header_order() {
        let metadata = validate_metadata(&full()).unwrap();
        assert_eq!(
            metadata.field_values(),
            [
                "Artist",
                "Track Title",
                "Release Title",
                "Pop",
                "English",
                "false",
                "2025-01-01"
            ]
            .map(String::from)
        );
    }
}

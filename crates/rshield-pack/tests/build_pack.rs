//! End-to-end tests for building and verifying a release pack.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rshield_core::{BuildTimestamp, ReleaseMetadata};
use rshield_pack::{
    build, verify_pack, EntryStatus, IoOp, PackBuilderInput, PackError, VerifyError,
};
use sha2::{Digest, Sha256};

fn timestamp() -> BuildTimestamp {
    BuildTimestamp::from_naive(
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    )
}

fn metadata(track: &str, release: &str, genre: &str) -> ReleaseMetadata {
    ReleaseMetadata::new(
        "Artist",
        track,
        release,
        genre,
        "English",
        false,
        Some("2025-01-01".into()),
    )
    .unwrap()
}

fn input(dir: &Path, out: &str, metadata: ReleaseMetadata) -> PackBuilderInput {
    let audio_path = dir.join("audio.wav");
    let cover_path = dir.join("cover.png");
    fs::write(&audio_path, b"dummy-audio").unwrap();
    fs::write(&cover_path, b"dummy-cover").unwrap();
    PackBuilderInput {
        metadata,
        audio_path,
        cover_path,
        output_directory: dir.join(out),
        timestamp: Some(timestamp()),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[test]
fn builds_complete_pack() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = build(input(
        dir.path(),
        "out",
        metadata("Track Title", "Release Title", "Pop"),
    ))
    .unwrap();

    for file in [
        &manifest.files.audio,
        &manifest.files.cover,
        &manifest.files.metadata_json,
        &manifest.files.metadata_csv,
        &manifest.files.hashes,
        &manifest.files.certificate,
    ] {
        assert!(file.is_file(), "missing {}", file.display());
    }

    let ledger = fs::read_to_string(&manifest.files.hashes).unwrap();
    let lines: Vec<&str> = ledger.lines().collect();
    assert_eq!(lines.len(), 4);
    for line in &lines {
        let (path, hex) = line.rsplit_once("  ").unwrap();
        assert!(!path.is_empty());
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    let csv = fs::read_to_string(&manifest.files.metadata_csv).unwrap();
    assert!(csv.starts_with(
        "primaryArtist,trackTitle,releaseTitle,genre,language,explicit,releaseDate\n"
    ));

    let pdf = fs::read(&manifest.files.certificate).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn identical_inputs_produce_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let a = build(input(dir.path(), "a", metadata("Track", "Release", "Pop"))).unwrap();
    let b = build(input(dir.path(), "b", metadata("Track", "Release", "Pop"))).unwrap();

    assert_eq!(a.hash_lines, b.hash_lines);
    assert_eq!(
        fs::read(&a.files.hashes).unwrap(),
        fs::read(&b.files.hashes).unwrap()
    );
    assert_eq!(
        fs::read(&a.files.certificate).unwrap(),
        fs::read(&b.files.certificate).unwrap()
    );
}

#[test]
fn ledger_digests_match_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = build(input(dir.path(), "out", metadata("Track", "Release", "Pop"))).unwrap();
    let ledger = fs::read_to_string(&manifest.files.hashes).unwrap();

    let first = ledger.lines().next().unwrap();
    assert_eq!(
        first,
        format!("Masters/01 - Track.wav  {}", sha256_hex(b"dummy-audio"))
    );
    for line in ledger.lines() {
        let (path, hex) = line.rsplit_once("  ").unwrap();
        let bytes = fs::read(manifest.root_path.join(path)).unwrap();
        assert_eq!(hex, sha256_hex(&bytes));
    }
}

#[test]
fn reserved_characters_are_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = build(input(
        dir.path(),
        "out",
        metadata(r#"A\B/C:D*E?F"G<H>I|J"#, "Best: Of / All", "Pop"),
    ))
    .unwrap();

    assert_eq!(
        manifest.root_path.file_name().unwrap(),
        "Best- Of - All - 20250101-120000"
    );
    assert_eq!(
        manifest.files.audio.file_name().unwrap(),
        "01 - A-B-C-D-E-F-G-H-I-J.wav"
    );
}

#[test]
fn missing_cover_leaves_partial_pack() {
    let dir = tempfile::tempdir().unwrap();
    let mut input = input(dir.path(), "out", metadata("Track", "Release", "Pop"));
    input.cover_path = dir.path().join("missing.png");
    let root = input
        .output_directory
        .join("Release - 20250101-120000");

    let err = build(input).unwrap_err();
    assert!(matches!(err, PackError::Io { op: IoOp::Copy, .. }));
    assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    assert!(root.join("Masters").join("01 - Track.wav").is_file());
    assert!(!root.join("Evidence").join("sha256.txt").exists());
}

#[test]
fn comma_in_genre_is_quoted_in_csv() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = build(input(
        dir.path(),
        "out",
        metadata("Track", "Release", "Pop, Rock"),
    ))
    .unwrap();
    let csv = fs::read_to_string(&manifest.files.metadata_csv).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert_eq!(
        row,
        "Artist,Track,Release,\"Pop, Rock\",English,false,2025-01-01"
    );
}

#[test]
fn fresh_pack_verifies_and_detects_tampering() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = build(input(dir.path(), "out", metadata("Track", "Release", "Pop"))).unwrap();

    let report = verify_pack(&manifest.root_path).unwrap();
    assert!(report.is_intact());
    assert_eq!(report.entries.len(), 4);

    fs::write(&manifest.files.metadata_json, b"{}").unwrap();
    fs::remove_file(&manifest.files.cover).unwrap();

    let report = verify_pack(&manifest.root_path).unwrap();
    assert!(!report.is_intact());
    let statuses: Vec<&EntryStatus> = report.entries.iter().map(|e| &e.status).collect();
    assert_eq!(statuses[0], &EntryStatus::Match);
    assert_eq!(statuses[1], &EntryStatus::Missing);
    assert!(matches!(statuses[2], EntryStatus::Mismatch { .. }));
    assert_eq!(statuses[3], &EntryStatus::Match);
}

#[test]
fn wiped_ledger_does_not_verify() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = build(input(dir.path(), "out", metadata("Track", "Release", "Pop"))).unwrap();

    fs::write(&manifest.files.audio, b"TAMPERED").unwrap();
    fs::write(&manifest.files.hashes, "").unwrap();
    assert!(matches!(
        verify_pack(&manifest.root_path),
        Err(VerifyError::EmptyLedger { .. })
    ));
}

#[test]
fn ledger_missing_an_artifact_does_not_verify() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = build(input(dir.path(), "out", metadata("Track", "Release", "Pop"))).unwrap();

    fs::write(&manifest.files.audio, b"TAMPERED").unwrap();
    let ledger = fs::read_to_string(&manifest.files.hashes).unwrap();
    let without_audio: Vec<&str> = ledger
        .lines()
        .filter(|line| !line.starts_with("Masters/"))
        .collect();
    fs::write(&manifest.files.hashes, without_audio.join("\n")).unwrap();

    match verify_pack(&manifest.root_path) {
        Err(VerifyError::Incomplete { missing }) => {
            assert_eq!(missing, vec!["Masters/<audio>".to_string()])
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

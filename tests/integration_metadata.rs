//! Integration tests for metadata extraction and the authenticity verdict.
//!
//! Each test writes a real TIFF file carrying EXIF fields, so the full
//! decode path through kamadak-exif is exercised:
//! - GPS derivation and the map link
//! - Missing and malformed GPS tags
//! - Files with no metadata at all
//! - Repeatability

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image_scanner::core::authenticity::is_likely_synthetic;
use image_scanner::core::metadata::{
    extract_metadata, LocationStatus, MetadataValue, GPS_STATUS_KEY, LATITUDE_KEY,
    LONGITUDE_KEY, MAPS_LOCATION_KEY,
};
use image_scanner::error::MetadataError;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

fn ascii(s: &str) -> Value {
    Value::Ascii(vec![s.as_bytes().to_vec()])
}

fn dms(d: u32, m: u32, s: u32) -> Value {
    Value::Rational(vec![
        Rational { num: d, denom: 1 },
        Rational { num: m, denom: 1 },
        Rational { num: s, denom: 1 },
    ])
}

/// Write a TIFF containing only the given EXIF fields
fn write_tiff(dir: &TempDir, name: &str, fields: &[Field]) -> PathBuf {
    let mut writer = Writer::new();
    for f in fields {
        writer.push_field(f);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();

    let path = dir.path().join(name);
    File::create(&path)
        .unwrap()
        .write_all(buf.get_ref())
        .unwrap();
    path
}

fn camera_fields() -> Vec<Field> {
    vec![
        field(Tag::Make, ascii("Canon")),
        field(Tag::Model, ascii("Canon EOS R5")),
        field(Tag::DateTimeOriginal, ascii("2024:06:01 12:30:00")),
        field(Tag::FocalLength, Value::Rational(vec![Rational { num: 50, denom: 1 }])),
        field(Tag::PhotographicSensitivity, Value::Short(vec![200])),
    ]
}

fn gps_fields(lat_ref: &str, lon_ref: &str) -> Vec<Field> {
    vec![
        field(Tag::GPSLatitudeRef, ascii(lat_ref)),
        field(Tag::GPSLatitude, dms(10, 0, 0)),
        field(Tag::GPSLongitudeRef, ascii(lon_ref)),
        field(Tag::GPSLongitude, dms(20, 0, 0)),
    ]
}

#[test]
fn gps_tags_produce_signed_location_and_map_link() {
    let dir = TempDir::new().unwrap();
    let mut fields = camera_fields();
    fields.extend(gps_fields("S", "E"));
    let path = write_tiff(&dir, "trip.tiff", &fields);

    let metadata = extract_metadata(&path).unwrap();

    let location = metadata.location().expect("location should be derived");
    assert_eq!(location.latitude, -10.0);
    assert_eq!(location.longitude, 20.0);
    assert_eq!(location.maps_url, "https://maps.google.com/?q=-10.0,20.0");

    assert_eq!(metadata.tags.get(LATITUDE_KEY), Some(&MetadataValue::Degrees(-10.0)));
    assert_eq!(metadata.tags.get(LONGITUDE_KEY), Some(&MetadataValue::Degrees(20.0)));
    assert_eq!(
        metadata.tags.get(MAPS_LOCATION_KEY).and_then(|v| v.as_text()),
        Some("https://maps.google.com/?q=-10.0,20.0")
    );

    // Raw GPS tags are kept alongside the derived ones
    assert!(metadata.tags.contains_key("GPS GPSLatitude"));
    assert!(metadata.tags.contains_key("GPS GPSLongitudeRef"));
}

#[test]
fn northern_western_hemispheres() {
    let dir = TempDir::new().unwrap();
    let path = write_tiff(&dir, "nw.tiff", &gps_fields("N", "W"));

    let location = extract_metadata(&path).unwrap().location().cloned().unwrap();

    assert_eq!(location.latitude, 10.0);
    assert_eq!(location.longitude, -20.0);
}

#[test]
fn camera_tags_use_group_prefixed_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_tiff(&dir, "camera.tiff", &camera_fields());

    let metadata = extract_metadata(&path).unwrap();

    assert_eq!(metadata.tags.get("Image Make").and_then(|v| v.as_text()), Some("Canon"));
    assert_eq!(
        metadata.tags.get("Image Model").and_then(|v| v.as_text()),
        Some("Canon EOS R5")
    );
    assert_eq!(
        metadata.tags.get("EXIF DateTimeOriginal").and_then(|v| v.as_text()),
        Some("2024:06:01 12:30:00")
    );
    assert!(metadata.tags.contains_key("EXIF FocalLength"));
    assert!(metadata.tags.contains_key("EXIF PhotographicSensitivity"));
    assert!(!is_likely_synthetic(&metadata.tags));
}

#[test]
fn no_gps_reports_missing_without_derived_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_tiff(&dir, "indoor.tiff", &camera_fields());

    let metadata = extract_metadata(&path).unwrap();

    match metadata.location {
        LocationStatus::Missing { ref missing } => assert_eq!(missing.len(), 4),
        ref other => panic!("expected missing location, got {:?}", other),
    }
    for key in [LATITUDE_KEY, LONGITUDE_KEY, MAPS_LOCATION_KEY] {
        assert!(!metadata.tags.contains_key(key));
    }

    let display = metadata.display_map();
    assert!(display.contains_key(GPS_STATUS_KEY));
    assert!(display.contains_key("Image Make"));
    assert_eq!(display.len(), metadata.tags.len() + 1);
}

#[test]
fn one_missing_gps_tag_adds_nothing() {
    let dir = TempDir::new().unwrap();
    let mut fields = camera_fields();
    fields.extend(
        gps_fields("N", "E")
            .into_iter()
            .filter(|f| f.tag != Tag::GPSLongitudeRef),
    );
    let path = write_tiff(&dir, "partial.tiff", &fields);

    let metadata = extract_metadata(&path).unwrap();

    assert_eq!(
        metadata.location,
        LocationStatus::Missing {
            missing: vec!["GPS GPSLongitudeRef".to_string()]
        }
    );
    assert!(!metadata.tags.contains_key(LATITUDE_KEY));
}

#[test]
fn malformed_gps_keeps_other_tags() {
    let dir = TempDir::new().unwrap();
    let mut fields = camera_fields();
    fields.extend([
        field(Tag::GPSLatitudeRef, ascii("N")),
        field(
            Tag::GPSLatitude,
            Value::Rational(vec![
                Rational { num: 10, denom: 0 },
                Rational { num: 0, denom: 1 },
                Rational { num: 0, denom: 1 },
            ]),
        ),
        field(Tag::GPSLongitudeRef, ascii("E")),
        field(Tag::GPSLongitude, dms(20, 0, 0)),
    ]);
    let path = write_tiff(&dir, "broken_gps.tiff", &fields);

    let metadata = extract_metadata(&path).unwrap();

    assert!(matches!(metadata.location, LocationStatus::Invalid { .. }));
    assert_eq!(metadata.tags.get("Image Make").and_then(|v| v.as_text()), Some("Canon"));
    assert!(!metadata.tags.contains_key(LATITUDE_KEY));
    assert!(metadata.display_map().contains_key("GPS Error"));
}

#[test]
fn file_without_exif_has_no_tags_and_is_synthetic() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("render.png");
    File::create(&path)
        .unwrap()
        .write_all(&[
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG header
            0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1
            0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49,
            0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8, 0xFF, 0xFF, 0x3F, 0x00, 0x05, 0xFE, 0x02,
            0xFE, 0xDC, 0xCC, 0x59, 0xE7, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
            0x42, 0x60, 0x82,
        ])
        .unwrap();

    let metadata = extract_metadata(&path).unwrap();

    assert!(metadata.tags.is_empty());
    assert!(is_likely_synthetic(&metadata.tags));
}

#[test]
fn sparse_metadata_is_synthetic() {
    let dir = TempDir::new().unwrap();
    let path = write_tiff(
        &dir,
        "edited.tiff",
        &[
            field(Tag::Make, ascii("Canon")),
            field(Tag::Software, ascii("Image Generator 2.0")),
        ],
    );

    let metadata = extract_metadata(&path).unwrap();

    assert!(!metadata.tags.is_empty());
    assert!(is_likely_synthetic(&metadata.tags));
}

#[test]
fn extraction_is_repeatable() {
    let dir = TempDir::new().unwrap();
    let mut fields = camera_fields();
    fields.extend(gps_fields("S", "W"));
    let path = write_tiff(&dir, "repeat.tiff", &fields);

    let first = extract_metadata(&path).unwrap();
    let second = extract_metadata(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_file_is_an_error_not_an_empty_map() {
    let result = extract_metadata(Path::new("/nonexistent/dir/photo.jpg"));
    assert!(matches!(result, Err(MetadataError::Open { .. })));
}

#[test]
fn verdict_follows_provenance_count() {
    let dir = TempDir::new().unwrap();
    let two_missing: Vec<Field> = camera_fields().into_iter().take(3).collect();
    let three_missing: Vec<Field> = camera_fields().into_iter().take(2).collect();

    let keep = write_tiff(&dir, "two_missing.tiff", &two_missing);
    let flip = write_tiff(&dir, "three_missing.tiff", &three_missing);

    let keep = extract_metadata(&keep).unwrap();
    let flip = extract_metadata(&flip).unwrap();

    assert!(!is_likely_synthetic(&keep.tags));
    assert!(is_likely_synthetic(&flip.tags));
}

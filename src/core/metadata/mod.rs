//! # Metadata Module
//!
//! Extracts every embedded EXIF tag from an image file and derives a
//! geographic location from the GPS tags when all four are present.
//!
//! ## Tag Keys
//! Keys are `<group> <TagName>`, where the group follows the IFD the tag
//! was found in: `Image`, `Thumbnail`, `EXIF`, `GPS`, `Interoperability`.
//! For example `Image Make`, `EXIF DateTimeOriginal`, `GPS GPSLatitude`.
//!
//! ## Derived Keys
//! When latitude, longitude and both hemisphere references are present and
//! well formed, three keys are appended: `GPS Latitude`, `GPS Longitude`
//! and `Google Maps Location`. The reason for their absence is reported
//! through [`LocationStatus`], never mixed into the tag map itself.
//!
//! ## Supported Formats
//! Anything kamadak-exif reads from a container: JPEG, TIFF, PNG, WebP and
//! HEIF. Files without an EXIF block produce an empty map.

mod map;

pub use map::{MetadataMap, MetadataValue};

use crate::core::geo::{self, GeoLocation, RationalTriple};
use crate::error::{ConversionError, MetadataError};
use exif::{Context, Exif, Field, In, Reader, Tag, Value};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Derived decimal latitude
pub const LATITUDE_KEY: &str = "GPS Latitude";
/// Derived decimal longitude
pub const LONGITUDE_KEY: &str = "GPS Longitude";
/// Derived map link
pub const MAPS_LOCATION_KEY: &str = "Google Maps Location";
/// Display-only entry explaining why no location was derived
pub const GPS_STATUS_KEY: &str = "GPS Status";
/// Display-only entry carrying a GPS conversion failure
pub const GPS_ERROR_KEY: &str = "GPS Error";

const GPS_LATITUDE: &str = "GPS GPSLatitude";
const GPS_LATITUDE_REF: &str = "GPS GPSLatitudeRef";
const GPS_LONGITUDE: &str = "GPS GPSLongitude";
const GPS_LONGITUDE_REF: &str = "GPS GPSLongitudeRef";

/// Outcome of GPS derivation for one image
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocationStatus {
    /// All four GPS tags were present and converted
    Found(GeoLocation),
    /// At least one of the four GPS tags was absent
    Missing { missing: Vec<String> },
    /// The GPS tags were present but malformed
    Invalid { reason: String },
}

impl LocationStatus {
    pub fn location(&self) -> Option<&GeoLocation> {
        match self {
            LocationStatus::Found(location) => Some(location),
            _ => None,
        }
    }
}

/// Everything extracted from one image's embedded metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageMetadata {
    /// Decoded tags plus the derived location keys, if any
    pub tags: MetadataMap,
    /// Result of GPS derivation
    pub location: LocationStatus,
}

impl ImageMetadata {
    pub fn location(&self) -> Option<&GeoLocation> {
        self.location.location()
    }

    /// Tags plus a status entry when no location could be derived.
    ///
    /// Meant for display only; heuristics should look at `tags`.
    pub fn display_map(&self) -> MetadataMap {
        let mut map = self.tags.clone();
        match &self.location {
            LocationStatus::Found(_) => {}
            LocationStatus::Missing { .. } => {
                map.insert(GPS_STATUS_KEY, "GPS tags not found");
            }
            LocationStatus::Invalid { reason } => {
                map.insert(GPS_ERROR_KEY, format!("Failed to parse GPS info: {}", reason));
            }
        }
        map
    }
}

/// Raw GPS values needed for location derivation
#[derive(Debug, Default, Clone, Copy)]
pub struct GpsTags<'a> {
    pub latitude: Option<&'a Value>,
    pub latitude_ref: Option<&'a Value>,
    pub longitude: Option<&'a Value>,
    pub longitude_ref: Option<&'a Value>,
}

impl<'a> GpsTags<'a> {
    /// Look up the four GPS tags in the primary IFD
    pub fn from_exif(exif: &'a Exif) -> Self {
        Self {
            latitude: primary_value(exif, Tag::GPSLatitude),
            latitude_ref: primary_value(exif, Tag::GPSLatitudeRef),
            longitude: primary_value(exif, Tag::GPSLongitude),
            longitude_ref: primary_value(exif, Tag::GPSLongitudeRef),
        }
    }

    /// Names of the tags that are absent
    pub fn missing(&self) -> Vec<String> {
        [
            (GPS_LATITUDE, self.latitude.is_none()),
            (GPS_LATITUDE_REF, self.latitude_ref.is_none()),
            (GPS_LONGITUDE, self.longitude.is_none()),
            (GPS_LONGITUDE_REF, self.longitude_ref.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| name.to_string())
        .collect()
    }
}

fn primary_value(exif: &Exif, tag: Tag) -> Option<&Value> {
    exif.get_field(tag, In::PRIMARY).map(|field| &field.value)
}

/// Derive a location from the raw GPS tags.
///
/// Conversion failures are reported as [`LocationStatus::Invalid`]
/// rather than returned as errors, so the rest of the metadata survives.
pub fn derive_location(gps: &GpsTags<'_>) -> LocationStatus {
    let (Some(latitude), Some(latitude_ref), Some(longitude), Some(longitude_ref)) =
        (gps.latitude, gps.latitude_ref, gps.longitude, gps.longitude_ref)
    else {
        tracing::debug!("GPS tags not found, no location available");
        return LocationStatus::Missing {
            missing: gps.missing(),
        };
    };

    tracing::debug!(?latitude, ?latitude_ref, ?longitude, ?longitude_ref, "GPS tags found");

    match resolve_location(latitude, latitude_ref, longitude, longitude_ref) {
        Ok(location) => {
            tracing::debug!(url = %location.maps_url, "Location found");
            LocationStatus::Found(location)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to parse GPS info");
            LocationStatus::Invalid {
                reason: e.to_string(),
            }
        }
    }
}

fn resolve_location(
    latitude: &Value,
    latitude_ref: &Value,
    longitude: &Value,
    longitude_ref: &Value,
) -> Result<GeoLocation, ConversionError> {
    let lat = geo::convert_to_decimal_degrees(&rational_triple(latitude, GPS_LATITUDE)?)?;
    let lon = geo::convert_to_decimal_degrees(&rational_triple(longitude, GPS_LONGITUDE)?)?;

    let lat = geo::apply_hemisphere(lat, hemisphere(latitude_ref, GPS_LATITUDE_REF)?, 'N');
    let lon = geo::apply_hemisphere(lon, hemisphere(longitude_ref, GPS_LONGITUDE_REF)?, 'E');

    Ok(GeoLocation::new(lat, lon))
}

fn rational_triple(value: &Value, tag: &'static str) -> Result<RationalTriple, ConversionError> {
    match value {
        Value::Rational(vec) => RationalTriple::from_rationals(vec),
        _ => Err(ConversionError::UnexpectedValue { tag }),
    }
}

/// First character of an ASCII hemisphere reference
fn hemisphere(value: &Value, tag: &'static str) -> Result<char, ConversionError> {
    match value {
        Value::Ascii(vec) => vec
            .first()
            .and_then(|bytes| bytes.first())
            .map(|b| *b as char)
            .ok_or(ConversionError::EmptyReference { tag }),
        _ => Err(ConversionError::UnexpectedValue { tag }),
    }
}

/// Extract all embedded metadata from an image file.
///
/// Failing to open or read the file is fatal. A missing or undecodable EXIF
/// block yields an empty tag map, and GPS problems are reported through
/// [`ImageMetadata::location`].
pub fn extract_metadata(path: &Path) -> Result<ImageMetadata, MetadataError> {
    let Some(exif) = read_exif(path)? else {
        return Ok(ImageMetadata {
            tags: MetadataMap::new(),
            location: derive_location(&GpsTags::default()),
        });
    };

    let mut tags = collect_tags(&exif);
    let location = derive_location(&GpsTags::from_exif(&exif));

    if let LocationStatus::Found(ref loc) = location {
        tags.insert(LATITUDE_KEY, MetadataValue::Degrees(loc.latitude));
        tags.insert(LONGITUDE_KEY, MetadataValue::Degrees(loc.longitude));
        tags.insert(MAPS_LOCATION_KEY, MetadataValue::Link(loc.maps_url.clone()));
    }

    Ok(ImageMetadata { tags, location })
}

/// Read the EXIF block, returning `None` when the file has none
fn read_exif(path: &Path) -> Result<Option<Exif>, MetadataError> {
    let file = File::open(path).map_err(|source| MetadataError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bufreader = BufReader::new(file);
    match Reader::new().read_from_container(&mut bufreader) {
        Ok(exif) => Ok(Some(exif)),
        Err(exif::Error::Io(source)) => Err(MetadataError::Read {
            path: path.to_path_buf(),
            source,
        }),
        Err(exif::Error::NotFound(_)) => {
            tracing::debug!(path = %path.display(), "No EXIF data");
            Ok(None)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Skipping undecodable EXIF data");
            Ok(None)
        }
    }
}

/// Decode every field into a string-valued map entry
pub fn collect_tags(exif: &Exif) -> MetadataMap {
    let mut tags = MetadataMap::new();
    for field in exif.fields() {
        let value = get_string_value(&field.value)
            .unwrap_or_else(|| field.display_value().with_unit(exif).to_string());
        tags.insert(tag_key(field), value);
    }
    tags
}

/// Build the `<group> <TagName>` key for a field
pub fn tag_key(field: &Field) -> String {
    let group = match field.tag.context() {
        Context::Exif => "EXIF",
        Context::Gps => "GPS",
        Context::Interop => "Interoperability",
        _ => "Image",
    };

    if field.ifd_num == In::PRIMARY {
        format!("{} {}", group, field.tag)
    } else if group == "Image" {
        format!("Thumbnail {}", field.tag)
    } else {
        format!("Thumbnail {} {}", group, field.tag)
    }
}

/// Helper to extract string from EXIF ASCII value
fn get_string_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        let bytes = vec.first().map(Vec::as_slice).unwrap_or_default();
        let s = String::from_utf8_lossy(bytes);
        return Some(s.trim_end_matches('\0').trim().to_string());
    }
    None
}

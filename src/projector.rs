//! Projection of raw provider records into OPDS publications.
//!
//! The projector is the crosswalk between arbitrary provider data and the
//! typed document model: for each canonical field understood by the
//! [`Metadata`]/[`Link`] schema it asks the provider's
//! [`ItemMapping`](crate::ItemMapping) to resolve a value, then assembles a
//! [`Publication`] from the results.
//!
//! A record without a usable title never becomes a publication: the
//! single-record [`project`] fails with
//! [`OpdsError::MissingTitle`](crate::OpdsError::MissingTitle), while the
//! batch [`project_all`] skips the record and reports the count in
//! [`Projection::skipped`]. Every other field is optional — a per-field miss
//! leaves that field absent and the projection proceeds with partial
//! metadata.
//!
//! # Examples
//!
//! ```
//! use opds2::{projector, ItemMapping};
//! use serde_json::json;
//!
//! # fn main() -> opds2::Result<()> {
//! let mapping = ItemMapping::builder()
//!     .field("title", |item| item.get("title").cloned())
//!     .field("author", |item| item.get("author_names").cloned())
//!     .build()?;
//!
//! let record = json!({"title": "Dune", "author_names": ["Frank Herbert"]});
//! let publication = projector::project(&record, &mapping)?;
//! assert_eq!(publication.metadata.title, "Dune");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::error::{OpdsError, Result};
use crate::mapping::ItemMapping;
use crate::model::{
    Contributor, Link, Metadata, Publication, ACQUISITION_REL, IMAGE_REL, THUMBNAIL_REL,
};

/// Result of projecting a batch of records.
#[derive(Debug)]
pub struct Projection {
    /// Successfully projected publications, in input order
    pub publications: Vec<Publication>,
    /// Number of records skipped for lacking a usable title
    pub skipped: usize,
}

/// Project a single raw record into a publication.
///
/// # Errors
///
/// Returns [`OpdsError::MissingTitle`] if the mapping resolves no title for
/// the record, or resolves one that is empty or whitespace-only. A record is
/// never silently accepted with an empty title.
pub fn project(record: &Value, mapping: &ItemMapping) -> Result<Publication> {
    let title = mapping
        .resolve("name", record)
        .as_ref()
        .and_then(string_value)
        .ok_or_else(|| {
            OpdsError::MissingTitle("record resolved no usable title".to_string())
        })?;

    let mut metadata = Metadata::new(title)?;
    extract_descriptive(record, mapping, &mut metadata);
    extract_contributors(record, mapping, &mut metadata);
    extract_dates(record, mapping, &mut metadata);
    extract_subjects(record, mapping, &mut metadata);

    Ok(Publication {
        metadata,
        links: extract_acquisition(record, mapping),
        images: extract_images(record, mapping),
    })
}

/// Project a batch of raw records, preserving input order.
///
/// Records whose projection fails are skipped and counted in
/// [`Projection::skipped`]; one bad record never aborts the batch.
#[must_use]
pub fn project_all(records: &[Value], mapping: &ItemMapping) -> Projection {
    let mut publications = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for record in records {
        match project(record, mapping) {
            Ok(publication) => publications.push(publication),
            Err(_) => skipped += 1,
        }
    }

    Projection {
        publications,
        skipped,
    }
}

fn extract_descriptive(record: &Value, mapping: &ItemMapping, metadata: &mut Metadata) {
    metadata.identifier = mapping
        .resolve("identifier", record)
        .as_ref()
        .and_then(string_value);
    metadata.description = mapping
        .resolve("description", record)
        .as_ref()
        .and_then(string_value);

    if let Some(value) = mapping.resolve("inLanguage", record) {
        let languages = string_list(&value);
        if !languages.is_empty() {
            metadata.language = Some(languages);
        }
    }
}

fn extract_contributors(record: &Value, mapping: &ItemMapping, metadata: &mut Metadata) {
    // Author lists default to the "author" role
    if let Some(value) = mapping.resolve("author", record) {
        let authors = contributors(&value, Some("author"));
        if !authors.is_empty() {
            metadata.author = Some(authors);
        }
    }

    if let Some(value) = mapping.resolve("publisher", record) {
        let publishers = contributors(&value, None);
        if !publishers.is_empty() {
            metadata.publisher = Some(publishers);
        }
    }
}

fn extract_dates(record: &Value, mapping: &ItemMapping, metadata: &mut Metadata) {
    metadata.published = mapping
        .resolve("datePublished", record)
        .as_ref()
        .and_then(parse_datetime);
    metadata.modified = mapping
        .resolve("dateModified", record)
        .as_ref()
        .and_then(parse_datetime);
}

fn extract_subjects(record: &Value, mapping: &ItemMapping, metadata: &mut Metadata) {
    if let Some(value) = mapping.resolve("about", record) {
        let subjects = string_list(&value);
        if !subjects.is_empty() {
            metadata.subject = Some(subjects);
        }
    }
}

// `url` and `encodingFormat` combine into a single acquisition link.
fn extract_acquisition(record: &Value, mapping: &ItemMapping) -> Vec<Link> {
    let Some(href) = mapping.resolve("url", record).as_ref().and_then(string_value) else {
        return Vec::new();
    };

    let mut builder = Link::builder(href).rel(ACQUISITION_REL);
    if let Some(media_type) = mapping
        .resolve("encodingFormat", record)
        .as_ref()
        .and_then(string_value)
    {
        builder = builder.media_type(media_type);
    }

    // An unusable href is a mapping miss, not a projection failure
    builder.build().into_iter().collect()
}

fn extract_images(record: &Value, mapping: &ItemMapping) -> Option<Vec<Link>> {
    let mut images = Vec::new();

    if let Some(href) = mapping.resolve("image", record).as_ref().and_then(string_value) {
        if let Ok(link) = Link::builder(href).rel(IMAGE_REL).build() {
            images.push(link);
        }
    }
    if let Some(href) = mapping
        .resolve("thumbnailUrl", record)
        .as_ref()
        .and_then(string_value)
    {
        if let Ok(link) = Link::builder(href).rel(THUMBNAIL_REL).build() {
            images.push(link);
        }
    }

    if images.is_empty() {
        None
    } else {
        Some(images)
    }
}

fn string_value(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// A single string counts as a one-element list; non-string elements are dropped.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(_) => string_value(value).into_iter().collect(),
        Value::Array(items) => items.iter().filter_map(string_value).collect(),
        _ => Vec::new(),
    }
}

fn contributors(value: &Value, role: Option<&str>) -> Vec<Contributor> {
    string_list(value)
        .into_iter()
        .filter_map(|name| match role {
            Some(role) => Contributor::with_role(name, role).ok(),
            None => Contributor::new(name).ok(),
        })
        .collect()
}

fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime_str(s.trim()),
        Value::Number(n) => n.as_i64().and_then(year_start),
        _ => None,
    }
}

// Accepts RFC 3339, `YYYY-MM-DD`, or a bare year; anything else is absent.
fn parse_datetime_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Some(datetime.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }
    s.parse::<i64>().ok().and_then(year_start)
}

fn year_start(year: i64) -> Option<DateTime<Utc>> {
    let year = i32::try_from(year).ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

//! Feed configuration
//!
//! A feed describes one input shape: delimiter, header convention, column
//! mapping, field types, and the destination measurement. Definitions are
//! YAML, either built in (`pressure`, `weather-station`) or loaded from a
//! file path.

mod builtin;
mod types;

pub use builtin::{get_builtin, is_builtin, list_builtin, BUILTIN_FEEDS};
pub use types::{
    ColumnsDef, Delimiter, FeedDefinition, FieldType, StaticMetadata, TimestampSpec,
};

use crate::decode::TableDecoder;
use crate::error::{Error, Result};
use crate::metadata::{resolve_offset, SensorMetadata};
use crate::sink::Destination;
use std::path::Path;

/// Field recording the source clock's offset, appended to every record so
/// the original local time can be reconstructed from the store.
pub const UTC_OFFSET_FIELD: &str = "utc_offset";

/// Load a feed definition by built-in name or file path
pub fn load_feed(name_or_path: &str) -> Result<FeedDefinition> {
    if let Some(yaml) = get_builtin(name_or_path) {
        return load_feed_from_str(yaml);
    }

    let path = Path::new(name_or_path);
    if !path.exists() {
        return Err(Error::feed(format!(
            "'{name_or_path}' is neither a built-in feed ({}) nor an existing file",
            list_builtin().join(", ")
        )));
    }

    let contents = std::fs::read_to_string(path)?;
    load_feed_from_str(&contents)
}

/// Parse and validate a feed definition from YAML text
pub fn load_feed_from_str(yaml: &str) -> Result<FeedDefinition> {
    let feed: FeedDefinition = serde_yaml::from_str(yaml)?;
    validate(&feed)?;
    Ok(feed)
}

/// Validate internal consistency of a feed definition
fn validate(feed: &FeedDefinition) -> Result<()> {
    if feed.measurement.is_empty() {
        return Err(Error::feed("measurement must not be empty"));
    }
    if feed.fields.is_empty() {
        return Err(Error::feed("at least one field must be declared"));
    }
    if feed.tags.is_empty() {
        return Err(Error::feed("at least one tag column must be declared"));
    }

    // Required fields must be declared fields.
    for required in &feed.required {
        if !feed.fields.contains_key(required) {
            return Err(Error::feed(format!(
                "required field '{required}' is not declared in fields"
            )));
        }
    }

    // Every rename target must be a declared field.
    for (source, target) in &feed.columns.rename {
        if !feed.fields.contains_key(target) {
            return Err(Error::feed(format!(
                "column '{source}' renames to undeclared field '{target}'"
            )));
        }
    }

    // Timestamp columns cannot also be renamed or dropped.
    for ts_column in feed.timestamp.columns() {
        if feed.columns.rename.contains_key(ts_column)
            || feed.columns.drop.iter().any(|c| c == ts_column)
        {
            return Err(Error::feed(format!(
                "timestamp column '{ts_column}' also appears in the column mapping"
            )));
        }
    }

    // Headerless feeds need their metadata from somewhere.
    if !feed.metadata_header {
        match &feed.static_metadata {
            Some(meta) => {
                resolve_offset(&meta.utc_offset)?;
            }
            None => {
                return Err(Error::feed(
                    "feeds without a metadata header require static_metadata",
                ));
            }
        }
    }

    Ok(())
}

impl FeedDefinition {
    /// Table decoder configured for this feed's delimiter
    pub fn decoder(&self) -> TableDecoder {
        TableDecoder::new(self.delimiter.as_char())
    }

    /// Resolve the fixed metadata of a headerless feed
    pub fn resolve_static_metadata(&self) -> Result<Option<SensorMetadata>> {
        self.static_metadata
            .as_ref()
            .map(|meta| {
                Ok(SensorMetadata {
                    position: meta.position.clone(),
                    model: meta.model.clone(),
                    utc_offset_hours: resolve_offset(&meta.utc_offset)?,
                })
            })
            .transpose()
    }

    /// Destination descriptor for the chunked writer
    pub fn destination(&self) -> Destination {
        let mut field_columns: Vec<String> = self.fields.keys().cloned().collect();
        field_columns.push(UTC_OFFSET_FIELD.to_string());
        Destination {
            measurement: self.measurement.clone(),
            database: self.database.clone(),
            tag_columns: self.tags.clone(),
            field_columns,
        }
    }
}

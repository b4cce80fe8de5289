//! JSON export functionality
//!
//! Wraps any serializable result in a versioned envelope.

use std::io::Write;

use serde::Serialize;

use crate::AnalyticsError;

pub const EXPORT_VERSION: &str = "1.0.0";

/// Complete export structure for JSON
#[derive(Debug, Clone, Serialize)]
pub struct ExportEnvelope<T: Serialize> {
    pub export_date: String,
    pub export_version: &'static str,
    pub payload: T,
}

impl<T: Serialize> ExportEnvelope<T> {
    pub fn new(payload: T) -> Self {
        Self {
            export_date: chrono::Utc::now().to_rfc3339(),
            export_version: EXPORT_VERSION,
            payload,
        }
    }
}

/// Write a payload as pretty-printed JSON inside an export envelope
pub fn write_json<W: Write, T: Serialize>(payload: &T, mut writer: W) -> Result<(), AnalyticsError> {
    let envelope = ExportEnvelope::new(payload);
    serde_json::to_writer_pretty(&mut writer, &envelope)?;
    writer.flush()?;
    Ok(())
}

//! CSV export functionality
//!
//! Provides CSV serialization for rolled-up nodes and target buckets.

use std::io::Write;

use csv::Writer;
use serde::Serialize;

use super::{ExportableBucket, ExportableNode};
use crate::AnalyticsError;

/// Serialize records with a header row taken from the field names
fn write_records<W: Write, T: Serialize>(records: &[T], writer: W) -> Result<(), AnalyticsError> {
    let mut writer = Writer::from_writer(writer);

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write node records to CSV format
pub fn write_nodes_csv<W: Write>(nodes: &[ExportableNode], writer: W) -> Result<(), AnalyticsError> {
    write_records(nodes, writer)
}

/// Write target buckets to CSV format
pub fn write_buckets_csv<W: Write>(buckets: &[ExportableBucket], writer: W) -> Result<(), AnalyticsError> {
    write_records(buckets, writer)
}

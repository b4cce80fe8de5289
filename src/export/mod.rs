//! Export module for CSV and JSON export functionality
//!
//! Flattens rolled-up groups and target buckets into records and writes
//! them as CSV or as a versioned JSON document.

pub mod csv_export;
pub mod json_export;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AggregateNode, TargetBucket};
use crate::rollup::{CoordinatedGroup, RolledUpGroup};
use crate::AnalyticsError;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(AnalyticsError::Export(format!(
                "Invalid export format: {}. Use 'csv' or 'json'",
                s
            ))),
        }
    }
}

impl ExportFormat {
    /// Get file extension for format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Exportable node record for CSV/JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportableNode {
    pub group: String,
    pub key: String,
    pub total: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub is_other: bool,
}

impl ExportableNode {
    pub fn from_node(group: &str, node: &AggregateNode) -> Self {
        Self {
            group: group.to_string(),
            key: node.key.clone(),
            total: node.total,
            avg: node.avg,
            min: node.min,
            max: node.max,
            is_other: node.is_other(),
        }
    }

    /// Records of a rolled-up group, leaders first
    pub fn from_group(group: &str, rolled: &RolledUpGroup) -> Vec<Self> {
        rolled.nodes().map(|n| Self::from_node(group, n)).collect()
    }

    /// Records of every coordinated group, in group order
    pub fn from_coordinated(groups: &[CoordinatedGroup]) -> Vec<Self> {
        groups
            .iter()
            .flat_map(|g| g.nodes.iter().map(move |n| Self::from_node(&g.group, n)))
            .collect()
    }
}

/// Exportable target bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportableBucket {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub amount: f64,
}

impl From<&TargetBucket> for ExportableBucket {
    fn from(bucket: &TargetBucket) -> Self {
        Self {
            from: bucket.from,
            to: bucket.to,
            amount: bucket.amount,
        }
    }
}

/// Get the default export directory (Downloads folder or temp dir)
pub fn get_export_directory() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::document_dir)
        .unwrap_or_else(std::env::temp_dir)
}

/// Generate a timestamped filename for exports
pub fn generate_export_filename(prefix: &str, extension: &str) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    format!("{}_{}.{}", prefix, timestamp, extension)
}

/// Write node records to a timestamped file under `dir` (the default export
/// directory when `None`) and return its path
pub fn export_to_file(
    nodes: &[ExportableNode],
    format: ExportFormat,
    dir: Option<&Path>,
) -> Result<PathBuf, AnalyticsError> {
    let dir = dir.map(Path::to_path_buf).unwrap_or_else(get_export_directory);
    let path = dir.join(generate_export_filename("rollup", format.extension()));

    let writer = BufWriter::new(File::create(&path)?);
    match format {
        ExportFormat::Csv => write_nodes_csv(nodes, writer)?,
        ExportFormat::Json => write_json(&nodes, writer)?,
    }

    tracing::info!("Exported {} nodes to {}", nodes.len(), path.display());
    Ok(path)
}

// Re-export writers
pub use csv_export::*;
pub use json_export::*;

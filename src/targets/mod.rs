//! Target allocation module
//!
//! Handles expected-waste and expected-frequency targets:
//! - Normalizing configured settings to per-day rates
//! - Partitioning a query range by the settings in effect
//! - Pro-rating recurring amounts per bucket

pub mod allocator;
pub mod settings;

pub use allocator::{allocate, expected_total, partition, EffectiveFrom, Span};
pub use settings::{normalize_settings, TargetPeriod, TargetSettingInput};

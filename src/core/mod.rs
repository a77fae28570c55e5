//! Core analysis building blocks: the threshold table, the crop reference
//! database, and the processing stages (statistics, land cover, fusion,
//! outlook). These are internal primitives consumed by the high-level
//! `api` module.
pub mod crops;
pub mod processing;
pub mod thresholds;

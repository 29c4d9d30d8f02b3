//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of exploration results for formatters.

mod report_read_model;
mod report_read_model_builder;
mod tree_view;

pub use report_read_model::{
    ReportMetadataView, ReportReadModel, ReverseView, SettingsView, StatisticsView,
};
pub use report_read_model_builder::ReportReadModelBuilder;
pub use tree_view::{TreeLine, TreeMarker};

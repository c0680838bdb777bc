//! Fetch product images listed in a spreadsheet, rename them by identifier and
//! column position, and package them into fixed-size ZIP batches.

pub mod config;
pub mod logging;

pub mod batch;
pub mod checksum;
pub mod control;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod naming;
pub mod orchestrator;
pub mod report;
pub mod retry;
pub mod sink;
pub mod url_model;

pub use error::PipelineError;

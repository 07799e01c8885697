//! # fin-analyst
//!
//! Ties the workspace together: loads a price history, runs the indicator
//! engine, computes headline metrics and renders a report.
//!
//! - [`ReportConfig`] - JSON-loadable settings for every stage
//! - [`run_report`] and [`Report`] - The end-to-end pipeline
//! - [`init_logging`] - `tracing` subscriber setup for binaries
//!
//! The `fin_report` binary is a thin command-line front end over this crate.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod logging;
pub mod report;

pub use config::{ConfigError, ReportConfig};
pub use logging::{init_logging, LogConfig, LogFormat};
pub use report::{run_report, Report};

//! Serializable run reports.
//!
//! `AssemblyReport` is returned by the pipeline alongside the stored
//! artifacts and written as JSON by the command line tool.

pub mod report;
pub mod timing;

pub use report::{AssemblyReport, GridDescriptor};
pub use timing::{StageTiming, TimingBreakdown};

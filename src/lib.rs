//! `sleep-insights` library crate.
//!
//! A pure, in-process analytics engine that relates daily behaviors (exercise,
//! steps, daylight, workouts, logged habits) to nightly sleep outcomes (sleep
//! score, duration, HRV, ...). For each outcome it fits one multivariate OLS
//! model over all admissible predictors, ranks predictors by statistical
//! significance, and attaches a bucket breakdown for drill-down.
//!
//! The crate is a computational library boundary only:
//!
//! - the data-acquisition layer materializes flat [`domain::DailyRecord`]s
//!   before calling in (no persistence traversal happens here)
//! - the presentation layer consumes the ranked [`domain::AnalysisReport`]
//! - caching belongs to the caller; every entry point is stateless and
//!   re-entrant over an immutable snapshot

pub mod bins;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod pipeline;
pub mod report;

pub use error::AnalysisError;
pub use pipeline::analyze;

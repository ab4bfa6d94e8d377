//! # pricer_risk
//!
//! Batch layer of the early-exercise premium workspace.
//!
//! This crate provides:
//! - Batch pricing of observation rows (`batch`)
//! - Worker pool configuration and chunked parallel maps (`parallel`)
//!
//! ## Architecture
//!
//! pricer_risk sits on top of the numerical crates:
//! - Depends on pricer_core (dates, rate curves, country tables)
//! - Depends on pricer_models (kernel, implied vol, dividends, row model)
//! - Depends on pricer_pricing (finite-difference solver, EEP engine)
//!
//! ## Error handling
//!
//! A batch fails only on configuration problems (unknown country, duplicate
//! row identity, invalid engine settings). Rows with missing or undefined
//! inputs get `None` outputs and are counted in the [`batch::BatchReport`].

pub mod batch;
pub mod parallel;

pub use batch::{BatchConfig, BatchError, BatchOutput, BatchPricer, BatchReport};
pub use parallel::ParallelConfig;

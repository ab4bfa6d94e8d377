//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod american;
pub mod check;
pub mod implied_vol;
pub mod price;

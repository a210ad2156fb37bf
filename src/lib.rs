//! Weekly signup cohorts and the orders their customers placed in the weeks
//! after signing up.
//!
//! The flow is `input` → `index` → `partition` → `aggregate` → `report`, with
//! `pipeline::run` wiring it together for the command line.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod index;
pub mod input;
pub mod models;
pub mod partition;
pub mod pipeline;
pub mod report;
pub mod timezone;

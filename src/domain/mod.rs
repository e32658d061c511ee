//! Domain - Pure Data Structures
//!
//! These types carry no I/O and represent the model's data contract.

pub mod config;
pub mod query;
pub mod record;

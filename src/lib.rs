//! SNAC Grid Remote Model
//!
//! This crate provides the data-loading layer for an incremental search-results
//! grid: a windowed, generation-aware cache of rows fetched on demand from a
//! remote search endpoint. The renderer stays decoupled from fetch timing and
//! subscribes to model events to repaint exactly the rows that changed.

pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod model;
pub mod services;
pub mod utils;

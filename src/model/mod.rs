//! Model Layer
//!
//! The windowed remote model: a sparse row cache plus the loader that keeps
//! it filled for whatever index range the presentation layer is showing.

mod cache;
mod remote_model;

pub use cache::*;
pub use remote_model::*;

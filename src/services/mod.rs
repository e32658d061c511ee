//! Service Layer
//!
//! The service layer abstracts the remote search endpoint behind the
//! `RowFetcher` trait and hosts the tokio runtime bridge used to run fetches
//! from a synchronous UI thread.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     RemoteModel                      │
//! │   (windowed cache, generations, request coalescing)  │
//! └──────────────────────────────────────────────────────┘
//!            │ FetchRequest              ▲ ModelEvent
//!            ▼                           │
//! ┌──────────────────────┐    ┌──────────────────────────┐
//! │ RowFetcher (trait)   │    │      Presentation        │
//! │  └─ HttpFetcher      │    │   (grid renderer, etc.)  │
//! └──────────────────────┘    └──────────────────────────┘
//! ```

mod fetcher;
mod runtime;

pub use fetcher::*;
pub use runtime::*;

//! Venue floor-plan map server.
//!
//! Serves large SVG floor plans to interactive map clients in bounded
//! chunks, and derives filtered shape identifiers plus path-layer geometry
//! from the markup. The pipeline per request: load → parse → extract →
//! chunk → respond; every stage is stateless and request-scoped.

pub mod chunk;
pub mod config;
pub mod error;
pub mod notify;
pub mod server;
pub mod store;
pub mod svg;

pub use error::{MapError, Result};

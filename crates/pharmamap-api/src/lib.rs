//! REST boundary for the PharmaMap API.
//!
//! This crate builds request paths, decodes response bodies into
//! `pharmamap-core` models and decides which in-flight response may still be
//! rendered. It performs no network I/O itself.

pub mod endpoints;
pub mod response;
pub mod sequencing;

pub use endpoints::*;
pub use response::*;
pub use sequencing::*;

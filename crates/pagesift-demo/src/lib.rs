//! # Patron Search Demo
//!
//! A command-line stand-in for a patron-review web service, built on
//! `pagesift`. The binary is thin: `main.rs` only calls [`cli::run`].
//!
//! ```text
//! cli      clap parsing, criteria input, JSON output
//!  │
//! service  PatronService: owns the dataset, shapes PagedResponses
//!  │
//! pagesift Filter::compile + Pager over ExternalPatron
//! ```
//!
//! The dataset comes from [`seed::generate`], which is deterministic for a
//! given count and seed.

pub mod cli;
pub mod logging;
pub mod model;
pub mod seed;
pub mod service;

pub use model::{ExternalPatron, Gender, Status};
pub use service::PatronService;

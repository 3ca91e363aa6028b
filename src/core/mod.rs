//! Core types for dpkg-index
//!
//! This module holds the error taxonomy shared by every layer of the crate:
//! - [`DpkgError`] - Enumerated error types covering all library failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format
//!
//! Library operations return [`Result`]; application code (config loading, CLI)
//! works with [`anyhow::Result`] and converts at the edge.
//!
//! # Example
//!
//! ```rust,no_run
//! use dpkg_index::core::{DpkgError, user_friendly_error};
//!
//! fn lookup() -> anyhow::Result<()> {
//!     Err(DpkgError::MissingParameter { parameter: "name" }.into())
//! }
//!
//! if let Err(e) = lookup() {
//!     user_friendly_error(e).display();
//! }
//! ```

pub mod error;

pub use error::{DpkgError, ErrorContext, Result, user_friendly_error};

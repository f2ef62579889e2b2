//! # netplot-error
//!
//! Unified error handling for netplot.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., IoFailed, InterfaceNotFound)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use netplot_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::InterfaceNotFound, "no such interface")
//!         .with_operation("builder::set_master")
//!         .with_context("interface", "if7"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All functions return `Result<T, netplot_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - Errors are final: renderers and loaders never retry, the caller reports and exits

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using netplot Error
pub type Result<T> = std::result::Result<T, Error>;

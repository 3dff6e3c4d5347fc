//! This crate provides a parsed representation of
//! [IRI references](https://tools.ietf.org/html/rfc3987),
//! as well as functions for validating them,
//! normalizing their percent-encoding,
//! and resolving them against a given base IRI.
//!
//! # Example
//! ```
//! use iri_rfc3987::Iri;
//!
//! let base = Iri::parse("http://example.org/a/b?q#f")?;
//! let iri = base.resolve("../c%7e")?;
//! assert_eq!(iri.to_string(), "http://example.org/c%7e");
//! assert_eq!(iri.normalize_percent_encoding()?.to_string(), "http://example.org/c~");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

mod _authority;
pub use self::_authority::*;
mod _error;
pub use self::_error::*;
mod _iri;
pub use self::_iri::*;
mod _pct;
pub use self::_pct::*;
mod _regex;
pub use self::_regex::*;
pub mod resolve;
pub use self::resolve::{resolve, Resolvable};

#[cfg(feature = "serde")]
mod _serde;

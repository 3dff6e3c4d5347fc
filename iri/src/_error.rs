//! Error and result types for IRI parsing and normalization.

use thiserror::Error;

/// Type alias for `Result` with default error [`ParseError`].
///
/// Can be used like `std::result::Result` as well.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// This error is raised when a text (or a hand-built [`Iri`](crate::Iri))
/// is not a valid IRI reference according to RFC 3987.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// The scheme does not match its grammar.
    #[error("invalid scheme {value:?}: does not match the `{grammar}` production")]
    InvalidScheme {
        /// The offending scheme
        value: String,
        /// The name of the production it was checked against
        grammar: &'static str,
    },
    /// The authority does not match its grammar.
    #[error("invalid authority {value:?}: does not match the `{grammar}` production")]
    InvalidAuthority {
        /// The offending authority
        value: String,
        /// The name of the production it was checked against
        grammar: &'static str,
    },
    /// The path does not match its grammar.
    #[error("invalid path {value:?}: does not match the `{grammar}` production")]
    InvalidPath {
        /// The offending path
        value: String,
        /// The name of the production it was checked against
        grammar: &'static str,
    },
    /// The query does not match its grammar.
    #[error("invalid query {value:?}: does not match the `{grammar}` production")]
    InvalidQuery {
        /// The offending query
        value: String,
        /// The name of the production it was checked against
        grammar: &'static str,
    },
    /// The fragment does not match its grammar.
    #[error("invalid fragment {value:?}: does not match the `{grammar}` production")]
    InvalidFragment {
        /// The offending fragment
        value: String,
        /// The name of the production it was checked against
        grammar: &'static str,
    },
    /// A component contains malformed percent-encoding.
    #[error("invalid percent-encoding: {0}")]
    InvalidEncoding(#[from] EncodingError),
    /// The text could not be split into IRI components at all.
    #[error("{0:?} can not be split into IRI components")]
    NoMatch(String),
}

/// This error is raised when a component contains malformed percent-encoding.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EncodingError {
    /// A `%` is not followed by two hexadecimal digits.
    #[error("malformed percent-encoded octet at byte {offset} of {component:?}")]
    MalformedTriple {
        /// The component containing the offending `%`
        component: String,
        /// The byte offset of the offending `%` in the component
        offset: usize,
    },
    /// A run of percent-encoded octets does not decode to valid UTF-8.
    #[error("percent-encoded sequence {run:?} at byte {offset} is not valid UTF-8")]
    InvalidUtf8 {
        /// The escaped text, from the first invalid octet to the end of its run
        run: String,
        /// The byte offset of `run` in the component
        offset: usize,
    },
}

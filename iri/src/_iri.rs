//! I define [`Iri`], the parsed representation of an IRI reference.
//!
//! This module is transparently reexported by its parent module.

use super::{
    is_valid_authority, is_valid_fragment, is_valid_path, is_valid_query, is_valid_scheme,
    normalize_component, split_iri_ref, split_relative_ref, EncodingError, ParseError,
    RawComponents, Result,
};
use std::fmt;
use std::str::FromStr;

/// An IRI reference (absolute or relative), split into its five components,
/// as per [\[RFC 3987\]](https://tools.ietf.org/html/rfc3987).
///
/// Components other than the scheme and the path can be *absent*
/// (no delimiter at all) or *present but empty*
/// (e.g. the fragment of `http://example.org/#`).
/// Both cases are kept apart, so that [parsing](Iri::parse)
/// then [formatting](fmt::Display) an IRI gives back the original text.
///
/// An `Iri` obtained with [`Iri::parse`] is always valid.
/// An `Iri` built from scratch with the `with_*` methods is not validated;
/// use [`Iri::check`] for that.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Iri {
    scheme: String,
    authority: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Iri {
    /// Parse `txt` as an IRI reference,
    /// checking every component against its grammar,
    /// and checking that percent-encoded octets form valid UTF-8.
    ///
    /// The original escaping is preserved;
    /// see [`Iri::normalize_percent_encoding`] to normalize it.
    pub fn parse(txt: &str) -> Result<Iri> {
        let mut raw = split_iri_ref(txt).ok_or_else(|| ParseError::NoMatch(txt.to_string()))?;
        if let Some(scheme) = raw.scheme {
            if !is_valid_scheme(scheme) {
                // the colon may belong to a path, as in `a:b:c:`
                log::trace!("{scheme:?} is not a scheme, parsing {txt:?} as a relative reference");
                raw = split_relative_ref(txt).ok_or_else(|| ParseError::NoMatch(txt.to_string()))?;
            }
        }
        check_components(&raw)?;
        Ok(Iri {
            scheme: raw.scheme.unwrap_or_default().to_string(),
            authority: raw.authority.map(str::to_string),
            path: raw.path.to_string(),
            query: raw.query.map(str::to_string),
            fragment: raw.fragment.map(str::to_string),
        })
    }

    /// Check that this IRI reference is valid.
    ///
    /// This is done by formatting and re-parsing it.
    /// Additionally, a component that is valid in isolation,
    /// but would be read back differently (e.g. a path containing `?`),
    /// is reported as invalid.
    pub fn check(&self) -> Result<()> {
        let txt = self.to_string();
        let reparsed = Iri::parse(&txt)?;
        if self.scheme.is_empty() && !reparsed.scheme.is_empty() {
            // a colon in the first segment of a schemeless path
            Err(ParseError::InvalidPath {
                value: self.path.clone(),
                grammar: "ipath-noscheme",
            })
        } else if reparsed.scheme != self.scheme {
            Err(ParseError::InvalidScheme {
                value: self.scheme.clone(),
                grammar: "scheme",
            })
        } else if reparsed.authority != self.authority {
            Err(ParseError::InvalidAuthority {
                value: self.authority.clone().unwrap_or_default(),
                grammar: "iauthority",
            })
        } else if reparsed.path != self.path {
            Err(ParseError::InvalidPath {
                value: self.path.clone(),
                grammar: "ipath",
            })
        } else if reparsed.query != self.query {
            Err(ParseError::InvalidQuery {
                value: self.query.clone().unwrap_or_default(),
                grammar: "iquery",
            })
        } else if reparsed.fragment != self.fragment {
            Err(ParseError::InvalidFragment {
                value: self.fragment.clone().unwrap_or_default(),
                grammar: "ifragment",
            })
        } else {
            Ok(())
        }
    }

    /// Return a copy of this IRI reference,
    /// where unnecessarily percent-encoded characters are decoded,
    /// and remaining percent-encoded octets use uppercase hex digits.
    ///
    /// The authority, path, query and fragment are normalized independently.
    /// See [`normalize_component`] for details.
    pub fn normalize_percent_encoding(&self) -> Result<Iri, EncodingError> {
        let normalize_opt = |opt: &Option<String>| -> Result<Option<String>, EncodingError> {
            opt.as_deref()
                .map(|txt| normalize_component(txt).map(Into::into))
                .transpose()
        };
        Ok(Iri {
            scheme: self.scheme.clone(),
            authority: normalize_opt(&self.authority)?,
            path: normalize_component(&self.path)?.into(),
            query: normalize_opt(&self.query)?,
            fragment: normalize_opt(&self.fragment)?,
        })
    }

    /// Same as [`Iri::normalize_percent_encoding`],
    /// but returns an unchanged copy of `self` if its percent-encoding is invalid.
    pub fn normalized_or_self(&self) -> Iri {
        self.normalize_percent_encoding()
            .unwrap_or_else(|_| self.clone())
    }

    /// The scheme of this IRI reference, if any.
    pub fn scheme(&self) -> Option<&str> {
        Some(self.scheme.as_str()).filter(|s| !s.is_empty())
    }

    /// The authority of this IRI reference, if present (possibly empty).
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// The path of this IRI reference (possibly empty).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query of this IRI reference, if present (possibly empty).
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The fragment identifier of this IRI reference, if present (possibly empty).
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Whether this IRI reference has an authority (possibly empty).
    pub fn has_authority(&self) -> bool {
        self.authority.is_some()
    }

    /// Whether this IRI reference has a query (possibly empty).
    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    /// Whether this IRI reference has a fragment identifier (possibly empty).
    pub fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }

    /// Whether this IRI reference is absolute, i.e. has a scheme.
    pub fn is_absolute(&self) -> bool {
        !self.scheme.is_empty()
    }

    /// Replace the scheme. An empty `scheme` removes it.
    pub fn with_scheme<T: Into<String>>(mut self, scheme: T) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Replace the authority. An empty `authority` is kept as present.
    pub fn with_authority<T: Into<String>>(mut self, authority: T) -> Self {
        self.authority = Some(authority.into());
        self
    }

    /// Remove the authority.
    pub fn without_authority(mut self) -> Self {
        self.authority = None;
        self
    }

    /// Replace the path.
    pub fn with_path<T: Into<String>>(mut self, path: T) -> Self {
        self.path = path.into();
        self
    }

    /// Replace the query. An empty `query` is kept as present.
    pub fn with_query<T: Into<String>>(mut self, query: T) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Remove the query.
    pub fn without_query(mut self) -> Self {
        self.query = None;
        self
    }

    /// Replace the fragment identifier. An empty `fragment` is kept as present.
    pub fn with_fragment<T: Into<String>>(mut self, fragment: T) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Remove the fragment identifier.
    pub fn without_fragment(mut self) -> Self {
        self.fragment = None;
        self
    }
}

/// Check each raw component against its grammar, then its percent-encoding.
fn check_components(raw: &RawComponents) -> Result<()> {
    if let Some(scheme) = raw.scheme.filter(|txt| !txt.is_empty()) {
        if !is_valid_scheme(scheme) {
            return Err(ParseError::InvalidScheme {
                value: scheme.to_string(),
                grammar: "scheme",
            });
        }
    }
    let authority = raw.authority.unwrap_or_default();
    if !authority.is_empty() && !is_valid_authority(authority) {
        return Err(ParseError::InvalidAuthority {
            value: authority.to_string(),
            grammar: "iauthority",
        });
    }
    if !raw.path.is_empty() && !is_valid_path(raw.path) {
        return Err(ParseError::InvalidPath {
            value: raw.path.to_string(),
            grammar: "ipath",
        });
    }
    let query = raw.query.unwrap_or_default();
    if !query.is_empty() && !is_valid_query(query) {
        return Err(ParseError::InvalidQuery {
            value: query.to_string(),
            grammar: "iquery",
        });
    }
    let fragment = raw.fragment.unwrap_or_default();
    if !fragment.is_empty() && !is_valid_fragment(fragment) {
        return Err(ParseError::InvalidFragment {
            value: fragment.to_string(),
            grammar: "ifragment",
        });
    }
    for component in [authority, raw.path, query, fragment] {
        normalize_component(component)?;
    }
    Ok(())
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(scheme) = self.scheme() {
            write!(f, "{}:", scheme)?;
        }
        if let Some(authority) = &self.authority {
            write!(f, "//{}", authority)?;
        }
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

impl FromStr for Iri {
    type Err = ParseError;

    fn from_str(txt: &str) -> Result<Iri> {
        Iri::parse(txt)
    }
}

impl TryFrom<&str> for Iri {
    type Error = ParseError;

    fn try_from(txt: &str) -> Result<Iri> {
        Iri::parse(txt)
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> String {
        iri.to_string()
    }
}

/// Parse `txt` as an IRI reference.
///
/// Shortcut for [`Iri::parse`].
pub fn parse(txt: &str) -> Result<Iri> {
    Iri::parse(txt)
}

/// Format `iri` as a string.
pub fn format(iri: &Iri) -> String {
    iri.to_string()
}

/// Check that `iri` is valid.
///
/// Shortcut for [`Iri::check`].
pub fn check(iri: &Iri) -> Result<()> {
    iri.check()
}

/// Normalize the percent-encoding of `iri`.
///
/// Shortcut for [`Iri::normalize_percent_encoding`].
pub fn normalize_percent_encoding(iri: &Iri) -> Result<Iri, EncodingError> {
    iri.normalize_percent_encoding()
}

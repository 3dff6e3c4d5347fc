//! Implementation of IRI resolution as per
//! [\[RFC 3986\] §5.2](https://tools.ietf.org/html/rfc3986#section-5.2).
//!
//! NB: the fragment of the base is never inherited,
//! not even when resolving the empty reference
//! (contrary to the obsolete [\[RFC 1808\]](https://tools.ietf.org/html/rfc1808)).

use super::{Iri, Result};

impl Iri {
    /// Resolve `reference` using `self` as the base IRI.
    ///
    /// `reference` can be either an `&Iri` (resolution can not fail)
    /// or an `&str` (resolution fails if it is not a valid IRI reference).
    ///
    /// `self` is expected to be absolute,
    /// although the algorithm is defined for relative bases as well.
    pub fn resolve<R: Resolvable>(&self, reference: R) -> R::Output {
        reference.resolve_against(self)
    }
}

/// A trait for anything that can be [resolved](Iri::resolve) against a base [`Iri`].
pub trait Resolvable {
    /// The output type of the resolution.
    type Output;
    /// Resolve `self` using `base` as the base IRI.
    fn resolve_against(self, base: &Iri) -> Self::Output;
}

impl Resolvable for &Iri {
    type Output = Iri;
    fn resolve_against(self, base: &Iri) -> Iri {
        resolve(base, self)
    }
}

impl Resolvable for &str {
    type Output = Result<Iri>;
    fn resolve_against(self, base: &Iri) -> Result<Iri> {
        Ok(resolve(base, &Iri::parse(self)?))
    }
}

/// Resolve `reference` using `base` as the base IRI.
pub fn resolve(base: &Iri, reference: &Iri) -> Iri {
    if reference.is_absolute() {
        // opaque paths (`mailto:`, `urn:`...) are kept verbatim
        let path = if reference.path().starts_with('/') {
            remove_dot_segments(reference.path())
        } else {
            reference.path().to_string()
        };
        return reference.clone().with_path(path);
    }
    let target = Iri::default().with_scheme(base.scheme().unwrap_or_default());
    let target = if let Some(authority) = reference.authority() {
        target
            .with_authority(authority)
            .with_path(remove_dot_segments(reference.path()))
            .with_query_opt(reference.query())
    } else {
        let target = target.with_authority_opt(base.authority());
        if reference.path().is_empty() {
            let query = reference.query().or(base.query());
            target.with_path(base.path()).with_query_opt(query)
        } else {
            let merged = merge_paths(base, reference.path());
            log::trace!("resolving path {:?} as {merged:?}", reference.path());
            target
                .with_path(remove_dot_segments(&merged))
                .with_query_opt(reference.query())
        }
    };
    target.with_fragment_opt(reference.fragment())
}

/// Merge `path` with the path of `base`, as per
/// [\[RFC 3986\] §5.2.3](https://tools.ietf.org/html/rfc3986#section-5.2.3).
fn merge_paths(base: &Iri, path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else if base.has_authority() && base.path().is_empty() {
        format!("/{path}")
    } else {
        let keep = base.path().rfind('/').map_or(0, |i| i + 1);
        format!("{}{path}", &base.path()[..keep])
    }
}

/// Remove the `.` and `..` segments of `path`, as per
/// [\[RFC 3986\] §5.2.4](https://tools.ietf.org/html/rfc3986#section-5.2.4).
///
/// Ascending above the root is silently ignored,
/// and a path ending with `.` or `..` gets a trailing slash.
/// The result starts with a `/` if and only if `path` does.
pub fn remove_dot_segments(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut output = String::with_capacity(path.len());
    let mut first = true;
    let mut segments = path.split('/').peekable();
    let mut last = "";
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            last = segment;
        }
        match segment {
            "." => first = false,
            ".." => match output.rfind('/') {
                Some(i) => output.truncate(i),
                None => {
                    output.clear();
                    first = true;
                }
            },
            _ => {
                if !first {
                    output.push('/');
                }
                output.push_str(segment);
                first = false;
            }
        }
    }
    if last == "." || last == ".." {
        output.push('/');
    }
    let relative = output.strip_prefix('/').unwrap_or(&output);
    if path.starts_with('/') {
        format!("/{relative}")
    } else {
        relative.to_string()
    }
}

impl Iri {
    fn with_authority_opt(self, authority: Option<&str>) -> Self {
        match authority {
            Some(authority) => self.with_authority(authority),
            None => self.without_authority(),
        }
    }

    fn with_query_opt(self, query: Option<&str>) -> Self {
        match query {
            Some(query) => self.with_query(query),
            None => self.without_query(),
        }
    }

    fn with_fragment_opt(self, fragment: Option<&str>) -> Self {
        match fragment {
            Some(fragment) => self.with_fragment(fragment),
            None => self.without_fragment(),
        }
    }
}

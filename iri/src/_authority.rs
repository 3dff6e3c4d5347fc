//! A structured view on the authority of an [`Iri`].
//!
//! This module is transparently reexported by its parent module.

use super::{capture_authority, Iri};

/// The `iuserinfo`, `ihost` and `port` parts of an IRI authority.
///
/// This is derived from the authority string on demand,
/// see [`Iri::authority_components`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AuthorityComponents<'a> {
    userinfo: Option<&'a str>,
    host: &'a str,
    port: Option<&'a str>,
}

impl<'a> AuthorityComponents<'a> {
    /// Split `authority` into its parts, or return `None` if it is not a valid `iauthority`.
    pub fn parse(authority: &'a str) -> Option<Self> {
        let (userinfo, host, port) = capture_authority(authority)?;
        Some(AuthorityComponents {
            userinfo,
            host,
            port,
        })
    }

    /// The user information, if the authority contains a `@` (possibly empty).
    pub fn userinfo(&self) -> Option<&'a str> {
        self.userinfo
    }

    /// The host, which may be an IP literal (including its brackets),
    /// an IPv4 address or a registered name (possibly empty).
    pub fn host(&self) -> &'a str {
        self.host
    }

    /// The port, if the authority contains a `:` after the host (possibly empty).
    pub fn port(&self) -> Option<&'a str> {
        self.port
    }
}

impl Iri {
    /// The parts of this IRI's authority, if it has a valid one.
    pub fn authority_components(&self) -> Option<AuthorityComponents<'_>> {
        AuthorityComponents::parse(self.authority()?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn full_authority() {
        let iri = Iri::parse("http://user:pw@example.org:1234/").unwrap();
        let auth = iri.authority_components().unwrap();
        assert_eq!(auth.userinfo(), Some("user:pw"));
        assert_eq!(auth.host(), "example.org");
        assert_eq!(auth.port(), Some("1234"));
    }

    #[test]
    fn host_only() {
        let iri = Iri::parse("http://éxample.org/").unwrap();
        let auth = iri.authority_components().unwrap();
        assert_eq!(auth.userinfo(), None);
        assert_eq!(auth.host(), "éxample.org");
        assert_eq!(auth.port(), None);
    }

    #[test]
    fn ip_literal() {
        let auth = AuthorityComponents::parse("[2001:db8::7]:8080").unwrap();
        assert_eq!(auth.host(), "[2001:db8::7]");
        assert_eq!(auth.port(), Some("8080"));
    }

    #[test]
    fn empty_parts_are_kept() {
        let auth = AuthorityComponents::parse("@example.org:").unwrap();
        assert_eq!(auth.userinfo(), Some(""));
        assert_eq!(auth.host(), "example.org");
        assert_eq!(auth.port(), Some(""));
    }

    #[test]
    fn empty_authority() {
        let iri = Iri::parse("file:///etc/hosts").unwrap();
        let auth = iri.authority_components().unwrap();
        assert_eq!(auth.userinfo(), None);
        assert_eq!(auth.host(), "");
        assert_eq!(auth.port(), None);
    }

    #[test]
    fn no_authority() {
        let iri = Iri::parse("mailto:user@example.com").unwrap();
        assert_eq!(iri.authority_components(), None);
    }

    #[test]
    fn invalid_authority() {
        let iri = Iri::default().with_authority("a b");
        assert_eq!(iri.authority_components(), None);
    }
}

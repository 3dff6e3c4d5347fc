//! Grammar tables for IRI references,
//! as per [\[RFC 3987\] §2.2](https://tools.ietf.org/html/rfc3987#section-2.2)
//! and [\[RFC 3986\] Appendix A](https://tools.ietf.org/html/rfc3986#appendix-A).
//!
//! This module is transparently reexported by its parent module.
//! The underlying regular expressions are kept private;
//! only the validators and the coarse splitters are exposed.

use lazy_static::lazy_static;
use regex::Regex;

// The productions below expand to string literals,
// so that every pattern is assembled at compile time with `concat!`.
// Macros with a `_chars` suffix expand to the *content* of a character class.

macro_rules! ucschar_chars {
    () => {
        r"\u{A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}\u{10000}-\u{1FFFD}\u{20000}-\u{2FFFD}\u{30000}-\u{3FFFD}\u{40000}-\u{4FFFD}\u{50000}-\u{5FFFD}\u{60000}-\u{6FFFD}\u{70000}-\u{7FFFD}\u{80000}-\u{8FFFD}\u{90000}-\u{9FFFD}\u{A0000}-\u{AFFFD}\u{B0000}-\u{BFFFD}\u{C0000}-\u{CFFFD}\u{D0000}-\u{DFFFD}\u{E1000}-\u{EFFFD}"
    };
}

macro_rules! iprivate_chars {
    () => {
        r"\u{E000}-\u{F8FF}\u{F0000}-\u{FFFFD}\u{100000}-\u{10FFFD}"
    };
}

macro_rules! unreserved_chars {
    () => {
        r"\-A-Za-z0-9._~"
    };
}

macro_rules! iunreserved_chars {
    () => {
        concat!(unreserved_chars!(), ucschar_chars!())
    };
}

macro_rules! sub_delims_chars {
    () => {
        r"!$&'()*+,;="
    };
}

macro_rules! pct_encoded {
    () => {
        r"%[0-9A-Fa-f]{2}"
    };
}

macro_rules! ipchar {
    () => {
        concat!(
            "(?:[",
            iunreserved_chars!(),
            sub_delims_chars!(),
            ":@]|",
            pct_encoded!(),
            ")"
        )
    };
}

macro_rules! isegment {
    () => {
        concat!(ipchar!(), "*")
    };
}

macro_rules! isegment_nz {
    () => {
        concat!(ipchar!(), "+")
    };
}

// non-zero-length segment without any colon
macro_rules! isegment_nz_nc {
    () => {
        concat!(
            "(?:[",
            iunreserved_chars!(),
            sub_delims_chars!(),
            "@]|",
            pct_encoded!(),
            ")+"
        )
    };
}

macro_rules! ipath_abempty {
    () => {
        concat!("(?:/", isegment!(), ")*")
    };
}

macro_rules! ipath_absolute {
    () => {
        concat!("/(?:", isegment_nz!(), "(?:/", isegment!(), ")*)?")
    };
}

macro_rules! ipath_noscheme {
    () => {
        concat!(isegment_nz_nc!(), "(?:/", isegment!(), ")*")
    };
}

macro_rules! ipath_rootless {
    () => {
        concat!(isegment_nz!(), "(?:/", isegment!(), ")*")
    };
}

macro_rules! dec_octet {
    () => {
        r"(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9][0-9]|[0-9])"
    };
}

macro_rules! ipv4address {
    () => {
        concat!(
            dec_octet!(),
            r"\.",
            dec_octet!(),
            r"\.",
            dec_octet!(),
            r"\.",
            dec_octet!()
        )
    };
}

macro_rules! h16 {
    () => {
        r"[0-9A-Fa-f]{1,4}"
    };
}

macro_rules! ls32 {
    () => {
        concat!("(?:", h16!(), ":", h16!(), "|", ipv4address!(), ")")
    };
}

// bounded repetitions only, see RFC 3986 §3.2.2
macro_rules! ipv6address {
    () => {
        concat!(
            "(?:",
            "(?:", h16!(), ":){6}", ls32!(),
            "|::(?:", h16!(), ":){5}", ls32!(),
            "|(?:", h16!(), ")?::(?:", h16!(), ":){4}", ls32!(),
            "|(?:(?:", h16!(), ":){0,1}", h16!(), ")?::(?:", h16!(), ":){3}", ls32!(),
            "|(?:(?:", h16!(), ":){0,2}", h16!(), ")?::(?:", h16!(), ":){2}", ls32!(),
            "|(?:(?:", h16!(), ":){0,3}", h16!(), ")?::", h16!(), ":", ls32!(),
            "|(?:(?:", h16!(), ":){0,4}", h16!(), ")?::", ls32!(),
            "|(?:(?:", h16!(), ":){0,5}", h16!(), ")?::", h16!(),
            "|(?:(?:", h16!(), ":){0,6}", h16!(), ")?::",
            ")"
        )
    };
}

macro_rules! ipvfuture {
    () => {
        concat!(
            "v[0-9A-Fa-f]+\\.[",
            unreserved_chars!(),
            sub_delims_chars!(),
            ":]+"
        )
    };
}

macro_rules! ip_literal {
    () => {
        concat!(r"\[(?:", ipv6address!(), "|", ipvfuture!(), r")\]")
    };
}

macro_rules! ireg_name {
    () => {
        concat!(
            "(?:[",
            iunreserved_chars!(),
            sub_delims_chars!(),
            "]|",
            pct_encoded!(),
            ")*"
        )
    };
}

macro_rules! ihost {
    () => {
        concat!("(?:", ip_literal!(), "|", ipv4address!(), "|", ireg_name!(), ")")
    };
}

macro_rules! iuserinfo {
    () => {
        concat!(
            "(?:[",
            iunreserved_chars!(),
            sub_delims_chars!(),
            ":]|",
            pct_encoded!(),
            ")*"
        )
    };
}

macro_rules! port {
    () => {
        "[0-9]*"
    };
}

lazy_static! {
    static ref SCHEME_REGEX: Regex =
        compile_named("scheme", r"^[A-Za-z][A-Za-z0-9+\-.]*$");

    static ref IAUTHORITY_REGEX: Regex = compile_named(
        "iauthority",
        concat!("^(?:", iuserinfo!(), "@)?", ihost!(), "(?::", port!(), ")?$"),
    );

    /// Same as `IAUTHORITY_REGEX`, capturing iuserinfo, ihost and port.
    static ref IAUTHORITY_CAPTURE_REGEX: Regex = compile_named(
        "iauthority (capturing)",
        concat!("^(?:(", iuserinfo!(), ")@)?(", ihost!(), ")(?::(", port!(), "))?$"),
    );

    // ipath-empty is covered by ipath-abempty
    static ref IPATH_REGEX: Regex = compile_named(
        "ipath",
        concat!(
            "^(?:",
            ipath_abempty!(),
            "|",
            ipath_absolute!(),
            "|",
            ipath_noscheme!(),
            "|",
            ipath_rootless!(),
            ")$"
        ),
    );

    static ref IQUERY_REGEX: Regex = compile_named(
        "iquery",
        concat!(
            "^(?:[",
            iunreserved_chars!(),
            sub_delims_chars!(),
            ":@",
            iprivate_chars!(),
            "/?]|",
            pct_encoded!(),
            ")*$"
        ),
    );

    static ref IFRAGMENT_REGEX: Regex = compile_named(
        "ifragment",
        concat!(
            "^(?:[",
            iunreserved_chars!(),
            sub_delims_chars!(),
            ":@/?]|",
            pct_encoded!(),
            ")*$"
        ),
    );

    static ref IUNRESERVED_REGEX: Regex =
        compile_named("iunreserved", concat!("^[", iunreserved_chars!(), "]$"));

    /// Match a maximal run of percent-encoded octets.
    pub(crate) static ref PCT_ENCODED_RUN_REGEX: Regex =
        compile_named("pct-encoded run", concat!("(?:", pct_encoded!(), ")+"));

    /// Regular expression from RFC 3986 Appendix B.
    static ref IRI_SPLIT_REGEX: Regex = compile_named(
        "IRI split",
        r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$",
    );

    /// Same as `IRI_SPLIT_REGEX`, never extracting a scheme.
    static ref IRELATIVE_SPLIT_REGEX: Regex = compile_named(
        "irelative split",
        r"(?s)^(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$",
    );
}

/// Compile the built-in pattern `pattern`.
///
/// # Panics
/// If `pattern` is not a valid regular expression.
/// This denotes a bug in the grammar tables, not a bad input.
fn compile_named(name: &str, pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("failed to compile regex {name}: {err}"))
}

/// Check whether `txt` matches the `scheme` production.
#[inline]
pub fn is_valid_scheme(txt: &str) -> bool {
    SCHEME_REGEX.is_match(txt)
}

/// Check whether `txt` matches the `iauthority` production.
#[inline]
pub fn is_valid_authority(txt: &str) -> bool {
    IAUTHORITY_REGEX.is_match(txt)
}

/// Check whether `txt` matches any of the `ipath` productions.
#[inline]
pub fn is_valid_path(txt: &str) -> bool {
    IPATH_REGEX.is_match(txt)
}

/// Check whether `txt` matches the `iquery` production.
#[inline]
pub fn is_valid_query(txt: &str) -> bool {
    IQUERY_REGEX.is_match(txt)
}

/// Check whether `txt` matches the `ifragment` production.
#[inline]
pub fn is_valid_fragment(txt: &str) -> bool {
    IFRAGMENT_REGEX.is_match(txt)
}

/// Check whether `c` is an `iunreserved` character,
/// i.e. a character that never needs to be percent-encoded.
pub fn is_iunreserved(c: char) -> bool {
    let mut buf = [0; 4];
    IUNRESERVED_REGEX.is_match(c.encode_utf8(&mut buf))
}

/// The raw components of an IRI reference, as produced by the coarse splitters.
///
/// Components other than the path are `None` when their delimiter
/// (`:`, `//`, `?` or `#`) is absent, and `Some("")` when the delimiter
/// is present but followed by nothing.
/// No component is validated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RawComponents<'a> {
    /// The text before the first `:`, if any
    pub scheme: Option<&'a str>,
    /// The text after `//`, if any
    pub authority: Option<&'a str>,
    /// The path, possibly empty
    pub path: &'a str,
    /// The text after `?`, if any
    pub query: Option<&'a str>,
    /// The text after `#`, if any
    pub fragment: Option<&'a str>,
}

/// Split `txt` into its five raw components, without any validation.
///
/// Returns `None` only if `txt` can not be split at all.
pub fn split_iri_ref(txt: &str) -> Option<RawComponents<'_>> {
    let cap = IRI_SPLIT_REGEX.captures(txt)?;
    Some(RawComponents {
        scheme: cap.get(1).map(|m| m.as_str()),
        authority: cap.get(2).map(|m| m.as_str()),
        path: cap.get(3).map_or("", |m| m.as_str()),
        query: cap.get(4).map(|m| m.as_str()),
        fragment: cap.get(5).map(|m| m.as_str()),
    })
}

/// Split `txt` into its raw components, considering it as a relative reference
/// (i.e. the text before a `:` is never taken as a scheme).
///
/// Returns `None` only if `txt` can not be split at all.
pub fn split_relative_ref(txt: &str) -> Option<RawComponents<'_>> {
    let cap = IRELATIVE_SPLIT_REGEX.captures(txt)?;
    Some(RawComponents {
        scheme: None,
        authority: cap.get(1).map(|m| m.as_str()),
        path: cap.get(2).map_or("", |m| m.as_str()),
        query: cap.get(3).map(|m| m.as_str()),
        fragment: cap.get(4).map(|m| m.as_str()),
    })
}

/// The iuserinfo, ihost and port of a valid `iauthority`.
pub(crate) fn capture_authority(txt: &str) -> Option<(Option<&str>, &str, Option<&str>)> {
    let cap = IAUTHORITY_CAPTURE_REGEX.captures(txt)?;
    Some((
        cap.get(1).map(|m| m.as_str()),
        cap.get(2).map_or("", |m| m.as_str()),
        cap.get(3).map(|m| m.as_str()),
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test]
    fn all_regexes_compile() {
        lazy_static::initialize(&SCHEME_REGEX);
        lazy_static::initialize(&IAUTHORITY_REGEX);
        lazy_static::initialize(&IAUTHORITY_CAPTURE_REGEX);
        lazy_static::initialize(&IPATH_REGEX);
        lazy_static::initialize(&IQUERY_REGEX);
        lazy_static::initialize(&IFRAGMENT_REGEX);
        lazy_static::initialize(&IUNRESERVED_REGEX);
        lazy_static::initialize(&PCT_ENCODED_RUN_REGEX);
        lazy_static::initialize(&IRI_SPLIT_REGEX);
        lazy_static::initialize(&IRELATIVE_SPLIT_REGEX);
    }

    #[test]
    #[should_panic(expected = "failed to compile regex example")]
    fn compile_named_panics() {
        compile_named("example", "[");
    }

    #[test_case(' ', false; "space")]
    #[test_case('/', false; "slash")]
    #[test_case('%', false; "percent")]
    #[test_case('a', true; "ascii letter")]
    #[test_case('~', true; "tilde")]
    #[test_case('\u{FE}', true; "latin small thorn")]
    #[test_case('\u{B5}', true; "micro sign")]
    #[test_case('\u{E000}', false; "private use")]
    #[test_case('\u{FFFE}', false; "noncharacter")]
    fn iunreserved(c: char, expected: bool) {
        assert_eq!(is_iunreserved(c), expected);
    }

    #[test]
    fn scheme() {
        for (txt, expected) in [
            ("http", true),
            ("a+b-c.d", true),
            ("h2", true),
            ("2h", false),
            ("é", false),
            ("", false),
        ] {
            assert_eq!(is_valid_scheme(txt), expected, "{txt:?}");
        }
    }

    #[test]
    fn authority() {
        for (txt, expected) in [
            ("example.org", true),
            ("user:pw@example.org:1234", true),
            ("éxample.org", true),
            ("127.0.0.1", true),
            ("[::]", true),
            ("[2001:db8::7]", true),
            ("[::ffff:192.0.2.128]", true),
            ("[v7.fe80::1]", true),
            ("%0D", true),
            ("", true),
            ("@", true),
            ("[/", false),
            ("[1:2:3:4:5:6:7:8:9]", false),
            ("a b", false),
            ("example.org:80a", false),
            ("a@b@c", false),
        ] {
            assert_eq!(is_valid_authority(txt), expected, "{txt:?}");
        }
    }

    #[test]
    fn path() {
        for (txt, expected) in [
            ("", true),
            ("/", true),
            ("/foo/.././/bar", true),
            ("foo", true),
            ("b:c:", true),
            ("user@example.com", true),
            ("/!$&'()*+,=:@/foo%0D", true),
            ("/bàz", true),
            ("/a b", false),
            ("/a|", false),
            ("/%zz", false),
            ("/\u{E000}", false),
        ] {
            assert_eq!(is_valid_path(txt), expected, "{txt:?}");
        }
    }

    #[test]
    fn query() {
        for (txt, expected) in [
            ("", true),
            ("q=a&r=b", true),
            ("!$&'()*+,=:@/?\u{E000}", true),
            ("q=€", true),
            ("a#b", false),
            ("a b", false),
        ] {
            assert_eq!(is_valid_query(txt), expected, "{txt:?}");
        }
    }

    #[test]
    fn fragment() {
        for (txt, expected) in [
            ("", true),
            ("André", true),
            ("s/../x?y", true),
            ("\u{E000}", false),
            ("a#b", false),
            ("André then some whitespace", false),
        ] {
            assert_eq!(is_valid_fragment(txt), expected, "{txt:?}");
        }
    }

    #[test]
    fn split_full() {
        let raw = split_iri_ref("https://example.com:22/path/to?q=a#b").unwrap();
        assert_eq!(raw.scheme, Some("https"));
        assert_eq!(raw.authority, Some("example.com:22"));
        assert_eq!(raw.path, "/path/to");
        assert_eq!(raw.query, Some("q=a"));
        assert_eq!(raw.fragment, Some("b"));
    }

    #[test]
    fn split_empty_markers() {
        let raw = split_iri_ref("//?#").unwrap();
        assert_eq!(
            raw,
            RawComponents {
                scheme: None,
                authority: Some(""),
                path: "",
                query: Some(""),
                fragment: Some(""),
            }
        );
        assert_eq!(split_iri_ref("").unwrap(), RawComponents::default());
    }

    #[test]
    fn split_opaque() {
        let raw = split_iri_ref("a:b:c:").unwrap();
        assert_eq!(raw.scheme, Some("a"));
        assert_eq!(raw.authority, None);
        assert_eq!(raw.path, "b:c:");
    }

    #[test]
    fn split_does_not_validate() {
        let raw = split_iri_ref("h t:// /[?\n#\n").unwrap();
        assert_eq!(raw.scheme, Some("h t"));
        assert_eq!(raw.authority, Some(" "));
        assert_eq!(raw.path, "/[");
        assert_eq!(raw.query, Some("\n"));
        assert_eq!(raw.fragment, Some("\n"));
    }

    #[test]
    fn split_relative() {
        let raw = split_relative_ref("1a:b?c").unwrap();
        assert_eq!(raw.scheme, None);
        assert_eq!(raw.path, "1a:b");
        assert_eq!(raw.query, Some("c"));
        let raw = split_relative_ref("//g").unwrap();
        assert_eq!(raw.authority, Some("g"));
        assert_eq!(raw.path, "");
    }

    #[test]
    fn capture() {
        assert_eq!(
            capture_authority("user:pw@example.org:1234"),
            Some((Some("user:pw"), "example.org", Some("1234")))
        );
        assert_eq!(capture_authority("[::1]"), Some((None, "[::1]", None)));
        assert_eq!(capture_authority("@:"), Some((Some(""), "", Some(""))));
        assert_eq!(capture_authority("a b"), None);
    }
}

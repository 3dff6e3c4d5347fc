//! Percent-encoding normalization,
//! as per [\[RFC 3987\] §5.3.2.3](https://tools.ietf.org/html/rfc3987#section-5.3.2.3).
//!
//! This module is transparently reexported by its parent module.

use super::{is_iunreserved, EncodingError, PCT_ENCODED_RUN_REGEX};
use percent_encoding::{percent_decode_str, percent_encode, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Decode `run`, a sequence of back-to-back `%XX` triples, into octets.
///
/// Fails with [`EncodingError::MalformedTriple`] if `run` contains anything else;
/// the error then holds `run` itself, and an offset relative to `run`.
pub fn decode_run(run: &str) -> Result<Vec<u8>, EncodingError> {
    let malformed = run.as_bytes().chunks(3).position(|triple| {
        !matches!(triple, [b'%', hi, lo] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
    });
    if let Some(i) = malformed {
        return Err(EncodingError::MalformedTriple {
            component: run.to_string(),
            offset: i * 3,
        });
    }
    Ok(percent_decode_str(run).collect())
}

/// Replace every unnecessarily percent-encoded character of `component`
/// by the character itself.
///
/// Each maximal run of percent-encoded octets is decoded as UTF-8;
/// `iunreserved` characters are emitted as is,
/// any other character is re-encoded with uppercase hexadecimal digits.
/// Text outside the runs is kept unchanged.
///
/// Fails if any run is not valid UTF-8, or if a `%` is not followed by two hex digits.
/// No partial result is ever returned.
pub fn normalize_component(component: &str) -> Result<Cow<'_, str>, EncodingError> {
    if !component.contains('%') {
        return Ok(Cow::Borrowed(component));
    }
    let mut normalized = String::with_capacity(component.len());
    let mut last = 0;
    for run in PCT_ENCODED_RUN_REGEX.find_iter(component) {
        push_unescaped(&mut normalized, component, last, run.start())?;
        push_normalized_run(&mut normalized, component, run.as_str(), run.start())?;
        last = run.end();
    }
    push_unescaped(&mut normalized, component, last, component.len())?;
    Ok(Cow::Owned(normalized))
}

/// Push `component[start..end]`, which is not expected to contain any `%`.
fn push_unescaped(
    out: &mut String,
    component: &str,
    start: usize,
    end: usize,
) -> Result<(), EncodingError> {
    let txt = &component[start..end];
    if let Some(i) = txt.find('%') {
        return Err(EncodingError::MalformedTriple {
            component: component.to_string(),
            offset: start + i,
        });
    }
    out.push_str(txt);
    Ok(())
}

/// Push the normalized form of `run`, located at byte `offset` of `component`.
fn push_normalized_run(
    out: &mut String,
    component: &str,
    run: &str,
    offset: usize,
) -> Result<(), EncodingError> {
    let octets = decode_run(run).map_err(|err| match err {
        EncodingError::MalformedTriple { offset: i, .. } => EncodingError::MalformedTriple {
            component: component.to_string(),
            offset: offset + i,
        },
        err => err,
    })?;
    let decoded = std::str::from_utf8(&octets).map_err(|err| {
        let bad = err.valid_up_to() * 3;
        EncodingError::InvalidUtf8 {
            run: run[bad..].to_string(),
            offset: offset + bad,
        }
    })?;
    let mut buf = [0; 4];
    for c in decoded.chars() {
        if is_iunreserved(c) {
            out.push(c);
        } else {
            // NON_ALPHANUMERIC encodes every octet, with uppercase hex digits
            out.extend(percent_encode(c.encode_utf8(&mut buf).as_bytes(), NON_ALPHANUMERIC));
        }
    }
    Ok(())
}

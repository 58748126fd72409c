//! # URL Transport Decoding
//!
//! Attestations travel as `base64url(gzip(json-array-string))` embedded in
//! a URL, either as a fragment (`https://…#attestation=<payload>`) or as a
//! `ticket`/`attestation` query parameter. Extraction checks the fragment
//! first, then the query.
//!
//! Percent-decoding is done by hand on the raw fragment/query text rather
//! than through form-urlencoded parsing: a `+` inside a base64 payload is
//! payload, not an encoded space.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use percent_encoding::percent_decode_str;
use std::io::{Read, Write};
use url::Url;

use easlink_core::{AttestationError, Cause};

/// Query parameter names that may carry the payload.
const QUERY_KEYS: &[&str] = &["ticket", "attestation"];

/// Extract the encoded attestation payload from a URL.
///
/// Order: (a) a fragment pair `attestation=<value>`, then (b) a query
/// parameter named `ticket` or `attestation`. Fails with
/// [`AttestationError::ParseAttestationUrlFailed`] when neither is present
/// or the URL does not parse at all.
pub fn extract_payload(url: &str) -> Result<String, AttestationError> {
    let parsed = Url::parse(url).map_err(|_| AttestationError::ParseAttestationUrlFailed)?;

    if let Some(fragment) = parsed.fragment() {
        for pair in fragment.split('&') {
            if let Some(value) = pair.strip_prefix("attestation=") {
                return decode_component(value);
            }
        }
    }

    if let Some(query) = parsed.query() {
        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            if QUERY_KEYS.contains(&key) {
                return decode_component(value);
            }
        }
    }

    Err(AttestationError::ParseAttestationUrlFailed)
}

/// Percent-decode a raw URL component into the payload string.
fn decode_component(raw: &str) -> Result<String, AttestationError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| AttestationError::ParseAttestationUrlFailed)
}

/// Reverse the transport encoding: base64url → base64 character
/// substitution, pad to a multiple of 4, base64-decode, gzip-inflate.
///
/// Any step failing maps to the unzip cause under
/// [`AttestationError::ExtractAttestationFailed`].
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, AttestationError> {
    let mut normalized = payload.replace('_', "/").replace('-', "+");
    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }

    let compressed = STANDARD
        .decode(normalized.as_bytes())
        .map_err(|e| AttestationError::ExtractAttestationFailed(Cause::Unzip(e.to_string())))?;

    let mut inflated = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut inflated)
        .map_err(|e| AttestationError::ExtractAttestationFailed(Cause::Unzip(e.to_string())))?;
    Ok(inflated)
}

/// Inverse of [`decode_payload`]: gzip-deflate, base64, URL-safe character
/// substitution, padding stripped. Used when constructing attestation
/// links and by the round-trip tests.
pub fn encode_payload(bytes: &[u8]) -> String {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    // Writing to a Vec cannot fail.
    encoder.write_all(bytes).expect("write to Vec");
    let compressed = encoder.finish().expect("finish gzip stream");

    STANDARD
        .encode(compressed)
        .replace('/', "_")
        .replace('+', "-")
        .trim_end_matches('=')
        .to_string()
}

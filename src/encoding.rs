// SPDX-License-Identifier: MIT

//! Filename-encoding repair for archives produced on legacy Windows systems.
//!
//! Two independent repairs, both pure:
//!   - [`decode_oem_name`]: zip entry names that are not UTF-8 are stored in
//!     the DOS OEM code page — CP866 for Cyrillic — while generic tooling
//!     decodes them as CP437 and produces mojibake.  Decoding the raw bytes
//!     as CP866 recovers the readable name.
//!   - [`repair_mojibake`]: a second chance applied to already-decoded text,
//!     for archives the extractor could not fully fix: UTF-8 bytes that were
//!     misread as Latin-1 are re-encoded to their byte image and reparsed.

use encoding_rs::IBM866;

/// Decode a zip entry's raw name bytes as CP866.
///
/// Returns `None` when the bytes are already valid UTF-8 — the name needs no
/// repair and the zip layer's own decoding is authoritative.
pub fn decode_oem_name(raw: &[u8]) -> Option<String> {
    if std::str::from_utf8(raw).is_ok() {
        return None;
    }
    let (decoded, _, _) = IBM866.decode(raw);
    Some(decoded.into_owned())
}

/// Reinterpret text that was decoded as Latin-1 but is really UTF-8.
///
/// Every `char` of a Latin-1 misread is ≤ U+00FF, so the original byte image
/// can be rebuilt exactly.  Returns the reparsed string only when it is valid
/// UTF-8 *and* differs from the input; plain ASCII round-trips to itself and
/// yields `None`.
pub fn repair_mojibake(text: &str) -> Option<String> {
    let bytes = text
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect::<Option<Vec<u8>>>()?;
    match String::from_utf8(bytes) {
        Ok(decoded) if decoded != text => Some(decoded),
        _ => None,
    }
}

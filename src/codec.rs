//! UTF-8 and percent-encoding primitives.
//!
//! Components store their text percent-encoded.  These functions move between
//! text, the UTF-8 bytes of a single character, and runs of `%HH` triplets.

use std::collections::HashSet;
use std::fmt::Write;

use super::{
    character_classes::UNRESERVED, error::Error,
    percent_encoded_character_decoder::PercentEncodedCharacterDecoder,
};

/// Decode a sequence of UTF-8 bytes into text.
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] (carrying the offset of the offending lead
/// byte) if a continuation byte appears where a lead byte is expected, a lead
/// byte is not a valid 1-4 byte lead, a continuation byte is missing or
/// outside of `0x80..=0xBF`, the sequence is an overlong encoding, or the
/// decoded value is a surrogate or lies above U+10FFFF.
///
/// [`Error::InvalidUtf8`]: enum.Error.html#variant.InvalidUtf8
///
/// # Examples
///
/// ```rust
/// use uri_component::utf8_decode;
///
/// assert_eq!(Ok("\u{a1}~".to_string()), utf8_decode(&[0xC2, 0xA1, 0x7E]));
/// assert!(utf8_decode(&[0xC0, 0x80]).is_err());
/// ```
pub fn utf8_decode(bytes: &[u8]) -> Result<String, Error> {
    let mut decoded = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let lead = bytes[i];
        if lead & 0b1000_0000 == 0 {
            decoded.push(char::from(lead));
            i += 1;
            continue;
        }
        let (payload_mask, follow) = match lead {
            lead if lead & 0b1110_0000 == 0b1100_0000 => (0b0001_1111, 1),
            lead if lead & 0b1111_0000 == 0b1110_0000 => (0b0000_1111, 2),
            lead if lead & 0b1111_1000 == 0b1111_0000 => (0b0000_0111, 3),
            _ => return Err(Error::InvalidUtf8(i)),
        };
        let mut code = u32::from(lead & payload_mask) << (follow * 6);
        for j in 1..=follow {
            match bytes.get(i + j) {
                Some(byte) if byte & 0b1100_0000 == 0b1000_0000 => {
                    code |= u32::from(byte & 0b0011_1111) << ((follow - j) * 6);
                }
                _ => return Err(Error::InvalidUtf8(i)),
            }
        }
        let overlong = match follow {
            1 => code < 0x80,
            2 => code < 0x800,
            _ => code < 0x1_0000,
        };
        if overlong || code > 0x10_FFFF {
            return Err(Error::InvalidUtf8(i));
        }
        decoded.push(char::from_u32(code).ok_or(Error::InvalidUtf8(i))?);
        i += follow + 1;
    }
    Ok(decoded)
}

/// Return the UTF-8 bytes of the character at `index` (counted in
/// characters, not bytes) of `text`.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfRange`] if `index` is not less than the number
/// of characters in `text`.
///
/// [`Error::IndexOutOfRange`]: enum.Error.html#variant.IndexOutOfRange
pub fn utf8_char_at(text: &str, index: usize) -> Result<Vec<u8>, Error> {
    let c = char_at(text, index)?;
    let mut buffer = [0; 4];
    Ok(c.encode_utf8(&mut buffer).as_bytes().to_vec())
}

/// Decode a run of consecutive `%HH` triplets as UTF-8.
///
/// # Errors
///
/// Returns [`Error::IllegalPercentEncoding`] if `token` is empty or is not
/// made up solely of percent triplets, or [`Error::InvalidUtf8`] if the
/// encoded bytes are not well-formed UTF-8.
///
/// [`Error::IllegalPercentEncoding`]: enum.Error.html#variant.IllegalPercentEncoding
/// [`Error::InvalidUtf8`]: enum.Error.html#variant.InvalidUtf8
///
/// # Examples
///
/// ```rust
/// use uri_component::decode_percent_run;
///
/// assert_eq!(Ok("\u{ff}".to_string()), decode_percent_run("%c3%bf"));
/// assert!(decode_percent_run("%20%7").is_err());
/// ```
pub fn decode_percent_run(token: &str) -> Result<String, Error> {
    if token.is_empty() {
        return Err(Error::IllegalPercentEncoding);
    }
    let mut bytes = Vec::with_capacity(token.len() / 3);
    let mut decoder: Option<PercentEncodedCharacterDecoder> = None;
    for c in token.chars() {
        if let Some(pec) = decoder.as_mut() {
            if let Some(byte) = pec.next(c)? {
                bytes.push(byte);
                decoder = None;
            }
        } else if c == '%' {
            decoder = Some(PercentEncodedCharacterDecoder::new());
        } else {
            return Err(Error::IllegalPercentEncoding);
        }
    }
    if decoder.is_some() {
        return Err(Error::IllegalPercentEncoding);
    }
    utf8_decode(&bytes)
}

/// Produce the `%HH` form (one triplet per UTF-8 byte, uppercase hex) of the
/// character at `index` of `text`.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfRange`] if `index` is not less than the number
/// of characters in `text`.
///
/// [`Error::IndexOutOfRange`]: enum.Error.html#variant.IndexOutOfRange
pub fn encode_char_at(text: &str, index: usize) -> Result<String, Error> {
    let mut encoded = String::new();
    push_encoded_char(&mut encoded, char_at(text, index)?);
    Ok(encoded)
}

/// Percent-encode every character of `text` which is not unreserved.
#[must_use]
pub fn percent_encode(text: &str) -> String {
    encode_element(text, &UNRESERVED)
}

/// Decode every percent triplet in `text`, leaving other characters as they
/// are.
///
/// # Errors
///
/// Returns [`Error::IllegalPercentEncoding`] if a `%` is not followed by two
/// hex digits, or [`Error::InvalidUtf8`] if a run of triplets does not decode
/// to well-formed UTF-8.
///
/// [`Error::IllegalPercentEncoding`]: enum.Error.html#variant.IllegalPercentEncoding
/// [`Error::InvalidUtf8`]: enum.Error.html#variant.InvalidUtf8
pub fn percent_decode(text: &str) -> Result<String, Error> {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('%') {
        decoded.push_str(&rest[..start]);
        let run = &rest[start..];
        let end = percent_run_len(run);
        if end == 0 {
            return Err(Error::IllegalPercentEncoding);
        }
        decoded.push_str(&decode_percent_run(&run[..end])?);
        rest = &run[end..];
    }
    decoded.push_str(rest);
    Ok(decoded)
}

/// Percent-encode every character of `element` which is not in `allowed`.
pub(crate) fn encode_element(element: &str, allowed: &HashSet<char>) -> String {
    let mut encoded = String::with_capacity(element.len());
    for c in element.chars() {
        if allowed.contains(&c) {
            encoded.push(c);
        } else {
            push_encoded_char(&mut encoded, c);
        }
    }
    encoded
}

/// Append the percent-encoded UTF-8 bytes of `c` to `output`.
pub(crate) fn push_encoded_char(output: &mut String, c: char) {
    let mut buffer = [0; 4];
    for byte in c.encode_utf8(&mut buffer).bytes() {
        let _ = write!(output, "%{:02X}", byte);
    }
}

fn char_at(text: &str, index: usize) -> Result<char, Error> {
    text.chars().nth(index).ok_or_else(|| Error::IndexOutOfRange {
        index,
        len: text.chars().count(),
    })
}

/// Length in bytes of the run of well-formed `%HH` triplets at the start of
/// `text`.
fn percent_run_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut end = 0;
    while let [b'%', high, low, ..] = &bytes[end..] {
        if !(high.is_ascii_hexdigit() && low.is_ascii_hexdigit()) {
            break;
        }
        end += 3;
    }
    end
}

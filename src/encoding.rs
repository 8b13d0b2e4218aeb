//! Character decoding of raw diff input.
//!
//! The parser only ever sees decoded text. This module turns the bytes read
//! from a file (or handed over by a caller) into a `String`, according to a
//! declared encoding label and an error policy.
//!
//! Labels resolve through the WHATWG label table of `encoding_rs`, so
//! `utf-16`, `cp1252`, `shift_jis`, `euc-kr` and friends all work. Two
//! labels keep their byte-exact meaning instead of the browser aliases:
//! `ascii` rejects bytes above 0x7F and `latin-1` is ISO-8859-1, not
//! windows-1252.

use crate::config::DecodeErrors;
use crate::error::{Result, UdiffError};
use std::fmt;
use std::str::FromStr;

const ASCII_LABELS: &[&str] = &["ascii", "us-ascii", "646"];
const LATIN1_LABELS: &[&str] = &["latin-1", "latin1", "iso-8859-1", "iso8859-1", "l1"];

/// Text encodings understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// 7-bit ASCII.
    Ascii,
    /// ISO-8859-1: every byte is the code point of the same value.
    Latin1,
    /// Any encoding of the WHATWG Encoding Standard.
    Whatwg(&'static encoding_rs::Encoding),
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::utf8()
    }
}

impl Encoding {
    pub fn utf8() -> Self {
        Encoding::Whatwg(encoding_rs::UTF_8)
    }

    /// Canonical name of the encoding.
    pub fn label(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "iso-8859-1",
            Encoding::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Decode `bytes` into text.
    ///
    /// With [`DecodeErrors::Strict`] any invalid sequence is an error; with
    /// [`DecodeErrors::Replace`] it becomes U+FFFD. A leading byte order mark
    /// is dropped and, for WHATWG encodings, selects UTF-8 or UTF-16 over the
    /// declared label.
    pub fn decode(self, bytes: &[u8], errors: DecodeErrors) -> Result<String> {
        match self {
            Encoding::Ascii => self.decode_ascii(bytes, errors),
            Encoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes).into_owned()),
            Encoding::Whatwg(encoding) => match errors {
                DecodeErrors::Replace => Ok(encoding.decode(bytes).0.into_owned()),
                DecodeErrors::Strict => {
                    let (encoding, body) = match encoding_rs::Encoding::for_bom(bytes) {
                        Some((sniffed, bom_len)) => (sniffed, &bytes[bom_len..]),
                        None => (encoding, bytes),
                    };
                    encoding
                        .decode_without_bom_handling_and_without_replacement(body)
                        .map(|text| text.into_owned())
                        .ok_or_else(|| UdiffError::Decode {
                            encoding: encoding.name().to_string(),
                            reason: "input contains malformed byte sequences".to_string(),
                        })
                }
            },
        }
    }

    fn decode_ascii(self, bytes: &[u8], errors: DecodeErrors) -> Result<String> {
        let valid = encoding_rs::Encoding::ascii_valid_up_to(bytes);
        if valid == bytes.len() {
            return Ok(encoding_rs::mem::decode_latin1(bytes).into_owned());
        }

        match errors {
            DecodeErrors::Strict => Err(UdiffError::Decode {
                encoding: self.label().to_string(),
                reason: format!(
                    "byte 0x{:02x} at offset {} is not ASCII",
                    bytes[valid], valid
                ),
            }),
            DecodeErrors::Replace => Ok(bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        char::from(b)
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect()),
        }
    }
}

impl FromStr for Encoding {
    type Err = UdiffError;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim().to_ascii_lowercase().replace('_', "-");
        if ASCII_LABELS.contains(&label.as_str()) {
            return Ok(Encoding::Ascii);
        }
        if LATIN1_LABELS.contains(&label.as_str()) {
            return Ok(Encoding::Latin1);
        }

        // WHATWG labels mix `-` and `_` (`shift_jis`, `utf-16le`).
        [s.trim(), label.as_str()]
            .into_iter()
            .find_map(|candidate| encoding_rs::Encoding::for_label_no_replacement(candidate.as_bytes()))
            .map(Encoding::Whatwg)
            .ok_or_else(|| UdiffError::UnknownEncoding(s.to_string()))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

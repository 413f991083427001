//! The fixed (encoding, delimiter) candidate search space.
//!
//! Candidates are tried in a fixed priority order, encoding outer, delimiter
//! inner. This is a deliberate heuristic, not content sniffing: the bet is
//! that one of the 16 combinations parses real-world exports correctly.

use chardetng::EncodingDetector;
use encoding_rs::{WINDOWS_1252, WINDOWS_874};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Text encodings tried during the candidate search, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict UTF-8 without a byte-order mark.
    Utf8,
    /// UTF-8 with a leading byte-order mark, which is stripped.
    Utf8Bom,
    /// ISO-8859-1 (decoded as windows-1252, see [`TextEncoding::decode`]).
    Latin1,
    /// Windows code page 874 (Thai).
    Windows874,
}

/// Encodings in search priority order.
pub const ENCODINGS: [TextEncoding; 4] = [
    TextEncoding::Utf8,
    TextEncoding::Utf8Bom,
    TextEncoding::Latin1,
    TextEncoding::Windows874,
];

/// Field delimiters in search priority order.
pub const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

impl TextEncoding {
    /// Short human-readable name, used in diagnostics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Bom => "utf-8 with BOM",
            TextEncoding::Latin1 => "iso-8859-1",
            TextEncoding::Windows874 => "windows-874",
        }
    }

    /// Strictly decode `bytes`, or `None` when they are not plausible text in
    /// this encoding.
    ///
    /// Plain UTF-8 refuses input that starts with a BOM so the dedicated BOM
    /// candidate handles it and the BOM never leaks into the first header.
    ///
    /// ISO-8859-1 maps every byte, so a byte-validity check alone would
    /// accept any input and make the Windows-874 candidate unreachable
    /// (mojibake'ing Thai uploads). The Latin-1 candidate is therefore gated
    /// on `chardetng` agreeing the bytes look like the windows-1252 family.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => {
                if bytes.starts_with(&UTF8_BOM) {
                    return None;
                }
                std::str::from_utf8(bytes).ok().map(str::to_owned)
            }
            TextEncoding::Utf8Bom => {
                let body = bytes.strip_prefix(UTF8_BOM.as_slice()).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_owned)
            }
            TextEncoding::Latin1 => {
                if !looks_like_windows_1252(bytes) {
                    return None;
                }
                // encoding_rs unifies ISO-8859-1 with windows-1252, so reuse
                // that constant here.
                WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(|cow| cow.into_owned())
            }
            TextEncoding::Windows874 => WINDOWS_874
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|cow| cow.into_owned()),
        }
    }
}

/// One (encoding, delimiter) pair tried during the candidate search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCandidate {
    /// Text encoding of this candidate.
    pub encoding: TextEncoding,
    /// Field delimiter byte of this candidate.
    pub delimiter: u8,
}

impl ParseCandidate {
    /// All 16 candidates in search priority order.
    pub fn search_order() -> impl Iterator<Item = ParseCandidate> {
        ENCODINGS.into_iter().flat_map(|encoding| {
            DELIMITERS
                .into_iter()
                .map(move |delimiter| ParseCandidate { encoding, delimiter })
        })
    }
}

fn looks_like_windows_1252(bytes: &[u8]) -> bool {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let (encoding, _is_confident) = detector.guess_assess(None, true);
    encoding == WINDOWS_1252
}

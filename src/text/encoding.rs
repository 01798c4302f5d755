//! Source and target text encodings
//!
//! The shipped pack is Shift-JIS; translated text is re-encoded as GBK.
//! Encoding is lossy by contract: a character the target cannot represent
//! becomes a fixed placeholder and the caller gets a substitution count to
//! log, never an error.

use std::str::FromStr;

use encoding_rs::{GBK, SHIFT_JIS};

/// Placeholder substituted for a character the target encoding cannot
/// represent. Two bytes, so substituted characters keep a double-byte cell
/// width in the renderer.
pub const PLACEHOLDER: &[u8; 2] = b"??";

/// The two text encodings the toolkit understands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// Shift-JIS, the encoding the shipped text pack uses.
    #[default]
    ShiftJis,
    /// GBK, the default target for translated text.
    Gbk,
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sjis" | "shift-jis" | "shift_jis" => Ok(Self::ShiftJis),
            "gbk" => Ok(Self::Gbk),
            _ => Err(format!("unknown encoding '{s}' (expected sjis or gbk)")),
        }
    }
}

impl TextEncoding {
    fn table(self) -> &'static encoding_rs::Encoding {
        match self {
            Self::ShiftJis => SHIFT_JIS,
            Self::Gbk => GBK,
        }
    }

    /// Decode bytes, replacing undecodable sequences with U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        let (text, _, _) = self.table().decode(bytes);
        text.into_owned()
    }

    /// Encode a string, substituting [`PLACEHOLDER`] for every character
    /// the encoding cannot represent. Returns the bytes and the number of
    /// substitutions.
    pub fn encode_lossy(self, text: &str) -> (Vec<u8>, usize) {
        let encoding = self.table();
        let mut out = Vec::with_capacity(text.len());
        let mut substituted = 0;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let (bytes, _, failed) = encoding.encode(ch.encode_utf8(&mut buf));
            if failed {
                out.extend_from_slice(PLACEHOLDER);
                substituted += 1;
            } else {
                out.extend_from_slice(&bytes);
            }
        }
        (out, substituted)
    }
}

//! Translation exchange document
//!
//! The human-editable JSON intermediate: one entry per recognized
//! instruction, holding original/translated text pairs keyed by the source
//! offsets. Import consumes only the `Translate` strings and the offset
//! fields; `Original` is informational.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Original/translated pair for one referenced text record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextCell {
    /// Text as shipped, decoded from the source encoding.
    #[serde(rename = "Original")]
    pub original: String,
    /// Text to write back; starts out equal to `Original`.
    #[serde(rename = "Translate")]
    pub translate: String,
    /// Offset of the referenced record in the source text pack.
    #[serde(rename = "TextOffset")]
    pub text_offset: u32,
}

/// One exchange entry; `name` is JSON `null` for records without a speaker
/// name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeEntry {
    #[serde(rename = "Text")]
    pub text: TextCell,
    #[serde(rename = "Name")]
    pub name: Option<TextCell>,
    /// Window start offset of the instruction in the script stream.
    #[serde(rename = "ScriptOffset")]
    pub script_offset: u32,
}

/// Write an exchange document as pretty-printed UTF-8 JSON.
pub fn write_exchange<P: AsRef<Path>>(path: P, entries: &[ExchangeEntry]) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(entries)?)?;
    Ok(())
}

/// Read an exchange document back from disk.
pub fn read_exchange<P: AsRef<Path>>(path: P) -> Result<Vec<ExchangeEntry>> {
    Ok(serde_json::from_slice(&fs::read(path)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wire_format_uses_expected_keys() {
        let entries = vec![ExchangeEntry {
            text: TextCell {
                original: "Hi".into(),
                translate: "Bonjour".into(),
                text_offset: 16,
            },
            name: None,
            script_offset: 128,
        }];

        let json = serde_json::to_string(&entries).unwrap();
        assert_eq!(
            json,
            r#"[{"Text":{"Original":"Hi","Translate":"Bonjour","TextOffset":16},"Name":null,"ScriptOffset":128}]"#
        );
    }

    #[test]
    fn reads_document_with_and_without_names() {
        let json = r#"[
            {
                "Text": {"Original": "A", "Translate": "B", "TextOffset": 20},
                "Name": {"Original": "N", "Translate": "M", "TextOffset": 30},
                "ScriptOffset": 0
            },
            {
                "Text": {"Original": "C", "Translate": "D", "TextOffset": 40},
                "Name": null,
                "ScriptOffset": 32
            }
        ]"#;

        let entries: Vec<ExchangeEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name.as_ref().unwrap().translate, "M");
        assert_eq!(entries[0].name.as_ref().unwrap().text_offset, 30);
        assert!(entries[1].name.is_none());
        assert_eq!(entries[1].text.translate, "D");
        assert_eq!(entries[1].script_offset, 32);
    }
}

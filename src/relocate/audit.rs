//! Reference consistency diagnostics
//!
//! Cross-checks the scanned records against the text pack: how many
//! references the records hold, and which text records in the dialogue
//! region nothing points at. Purely informational - a rebuild never
//! consults it.

use std::collections::HashSet;
use std::fmt;

use crate::script::ScriptRecord;
use crate::text::TextPack;

/// Summary of how script references cover the text pack.
///
/// The "dialogue region" starts at the first recognized record's text
/// offset; records before it are UI/system strings that scripts address by
/// other means.
#[derive(Debug, Clone)]
pub struct AuditReport {
    /// Recognized script records.
    pub script_records: usize,
    /// Total text records in the pack.
    pub text_records: usize,
    /// Text records at or after the first dialogue record's text offset.
    pub dialogue_texts: usize,
    /// References the records hold: one per record plus one per name.
    pub expected_refs: usize,
    /// Dialogue-region offsets no script record references.
    pub unreferenced: Vec<u32>,
}

/// Compute the report. With no recognized records the dialogue region is
/// empty and nothing is reported unreferenced.
pub fn audit(records: &[ScriptRecord], pack: &TextPack) -> AuditReport {
    let mut referenced = HashSet::new();
    let mut expected_refs = 0;
    for record in records {
        referenced.insert(record.text_offset());
        expected_refs += 1;
        if let Some(name) = record.name_offset() {
            referenced.insert(name);
            expected_refs += 1;
        }
    }

    let mut dialogue_texts = 0;
    let mut unreferenced = Vec::new();
    if let Some(first) = records.first().map(ScriptRecord::text_offset) {
        if let Some(first_index) = pack.index_of(first) {
            dialogue_texts = pack.len() - first_index;
        }
        for entry in pack.entries() {
            if entry.offset > first && !referenced.contains(&entry.offset) {
                unreferenced.push(entry.offset);
            }
        }
    }

    AuditReport {
        script_records: records.len(),
        text_records: pack.len(),
        dialogue_texts,
        expected_refs,
        unreferenced,
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Script records:       {}", self.script_records)?;
        writeln!(f, "Text records:         {}", self.text_records)?;
        writeln!(f, "Dialogue-region text: {}", self.dialogue_texts)?;
        writeln!(f, "Expected references:  {}", self.expected_refs)?;
        if self.unreferenced.is_empty() {
            write!(f, "Unreferenced dialogue text: none")
        } else {
            write!(
                f,
                "Unreferenced dialogue text offsets: {:?}",
                self.unreferenced
            )
        }
    }
}

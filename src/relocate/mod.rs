//! Relocation / rebuild engine
//!
//! Owns the single in-memory text pack and script record list for a
//! session, joins them into the exchange document, and rebuilds both
//! artifacts with every instruction reference repatched to its record's
//! post-rebuild offset.

mod audit;

pub use audit::AuditReport;

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::exchange::{ExchangeEntry, TextCell};
use crate::script::{self, ScriptRecord};
use crate::text::{self, TextEncoding, TextPack};

/// Output of a full rebuild: the patched script stream and the rebuilt
/// text pack, offset-consistent with each other.
#[derive(Debug, Clone)]
pub struct RebuildOutput {
    /// The script stream with every exchange entry's window repatched.
    pub script: Vec<u8>,
    /// The rebuilt text pack blob.
    pub text: Vec<u8>,
}

/// A single localization session over one script/text pair.
///
/// Records and text entries are owned exclusively by the session; script
/// records point into the pack by offset value only, never by reference.
/// The design assumes at most one [`Relocator::rebuild`] per session.
pub struct Relocator {
    script: Vec<u8>,
    records: Vec<ScriptRecord>,
    record_index: HashMap<u32, usize>,
    pack: TextPack,
}

impl Relocator {
    /// Scan the script stream and parse the text pack.
    ///
    /// Both inputs must already be decrypted.
    pub fn new(script: Vec<u8>, text_blob: &[u8], source: TextEncoding) -> Result<Self> {
        let pack = text::parse_text_bytes(text_blob, source)?;
        let records = script::scan(&script);
        let record_index = records
            .iter()
            .enumerate()
            .map(|(i, record)| (record.offset(), i))
            .collect();
        tracing::info!(
            "session opened: {} script records over {} text records",
            records.len(),
            pack.len()
        );
        Ok(Self {
            script,
            records,
            record_index,
            pack,
        })
    }

    /// Recognized script records in stream order.
    pub fn records(&self) -> &[ScriptRecord] {
        &self.records
    }

    /// The session's text pack.
    pub fn pack(&self) -> &TextPack {
        &self.pack
    }

    /// Join the records and their resolved text into an exchange document.
    ///
    /// # Errors
    /// Returns [`Error::UnresolvedTextOffset`] when a record references an
    /// offset no text record starts at - the pair is inconsistent and not
    /// worth exporting.
    pub fn export(&self) -> Result<Vec<ExchangeEntry>> {
        let mut doc = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let text = self.cell(record.text_offset())?;
            let name = record.name_offset().map(|o| self.cell(o)).transpose()?;
            doc.push(ExchangeEntry {
                text,
                name,
                script_offset: record.offset(),
            });
        }
        Ok(doc)
    }

    fn cell(&self, offset: u32) -> Result<TextCell> {
        let entry = self
            .pack
            .entry_at(offset)
            .ok_or(Error::UnresolvedTextOffset { offset })?;
        Ok(TextCell {
            original: entry.text.clone(),
            translate: entry.text.clone(),
            text_offset: offset,
        })
    }

    /// Apply an edited exchange document and rebuild both artifacts.
    ///
    /// Translations are applied to the pack (name first, then text, in
    /// document order), the pack is rebuilt in `target`, and every entry's
    /// record window is patched with the referenced records' new offsets
    /// and spliced back into a copy of the script stream.
    ///
    /// # Errors
    /// Any entry whose `ScriptOffset` or text offsets fail to resolve
    /// aborts the rebuild before anything is mutated - a silently skipped
    /// patch would leave a stale offset in the output.
    pub fn rebuild(&mut self, doc: &[ExchangeEntry], target: TextEncoding) -> Result<RebuildOutput> {
        self.validate(doc)?;

        for entry in doc {
            if let Some(name) = &entry.name {
                self.pack.translate(name.text_offset, &name.translate, target)?;
            }
            self.pack
                .translate(entry.text.text_offset, &entry.text.translate, target)?;
        }

        let text = self.pack.rebuild(Some(target));

        let mut script = self.script.clone();
        for entry in doc {
            let new_text = self.relocated(entry.text.text_offset)?;
            let new_name = match &entry.name {
                Some(name) => Some(self.relocated(name.text_offset)?),
                None => None,
            };

            let index = self.record_index[&entry.script_offset];
            let record = &mut self.records[index];
            record.patch(new_text, new_name);

            let start = entry.script_offset as usize;
            script[start..start + record.len()].copy_from_slice(record.as_bytes());
        }

        tracing::info!("rebuild complete: {} entries patched", doc.len());
        Ok(RebuildOutput { script, text })
    }

    /// Diagnostic consistency report over the current session state.
    pub fn audit(&self) -> AuditReport {
        audit::audit(&self.records, &self.pack)
    }

    /// Check every reference in the document before mutating anything.
    fn validate(&self, doc: &[ExchangeEntry]) -> Result<()> {
        for entry in doc {
            if !self.record_index.contains_key(&entry.script_offset) {
                return Err(Error::UnresolvedScriptOffset {
                    offset: entry.script_offset,
                });
            }
            if self.pack.index_of(entry.text.text_offset).is_none() {
                return Err(Error::UnresolvedTextOffset {
                    offset: entry.text.text_offset,
                });
            }
            if let Some(name) = &entry.name {
                if self.pack.index_of(name.text_offset).is_none() {
                    return Err(Error::UnresolvedTextOffset {
                        offset: name.text_offset,
                    });
                }
            }
        }
        Ok(())
    }

    fn relocated(&self, offset: u32) -> Result<u32> {
        self.pack
            .entry_at(offset)
            .map(|entry| entry.new_offset)
            .ok_or(Error::UnresolvedTextOffset { offset })
    }
}

//! Text pack re-encoding and rebuild
//!
//! The rebuild writes every record back in original order, then appends a
//! second copy of each translated record at the end of the blob, in the
//! order the translations were applied. The appended copy is the one whose
//! position lands in `new_offset` - the in-line copy of a translated record
//! stays in the blob as dead data that nothing references.

use super::{HEADER_SIZE, TextEncoding, TextPack};

impl TextPack {
    /// Re-encode every untranslated record's decoded text into `target`.
    ///
    /// Translated records already carry target-encoded bytes and are left
    /// alone. Unrepresentable characters become the `??` placeholder; the
    /// total substitution count is logged.
    pub fn reencode_all(&mut self, target: TextEncoding) {
        let mut substituted = 0usize;
        for entry in &mut self.entries {
            if entry.modified {
                continue;
            }
            let (payload, count) = target.encode_lossy(&entry.text);
            entry.payload = payload;
            substituted += count;
        }
        if substituted > 0 {
            tracing::warn!(
                "{substituted} character(s) had no {target:?} representation and were replaced"
            );
        }
    }

    /// Rebuild the pack into one output blob, assigning every record its
    /// `new_offset`.
    ///
    /// The header is copied with its first byte zeroed (the rebuilt pack is
    /// written in the clear). Records are then emitted in original order
    /// with draw-control pairs stripped, and each translated record is
    /// emitted once more per translation at the current end of the blob,
    /// overwriting its `new_offset` with the later position. Pass a target
    /// encoding to run [`TextPack::reencode_all`] first; `None` keeps the
    /// stored bytes (used to check byte-identical round trips).
    ///
    /// The output walk is strictly sequential: output position determines
    /// `new_offset`.
    pub fn rebuild(&mut self, reencode: Option<TextEncoding>) -> Vec<u8> {
        if let Some(target) = reencode {
            self.reencode_all(target);
        }

        let mut blob = vec![0u8];
        blob.extend_from_slice(&self.header[1..]);
        debug_assert_eq!(blob.len(), HEADER_SIZE);

        for entry in &mut self.entries {
            let bytes = entry.compiled();
            entry.new_offset = blob.len() as u32;
            blob.extend_from_slice(&bytes);
        }

        let appended = self.modified_order.clone();
        for index in appended {
            let entry = &mut self.entries[index];
            let bytes = entry.compiled();
            entry.new_offset = blob.len() as u32;
            blob.extend_from_slice(&bytes);
        }

        tracing::debug!(
            "rebuilt text pack: {} records, {} appended copies, {} bytes",
            self.entries.len(),
            self.modified_order.len(),
            blob.len()
        );
        blob
    }
}

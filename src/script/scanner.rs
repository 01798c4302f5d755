//! Instruction scanning
//!
//! Walks the stream in 4-byte steps looking for the anchor word, then
//! matches the lo/hi discriminators against the pattern table. Anchors
//! whose window would run past either end of the stream produce no record.

use super::{ANCHOR, PATTERNS, ScriptRecord};

/// Scan a raw script stream for recognized instructions, in stream order.
///
/// Windows may overlap a neighboring record's bytes; no deduplication or
/// validation happens beyond the stream bounds.
pub fn scan(data: &[u8]) -> Vec<ScriptRecord> {
    let mut records = Vec::new();
    let mut pos = 0;
    while pos + 4 < data.len() {
        if u32::from_le_bytes(data[pos..pos + 4].try_into().unwrap()) == ANCHOR {
            if let Some(record) = match_at(data, pos) {
                records.push(record);
            }
        }
        pos += 4;
    }
    tracing::debug!("scanned {} bytes: {} records", data.len(), records.len());
    records
}

fn match_at(data: &[u8], anchor: usize) -> Option<ScriptRecord> {
    if anchor + 8 > data.len() {
        return None;
    }
    let lo = u16::from_le_bytes(data[anchor + 4..anchor + 6].try_into().unwrap());
    let hi = u16::from_le_bytes(data[anchor + 6..anchor + 8].try_into().unwrap());

    for pattern in PATTERNS {
        if hi == pattern.hi && pattern.lo.contains(&lo) {
            if anchor < pattern.lead {
                return None;
            }
            let start = anchor - pattern.lead;
            let window = data[start..start + pattern.window].to_vec();
            return Some(ScriptRecord::new(pattern.kind, start as u32, window));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::super::{NO_NAME, RecordKind};
    use super::*;
    use pretty_assertions::assert_eq;

    const DIALOGUE_LOS: [u16; 7] = [0x0002, 0x000F, 0x0010, 0x0011, 0x0012, 0x0013, 0x0014];

    fn put_anchor(data: &mut [u8], at: usize, lo: u16, hi: u16) {
        data[at..at + 4].copy_from_slice(&ANCHOR.to_le_bytes());
        data[at + 4..at + 6].copy_from_slice(&lo.to_le_bytes());
        data[at + 6..at + 8].copy_from_slice(&hi.to_le_bytes());
    }

    fn put_dialogue(data: &mut [u8], anchor: usize, lo: u16, text: u32, name: u32) {
        put_anchor(data, anchor, lo, 0x0002);
        data[anchor - 20..anchor - 16].copy_from_slice(&text.to_le_bytes());
        data[anchor - 12..anchor - 8].copy_from_slice(&name.to_le_bytes());
    }

    fn put_choice(data: &mut [u8], anchor: usize, text: u32) {
        put_anchor(data, anchor, 0x0002, 0x0006);
        data[anchor - 4..anchor].copy_from_slice(&text.to_le_bytes());
    }

    #[test]
    fn finds_all_records_in_stream_order() {
        let mut data = vec![0u8; 128];
        put_dialogue(&mut data, 24, 0x0002, 100, 200);
        put_choice(&mut data, 40, 300);
        put_dialogue(&mut data, 72, 0x000F, 400, NO_NAME);

        let records = scan(&data);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].kind(), RecordKind::Dialogue);
        assert_eq!(records[0].offset(), 0);
        assert_eq!(records[0].text_offset(), 100);
        assert_eq!(records[0].name_offset(), Some(200));

        assert_eq!(records[1].kind(), RecordKind::Choice);
        assert_eq!(records[1].offset(), 32);
        assert_eq!(records[1].text_offset(), 300);
        assert!(!records[1].has_name());

        assert_eq!(records[2].kind(), RecordKind::Dialogue);
        assert_eq!(records[2].offset(), 48);
        assert_eq!(records[2].text_offset(), 400);
        assert!(!records[2].has_name());
    }

    #[test]
    fn every_dialogue_discriminator_is_recognized() {
        for lo in DIALOGUE_LOS {
            let mut data = vec![0u8; 64];
            put_dialogue(&mut data, 24, lo, 1, NO_NAME);
            let records = scan(&data);
            assert_eq!(records.len(), 1, "lo {lo:#06x}");
            assert_eq!(records[0].kind(), RecordKind::Dialogue);
        }
    }

    #[test]
    fn unrecognized_discriminators_produce_nothing() {
        let mut data = vec![0u8; 64];
        put_anchor(&mut data, 24, 0x0003, 0x0002); // lo not whitelisted
        put_anchor(&mut data, 40, 0x0003, 0x0006); // choice lo must be 2
        put_anchor(&mut data, 56, 0x0002, 0x0004); // unknown hi
        assert!(scan(&data).is_empty());
    }

    #[test]
    fn window_bytes_are_copied_verbatim() {
        let mut data: Vec<u8> = (0u8..96).collect();
        put_dialogue(&mut data, 48, 0x0002, 100, 200);

        let records = scan(&data);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_bytes(), &data[24..56]);
    }

    #[test]
    fn truncated_trailing_anchor_is_skipped() {
        // Anchor at 56, stream ends at 62: the lo/hi read would pass the end.
        let mut data = vec![0u8; 62];
        data[56..60].copy_from_slice(&ANCHOR.to_le_bytes());
        assert!(scan(&data).is_empty());
    }

    #[test]
    fn anchor_too_close_to_start_is_skipped() {
        // A dialogue window would begin 24 bytes before the anchor.
        let mut data = vec![0u8; 64];
        put_anchor(&mut data, 16, 0x0002, 0x0002);
        assert!(scan(&data).is_empty());
    }

    #[test]
    fn choice_close_to_start_still_fits() {
        let mut data = vec![0u8; 32];
        put_choice(&mut data, 8, 5);
        let records = scan(&data);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].offset(), 0);
    }

    #[test]
    fn anchor_in_final_dword_is_never_read() {
        let mut data = vec![0u8; 32];
        data[28..32].copy_from_slice(&ANCHOR.to_le_bytes());
        assert!(scan(&data).is_empty());
    }
}

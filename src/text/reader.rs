//! Text pack parsing

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{HEADER_SIZE, TextEncoding, TextEntry, TextPack};
use crate::error::{Error, Result};

/// Read and parse a text pack from disk.
///
/// The file must already be decrypted; see [`crate::crypt::decrypt`].
pub fn read_text<P: AsRef<Path>>(path: P, source: TextEncoding) -> Result<TextPack> {
    parse_text_bytes(&fs::read(path)?, source)
}

/// Parse a text pack blob.
///
/// Records start right after the fixed header and run back to back; each is
/// delimited by the first NUL at or after its fifth byte, so the four raw
/// index bytes can never terminate a record early.
///
/// # Errors
///
/// Returns [`Error::TextPackTooSmall`] for a blob shorter than the header
/// and [`Error::UnterminatedTextEntry`] when a record runs off the end of
/// the blob without a NUL.
pub fn parse_text_bytes(data: &[u8], source: TextEncoding) -> Result<TextPack> {
    if data.len() < HEADER_SIZE {
        return Err(Error::TextPackTooSmall { size: data.len() });
    }
    let mut header = [0u8; HEADER_SIZE];
    header.copy_from_slice(&data[..HEADER_SIZE]);

    let mut entries = Vec::new();
    let mut offset_map = HashMap::new();
    let mut offset = HEADER_SIZE;
    while offset < data.len() {
        let search_from = offset + 4;
        if search_from > data.len() {
            return Err(Error::UnterminatedTextEntry { offset });
        }
        let terminator = data[search_from..]
            .iter()
            .position(|&b| b == 0)
            .map(|p| search_from + p)
            .ok_or(Error::UnterminatedTextEntry { offset })?;

        let mut index = [0u8; 4];
        index.copy_from_slice(&data[offset..offset + 4]);
        let payload = data[offset + 4..terminator].to_vec();
        let text = source.decode(&payload);

        offset_map.insert(offset as u32, entries.len());
        entries.push(TextEntry {
            offset: offset as u32,
            index,
            payload,
            text,
            modified: false,
            new_offset: 0,
        });
        offset = terminator + 1;
    }
    tracing::debug!("parsed text pack: {} records", entries.len());

    Ok(TextPack {
        header,
        entries,
        offset_map,
        modified_order: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pack_bytes(records: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        for (index, text) in records {
            data.extend_from_slice(*index);
            data.extend_from_slice(text);
            data.push(0);
        }
        data
    }

    #[test]
    fn parses_consecutive_records() {
        let data = pack_bytes(&[(&[1, 0, 0, 0], b"Hi"), (&[2, 0, 0, 0], b"Bye")]);
        let pack = parse_text_bytes(&data, TextEncoding::ShiftJis).unwrap();

        assert_eq!(pack.len(), 2);
        assert_eq!(pack.entries()[0].offset, 16);
        assert_eq!(pack.entries()[0].text, "Hi");
        assert_eq!(pack.entries()[1].offset, 23);
        assert_eq!(pack.entries()[1].text, "Bye");
        assert_eq!(pack.entries()[1].index, [2, 0, 0, 0]);
    }

    #[test]
    fn index_bytes_may_contain_nul() {
        // The terminator search starts after the index, so a zero byte
        // there does not split the record.
        let data = pack_bytes(&[(&[0, 0, 0, 0], b"Text")]);
        let pack = parse_text_bytes(&data, TextEncoding::ShiftJis).unwrap();
        assert_eq!(pack.entries()[0].text, "Text");
    }

    #[test]
    fn offset_map_is_a_bijection() {
        let data = pack_bytes(&[
            (&[1, 0, 0, 0], b"a"),
            (&[2, 0, 0, 0], b"bb"),
            (&[3, 0, 0, 0], b"ccc"),
        ]);
        let pack = parse_text_bytes(&data, TextEncoding::ShiftJis).unwrap();

        for (i, entry) in pack.entries().iter().enumerate() {
            assert_eq!(pack.index_of(entry.offset), Some(i));
        }
        assert_eq!(pack.index_of(17), None);
    }

    #[test]
    fn empty_payload_is_a_record() {
        let data = pack_bytes(&[(&[7, 7, 7, 7], b"")]);
        let pack = parse_text_bytes(&data, TextEncoding::ShiftJis).unwrap();
        assert_eq!(pack.entries()[0].text, "");
        assert_eq!(pack.entries()[0].payload, Vec::<u8>::new());
    }

    #[test]
    fn header_only_pack_is_empty() {
        let pack = parse_text_bytes(&[0u8; 16], TextEncoding::ShiftJis).unwrap();
        assert!(pack.is_empty());
    }

    #[test]
    fn blob_shorter_than_header_is_fatal() {
        assert!(matches!(
            parse_text_bytes(&[0u8; 10], TextEncoding::ShiftJis),
            Err(Error::TextPackTooSmall { size: 10 })
        ));
    }

    #[test]
    fn missing_terminator_is_fatal() {
        let mut data = pack_bytes(&[(&[1, 0, 0, 0], b"ok")]);
        data.extend_from_slice(&[9, 9, 9, 9, b'x']); // record without a NUL
        assert!(matches!(
            parse_text_bytes(&data, TextEncoding::ShiftJis),
            Err(Error::UnterminatedTextEntry { offset: 23 })
        ));
    }
}

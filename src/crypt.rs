//! Byte-rotation/XOR stream de-obfuscation
//!
//! Script and text files ship obfuscated: every 4-byte word past a fixed
//! header has its low byte bit-rotated, then the whole word is XORed with
//! two constants. The transform is stateless and word-local; the header and
//! any trailing bytes are stored in the clear.

/// Bytes at the start of an obfuscated file left untouched.
pub const CLEAR_HEADER_SIZE: usize = 16;

/// Rotation applied to the first word's low byte; grows by one per word.
const INITIAL_SHIFT: u32 = 4;

const WORD_XOR_A: u32 = 0x084D_F873;
const WORD_XOR_B: u32 = 0xFF98_7DEE;

/// Reverse the per-word obfuscation, returning the plain bytes.
///
/// Words are processed while a full word fits strictly before the final
/// byte, so the trailing bytes are copied verbatim along with the header.
/// Inputs too short to hold a single word come back unchanged.
pub fn decrypt(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    let mut shift = INITIAL_SHIFT;
    let mut pos = CLEAR_HEADER_SIZE;
    while pos + 4 < out.len() {
        out[pos] = out[pos].rotate_left(shift % 8);
        let word = u32::from_le_bytes(out[pos..pos + 4].try_into().unwrap())
            ^ WORD_XOR_A
            ^ WORD_XOR_B;
        out[pos..pos + 4].copy_from_slice(&word.to_le_bytes());
        shift += 1;
        pos += 4;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Combined mask of the two word constants.
    const MASK: u32 = WORD_XOR_A ^ WORD_XOR_B; // 0xF7D5859D

    #[test]
    fn header_and_trailing_bytes_untouched() {
        let mut data = vec![0xEEu8; 16];
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.push(0x55);

        let plain = decrypt(&data);
        assert_eq!(&plain[..16], &[0xEE; 16]);
        assert_eq!(plain[20], 0x55);
    }

    #[test]
    fn zero_word_becomes_mask() {
        let mut data = vec![0u8; 21];
        data[20] = 0x7F;

        let plain = decrypt(&data);
        assert_eq!(&plain[16..20], &MASK.to_le_bytes());
        assert_eq!(plain[20], 0x7F);
    }

    #[test]
    fn low_byte_rotated_before_xor() {
        // rol(0x0F, 4) = 0xF0, so the word is 0x000000F0 before the XOR.
        let mut data = vec![0u8; 21];
        data[16] = 0x0F;

        let plain = decrypt(&data);
        assert_eq!(&plain[16..20], &(0x0000_00F0 ^ MASK).to_le_bytes());
    }

    #[test]
    fn shift_grows_per_word() {
        // Second word's low byte rotates by 5: rol(0x01, 5) = 0x20.
        let mut data = vec![0u8; 26];
        data[20] = 0x01;

        let plain = decrypt(&data);
        assert_eq!(&plain[16..20], &MASK.to_le_bytes());
        assert_eq!(&plain[20..24], &(0x0000_0020 ^ MASK).to_le_bytes());
        assert_eq!(&plain[24..26], &[0, 0]);
    }

    #[test]
    fn short_input_unchanged() {
        let data = vec![0xABu8; 18];
        assert_eq!(decrypt(&data), data);
    }
}

//! The name hash used by Dissidia 012's PACKAGE_INFO records.
//!
//! The game never stores path strings, only 32-bit hashes of them. This is
//! the bit-exact reimplementation of the hashing routine at `0x08871428` in
//! the ULUS10566 eboot: a table-driven uppercase fold followed by a
//! non-reflected CRC-32 over the folded character codes.

/// Character-class table read out of the game executable.
///
/// Only the low bit is ever consulted: odd entries mark the characters that
/// get 32 added to their code before hashing (ASCII `A`-`Z`, which folds
/// them to lowercase). The table is kept verbatim rather than re-derived
/// from `char` methods so the hash stays byte-exact with the game.
#[rustfmt::skip]
const CHAR_CLASS: [u8; 256] = [
    //         x0   x1   x2   x3   x4   x5   x6   x7   x8   x9   xA   xB   xC   xD   xE   xF
    /* 0x */   32,  32,  32,  32,  32,  32,  32,  32,  32,  40,  40,  40,  40,  40,  32,  32,
    /* 1x */   32,  32,  32,  32,  32,  32,  32,  32,  32,  32,  32,  32,  32,  32,  32,  32,
    /* 2x */  136,  16,  16,  16,  16,  16,  16,  16,  16,  16,  16,  16,  16,  16,  16,  16,
    /* 3x */    4,   4,   4,   4,   4,   4,   4,   4,   4,   4,  16,  16,  16,  16,  16,  16,
    /* 4x */   16,  65,  65,  65,  65,  65,  65,   1,   1,   1,   1,   1,   1,   1,   1,   1,
    /* 5x */    1,   1,   1,   1,   1,   1,   1,   1,   1,   1,   1,  16,  16,  16,  16,  16,
    /* 6x */   16,  66,  66,  66,  66,  66,  66,   2,   2,   2,   2,   2,   2,   2,   2,   2,
    /* 7x */    2,   2,   2,   2,   2,   2,   2,   2,   2,   2,   2,  16,  16,  16,  16,  32,
    /* 8x */    0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    /* 9x */    0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    /* Ax */    0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    /* Bx */    0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    /* Cx */    0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    /* Dx */    0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    /* Ex */    0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
    /* Fx */    0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,
];

const POLY: u32 = 0x04C1_1DB7;

/// Hashes a path string the way the game does.
///
/// The accumulator starts at all-ones and each character code (after the
/// table-driven fold) is XORed into the top byte, followed by 8 MSB-first
/// CRC rounds. The final value is the complement of the accumulator.
///
/// Paths are expected to be ASCII/Latin-1; hashing walks UTF-16 code units
/// so that out-of-range input still wraps exactly like the 32-bit shifts in
/// the game do.
pub fn compute(path: &str) -> u32 {
    let mut acc: u32 = u32::MAX;
    for unit in path.encode_utf16() {
        let mut code = unit as u32;
        let class = CHAR_CLASS.get(code as usize).copied().unwrap_or(0);
        if class & 1 != 0 {
            code += 32;
        }
        acc ^= code.wrapping_shl(24);
        for _ in 0..8 {
            if acc & 0x8000_0000 == 0 {
                acc <<= 1;
            } else {
                acc = (acc << 1) ^ POLY;
            }
        }
    }
    !acc
}

/// Renders a hash as 8 hex digits with the byte pairs reversed, matching the
/// big-endian value the game's hook logs. Equivalent to hex-encoding the
/// little-endian byte representation.
pub fn to_hex(hash: u32) -> String {
    hex::encode(hash.to_le_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_hashes_to_zero() {
        // No characters consumed: the all-ones accumulator complements to 0.
        assert_eq!(compute(""), 0);
    }

    #[test]
    fn known_vector() {
        // Worked by hand through the 8 CRC rounds.
        assert_eq!(compute("a"), 0x19939B6B);
    }

    #[test]
    fn deterministic() {
        let path = "voice/sounds/battle_sev120.at3";
        assert_eq!(compute(path), compute(path));
    }

    #[test]
    fn uppercase_folds_to_lowercase() {
        assert_eq!(compute("A"), compute("a"));
        assert_eq!(compute("VOICE/SOUNDS/BATTLE_SEV120.AT3"), compute("voice/sounds/battle_sev120.at3"));
    }

    #[test]
    fn distinct_paths_distinct_hashes() {
        // Not guaranteed in general for a 32-bit hash, but these must differ
        // for the format to work at all.
        assert_ne!(compute("voice/sounds/battle_sev120.at3"), compute("voice/sounds/battle_sev110.at3"));
    }

    #[test]
    fn only_letters_fold() {
        // The fold is strictly A-Z; the punctuation neighbors of the letter
        // range must not collapse onto their +32 counterparts.
        assert_ne!(compute("@"), compute("`"));
        assert_ne!(compute("["), compute("{"));
    }

    #[test]
    fn hex_is_byte_swapped() {
        assert_eq!(to_hex(0x12345678), "78563412");
        assert_eq!(to_hex(0), "00000000");
    }

    #[test]
    fn hex_is_always_eight_chars() {
        for path in ["", "a", "data/menu.bin", "voice/sounds/battle_sev120.at3"] {
            assert_eq!(to_hex(compute(path)).len(), 8);
        }
    }
}

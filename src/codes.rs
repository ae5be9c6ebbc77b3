//! Static game data consumed by the wildcard and match engines.
//!
//! Collected by hooking the ULUS10566 eboot in PPSSPP: filename strings pass
//! through `0x08871288` (`{a0:s}`) and their hashes through `0x08871428`.
//! The code lists below are the character/series naming scheme observed in
//! recovered paths; the magic table maps the first bytes of a region to the
//! extension the payload actually carries.

use duodecim_pack::MagicTable;
use duodecim_wildcard::CodeLists;

/// Two-letter character and series codes (`%2s`).
pub const NAME_2: &[&str] = &[
    "wo", // Wol
    "ga", // Garland
    "fn", // Firion
    "em", // Emperor
    "on", // Onion
    "cd", // Cod
    "ce", // Cecil
    "ca", // Kain
    "gb", // Golbez
    "bu", // Bartz
    "ed", // Exdeath
    "gi", // Gilgamesh
    "ti", // Terra
    "cf", // Kefka
    "cl", // Cloud
    "tf", // Tifa
    "ae", // Aerith
    "sf", // Sephiroth
    "sq", // Squall
    "la", // Laguna
    "am", // Ultimecia
    "zi", // Zidane
    "kj", // Kuja
    "td", // Tidus
    "yu", // Yuna
    "je", // Jecht
    "sh", // Shantotto
    "pr", // Prishe
    "va", // Vaan
    "li", // Lightning
    "gs", // Gabranth
    "co", // Cosmos
    "ch", // Feral Chaos
    "na", // Narrator
    "on", // FFI
    "tw", // FFII
    "th", // FFIII
    "fo", // FFIV
    "fi", // FFV
    "si", // FFVI
    "se", // FFVII
    "eh", // FFVIII
    "ni", // FFIX
    "te", // FFX
    "gs", // Guest
    "or", // Dissidia Original
];

/// Three-letter series codes (`%3s`).
pub const NAME_3: &[&str] = &[
    "one", // FFI
    "two", // FFII
    "thr", // FFIII
    "for", // FFIV
    "fiv", // FFV
    "six", // FFVI
    "sev", // FFVII
    "eht", // FFVIII
    "nin", // FFIX
    "ten", // FFX
    "gst", // Guest
    "org", // Dissidia Original
];

/// Five-letter character codes for common files (`%5s`).
pub const NAME_5: &[&str] = &[
    "on100", // Wol
    "on200", // Garland
    "tw100", // Firion
    "tw200", // Emperor
    "th100", // Onion
    "th200", // Cod
    "fo100", // Cecil
    "fo110", // Kain
    "fo200", // Golbez
    "fi100", // Bartz
    "fi200", // Exdeath
    "fi210", // Gilgamesh
    "si100", // Terra
    "si200", // Kefka
    "se100", // Cloud
    "se110", // Tifa
    "se120", // Aerith
    "se200", // Sephiroth
    "eh100", // Squall
    "eh110", // Laguna
    "eh200", // Ultimecia
    "ni100", // Zidane
    "ni200", // Kuja
    "te100", // Tidus
    "te110", // Yuna
    "te200", // Jecht
    "gs100", // Shantotto
    "gs110", // Prishe
    "gs120", // Vaan
    "gs130", // Lightning
    "gs200", // Gabranth
    "or100", // Cosmos
    "or700", // Shinryu
    "or800", // Mog
    "or200", // Chaos
    "or210", // Feral Chaos
];

/// Full character codes for common files (`%6s`).
pub const NAME_6: &[&str] = &[
    "one100", // Wol
    "one200", // Garland
    "two100", // Firion
    "two200", // Emperor
    "thr100", // Onion
    "thr200", // Cod
    "for100", // Cecil
    "for110", // Kain
    "for200", // Golbez
    "fiv100", // Bartz
    "fiv200", // Exdeath
    "fiv210", // Gilgamesh
    "six100", // Terra
    "six200", // Kefka
    "sev100", // Cloud
    "sev110", // Tifa
    "sev120", // Aerith
    "sev200", // Sephiroth
    "eht100", // Squall
    "eht110", // Laguna
    "eht200", // Ultimecia
    "nin100", // Zidane
    "nin200", // Kuja
    "ten100", // Tidus
    "ten110", // Yuna
    "ten200", // Jecht
    "gst100", // Shantotto
    "gst110", // Prishe
    "gst120", // Vaan
    "gst130", // Lightning
    "gst200", // Gabranth
    "org100", // Cosmos
    "org700", // Shinryu
    "org800", // Mog
    "org200", // Chaos
    "org210", // Feral Chaos
];

pub const CODE_LISTS: CodeLists<'static> = CodeLists {
    name_2: NAME_2,
    name_3: NAME_3,
    name_5: NAME_5,
    name_6: NAME_6,
};

/// Extensions guessed from region magics.
pub const MAGIC_EXTS: MagicTable<'static> = MagicTable::new(&[
    (b"RIFF", "at3"),
    (b"ARC\x01", "objx"),
    (b"MPK ", "mpk"),
    (b"OMG.", "gmo"),
    (b"DES4", "id"),
    (b"PSF", "sfo"),
    (b"MIG.", "gim"),
    (b"\x02", "exex"), // can also be .se
    (b"\x04", "se"),
    (b"\x01", "cosx"),
    (b"SSCF", "scd"),
    (b"\x89PNG", "png"),
    (b"TIM2", "tm2"),
    (b"SEQ ", "sequence"),
    (b"drr", "drr"),
    (b"dec", "dec"),
    (b"dur", "dur"),
    (b"due", "due"),
    (b"dpr", "dpr"),
    (b"EXsW", "txt"),
    (b"dpc", "dpc"),
    (b"LRWD", "bin"),
    (b"mess", "bin"),
    (b"menu", "bin"),
    (b"VOLD", "bin"),
    (b"\x80\x01", "bin"), // first byte uncertain
    (b"\x80\x02", "bin"), // first byte uncertain
    (b"ef", "bin"),
    (b"\x05", "bin"),
    (b"\x06", "bin"),
    (b"PBTL", "bin"),
    (b"TPMC", "bin"),
    (b"\x02\x09", "bin"),
    (b"ACMD", "bin"),
    (b"\x01!", "bin"),
    (b"SMSC", "bin"),
    (b"SRSC", "bin"),
    (b"CLSM", "bin"),
    (b"\x04u", "bin"),
    (b"SRMC", "bin"),
    (b"SDCV", "bin"), // save_data_convert
    (b"WLCN", "data"), // unknown
    (b"P\x02", "data"), // unknown
    (b"\x05\x01", "data"), // unknown
    (b"\x01\x02", "data"), // unknown
    (b"KPSH", "data"), // unknown
    (b"\x80\x80", "data"), // unknown, bytes uncertain
    (b"\x16\x17", "data"), // unknown
    (b"", "data"), // blank file
]);

//! Keyword lookup table.
//!
//! Uses a sorted static array with binary search for `no_std` compatibility.

use super::TokenKind;

/// Keyword entry mapping text to token kind.
struct KeywordEntry {
    text: &'static str,
    kind: TokenKind,
}

/// Sorted keyword table for binary search.
///
/// IMPORTANT: This table MUST be sorted by ASCII byte order.
/// The test `test_keywords_sorted` verifies this at test time.
// Underscore (95) sorts after uppercase letters, so `SGTYPE_` comes before `SG_`.
static KEYWORDS: &[KeywordEntry] = &[
    KeywordEntry {
        text: "BA_",
        kind: TokenKind::KwBa,
    },
    KeywordEntry {
        text: "BA_DEF_",
        kind: TokenKind::KwBaDef,
    },
    KeywordEntry {
        text: "BA_DEF_DEF_",
        kind: TokenKind::KwBaDefDef,
    },
    KeywordEntry {
        text: "BO_",
        kind: TokenKind::KwBo,
    },
    KeywordEntry {
        text: "BO_TX_BU_",
        kind: TokenKind::KwBoTxBu,
    },
    KeywordEntry {
        text: "BS_",
        kind: TokenKind::KwBs,
    },
    KeywordEntry {
        text: "BU_",
        kind: TokenKind::KwBu,
    },
    KeywordEntry {
        text: "CM_",
        kind: TokenKind::KwCm,
    },
    KeywordEntry {
        text: "ENUM",
        kind: TokenKind::KwEnum,
    },
    KeywordEntry {
        text: "ENVVAR_DATA_",
        kind: TokenKind::KwEnvvarData,
    },
    KeywordEntry {
        text: "EV_",
        kind: TokenKind::KwEv,
    },
    KeywordEntry {
        text: "FLOAT",
        kind: TokenKind::KwFloat,
    },
    KeywordEntry {
        text: "HEX",
        kind: TokenKind::KwHex,
    },
    KeywordEntry {
        text: "INT",
        kind: TokenKind::KwInt,
    },
    KeywordEntry {
        text: "NS_",
        kind: TokenKind::KwNs,
    },
    KeywordEntry {
        text: "SGTYPE_",
        kind: TokenKind::KwSgtype,
    },
    KeywordEntry {
        text: "SG_",
        kind: TokenKind::KwSg,
    },
    KeywordEntry {
        text: "SG_MUL_VAL_",
        kind: TokenKind::KwSgMulVal,
    },
    KeywordEntry {
        text: "SIG_GROUP_",
        kind: TokenKind::KwSigGroup,
    },
    KeywordEntry {
        text: "SIG_VALTYPE_",
        kind: TokenKind::KwSigValtype,
    },
    KeywordEntry {
        text: "STRING",
        kind: TokenKind::KwString,
    },
    KeywordEntry {
        text: "VAL_",
        kind: TokenKind::KwVal,
    },
    KeywordEntry {
        text: "VAL_TABLE_",
        kind: TokenKind::KwValTable,
    },
    KeywordEntry {
        text: "VERSION",
        kind: TokenKind::KwVersion,
    },
];

/// Look up a keyword by its text.
///
/// Returns `None` for ordinary identifiers, including DBC statements this
/// crate does not model (`BA_DEF_REL_`, `SGTYPE_VAL_`, ...).
#[must_use]
pub fn lookup_keyword(text: &str) -> Option<TokenKind> {
    KEYWORDS
        .binary_search_by(|entry| entry.text.as_bytes().cmp(text.as_bytes()))
        .ok()
        .map(|idx| KEYWORDS[idx].kind)
}

//! Token types and spans.

use super::ByteOffset;

/// Span of source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: ByteOffset,
    /// End byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: ByteOffset, end: ByteOffset) -> Self {
        Self { start, end }
    }

    /// Get the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> ByteOffset {
        self.end - self.start
    }

    /// Check if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Token with kind and source span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Location in source text.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // === Special ===
    /// Lexical error.
    Error = 0,
    /// End of input.
    Eof,

    // === Identifiers and literals ===
    /// C-style identifier that is not a section keyword.
    Ident,
    /// Unsigned decimal integer.
    Number,
    /// Negative decimal integer.
    NegativeNumber,
    /// Decimal number with a fraction or exponent (sign included).
    Float,
    /// Quoted string literal.
    QuotedString,

    // === Punctuation ===
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `|`
    Pipe,
    /// `@`
    At,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,

    // === Section keywords ===
    /// `VERSION`
    KwVersion,
    /// `NS_`
    KwNs,
    /// `BS_`
    KwBs,
    /// `BU_`
    KwBu,
    /// `VAL_TABLE_`
    KwValTable,
    /// `BO_`
    KwBo,
    /// `SG_`
    KwSg,
    /// `BO_TX_BU_`
    KwBoTxBu,
    /// `EV_`
    KwEv,
    /// `ENVVAR_DATA_`
    KwEnvvarData,
    /// `SGTYPE_`
    KwSgtype,
    /// `CM_`
    KwCm,
    /// `BA_DEF_`
    KwBaDef,
    /// `BA_DEF_DEF_`
    KwBaDefDef,
    /// `BA_`
    KwBa,
    /// `VAL_`
    KwVal,
    /// `SIG_GROUP_`
    KwSigGroup,
    /// `SIG_VALTYPE_`
    KwSigValtype,
    /// `SG_MUL_VAL_`
    KwSgMulVal,

    // === Attribute value-type keywords ===
    /// `INT`
    KwInt,
    /// `HEX`
    KwHex,
    /// `FLOAT`
    KwFloat,
    /// `STRING`
    KwString,
    /// `ENUM`
    KwEnum,
}

impl TokenKind {
    /// Check if this is a section keyword (a token that can start a statement).
    #[must_use]
    pub const fn is_section_keyword(self) -> bool {
        matches!(
            self,
            Self::KwVersion
                | Self::KwNs
                | Self::KwBs
                | Self::KwBu
                | Self::KwValTable
                | Self::KwBo
                | Self::KwSg
                | Self::KwBoTxBu
                | Self::KwEv
                | Self::KwEnvvarData
                | Self::KwSgtype
                | Self::KwCm
                | Self::KwBaDef
                | Self::KwBaDefDef
                | Self::KwBa
                | Self::KwVal
                | Self::KwSigGroup
                | Self::KwSigValtype
                | Self::KwSgMulVal
        )
    }

    /// Check if this token can be used where a name is expected.
    ///
    /// Attribute value-type keywords are only reserved inside `BA_DEF_`, so a
    /// node or signal called `INT` is still a valid name.
    #[must_use]
    pub const fn is_name(self) -> bool {
        matches!(
            self,
            Self::Ident | Self::KwInt | Self::KwHex | Self::KwFloat | Self::KwString | Self::KwEnum
        )
    }

    /// Check if this token is a numeric literal.
    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(self, Self::Number | Self::NegativeNumber | Self::Float)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(4, 10);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert!(Span::new(3, 3).is_empty());
    }

    #[test]
    fn test_name_kinds() {
        assert!(TokenKind::Ident.is_name());
        assert!(TokenKind::KwInt.is_name());
        assert!(!TokenKind::KwBo.is_name());
        assert!(!TokenKind::Number.is_name());
    }

    #[test]
    fn test_section_keywords() {
        assert!(TokenKind::KwBo.is_section_keyword());
        assert!(TokenKind::KwSgMulVal.is_section_keyword());
        assert!(!TokenKind::KwEnum.is_section_keyword());
        assert!(!TokenKind::Ident.is_section_keyword());
    }
}

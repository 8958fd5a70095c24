//! DBC lexer module.
//!
//! Tokenizes DBC source text into a token stream.

// Allow truncation casts - we limit source size to u32::MAX bytes
#![allow(clippy::cast_possible_truncation)]

mod keyword;
mod token;

pub use keyword::lookup_keyword;
pub use token::{Span, Token, TokenKind};

use alloc::string::String;
use alloc::vec::Vec;

/// Byte offset into source text.
pub type ByteOffset = u32;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// The input is malformed; no network is produced.
    Error,
    /// Informational; tokenizing continues.
    Warning,
}

/// A diagnostic message from the lexer or parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Location in source text.
    pub span: Span,
    /// Human-readable message.
    pub message: String,
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(
            f,
            "{severity} at {}..{}: {}",
            self.span.start, self.span.end, self.message
        )
    }
}

/// DBC lexer.
///
/// Tokenizes source text into a stream of tokens. Lexical errors are
/// reported as [`TokenKind::Error`] tokens plus a collected diagnostic; the
/// parser decides whether they are fatal.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src [u8],
    /// Current byte position.
    pos: usize,
    /// Collected diagnostics.
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Get a reference to collected diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Tokenize the entire source and return all tokens.
    ///
    /// The returned stream always ends with a single [`TokenKind::Eof`] token.
    #[must_use]
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.pos;

        let Some(b) = self.peek() else {
            return self.token(TokenKind::Eof, start);
        };

        let single = match b {
            b':' => Some(TokenKind::Colon),
            b';' => Some(TokenKind::Semicolon),
            b',' => Some(TokenKind::Comma),
            b'|' => Some(TokenKind::Pipe),
            b'@' => Some(TokenKind::At),
            b'+' => Some(TokenKind::Plus),
            b'(' => Some(TokenKind::LParen),
            b')' => Some(TokenKind::RParen),
            b'[' => Some(TokenKind::LBracket),
            b']' => Some(TokenKind::RBracket),
            _ => None,
        };
        if let Some(kind) = single {
            self.advance();
            return self.token(kind, start);
        }

        // Minus is a sign only when a digit (or `.digit`) follows directly
        if b == b'-' {
            if self.starts_number_at(1) {
                self.advance();
                return self.scan_number(start, true);
            }
            self.advance();
            return self.token(TokenKind::Minus, start);
        }

        if self.starts_number_at(0) {
            return self.scan_number(start, false);
        }

        if b == b'"' {
            return self.scan_quoted_string();
        }

        if b.is_ascii_alphabetic() || b == b'_' {
            return self.scan_identifier_or_keyword();
        }

        // Unknown character: consume the whole UTF-8 sequence so spans stay on
        // character boundaries.
        self.advance();
        while self.peek().is_some_and(|b| (b & 0xC0) == 0x80) {
            self.advance();
        }
        let span = self.span_from(start);
        let text = core::str::from_utf8(&self.source[start..self.pos]).unwrap_or("?");
        self.error(span, alloc::format!("unexpected character: {text:?}"));
        self.token(TokenKind::Error, start)
    }

    /// Peek at the current byte without advancing.
    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    /// Peek at the byte at offset from current position.
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    /// Advance by one byte and return it.
    fn advance(&mut self) -> Option<u8> {
        let b = self.source.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    /// Skip whitespace and `//` line comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => {
                    self.advance();
                }
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Check whether a number literal starts at `offset`.
    fn starts_number_at(&self, offset: usize) -> bool {
        match self.peek_at(offset) {
            Some(b) if b.is_ascii_digit() => true,
            Some(b'.') => self.peek_at(offset + 1).is_some_and(|b| b.is_ascii_digit()),
            _ => false,
        }
    }

    /// Add an error diagnostic.
    fn error(&mut self, span: Span, message: String) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            span,
            message,
        });
    }

    /// Make a span from start to current position.
    fn span_from(&self, start: usize) -> Span {
        Span {
            start: start as ByteOffset,
            end: self.pos as ByteOffset,
        }
    }

    /// Make a token from start position to current position.
    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            span: self.span_from(start),
        }
    }

    /// Scan an identifier or keyword.
    fn scan_identifier_or_keyword(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.advance();
        }

        let text = core::str::from_utf8(&self.source[start..self.pos]).unwrap_or("");
        let kind = lookup_keyword(text).unwrap_or(TokenKind::Ident);
        self.token(kind, start)
    }

    /// Scan a number literal. `start` points at the sign when `negative` is set.
    fn scan_number(&mut self, start: usize, negative: bool) -> Token {
        let mut is_float = false;

        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some(b'.') {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent only counts when digits follow, otherwise `e` starts an identifier
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let digits_at = if matches!(self.peek_at(1), Some(b'+' | b'-')) {
                2
            } else {
                1
            };
            if self.peek_at(digits_at).is_some_and(|b| b.is_ascii_digit()) {
                is_float = true;
                for _ in 0..digits_at {
                    self.advance();
                }
                while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let kind = if is_float {
            TokenKind::Float
        } else if negative {
            TokenKind::NegativeNumber
        } else {
            TokenKind::Number
        };
        self.token(kind, start)
    }

    /// Scan a quoted string literal, honouring `\"` and `\\` escapes.
    fn scan_quoted_string(&mut self) -> Token {
        let start = self.pos;
        self.advance(); // opening quote

        loop {
            match self.peek() {
                None => {
                    let span = self.span_from(start);
                    self.error(span, "unterminated string literal".into());
                    return self.token(TokenKind::Error, start);
                }
                Some(b'\\') => {
                    self.advance();
                    self.advance();
                }
                Some(b'"') => {
                    self.advance();
                    return self.token(TokenKind::QuotedString, start);
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }
}

/// Iterator implementation for convenient token iteration.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Helper to tokenize and get kinds only.
    fn token_kinds(source: &str) -> Vec<TokenKind> {
        let lexer = Lexer::new(source);
        let (tokens, _) = lexer.tokenize();
        tokens.into_iter().map(|t| t.kind).collect()
    }

    /// Helper to tokenize and get text slices.
    fn token_texts(source: &str) -> Vec<&str> {
        let lexer = Lexer::new(source);
        let (tokens, _) = lexer.tokenize();
        tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| &source[t.span.start as usize..t.span.end as usize])
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_kinds(""), vec![TokenKind::Eof]);
        assert_eq!(token_kinds("  \r\n\t "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            token_kinds(": ; , | @ + ( ) [ ]"),
            vec![
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::Pipe,
                TokenKind::At,
                TokenKind::Plus,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            token_kinds("0 42 -7 1.5 -0.25 1e3 2.5E-2 .5"),
            vec![
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::NegativeNumber,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Float,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            token_texts("-0.25 2.5E-2"),
            vec!["-0.25", "2.5E-2"]
        );
    }

    #[test]
    fn test_minus_without_digit() {
        assert_eq!(
            token_kinds("@0- ("),
            vec![
                TokenKind::At,
                TokenKind::Number,
                TokenKind::Minus,
                TokenKind::LParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_signal_layout() {
        assert_eq!(
            token_texts("0|8@1+ (0.5,-40) [-40|87.5]"),
            vec![
                "0", "|", "8", "@", "1", "+", "(", "0.5", ",", "-40", ")", "[", "-40", "|",
                "87.5", "]"
            ]
        );
    }

    #[test]
    fn test_mux_range_lexes_as_negative() {
        // `0-1` in SG_MUL_VAL_ ranges: the parser strips the sign
        assert_eq!(
            token_kinds("0-1"),
            vec![TokenKind::Number, TokenKind::NegativeNumber, TokenKind::Eof]
        );
    }

    #[test]
    fn test_identifiers_and_keywords() {
        assert_eq!(
            token_kinds("BO_ EngineData Vector__XXX m3M SG_ BA_DEF_REL_"),
            vec![
                TokenKind::KwBo,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::KwSg,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_exponent_needs_digits() {
        // `2e` followed by a letter is a number then an identifier
        assert_eq!(
            token_kinds("2 ex"),
            vec![TokenKind::Number, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_quoted_string() {
        let texts = token_texts(r#""km/h" "say \"hi\"" "multi
line""#);
        assert_eq!(texts, vec![r#""km/h""#, r#""say \"hi\"""#, "\"multi\nline\""]);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, diagnostics) = Lexer::new("\"open").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(
            token_kinds("BU_: // trailing comment\nECU1"),
            vec![
                TokenKind::KwBu,
                TokenKind::Colon,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let (tokens, diagnostics) = Lexer::new("BU_ $").tokenize();
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert!(diagnostics[0].message.contains("unexpected character"));
    }

    #[test]
    fn test_non_ascii_error_span_is_char_aligned() {
        let source = "ä";
        let (tokens, _) = Lexer::new(source).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].span, Span::new(0, 2));
    }

    #[test]
    fn test_span_tracking() {
        let (tokens, _) = Lexer::new("BO_ 100").tokenize();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(4, 7));
        assert_eq!(tokens[2].span, Span::new(7, 7));
    }

    #[test]
    fn test_iterator_stops_before_eof() {
        let kinds: Vec<_> = Lexer::new("BU_ :").map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::KwBu, TokenKind::Colon]);
    }
}

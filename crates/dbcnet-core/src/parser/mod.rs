//! DBC parser module.
//!
//! Parses DBC source text into a flat [`Document`] fact set.
//!
//! The parser accepts or rejects: the first lexical or syntactic error is
//! returned and no document is produced. Statements that are recognised but
//! not modelled (`BA_DEF_REL_`, `SGTYPE_VAL_`, `CAT_`, ...) are skipped up to
//! their terminating `;`.

use crate::ast::{
    AttrLiteral, AttributeDefaultDef, AttributeDefinitionDef, AttributeValueDef,
    AttributeValueTypeDef, BitTimingDef, CommentDef, Document, EnvVarDataDef, EnvVarDef,
    MessageDef, MessageTransmittersDef, MuxRangeDef, NodeDef, SignalDef,
    SignalExtendedValueTypeDef, SignalGroupDef, SignalMultiplexerValueDef, SignalTypeDef,
    ValueDescriptionDef, ValueDescriptionItem, ValueTableDef,
};
use crate::lexer::{Diagnostic, Lexer, Severity, Span, Token, TokenKind};
use alloc::string::String;
use alloc::vec::Vec;

/// Statements the parser knows but skips.
///
/// They lex as plain identifiers, so name lists (receivers, node lists, ...)
/// must stop in front of them.
const SKIPPED_STATEMENTS: &[&str] = &[
    "BA_DEF_DEF_REL_",
    "BA_DEF_REL_",
    "BA_DEF_SGTYPE_",
    "BA_REL_",
    "BA_SGTYPE_",
    "BU_BO_REL_",
    "BU_EV_REL_",
    "BU_SG_REL_",
    "CAT_",
    "CAT_DEF_",
    "EV_DATA_",
    "FILTER",
    "NS_DESC_",
    "SGTYPE_VAL_",
    "SIGTYPE_VALTYPE_",
    "SIG_TYPE_REF_",
];

/// Check whether an identifier starts a skipped statement.
fn is_skipped_statement(text: &str) -> bool {
    SKIPPED_STATEMENTS.contains(&text)
}

/// Resolve `\"` and `\\` escapes in the body of a quoted string.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(e @ ('"' | '\\')) => out.push(e),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// DBC parser.
///
/// Parses a token stream into a [`Document`]. There is no error recovery.
pub struct Parser<'src> {
    /// Source text (for extracting token content).
    source: &'src str,
    /// Tokens from lexer.
    tokens: Vec<Token>,
    /// Current position in token stream.
    pos: usize,
    /// Lexer diagnostics; any error among them rejects the input.
    lexer_diagnostics: Vec<Diagnostic>,
}

impl<'src> Parser<'src> {
    /// Create a new parser for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let lexer = Lexer::new(source);
        let (tokens, lexer_diagnostics) = lexer.tokenize();
        Self {
            source,
            tokens,
            pos: 0,
            lexer_diagnostics,
        }
    }

    /// Parse a complete DBC document.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or syntax error.
    pub fn parse_document(mut self) -> Result<Document, Diagnostic> {
        if let Some(diag) = self
            .lexer_diagnostics
            .iter()
            .find(|d| d.severity == Severity::Error)
        {
            return Err(diag.clone());
        }

        let mut doc = Document::new();
        while !self.is_eof() {
            self.parse_statement(&mut doc)?;
        }
        Ok(doc)
    }

    // === Token access methods ===

    /// Get the EOF token for this source.
    fn eof_token(&self) -> Token {
        #[allow(clippy::cast_possible_truncation)]
        let end = self.source.len() as u32;
        Token::new(TokenKind::Eof, Span::new(end, end))
    }

    /// Check if we're at EOF.
    fn is_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Peek at current token.
    fn peek(&self) -> Token {
        self.tokens
            .get(self.pos)
            .copied()
            .unwrap_or_else(|| self.eof_token())
    }

    /// Advance and return current token.
    fn advance(&mut self) -> Token {
        let token = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Check if current token is of given kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token if it is of given kind.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume token of given kind, or return error.
    fn expect(&mut self, kind: TokenKind) -> Result<Token, Diagnostic> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(&alloc::format!("expected {kind:?}, found {:?}", self.peek().kind)))
        }
    }

    /// Extract text for a span.
    fn text(&self, span: Span) -> &'src str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }

    /// Create an error diagnostic at current position.
    fn error(&self, message: &str) -> Diagnostic {
        self.error_at(self.peek().span, message)
    }

    /// Create an error diagnostic at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            span,
            message: message.into(),
        }
    }

    /// Check whether the current token begins a new statement.
    fn at_statement_start(&self) -> bool {
        let token = self.peek();
        token.kind.is_section_keyword()
            || (token.kind == TokenKind::Ident && is_skipped_statement(self.text(token.span)))
    }

    // === Terminal parsers ===

    /// Parse a name (identifier, or an attribute type keyword used as a name).
    fn parse_name(&mut self) -> Result<String, Diagnostic> {
        let token = self.peek();
        if token.kind.is_name() {
            self.advance();
            Ok(self.text(token.span).into())
        } else {
            Err(self.error("expected name"))
        }
    }

    /// Parse a quoted string and resolve its escapes.
    fn parse_string(&mut self) -> Result<String, Diagnostic> {
        let token = self.expect(TokenKind::QuotedString)?;
        let text = self.text(token.span);
        let body = text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or("");
        Ok(unescape(body))
    }

    /// Parse an unsigned integer.
    fn parse_u64(&mut self) -> Result<u64, Diagnostic> {
        let token = self.expect(TokenKind::Number)?;
        self.text(token.span)
            .parse::<u64>()
            .map_err(|_| self.error_at(token.span, "integer out of range"))
    }

    /// Parse a signed integer. A float literal is truncated towards zero.
    fn parse_i64(&mut self) -> Result<i64, Diagnostic> {
        self.eat(TokenKind::Plus);
        let token = self.peek();
        let text = self.text(token.span);
        let value = match token.kind {
            #[allow(clippy::cast_possible_wrap)]
            TokenKind::Number => text
                .parse::<i64>()
                .ok()
                .or_else(|| text.parse::<u64>().ok().map(|v| v as i64)),
            TokenKind::NegativeNumber => text.parse::<i64>().ok(),
            #[allow(clippy::cast_possible_truncation)]
            TokenKind::Float => text.parse::<f64>().ok().map(|f| f as i64),
            _ => return Err(self.error("expected integer")),
        };
        let value = value.ok_or_else(|| self.error_at(token.span, "integer out of range"))?;
        self.advance();
        Ok(value)
    }

    /// Parse any numeric literal as a float.
    fn parse_f64(&mut self) -> Result<f64, Diagnostic> {
        self.eat(TokenKind::Plus);
        let token = self.peek();
        if !token.kind.is_number() {
            return Err(self.error("expected number"));
        }
        let value = self
            .text(token.span)
            .parse::<f64>()
            .map_err(|_| self.error_at(token.span, "invalid number"))?;
        self.advance();
        Ok(value)
    }

    /// Parse an attribute value literal (number or quoted string).
    fn parse_attr_literal(&mut self) -> Result<AttrLiteral, Diagnostic> {
        self.eat(TokenKind::Plus);
        let token = self.peek();
        let text = self.text(token.span);
        let literal = match token.kind {
            TokenKind::QuotedString => return self.parse_string().map(AttrLiteral::String),
            TokenKind::Number | TokenKind::NegativeNumber => match text.parse::<i64>() {
                Ok(v) => AttrLiteral::Int(v),
                Err(_) => AttrLiteral::Float(
                    text.parse::<f64>()
                        .map_err(|_| self.error_at(token.span, "invalid number"))?,
                ),
            },
            TokenKind::Float => AttrLiteral::Float(
                text.parse::<f64>()
                    .map_err(|_| self.error_at(token.span, "invalid number"))?,
            ),
            _ => return Err(self.error("expected attribute value")),
        };
        self.advance();
        Ok(literal)
    }

    /// Parse a byte order digit and sign: `0+`, `1-`.
    fn parse_layout_suffix(&mut self) -> Result<(char, char), Diagnostic> {
        self.expect(TokenKind::At)?;
        let order = self.expect(TokenKind::Number)?;
        let byte_order = match self.text(order.span) {
            "0" => '0',
            "1" => '1',
            _ => return Err(self.error_at(order.span, "byte order must be 0 or 1")),
        };
        let value_type = if self.eat(TokenKind::Plus) {
            '+'
        } else if self.eat(TokenKind::Minus) {
            '-'
        } else {
            return Err(self.error("expected value type '+' or '-'"));
        };
        Ok((byte_order, value_type))
    }

    /// Parse `(factor,offset) [min|max] "unit"`.
    fn parse_scaling(&mut self) -> Result<(f64, f64, f64, f64, String), Diagnostic> {
        self.expect(TokenKind::LParen)?;
        let factor = self.parse_f64()?;
        self.expect(TokenKind::Comma)?;
        let offset = self.parse_f64()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::LBracket)?;
        let minimum = self.parse_f64()?;
        self.expect(TokenKind::Pipe)?;
        let maximum = self.parse_f64()?;
        self.expect(TokenKind::RBracket)?;
        let unit = self.parse_string()?;
        Ok((factor, offset, minimum, maximum, unit))
    }

    /// Parse a whitespace or comma separated name list up to the next statement.
    fn parse_name_list(&mut self) -> Result<Vec<String>, Diagnostic> {
        let mut names = Vec::new();
        loop {
            if self.at_statement_start() {
                break;
            }
            if self.peek().kind.is_name() {
                names.push(self.parse_name()?);
            } else if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(names)
    }

    /// Parse `value "description"` pairs up to `;`.
    fn parse_value_descriptions(&mut self) -> Result<Vec<ValueDescriptionItem>, Diagnostic> {
        let mut items = Vec::new();
        while !self.check(TokenKind::Semicolon) {
            let value = self.parse_i64()?;
            let description = self.parse_string()?;
            items.push(ValueDescriptionItem { value, description });
        }
        self.expect(TokenKind::Semicolon)?;
        Ok(items)
    }

    // === Statement parsers ===

    /// Parse one top-level statement into the document.
    fn parse_statement(&mut self, doc: &mut Document) -> Result<(), Diagnostic> {
        let token = self.peek();
        match token.kind {
            TokenKind::KwVersion => {
                self.advance();
                doc.version = self.parse_string()?;
            }
            TokenKind::KwNs => doc.new_symbols = self.parse_new_symbols()?,
            TokenKind::KwBs => doc.bit_timing = self.parse_bit_timing()?,
            TokenKind::KwBu => {
                self.advance();
                self.expect(TokenKind::Colon)?;
                let names = self.parse_name_list()?;
                doc.nodes.extend(names.into_iter().map(|name| NodeDef { name }));
            }
            TokenKind::KwValTable => doc.value_tables.push(self.parse_value_table()?),
            TokenKind::KwBo => doc.messages.push(self.parse_message()?),
            TokenKind::KwBoTxBu => doc.message_transmitters.push(self.parse_message_transmitters()?),
            TokenKind::KwEv => doc.environment_variables.push(self.parse_env_var()?),
            TokenKind::KwEnvvarData => {
                doc.environment_variable_data.push(self.parse_env_var_data()?);
            }
            TokenKind::KwSgtype => doc.signal_types.push(self.parse_signal_type()?),
            TokenKind::KwCm => doc.comments.push(self.parse_comment()?),
            TokenKind::KwBaDef => doc.attribute_definitions.push(self.parse_attribute_definition()?),
            TokenKind::KwBaDefDef => doc.attribute_defaults.push(self.parse_attribute_default()?),
            TokenKind::KwBa => doc.attribute_values.push(self.parse_attribute_value()?),
            TokenKind::KwVal => doc.value_descriptions.push(self.parse_value_description()?),
            TokenKind::KwSigGroup => doc.signal_groups.push(self.parse_signal_group()?),
            TokenKind::KwSigValtype => {
                doc.signal_extended_value_types
                    .push(self.parse_signal_extended_value_type()?);
            }
            TokenKind::KwSgMulVal => {
                doc.signal_multiplexer_values
                    .push(self.parse_signal_multiplexer_value()?);
            }
            TokenKind::Ident if is_skipped_statement(self.text(token.span)) => {
                self.skip_statement()?;
            }
            TokenKind::KwSg => return Err(self.error("SG_ outside of a BO_ message")),
            _ => return Err(self.error("expected statement")),
        }
        Ok(())
    }

    /// Skip a statement up to and including its `;`.
    fn skip_statement(&mut self) -> Result<(), Diagnostic> {
        while !self.check(TokenKind::Semicolon) {
            if self.is_eof() {
                return Err(self.error("unterminated statement"));
            }
            self.advance();
        }
        self.advance();
        Ok(())
    }

    /// `NS_ : sym sym ...`
    ///
    /// The list holds statement keywords, so it only ends at `BS_`, `BU_`,
    /// `BO_` or end of input.
    fn parse_new_symbols(&mut self) -> Result<Vec<String>, Diagnostic> {
        self.expect(TokenKind::KwNs)?;
        self.expect(TokenKind::Colon)?;
        let mut symbols = Vec::new();
        loop {
            let token = self.peek();
            let is_symbol = token.kind.is_name()
                || (token.kind.is_section_keyword()
                    && !matches!(
                        token.kind,
                        TokenKind::KwBs | TokenKind::KwBu | TokenKind::KwBo | TokenKind::KwVersion
                    ));
            if !is_symbol {
                break;
            }
            self.advance();
            symbols.push(self.text(token.span).into());
        }
        Ok(symbols)
    }

    /// `BS_ : [baudrate : btr1 , btr2]`
    fn parse_bit_timing(&mut self) -> Result<Option<BitTimingDef>, Diagnostic> {
        self.expect(TokenKind::KwBs)?;
        self.expect(TokenKind::Colon)?;
        if !self.check(TokenKind::Number) {
            return Ok(None);
        }
        let baudrate = self.parse_u64()?;
        self.expect(TokenKind::Colon)?;
        let btr1 = self.parse_u64()?;
        self.expect(TokenKind::Comma)?;
        let btr2 = self.parse_u64()?;
        Ok(Some(BitTimingDef {
            baudrate,
            btr1,
            btr2,
        }))
    }

    /// `VAL_TABLE_ name value "desc" ... ;`
    fn parse_value_table(&mut self) -> Result<ValueTableDef, Diagnostic> {
        self.expect(TokenKind::KwValTable)?;
        let name = self.parse_name()?;
        let items = self.parse_value_descriptions()?;
        Ok(ValueTableDef { name, items })
    }

    /// `BO_ id name : size transmitter` followed by its `SG_` lines.
    fn parse_message(&mut self) -> Result<MessageDef, Diagnostic> {
        self.expect(TokenKind::KwBo)?;
        let id = self.parse_u64()?;
        let name = self.parse_name()?;
        self.expect(TokenKind::Colon)?;
        let size = self.parse_u64()?;
        let transmitter = self.parse_name()?;

        let mut signals = Vec::new();
        while self.check(TokenKind::KwSg) {
            signals.push(self.parse_signal()?);
        }

        Ok(MessageDef {
            id,
            name,
            size,
            transmitter,
            signals,
        })
    }

    /// `SG_ name [mux] : start|size@order sign (factor,offset) [min|max] "unit" receivers`
    fn parse_signal(&mut self) -> Result<SignalDef, Diagnostic> {
        self.expect(TokenKind::KwSg)?;
        let name = self.parse_name()?;
        let multiplexer_indicator = if self.check(TokenKind::Colon) {
            None
        } else {
            Some(self.parse_name()?)
        };
        self.expect(TokenKind::Colon)?;
        let start_bit = self.parse_u64()?;
        self.expect(TokenKind::Pipe)?;
        let signal_size = self.parse_u64()?;
        let (byte_order, value_type) = self.parse_layout_suffix()?;
        let (factor, offset, minimum, maximum, unit) = self.parse_scaling()?;
        let receivers = self.parse_name_list()?;

        Ok(SignalDef {
            name,
            multiplexer_indicator,
            start_bit,
            signal_size,
            byte_order,
            value_type,
            factor,
            offset,
            minimum,
            maximum,
            unit,
            receivers,
        })
    }

    /// `BO_TX_BU_ id : name, name ;`
    fn parse_message_transmitters(&mut self) -> Result<MessageTransmittersDef, Diagnostic> {
        self.expect(TokenKind::KwBoTxBu)?;
        let message_id = self.parse_u64()?;
        self.expect(TokenKind::Colon)?;
        let transmitters = self.parse_name_list()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(MessageTransmittersDef {
            message_id,
            transmitters,
        })
    }

    /// `EV_ name : type [min|max] "unit" initial id access_type access_nodes ;`
    fn parse_env_var(&mut self) -> Result<EnvVarDef, Diagnostic> {
        self.expect(TokenKind::KwEv)?;
        let name = self.parse_name()?;
        self.expect(TokenKind::Colon)?;
        let var_type = self.parse_u64()?;
        self.expect(TokenKind::LBracket)?;
        let minimum = self.parse_f64()?;
        self.expect(TokenKind::Pipe)?;
        let maximum = self.parse_f64()?;
        self.expect(TokenKind::RBracket)?;
        let unit = self.parse_string()?;
        let initial_value = self.parse_f64()?;
        let id = self.parse_u64()?;
        let access_type = self.parse_name()?;
        let access_nodes = self.parse_name_list()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(EnvVarDef {
            name,
            var_type,
            minimum,
            maximum,
            unit,
            initial_value,
            id,
            access_type,
            access_nodes,
        })
    }

    /// `ENVVAR_DATA_ name : size ;`
    fn parse_env_var_data(&mut self) -> Result<EnvVarDataDef, Diagnostic> {
        self.expect(TokenKind::KwEnvvarData)?;
        let name = self.parse_name()?;
        self.expect(TokenKind::Colon)?;
        let size = self.parse_u64()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(EnvVarDataDef { name, size })
    }

    /// `SGTYPE_ name : size@order sign (factor,offset) [min|max] "unit" default , table ;`
    fn parse_signal_type(&mut self) -> Result<SignalTypeDef, Diagnostic> {
        self.expect(TokenKind::KwSgtype)?;
        let name = self.parse_name()?;
        self.expect(TokenKind::Colon)?;
        let size = self.parse_u64()?;
        let (byte_order, value_type) = self.parse_layout_suffix()?;
        let (factor, offset, minimum, maximum, unit) = self.parse_scaling()?;
        let default_value = self.parse_f64()?;
        self.expect(TokenKind::Comma)?;
        let value_table_name = self.parse_name()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(SignalTypeDef {
            name,
            size,
            byte_order,
            value_type,
            factor,
            offset,
            minimum,
            maximum,
            unit,
            default_value,
            value_table_name,
        })
    }

    /// `CM_ [BU_ node | BO_ id | SG_ id signal | EV_ name] "text" ;`
    fn parse_comment(&mut self) -> Result<CommentDef, Diagnostic> {
        self.expect(TokenKind::KwCm)?;
        let comment = match self.peek().kind {
            TokenKind::KwBu => {
                self.advance();
                let node_name = self.parse_name()?;
                CommentDef::Node {
                    node_name,
                    comment: self.parse_string()?,
                }
            }
            TokenKind::KwBo => {
                self.advance();
                let message_id = self.parse_u64()?;
                CommentDef::Message {
                    message_id,
                    comment: self.parse_string()?,
                }
            }
            TokenKind::KwSg => {
                self.advance();
                let message_id = self.parse_u64()?;
                let signal_name = self.parse_name()?;
                CommentDef::Signal {
                    message_id,
                    signal_name,
                    comment: self.parse_string()?,
                }
            }
            TokenKind::KwEv => {
                self.advance();
                let env_var_name = self.parse_name()?;
                CommentDef::EnvVar {
                    env_var_name,
                    comment: self.parse_string()?,
                }
            }
            _ => CommentDef::Network {
                comment: self.parse_string()?,
            },
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(comment)
    }

    /// `BA_DEF_ [BU_|BO_|SG_|EV_] "name" value_type ;`
    fn parse_attribute_definition(&mut self) -> Result<AttributeDefinitionDef, Diagnostic> {
        self.expect(TokenKind::KwBaDef)?;
        let object_type = match self.peek().kind {
            TokenKind::KwBu | TokenKind::KwBo | TokenKind::KwSg | TokenKind::KwEv => {
                let token = self.advance();
                Some(self.text(token.span).into())
            }
            _ => None,
        };
        let name = self.parse_string()?;
        let value_type = match self.peek().kind {
            TokenKind::KwInt => {
                self.advance();
                AttributeValueTypeDef::Int {
                    minimum: self.parse_i64()?,
                    maximum: self.parse_i64()?,
                }
            }
            TokenKind::KwHex => {
                self.advance();
                AttributeValueTypeDef::Hex {
                    minimum: self.parse_i64()?,
                    maximum: self.parse_i64()?,
                }
            }
            TokenKind::KwFloat => {
                self.advance();
                AttributeValueTypeDef::Float {
                    minimum: self.parse_f64()?,
                    maximum: self.parse_f64()?,
                }
            }
            TokenKind::KwString => {
                self.advance();
                AttributeValueTypeDef::String
            }
            TokenKind::KwEnum => {
                self.advance();
                let mut values = Vec::new();
                while self.check(TokenKind::QuotedString) {
                    values.push(self.parse_string()?);
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                AttributeValueTypeDef::Enum { values }
            }
            _ => return Err(self.error("expected INT, HEX, FLOAT, STRING or ENUM")),
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(AttributeDefinitionDef {
            object_type,
            name,
            value_type,
        })
    }

    /// `BA_DEF_DEF_ "name" value ;`
    fn parse_attribute_default(&mut self) -> Result<AttributeDefaultDef, Diagnostic> {
        self.expect(TokenKind::KwBaDefDef)?;
        let name = self.parse_string()?;
        let value = self.parse_attr_literal()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(AttributeDefaultDef { name, value })
    }

    /// `BA_ "name" [BU_ node | BO_ id | SG_ id signal | EV_ name] value ;`
    fn parse_attribute_value(&mut self) -> Result<AttributeValueDef, Diagnostic> {
        self.expect(TokenKind::KwBa)?;
        let attribute_name = self.parse_string()?;
        let fact = match self.peek().kind {
            TokenKind::KwBu => {
                self.advance();
                let node_name = self.parse_name()?;
                AttributeValueDef::Node {
                    attribute_name,
                    node_name,
                    value: self.parse_attr_literal()?,
                }
            }
            TokenKind::KwBo => {
                self.advance();
                let message_id = self.parse_u64()?;
                AttributeValueDef::Message {
                    attribute_name,
                    message_id,
                    value: self.parse_attr_literal()?,
                }
            }
            TokenKind::KwSg => {
                self.advance();
                let message_id = self.parse_u64()?;
                let signal_name = self.parse_name()?;
                AttributeValueDef::Signal {
                    attribute_name,
                    message_id,
                    signal_name,
                    value: self.parse_attr_literal()?,
                }
            }
            TokenKind::KwEv => {
                self.advance();
                let env_var_name = self.parse_name()?;
                AttributeValueDef::EnvVar {
                    attribute_name,
                    env_var_name,
                    value: self.parse_attr_literal()?,
                }
            }
            _ => AttributeValueDef::Network {
                attribute_name,
                value: self.parse_attr_literal()?,
            },
        };
        self.expect(TokenKind::Semicolon)?;
        Ok(fact)
    }

    /// `VAL_ id signal value "desc" ... ;` or `VAL_ env_var value "desc" ... ;`
    fn parse_value_description(&mut self) -> Result<ValueDescriptionDef, Diagnostic> {
        self.expect(TokenKind::KwVal)?;
        if self.check(TokenKind::Number) {
            let message_id = self.parse_u64()?;
            let signal_name = self.parse_name()?;
            let items = self.parse_value_descriptions()?;
            Ok(ValueDescriptionDef::Signal {
                message_id,
                signal_name,
                items,
            })
        } else {
            let env_var_name = self.parse_name()?;
            let items = self.parse_value_descriptions()?;
            Ok(ValueDescriptionDef::EnvVar {
                env_var_name,
                items,
            })
        }
    }

    /// `SIG_GROUP_ id name repetitions : signal signal ... ;`
    fn parse_signal_group(&mut self) -> Result<SignalGroupDef, Diagnostic> {
        self.expect(TokenKind::KwSigGroup)?;
        let message_id = self.parse_u64()?;
        let signal_group_name = self.parse_name()?;
        let repetitions = self.parse_u64()?;
        self.expect(TokenKind::Colon)?;
        let signal_names = self.parse_name_list()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(SignalGroupDef {
            message_id,
            signal_group_name,
            repetitions,
            signal_names,
        })
    }

    /// `SIG_VALTYPE_ id signal [:] tag ;`
    fn parse_signal_extended_value_type(
        &mut self,
    ) -> Result<SignalExtendedValueTypeDef, Diagnostic> {
        self.expect(TokenKind::KwSigValtype)?;
        let message_id = self.parse_u64()?;
        let signal_name = self.parse_name()?;
        self.eat(TokenKind::Colon);
        let value = self.parse_u64()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(SignalExtendedValueTypeDef {
            message_id,
            signal_name,
            value,
        })
    }

    /// `SG_MUL_VAL_ id signal switch from-to, from-to ;`
    fn parse_signal_multiplexer_value(
        &mut self,
    ) -> Result<SignalMultiplexerValueDef, Diagnostic> {
        self.expect(TokenKind::KwSgMulVal)?;
        let message_id = self.parse_u64()?;
        let signal_name = self.parse_name()?;
        let switch_name = self.parse_name()?;
        let mut value_ranges = Vec::new();
        loop {
            value_ranges.push(self.parse_mux_range()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Semicolon)?;
        Ok(SignalMultiplexerValueDef {
            message_id,
            signal_name,
            switch_name,
            value_ranges,
        })
    }

    /// Parse `from-to`.
    ///
    /// Without spaces the lexer reads `3-4` as `3` followed by `-4`.
    fn parse_mux_range(&mut self) -> Result<MuxRangeDef, Diagnostic> {
        let from = self.parse_u64()?;
        let to = if self.check(TokenKind::NegativeNumber) {
            let token = self.advance();
            self.text(token.span)
                .trim_start_matches('-')
                .parse::<u64>()
                .map_err(|_| self.error_at(token.span, "integer out of range"))?
        } else {
            self.expect(TokenKind::Minus)?;
            self.parse_u64()?
        };
        Ok(MuxRangeDef { from, to })
    }
}

/// Parse DBC source text into a document.
///
/// # Errors
///
/// Returns the first lexical or syntax error.
pub fn parse(source: &str) -> Result<Document, Diagnostic> {
    Parser::new(source).parse_document()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Document {
        match parse(source) {
            Ok(doc) => doc,
            Err(diag) => panic!("unexpected parse error: {diag}"),
        }
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = parse_ok("");
        assert_eq!(doc, Document::new());
    }

    #[test]
    fn test_parse_header_sections() {
        let doc = parse_ok(
            r#"VERSION "1.0"
NS_ :
    NS_DESC_
    CM_
    BA_DEF_
    BA_
    VAL_
    SIG_VALTYPE_
BS_: 500 : 12,34
BU_: ECU1 ECU2 INT
"#,
        );
        assert_eq!(doc.version, "1.0");
        assert_eq!(
            doc.new_symbols,
            ["NS_DESC_", "CM_", "BA_DEF_", "BA_", "VAL_", "SIG_VALTYPE_"]
        );
        assert_eq!(
            doc.bit_timing,
            Some(BitTimingDef {
                baudrate: 500,
                btr1: 12,
                btr2: 34
            })
        );
        let names: Vec<_> = doc.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["ECU1", "ECU2", "INT"]);
    }

    #[test]
    fn test_parse_empty_bit_timing() {
        let doc = parse_ok("BS_:\nBU_:\n");
        assert_eq!(doc.bit_timing, None);
        assert!(doc.nodes.is_empty());
    }

    #[test]
    fn test_parse_message_with_signals() {
        let doc = parse_ok(
            r#"BO_ 100 Engine: 8 ECU1
 SG_ Mux M : 0|4@1+ (1,0) [0|15] "" ECU2
 SG_ Speed m1 : 8|16@0- (0.1,-40) [-40|6513.5] "km/h" ECU2,ECU3
 SG_ Temp : 24|8@1+ (1,0) [0|1.5E+2] "C" Vector__XXX
"#,
        );
        assert_eq!(doc.messages.len(), 1);
        let msg = &doc.messages[0];
        assert_eq!(msg.id, 100);
        assert_eq!(msg.name, "Engine");
        assert_eq!(msg.size, 8);
        assert_eq!(msg.transmitter, "ECU1");
        assert_eq!(msg.signals.len(), 3);

        let mux = &msg.signals[0];
        assert_eq!(mux.multiplexer_indicator.as_deref(), Some("M"));

        let speed = &msg.signals[1];
        assert_eq!(speed.multiplexer_indicator.as_deref(), Some("m1"));
        assert_eq!(speed.start_bit, 8);
        assert_eq!(speed.signal_size, 16);
        assert_eq!(speed.byte_order, '0');
        assert_eq!(speed.value_type, '-');
        assert!((speed.factor - 0.1).abs() < f64::EPSILON);
        assert!((speed.offset + 40.0).abs() < f64::EPSILON);
        assert_eq!(speed.unit, "km/h");
        assert_eq!(speed.receivers, ["ECU2", "ECU3"]);

        let temp = &msg.signals[2];
        assert_eq!(temp.multiplexer_indicator, None);
        assert!((temp.maximum - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_receivers_stop_at_skipped_statement() {
        let doc = parse_ok(
            r#"BO_ 1 M: 8 ECU1
 SG_ S : 0|8@1+ (1,0) [0|255] "" ECU2
BA_DEF_REL_ BU_SG_REL_ "Rel" STRING ;
"#,
        );
        assert_eq!(doc.messages[0].signals[0].receivers, ["ECU2"]);
    }

    #[test]
    fn test_parse_side_facts() {
        let doc = parse_ok(
            r#"CM_ "network";
CM_ BU_ ECU1 "node";
CM_ BO_ 100 "message";
CM_ SG_ 100 Speed "signal \"quoted\"";
CM_ EV_ EV1 "env";
BA_DEF_ BU_ "NodeAttr" INT 0 10;
BA_DEF_ "NetAttr" STRING ;
BA_DEF_ SG_ "SigAttr" ENUM "A","B";
BA_DEF_ BO_ "Cycle" FLOAT -1.5 1e3;
BA_DEF_DEF_ "NodeAttr" 3;
BA_ "NetAttr" "x";
BA_ "NodeAttr" BU_ ECU1 5;
BA_ "Cycle" BO_ 100 2.5;
BA_ "SigAttr" SG_ 100 Speed 1;
VAL_ 100 Speed 0 "off" 1 "on" ;
VAL_ EV1 -1 "neg" ;
"#,
        );
        assert_eq!(doc.comments.len(), 5);
        assert_eq!(doc.comments[3].comment(), "signal \"quoted\"");
        assert_eq!(doc.attribute_definitions.len(), 4);
        assert_eq!(doc.attribute_definitions[0].object_type.as_deref(), Some("BU_"));
        assert_eq!(doc.attribute_definitions[1].object_type, None);
        assert_eq!(
            doc.attribute_definitions[2].value_type,
            AttributeValueTypeDef::Enum {
                values: alloc::vec!["A".into(), "B".into()]
            }
        );
        assert_eq!(
            doc.attribute_definitions[3].value_type,
            AttributeValueTypeDef::Float {
                minimum: -1.5,
                maximum: 1000.0
            }
        );
        assert_eq!(doc.attribute_defaults[0].value, AttrLiteral::Int(3));
        assert_eq!(doc.attribute_values.len(), 4);
        assert_eq!(
            doc.attribute_values[2].value(),
            &AttrLiteral::Float(2.5)
        );
        assert_eq!(doc.value_descriptions.len(), 2);
        assert_eq!(doc.value_descriptions[1].items()[0].value, -1);
    }

    #[test]
    fn test_parse_env_vars() {
        let doc = parse_ok(
            r#"EV_ EV1 : 0 [0|100] "V" 5 1 DUMMY_NODE_VECTOR8001 ECU1, ECU2;
ENVVAR_DATA_ EV1 : 4;
"#,
        );
        let ev = &doc.environment_variables[0];
        assert_eq!(ev.name, "EV1");
        assert_eq!(ev.var_type, 0);
        assert_eq!(ev.unit, "V");
        assert_eq!(ev.id, 1);
        assert_eq!(ev.access_type, "DUMMY_NODE_VECTOR8001");
        assert_eq!(ev.access_nodes, ["ECU1", "ECU2"]);
        assert_eq!(doc.environment_variable_data[0].size, 4);
    }

    #[test]
    fn test_parse_keyed_facts() {
        let doc = parse_ok(
            r#"BO_TX_BU_ 100 : ECU2,ECU3;
SIG_GROUP_ 100 Group 1 : A B;
SIG_VALTYPE_ 100 F : 1;
SG_MUL_VAL_ 100 S Mux 0-1, 3 - 4;
SGTYPE_ T : 8@1+ (1,0) [0|255] "" 0, Table;
VAL_TABLE_ Table 0 "a" 1 "b" ;
"#,
        );
        assert_eq!(doc.message_transmitters[0].transmitters, ["ECU2", "ECU3"]);
        assert_eq!(doc.signal_groups[0].signal_names, ["A", "B"]);
        assert_eq!(doc.signal_groups[0].repetitions, 1);
        assert_eq!(doc.signal_extended_value_types[0].value, 1);
        assert_eq!(
            doc.signal_multiplexer_values[0].value_ranges,
            [MuxRangeDef { from: 0, to: 1 }, MuxRangeDef { from: 3, to: 4 }]
        );
        assert_eq!(doc.signal_types[0].value_table_name, "Table");
        assert_eq!(doc.value_tables[0].items.len(), 2);
    }

    #[test]
    fn test_skipped_statements() {
        let doc = parse_ok(
            r#"BA_DEF_REL_ BU_SG_REL_ "x" INT 0 1;
SGTYPE_VAL_ T 0 "a";
BU_: ECU1
"#,
        );
        assert_eq!(doc.nodes.len(), 1);
    }

    #[test]
    fn test_syntax_error_aborts() {
        let err = parse("BO_ abc Engine: 8 ECU1").unwrap_err();
        assert_eq!(err.severity, Severity::Error);
        assert!(err.message.contains("Number"));
    }

    #[test]
    fn test_lexer_error_aborts() {
        assert!(parse("BU_: ECU1 $").is_err());
    }

    #[test]
    fn test_unknown_statement_is_error() {
        assert!(parse("GARBAGE 1 2;").is_err());
    }

    #[test]
    fn test_signal_outside_message_is_error() {
        assert!(parse(r#"SG_ S : 0|8@1+ (1,0) [0|255] "" ECU2"#).is_err());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#"a\"b"#), "a\"b");
        assert_eq!(unescape(r"a\\b"), "a\\b");
        assert_eq!(unescape(r"a\nb"), "a\\nb");
    }
}

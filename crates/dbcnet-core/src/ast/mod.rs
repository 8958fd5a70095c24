//! Abstract Syntax Tree types for parsed DBC files.
//!
//! The AST is the flat fact set produced by the parser: one list per
//! statement kind, in source order, with cross references kept as plain keys
//! (node names, message ids, `(message id, signal name)` pairs). Linking the
//! facts into entities happens in the resolver.

mod attribute;
mod common;
mod document;
mod environment;
mod facts;
mod message;

pub use attribute::{AttributeDefaultDef, AttributeDefinitionDef, AttributeValueTypeDef};
pub use common::{
    AttrLiteral, BitTimingDef, NodeDef, SignalTypeDef, ValueDescriptionItem, ValueTableDef,
};
pub use document::Document;
pub use environment::{EnvVarDataDef, EnvVarDef};
pub use facts::{AttributeValueDef, CommentDef, ValueDescriptionDef};
pub use message::{
    MessageDef, MessageTransmittersDef, MuxRangeDef, SignalDef, SignalExtendedValueTypeDef,
    SignalGroupDef, SignalMultiplexerValueDef,
};

//! Document-level AST type.

use super::{
    AttributeDefaultDef, AttributeDefinitionDef, AttributeValueDef, BitTimingDef, CommentDef,
    EnvVarDataDef, EnvVarDef, MessageDef, MessageTransmittersDef, NodeDef, SignalExtendedValueTypeDef,
    SignalGroupDef, SignalMultiplexerValueDef, SignalTypeDef, ValueDescriptionDef, ValueTableDef,
};
use alloc::string::String;
use alloc::vec::Vec;

/// A parsed DBC file as a flat set of facts.
///
/// Every list keeps source order. Side facts (comments, attributes, value
/// descriptions, ...) carry the key of the entity they describe but are not
/// attached to it; the resolver links them up.
///
/// ```text
/// VERSION "..."
/// NS_ : ...
/// BS_ : ...
/// BU_ : ...
/// VAL_TABLE_ ... ;
/// BO_ ... SG_ ...
/// CM_ ... ; BA_DEF_ ... ; BA_ ... ; VAL_ ... ;
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// `VERSION` text (empty when absent).
    pub version: String,
    /// `NS_` new-symbol tokens.
    pub new_symbols: Vec<String>,
    /// `BS_` bit timing, if the section carried values.
    pub bit_timing: Option<BitTimingDef>,
    /// `BU_` nodes.
    pub nodes: Vec<NodeDef>,
    /// `VAL_TABLE_` declarations.
    pub value_tables: Vec<ValueTableDef>,
    /// `BO_` messages with their `SG_` signals.
    pub messages: Vec<MessageDef>,
    /// `BO_TX_BU_` additional transmitter lists.
    pub message_transmitters: Vec<MessageTransmittersDef>,
    /// `EV_` environment variables.
    pub environment_variables: Vec<EnvVarDef>,
    /// `ENVVAR_DATA_` declarations.
    pub environment_variable_data: Vec<EnvVarDataDef>,
    /// `SGTYPE_` signal type templates.
    pub signal_types: Vec<SignalTypeDef>,
    /// `CM_` comments of every target kind, interleaved.
    pub comments: Vec<CommentDef>,
    /// `BA_DEF_` attribute definitions.
    pub attribute_definitions: Vec<AttributeDefinitionDef>,
    /// `BA_DEF_DEF_` attribute defaults.
    pub attribute_defaults: Vec<AttributeDefaultDef>,
    /// `BA_` attribute values of every target kind, interleaved.
    pub attribute_values: Vec<AttributeValueDef>,
    /// `VAL_` value descriptions for signals and environment variables.
    pub value_descriptions: Vec<ValueDescriptionDef>,
    /// `SIG_VALTYPE_` extended value type declarations.
    pub signal_extended_value_types: Vec<SignalExtendedValueTypeDef>,
    /// `SG_MUL_VAL_` extended multiplexing declarations.
    pub signal_multiplexer_values: Vec<SignalMultiplexerValueDef>,
    /// `SIG_GROUP_` declarations.
    pub signal_groups: Vec<SignalGroupDef>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of side facts (everything the resolver has to index).
    #[must_use]
    pub fn side_fact_count(&self) -> usize {
        self.message_transmitters.len()
            + self.comments.len()
            + self.attribute_values.len()
            + self.value_descriptions.len()
            + self.signal_extended_value_types.len()
            + self.signal_multiplexer_values.len()
            + self.signal_groups.len()
    }
}

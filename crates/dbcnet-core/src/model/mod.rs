//! Linked CAN network model.
//!
//! The Network is the final, immutable representation of a DBC file. It sits
//! at the end of the pipeline:
//!
//! ```text
//! Source → Lexer → Parser → Document → Resolver → [Network]
//! ```
//!
//! # Features
//!
//! - Every entity owns its nested collections; cross references are copied keys
//! - Lookups by message id, node name and environment variable name
//! - Per-signal and per-message diagnostics
//! - `into_parts`/`from_parts` for serialization (indices rebuilt on load)
//!
//! # Usage
//!
//! ```ignore
//! let network = dbcnet_core::load_from_memory(text)?;
//!
//! if let Some(msg) = network.message_by_id(100) {
//!     for signal in msg.signals() {
//!         println!("{} {}|{}", signal.name(), signal.start_bit(), signal.bit_size());
//!     }
//! }
//! ```

mod attribute;
mod env_var;
mod message;
mod node;
mod signal;
mod types;
mod value_table;

pub use attribute::{Attribute, AttributeDefinition, AttributeValue, AttributeValueType};
pub use env_var::EnvironmentVariable;
pub use message::{Message, MessageDiagnostic, SignalGroup};
pub use node::Node;
pub use signal::{Multiplexer, MuxRange, Signal, SignalDiagnostic, SignalMultiplexerValue};
pub use types::{AccessType, ByteOrder, ExtendedValueType, ObjectType, ValueType, VarType};
pub use value_table::{SignalType, ValueEncodingDescription, ValueTable};

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Baud rate and bit timing registers.
///
/// All zero when the source has no `BS_` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitTiming {
    /// Baud rate.
    pub baudrate: u64,
    /// First bit timing register.
    pub btr1: u64,
    /// Second bit timing register.
    pub btr2: u64,
}

/// A fired diagnostic with the names of the entities it refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticRecord<'a> {
    /// Owning message name.
    pub message: &'a str,
    /// Signal name, absent for message-level diagnostics.
    pub signal: Option<&'a str>,
    /// What fired.
    pub kind: DiagnosticKind,
}

/// Either a signal-level or a message-level diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Signal-level diagnostic.
    Signal(SignalDiagnostic),
    /// Message-level diagnostic.
    Message(MessageDiagnostic),
}

impl DiagnosticKind {
    /// Get the diagnostic name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Signal(d) => d.as_str(),
            Self::Message(d) => d.as_str(),
        }
    }
}

impl core::fmt::Display for DiagnosticRecord<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.signal {
            Some(signal) => write!(f, "{}: {}::{}", self.kind.as_str(), self.message, signal),
            None => write!(f, "{}: {}", self.kind.as_str(), self.message),
        }
    }
}

/// Decomposed network for serialization.
///
/// Lookup indices are not part of the parts; they are rebuilt by
/// [`Network::from_parts`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkParts {
    /// Version text.
    pub version: String,
    /// New symbol tokens.
    pub new_symbols: Vec<String>,
    /// Bit timing.
    pub bit_timing: BitTiming,
    /// Nodes in source order.
    pub nodes: Vec<Node>,
    /// Value tables in source order.
    pub value_tables: Vec<ValueTable>,
    /// Messages in source order.
    pub messages: Vec<Message>,
    /// Environment variables in source order.
    pub environment_variables: Vec<EnvironmentVariable>,
    /// Attribute definitions in source order.
    pub attribute_definitions: Vec<AttributeDefinition>,
    /// Attribute defaults in source order.
    pub attribute_defaults: Vec<Attribute>,
    /// Network-level attribute values in source order.
    pub attribute_values: Vec<Attribute>,
    /// Network comment, if any.
    pub comment: Option<String>,
}

/// The linked, immutable CAN network.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    // Storage
    version: String,
    new_symbols: Vec<String>,
    bit_timing: BitTiming,
    nodes: Vec<Node>,
    value_tables: Vec<ValueTable>,
    messages: Vec<Message>,
    environment_variables: Vec<EnvironmentVariable>,
    attribute_definitions: Vec<AttributeDefinition>,
    attribute_defaults: Vec<Attribute>,
    attribute_values: Vec<Attribute>,
    comment: Option<String>,

    // Lookup indices (rebuilt on load)
    message_id_to_index: BTreeMap<u64, usize>,
    node_name_to_index: BTreeMap<String, usize>,
    env_var_name_to_index: BTreeMap<String, usize>,
}

impl Default for Network {
    fn default() -> Self {
        Self::from_parts(NetworkParts::default())
    }
}

impl Network {
    /// Get the version text.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the new symbol tokens.
    #[must_use]
    pub fn new_symbols(&self) -> &[String] {
        &self.new_symbols
    }

    /// Get the bit timing.
    #[must_use]
    pub fn bit_timing(&self) -> &BitTiming {
        &self.bit_timing
    }

    /// Get the network comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    // === Nodes ===

    /// Get the nodes in source order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get a node by name.
    #[must_use]
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.node_name_to_index
            .get(name)
            .and_then(|&idx| self.nodes.get(idx))
    }

    // === Value tables ===

    /// Get the value tables in source order.
    #[must_use]
    pub fn value_tables(&self) -> &[ValueTable] {
        &self.value_tables
    }

    /// Get a value table by name.
    #[must_use]
    pub fn value_table_by_name(&self, name: &str) -> Option<&ValueTable> {
        self.value_tables.iter().find(|t| t.name == name)
    }

    // === Messages ===

    /// Get the messages in source order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get a message by CAN identifier.
    ///
    /// When the source repeats an id, the first message wins.
    #[must_use]
    pub fn message_by_id(&self, id: u64) -> Option<&Message> {
        self.message_id_to_index
            .get(&id)
            .and_then(|&idx| self.messages.get(idx))
    }

    /// Get the total number of signals across all messages.
    #[must_use]
    pub fn signal_count(&self) -> usize {
        self.messages.iter().map(|m| m.signals.len()).sum()
    }

    // === Environment variables ===

    /// Get the environment variables in source order.
    #[must_use]
    pub fn environment_variables(&self) -> &[EnvironmentVariable] {
        &self.environment_variables
    }

    /// Get an environment variable by name.
    #[must_use]
    pub fn environment_variable_by_name(&self, name: &str) -> Option<&EnvironmentVariable> {
        self.env_var_name_to_index
            .get(name)
            .and_then(|&idx| self.environment_variables.get(idx))
    }

    // === Attributes ===

    /// Get the attribute definitions in source order.
    #[must_use]
    pub fn attribute_definitions(&self) -> &[AttributeDefinition] {
        &self.attribute_definitions
    }

    /// Get an attribute definition by name.
    #[must_use]
    pub fn attribute_definition_by_name(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attribute_definitions.iter().find(|d| d.name == name)
    }

    /// Get the attribute defaults in source order.
    #[must_use]
    pub fn attribute_defaults(&self) -> &[Attribute] {
        &self.attribute_defaults
    }

    /// Get the network-level attribute values in source order.
    #[must_use]
    pub fn attribute_values(&self) -> &[Attribute] {
        &self.attribute_values
    }

    // === Diagnostics ===

    /// Check whether any signal or message diagnostic fired.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        self.messages
            .iter()
            .any(|m| !m.diagnostics.is_empty() || m.signals.iter().any(|s| !s.diagnostics.is_empty()))
    }

    /// Collect every fired diagnostic in source order.
    ///
    /// For each message the signal diagnostics come first, in signal order,
    /// followed by the message-level diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<DiagnosticRecord<'_>> {
        let mut out = Vec::new();
        for message in &self.messages {
            for signal in &message.signals {
                for &kind in &signal.diagnostics {
                    out.push(DiagnosticRecord {
                        message: &message.name,
                        signal: Some(&signal.name),
                        kind: DiagnosticKind::Signal(kind),
                    });
                }
            }
            for &kind in &message.diagnostics {
                out.push(DiagnosticRecord {
                    message: &message.name,
                    signal: None,
                    kind: DiagnosticKind::Message(kind),
                });
            }
        }
        out
    }

    // === Serialization ===

    /// Decompose the network into parts for serialization.
    /// Indices are not serialized; they are rebuilt on load.
    #[must_use]
    pub fn into_parts(self) -> NetworkParts {
        NetworkParts {
            version: self.version,
            new_symbols: self.new_symbols,
            bit_timing: self.bit_timing,
            nodes: self.nodes,
            value_tables: self.value_tables,
            messages: self.messages,
            environment_variables: self.environment_variables,
            attribute_definitions: self.attribute_definitions,
            attribute_defaults: self.attribute_defaults,
            attribute_values: self.attribute_values,
            comment: self.comment,
        }
    }

    /// Build a network from parts.
    /// Rebuilds all lookup indices from raw data.
    #[must_use]
    pub fn from_parts(parts: NetworkParts) -> Self {
        let mut network = Self {
            version: parts.version,
            new_symbols: parts.new_symbols,
            bit_timing: parts.bit_timing,
            nodes: parts.nodes,
            value_tables: parts.value_tables,
            messages: parts.messages,
            environment_variables: parts.environment_variables,
            attribute_definitions: parts.attribute_definitions,
            attribute_defaults: parts.attribute_defaults,
            attribute_values: parts.attribute_values,
            comment: parts.comment,
            message_id_to_index: BTreeMap::new(),
            node_name_to_index: BTreeMap::new(),
            env_var_name_to_index: BTreeMap::new(),
        };
        network.rebuild_indices();
        network
    }

    /// Rebuild all lookup indices; the first entity with a given key wins.
    fn rebuild_indices(&mut self) {
        self.message_id_to_index.clear();
        self.node_name_to_index.clear();
        self.env_var_name_to_index.clear();

        for (idx, message) in self.messages.iter().enumerate() {
            self.message_id_to_index.entry(message.id).or_insert(idx);
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            self.node_name_to_index
                .entry(node.name.clone())
                .or_insert(idx);
        }
        for (idx, env_var) in self.environment_variables.iter().enumerate() {
            self.env_var_name_to_index
                .entry(env_var.name.clone())
                .or_insert(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn message(id: u64, name: &str) -> Message {
        Message {
            id,
            name: name.to_string(),
            size: 8,
            transmitter: String::new(),
            message_transmitters: Vec::new(),
            signals: Vec::new(),
            attributes: Vec::new(),
            comment: String::new(),
            signal_groups: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn node(name: &str) -> Node {
        Node {
            name: name.to_string(),
            comment: String::new(),
            attributes: Vec::new(),
        }
    }

    #[test]
    fn test_network_default_is_empty() {
        let network = Network::default();
        assert_eq!(network.version(), "");
        assert!(network.messages().is_empty());
        assert_eq!(network.bit_timing(), &BitTiming::default());
        assert!(network.comment().is_none());
        assert!(!network.has_diagnostics());
    }

    #[test]
    fn test_message_by_id_first_wins() {
        let network = Network::from_parts(NetworkParts {
            messages: vec![message(1, "A"), message(2, "B"), message(1, "C")],
            ..NetworkParts::default()
        });
        assert_eq!(network.messages().len(), 3);
        assert_eq!(network.message_by_id(1).map(Message::name), Some("A"));
        assert_eq!(network.message_by_id(2).map(Message::name), Some("B"));
        assert!(network.message_by_id(3).is_none());
    }

    #[test]
    fn test_node_by_name() {
        let network = Network::from_parts(NetworkParts {
            nodes: vec![node("ECU1"), node("ECU2")],
            ..NetworkParts::default()
        });
        assert!(network.node_by_name("ECU2").is_some());
        assert!(network.node_by_name("ECU3").is_none());
    }

    #[test]
    fn test_parts_round_trip_rebuilds_indices() {
        let network = Network::from_parts(NetworkParts {
            version: "1.0".to_string(),
            nodes: vec![node("ECU1")],
            messages: vec![message(7, "M")],
            ..NetworkParts::default()
        });
        let rebuilt = Network::from_parts(network.clone().into_parts());
        assert_eq!(rebuilt, network);
        assert!(rebuilt.message_by_id(7).is_some());
        assert!(rebuilt.node_by_name("ECU1").is_some());
    }

    #[test]
    fn test_diagnostics_collected_in_order() {
        let mut msg = message(1, "M");
        msg.diagnostics.push(MessageDiagnostic::MuxValueWithoutMuxSignal);
        let network = Network::from_parts(NetworkParts {
            messages: vec![msg],
            ..NetworkParts::default()
        });
        assert!(network.has_diagnostics());
        let records = network.diagnostics();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "M");
        assert_eq!(records[0].signal, None);
        assert_eq!(
            records[0].to_string(),
            "MuxValueWithoutMuxSignal: M"
        );
    }
}

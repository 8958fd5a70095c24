//! Cross-reference index over the side facts of a document.
//!
//! Side facts (comments, attribute values, value descriptions, ...) name the
//! entity they describe by key but are not attached to it. The index files
//! every such fact into a bucket keyed by that entity once, so each builder
//! can fetch what belongs to its entity without scanning the fact lists.
//!
//! Two bucket shapes are used:
//!
//! - multi-valued buckets keep every fact for a key in source order;
//! - single-valued buckets keep one fact per key, a later duplicate replaces
//!   the earlier one.
//!
//! Signal-keyed buckets are nested `message id → signal name` maps. All
//! lookups are total: an absent key yields an empty slice or `None`.

use crate::ast::{
    AttributeValueDef, CommentDef, Document, SignalGroupDef, SignalMultiplexerValueDef,
    ValueDescriptionDef, ValueDescriptionItem,
};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Signal-keyed bucket: message id, then signal name.
type SignalMap<'a, T> = BTreeMap<u64, BTreeMap<&'a str, T>>;

/// Read-only lookup structure built once from a [`Document`].
#[derive(Debug, Default)]
pub struct CrossReferenceIndex<'a> {
    // Multi-valued buckets
    node_attributes: BTreeMap<&'a str, Vec<&'a AttributeValueDef>>,
    message_attributes: BTreeMap<u64, Vec<&'a AttributeValueDef>>,
    signal_attributes: SignalMap<'a, Vec<&'a AttributeValueDef>>,
    env_var_attributes: BTreeMap<&'a str, Vec<&'a AttributeValueDef>>,
    signal_multiplexer_values: SignalMap<'a, Vec<&'a SignalMultiplexerValueDef>>,
    signal_groups: BTreeMap<u64, Vec<&'a SignalGroupDef>>,

    // Single-valued buckets
    signal_value_descriptions: SignalMap<'a, &'a [ValueDescriptionItem]>,
    env_var_value_descriptions: BTreeMap<&'a str, &'a [ValueDescriptionItem]>,
    node_comments: BTreeMap<&'a str, &'a str>,
    message_comments: BTreeMap<u64, &'a str>,
    signal_comments: SignalMap<'a, &'a str>,
    env_var_comments: BTreeMap<&'a str, &'a str>,
    signal_extended_value_types: SignalMap<'a, u64>,
    message_transmitters: BTreeMap<u64, &'a [String]>,

    // Statistics
    facts: usize,
    overwritten: usize,
}

impl<'a> CrossReferenceIndex<'a> {
    /// Build the index in one pass over every side-fact list.
    #[must_use]
    pub fn build(doc: &'a Document) -> Self {
        let mut index = Self::default();

        for fact in &doc.attribute_values {
            index.insert_attribute(fact);
        }
        for fact in &doc.comments {
            index.insert_comment(fact);
        }
        for fact in &doc.value_descriptions {
            index.insert_value_description(fact);
        }
        for fact in &doc.signal_extended_value_types {
            index.facts += 1;
            let bucket = index
                .signal_extended_value_types
                .entry(fact.message_id)
                .or_default();
            if bucket.insert(fact.signal_name.as_str(), fact.value).is_some() {
                index.overwritten += 1;
            }
        }
        for fact in &doc.signal_multiplexer_values {
            index.facts += 1;
            index
                .signal_multiplexer_values
                .entry(fact.message_id)
                .or_default()
                .entry(fact.signal_name.as_str())
                .or_default()
                .push(fact);
        }
        for fact in &doc.signal_groups {
            index.facts += 1;
            index
                .signal_groups
                .entry(fact.message_id)
                .or_default()
                .push(fact);
        }
        for fact in &doc.message_transmitters {
            index.facts += 1;
            if index
                .message_transmitters
                .insert(fact.message_id, fact.transmitters.as_slice())
                .is_some()
            {
                index.overwritten += 1;
            }
        }

        index
    }

    /// File one attribute value by its target.
    fn insert_attribute(&mut self, fact: &'a AttributeValueDef) {
        self.facts += 1;
        match fact {
            // Network-level values are collected straight from the document
            AttributeValueDef::Network { .. } => {}
            AttributeValueDef::Node { node_name, .. } => {
                self.node_attributes
                    .entry(node_name.as_str())
                    .or_default()
                    .push(fact);
            }
            AttributeValueDef::Message { message_id, .. } => {
                self.message_attributes
                    .entry(*message_id)
                    .or_default()
                    .push(fact);
            }
            AttributeValueDef::Signal {
                message_id,
                signal_name,
                ..
            } => {
                self.signal_attributes
                    .entry(*message_id)
                    .or_default()
                    .entry(signal_name.as_str())
                    .or_default()
                    .push(fact);
            }
            AttributeValueDef::EnvVar { env_var_name, .. } => {
                self.env_var_attributes
                    .entry(env_var_name.as_str())
                    .or_default()
                    .push(fact);
            }
        }
    }

    /// File one comment by its target.
    fn insert_comment(&mut self, fact: &'a CommentDef) {
        self.facts += 1;
        let replaced = match fact {
            // The network comment is taken first-wins straight from the document
            CommentDef::Network { .. } => false,
            CommentDef::Node { node_name, comment } => {
                self.node_comments
                    .insert(node_name.as_str(), comment.as_str())
                    .is_some()
            }
            CommentDef::Message {
                message_id,
                comment,
            } => self
                .message_comments
                .insert(*message_id, comment.as_str())
                .is_some(),
            CommentDef::Signal {
                message_id,
                signal_name,
                comment,
            } => self
                .signal_comments
                .entry(*message_id)
                .or_default()
                .insert(signal_name.as_str(), comment.as_str())
                .is_some(),
            CommentDef::EnvVar {
                env_var_name,
                comment,
            } => self
                .env_var_comments
                .insert(env_var_name.as_str(), comment.as_str())
                .is_some(),
        };
        if replaced {
            self.overwritten += 1;
        }
    }

    /// File one value description list by its target.
    fn insert_value_description(&mut self, fact: &'a ValueDescriptionDef) {
        self.facts += 1;
        let replaced = match fact {
            ValueDescriptionDef::Signal {
                message_id,
                signal_name,
                items,
            } => self
                .signal_value_descriptions
                .entry(*message_id)
                .or_default()
                .insert(signal_name.as_str(), items.as_slice())
                .is_some(),
            ValueDescriptionDef::EnvVar {
                env_var_name,
                items,
            } => self
                .env_var_value_descriptions
                .insert(env_var_name.as_str(), items.as_slice())
                .is_some(),
        };
        if replaced {
            self.overwritten += 1;
        }
    }

    // === Multi-valued lookups ===

    /// Attribute values targeting a node, in source order.
    #[must_use]
    pub fn node_attributes(&self, node_name: &str) -> &[&'a AttributeValueDef] {
        self.node_attributes
            .get(node_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Attribute values targeting a message, in source order.
    #[must_use]
    pub fn message_attributes(&self, message_id: u64) -> &[&'a AttributeValueDef] {
        self.message_attributes
            .get(&message_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Attribute values targeting a signal, in source order.
    #[must_use]
    pub fn signal_attributes(&self, message_id: u64, signal_name: &str) -> &[&'a AttributeValueDef] {
        self.signal_attributes
            .get(&message_id)
            .and_then(|signals| signals.get(signal_name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Attribute values targeting an environment variable, in source order.
    #[must_use]
    pub fn env_var_attributes(&self, env_var_name: &str) -> &[&'a AttributeValueDef] {
        self.env_var_attributes
            .get(env_var_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Extended multiplexing entries of a signal, in source order.
    #[must_use]
    pub fn signal_multiplexer_values(
        &self,
        message_id: u64,
        signal_name: &str,
    ) -> &[&'a SignalMultiplexerValueDef] {
        self.signal_multiplexer_values
            .get(&message_id)
            .and_then(|signals| signals.get(signal_name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Signal groups of a message, in source order.
    #[must_use]
    pub fn signal_groups(&self, message_id: u64) -> &[&'a SignalGroupDef] {
        self.signal_groups
            .get(&message_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    // === Single-valued lookups ===

    /// Value descriptions of a signal.
    #[must_use]
    pub fn signal_value_descriptions(
        &self,
        message_id: u64,
        signal_name: &str,
    ) -> Option<&'a [ValueDescriptionItem]> {
        self.signal_value_descriptions
            .get(&message_id)
            .and_then(|signals| signals.get(signal_name))
            .copied()
    }

    /// Value descriptions of an environment variable.
    #[must_use]
    pub fn env_var_value_descriptions(&self, env_var_name: &str) -> Option<&'a [ValueDescriptionItem]> {
        self.env_var_value_descriptions.get(env_var_name).copied()
    }

    /// Comment of a node.
    #[must_use]
    pub fn node_comment(&self, node_name: &str) -> Option<&'a str> {
        self.node_comments.get(node_name).copied()
    }

    /// Comment of a message.
    #[must_use]
    pub fn message_comment(&self, message_id: u64) -> Option<&'a str> {
        self.message_comments.get(&message_id).copied()
    }

    /// Comment of a signal.
    #[must_use]
    pub fn signal_comment(&self, message_id: u64, signal_name: &str) -> Option<&'a str> {
        self.signal_comments
            .get(&message_id)
            .and_then(|signals| signals.get(signal_name))
            .copied()
    }

    /// Comment of an environment variable.
    #[must_use]
    pub fn env_var_comment(&self, env_var_name: &str) -> Option<&'a str> {
        self.env_var_comments.get(env_var_name).copied()
    }

    /// Raw extended value type tag of a signal.
    #[must_use]
    pub fn signal_extended_value_type(&self, message_id: u64, signal_name: &str) -> Option<u64> {
        self.signal_extended_value_types
            .get(&message_id)
            .and_then(|signals| signals.get(signal_name))
            .copied()
    }

    /// Additional transmitters of a message.
    #[must_use]
    pub fn message_transmitters(&self, message_id: u64) -> Option<&'a [String]> {
        self.message_transmitters.get(&message_id).copied()
    }

    // === Statistics ===

    /// Number of side facts visited while building.
    #[must_use]
    pub fn fact_count(&self) -> usize {
        self.facts
    }

    /// Number of single-valued facts replaced by a later duplicate.
    #[must_use]
    pub fn overwritten_count(&self) -> usize {
        self.overwritten
    }

    /// Number of distinct keys across all buckets.
    #[must_use]
    pub fn key_count(&self) -> usize {
        fn nested<T>(map: &SignalMap<'_, T>) -> usize {
            map.values().map(BTreeMap::len).sum()
        }

        self.node_attributes.len()
            + self.message_attributes.len()
            + nested(&self.signal_attributes)
            + self.env_var_attributes.len()
            + nested(&self.signal_multiplexer_values)
            + self.signal_groups.len()
            + nested(&self.signal_value_descriptions)
            + self.env_var_value_descriptions.len()
            + self.node_comments.len()
            + self.message_comments.len()
            + nested(&self.signal_comments)
            + self.env_var_comments.len()
            + nested(&self.signal_extended_value_types)
            + self.message_transmitters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        AttrLiteral, MessageTransmittersDef, MuxRangeDef, SignalExtendedValueTypeDef,
    };
    use alloc::string::ToString;
    use alloc::vec;

    fn node_attr(name: &str, node: &str, value: i64) -> AttributeValueDef {
        AttributeValueDef::Node {
            attribute_name: name.to_string(),
            node_name: node.to_string(),
            value: AttrLiteral::Int(value),
        }
    }

    fn signal_comment(message_id: u64, signal: &str, text: &str) -> CommentDef {
        CommentDef::Signal {
            message_id,
            signal_name: signal.to_string(),
            comment: text.to_string(),
        }
    }

    #[test]
    fn test_empty_document_lookups_are_total() {
        let doc = Document::new();
        let index = CrossReferenceIndex::build(&doc);
        assert!(index.node_attributes("ECU1").is_empty());
        assert!(index.message_attributes(1).is_empty());
        assert!(index.signal_attributes(1, "S").is_empty());
        assert!(index.env_var_attributes("EV").is_empty());
        assert!(index.signal_multiplexer_values(1, "S").is_empty());
        assert!(index.signal_groups(1).is_empty());
        assert!(index.signal_value_descriptions(1, "S").is_none());
        assert!(index.env_var_value_descriptions("EV").is_none());
        assert!(index.node_comment("ECU1").is_none());
        assert!(index.message_comment(1).is_none());
        assert!(index.signal_comment(1, "S").is_none());
        assert!(index.env_var_comment("EV").is_none());
        assert!(index.signal_extended_value_type(1, "S").is_none());
        assert!(index.message_transmitters(1).is_none());
        assert_eq!(index.key_count(), 0);
        assert_eq!(index.fact_count(), 0);
    }

    #[test]
    fn test_multi_valued_bucket_keeps_insertion_order() {
        let mut doc = Document::new();
        doc.attribute_values = vec![
            node_attr("A", "ECU1", 1),
            node_attr("B", "ECU2", 2),
            node_attr("C", "ECU1", 3),
        ];
        let index = CrossReferenceIndex::build(&doc);

        let names: Vec<_> = index
            .node_attributes("ECU1")
            .iter()
            .map(|f| f.attribute_name())
            .collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(index.node_attributes("ECU2").len(), 1);
        assert!(index.node_attributes("ECU3").is_empty());
    }

    #[test]
    fn test_single_valued_bucket_last_write_wins() {
        let mut doc = Document::new();
        doc.comments = vec![
            signal_comment(10, "S", "first"),
            signal_comment(10, "T", "other"),
            signal_comment(10, "S", "second"),
        ];
        let index = CrossReferenceIndex::build(&doc);

        assert_eq!(index.signal_comment(10, "S"), Some("second"));
        assert_eq!(index.signal_comment(10, "T"), Some("other"));
        assert_eq!(index.signal_comment(11, "S"), None);
        assert_eq!(index.overwritten_count(), 1);
    }

    #[test]
    fn test_mixed_comment_list_is_split_by_target() {
        let mut doc = Document::new();
        doc.comments = vec![
            CommentDef::Network {
                comment: "net".to_string(),
            },
            CommentDef::Node {
                node_name: "ECU1".to_string(),
                comment: "node".to_string(),
            },
            CommentDef::Message {
                message_id: 5,
                comment: "msg".to_string(),
            },
            signal_comment(5, "S", "sig"),
            CommentDef::EnvVar {
                env_var_name: "EV1".to_string(),
                comment: "env".to_string(),
            },
        ];
        let index = CrossReferenceIndex::build(&doc);

        assert_eq!(index.node_comment("ECU1"), Some("node"));
        assert_eq!(index.message_comment(5), Some("msg"));
        assert_eq!(index.signal_comment(5, "S"), Some("sig"));
        assert_eq!(index.env_var_comment("EV1"), Some("env"));
        // Node, message, signal and env var buckets; network comment is not keyed
        assert_eq!(index.key_count(), 4);
        assert_eq!(index.fact_count(), 5);
    }

    #[test]
    fn test_signal_keys_are_scoped_by_message() {
        let mut doc = Document::new();
        doc.signal_extended_value_types = vec![
            SignalExtendedValueTypeDef {
                message_id: 1,
                signal_name: "S".to_string(),
                value: 1,
            },
            SignalExtendedValueTypeDef {
                message_id: 2,
                signal_name: "S".to_string(),
                value: 2,
            },
        ];
        let index = CrossReferenceIndex::build(&doc);
        assert_eq!(index.signal_extended_value_type(1, "S"), Some(1));
        assert_eq!(index.signal_extended_value_type(2, "S"), Some(2));
        assert_eq!(index.signal_extended_value_type(3, "S"), None);
    }

    #[test]
    fn test_keyed_lists_round_trip() {
        let mut doc = Document::new();
        doc.message_transmitters = vec![MessageTransmittersDef {
            message_id: 7,
            transmitters: vec!["ECU1".to_string(), "ECU2".to_string()],
        }];
        doc.signal_multiplexer_values = vec![
            SignalMultiplexerValueDef {
                message_id: 7,
                signal_name: "S".to_string(),
                switch_name: "Mux".to_string(),
                value_ranges: vec![MuxRangeDef { from: 0, to: 1 }],
            },
            SignalMultiplexerValueDef {
                message_id: 7,
                signal_name: "S".to_string(),
                switch_name: "Mux2".to_string(),
                value_ranges: vec![MuxRangeDef { from: 4, to: 4 }],
            },
        ];
        doc.value_descriptions = vec![ValueDescriptionDef::EnvVar {
            env_var_name: "EV1".to_string(),
            items: vec![ValueDescriptionItem::new(0, "off")],
        }];
        let index = CrossReferenceIndex::build(&doc);

        assert_eq!(
            index.message_transmitters(7),
            Some(&doc.message_transmitters[0].transmitters[..])
        );
        let switches: Vec<_> = index
            .signal_multiplexer_values(7, "S")
            .iter()
            .map(|f| f.switch_name.as_str())
            .collect();
        assert_eq!(switches, ["Mux", "Mux2"]);
        assert_eq!(
            index.env_var_value_descriptions("EV1").map(<[_]>::len),
            Some(1)
        );
        assert_eq!(index.fact_count(), doc.side_fact_count());
        assert_eq!(index.overwritten_count(), 0);
    }
}

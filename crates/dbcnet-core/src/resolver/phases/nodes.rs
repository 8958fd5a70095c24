//! Node builder.

use super::attributes::attributes_for;
use crate::ast::{Document, NodeDef};
use crate::model::{Node, ObjectType};
use crate::resolver::CrossReferenceIndex;
use alloc::string::String;
use alloc::vec::Vec;

/// Build one node with its comment and attributes.
#[must_use]
pub fn build_node(def: &NodeDef, index: &CrossReferenceIndex<'_>) -> Node {
    Node {
        name: def.name.clone(),
        comment: index
            .node_comment(&def.name)
            .map(String::from)
            .unwrap_or_default(),
        attributes: attributes_for(index.node_attributes(&def.name), ObjectType::Node),
    }
}

/// Build all nodes in source order.
#[must_use]
pub fn build_nodes(doc: &Document, index: &CrossReferenceIndex<'_>) -> Vec<Node> {
    doc.nodes.iter().map(|n| build_node(n, index)).collect()
}

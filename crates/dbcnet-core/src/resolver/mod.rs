//! Linking of DBC facts into a network.
//!
//! The resolver turns the flat fact set produced by the parser into a fully
//! linked [`Network`]. Resolution runs in fixed phases:
//!
//! 1. **Index**: every side fact (comment, attribute value, value
//!    description, extended value type, multiplexer range, signal group,
//!    transmitter list) is filed under the key of the entity it describes.
//! 2. **Build**: nodes, value tables, messages with their signals,
//!    environment variables and the attribute lists are built independently
//!    of each other. Each builder reads the document and the index and never
//!    writes shared state, so the lists can be built concurrently.
//! 3. **Assembly**: the lists are moved into the network, lookup indices are
//!    rebuilt and every fired soft diagnostic is reported to the tracer.
//!
//! # Pipeline
//!
//! ```text
//! Document → CrossReferenceIndex → Builders → Network
//! ```
//!
//! # Diagnostics
//!
//! Soft diagnostics never stop resolution. They are stored on the signal or
//! message they concern and reported at [`TraceLevel::Warn`], per message the
//! signal diagnostics first, then the message diagnostics.
//!
//! # Usage
//!
//! ```
//! use dbcnet_core::parser::parse;
//! use dbcnet_core::resolver::Resolver;
//!
//! let doc = parse("BU_: ECU1\nBO_ 1 Msg: 8 ECU1\n SG_ S : 0|8@1+ (1,0) [0|0] \"\" ECU1\n").unwrap();
//! let network = Resolver::resolve(&doc);
//! assert_eq!(network.messages().len(), 1);
//! ```

mod index;
pub mod phases;
pub mod tracing;

pub use index::CrossReferenceIndex;
pub use tracing::{NoopTracer, Phase, TraceEvent, TraceLevel, Tracer};

use crate::ast::Document;
use crate::model::{
    Attribute, AttributeDefinition, BitTiming, EnvironmentVariable, Message, Network,
    NetworkParts, Node, ValueTable,
};
use alloc::vec::Vec;

/// Attribute lists built in the attributes phase.
struct AttributeLists {
    definitions: Vec<AttributeDefinition>,
    defaults: Vec<Attribute>,
    values: Vec<Attribute>,
}

/// Outputs of the build phase, one list per builder.
struct BuiltLists {
    nodes: Vec<Node>,
    value_tables: Vec<ValueTable>,
    messages: Vec<Message>,
    environment_variables: Vec<EnvironmentVariable>,
    attributes: AttributeLists,
}

/// Entry point of the resolution pipeline.
pub struct Resolver;

impl Resolver {
    /// Resolve a document into a network.
    #[must_use]
    pub fn resolve(doc: &Document) -> Network {
        Self::resolve_traced(doc, &mut NoopTracer)
    }

    /// Resolve a document into a network, reporting progress and diagnostics.
    pub fn resolve_traced<T: Tracer>(doc: &Document, tracer: &mut T) -> Network {
        crate::trace_event!(tracer, TraceLevel::Info, TraceEvent::PhaseStart { phase: Phase::Index });
        let index = CrossReferenceIndex::build(doc);
        crate::trace_event!(
            tracer,
            TraceLevel::Debug,
            TraceEvent::IndexBuilt {
                facts: index.fact_count(),
                keys: index.key_count(),
                overwritten: index.overwritten_count(),
            }
        );
        crate::trace_event!(tracer, TraceLevel::Info, TraceEvent::PhaseEnd { phase: Phase::Index });

        let built = build_lists(doc, &index);
        report_counts(&built, tracer);

        crate::trace_event!(tracer, TraceLevel::Info, TraceEvent::PhaseStart { phase: Phase::Assembly });
        let network = assemble(doc, built);
        report_diagnostics(&network, tracer);
        crate::trace_event!(tracer, TraceLevel::Info, TraceEvent::PhaseEnd { phase: Phase::Assembly });

        network
    }
}

#[cfg(not(feature = "parallel"))]
fn build_lists(doc: &Document, index: &CrossReferenceIndex<'_>) -> BuiltLists {
    BuiltLists {
        nodes: phases::build_nodes(doc, index),
        value_tables: phases::build_value_tables(doc),
        messages: phases::build_messages(doc, index),
        environment_variables: phases::build_env_vars(doc, index),
        attributes: build_attribute_lists(doc),
    }
}

#[cfg(feature = "parallel")]
fn build_lists(doc: &Document, index: &CrossReferenceIndex<'_>) -> BuiltLists {
    use rayon::prelude::*;

    let ((nodes, value_tables), (messages, (environment_variables, attributes))) = rayon::join(
        || {
            rayon::join(
                || phases::build_nodes(doc, index),
                || phases::build_value_tables(doc),
            )
        },
        || {
            rayon::join(
                || {
                    doc.messages
                        .par_iter()
                        .map(|m| phases::build_message(m, index))
                        .collect()
                },
                || {
                    rayon::join(
                        || phases::build_env_vars(doc, index),
                        || build_attribute_lists(doc),
                    )
                },
            )
        },
    );

    BuiltLists {
        nodes,
        value_tables,
        messages,
        environment_variables,
        attributes,
    }
}

fn build_attribute_lists(doc: &Document) -> AttributeLists {
    AttributeLists {
        definitions: phases::build_attribute_definitions(doc),
        defaults: phases::build_attribute_defaults(doc),
        values: phases::build_network_attribute_values(doc),
    }
}

/// Report what each builder produced, in phase order.
fn report_counts<T: Tracer>(built: &BuiltLists, tracer: &mut T) {
    let counts = [
        (Phase::Nodes, built.nodes.len()),
        (Phase::ValueTables, built.value_tables.len()),
        (Phase::Messages, built.messages.len()),
        (Phase::EnvironmentVariables, built.environment_variables.len()),
        (
            Phase::Attributes,
            built.attributes.definitions.len()
                + built.attributes.defaults.len()
                + built.attributes.values.len(),
        ),
    ];
    for (phase, count) in counts {
        crate::trace_event!(tracer, TraceLevel::Info, TraceEvent::PhaseStart { phase });
        crate::trace_event!(tracer, TraceLevel::Debug, TraceEvent::EntitiesBuilt { phase, count });
        crate::trace_event!(tracer, TraceLevel::Info, TraceEvent::PhaseEnd { phase });
    }
}

fn assemble(doc: &Document, built: BuiltLists) -> Network {
    let bit_timing = doc
        .bit_timing
        .as_ref()
        .map(|bt| BitTiming {
            baudrate: bt.baudrate,
            btr1: bt.btr1,
            btr2: bt.btr2,
        })
        .unwrap_or_default();

    Network::from_parts(NetworkParts {
        version: doc.version.clone(),
        new_symbols: doc.new_symbols.clone(),
        bit_timing,
        nodes: built.nodes,
        value_tables: built.value_tables,
        messages: built.messages,
        environment_variables: built.environment_variables,
        attribute_definitions: built.attributes.definitions,
        attribute_defaults: built.attributes.defaults,
        attribute_values: built.attributes.values,
        comment: phases::network_comment(doc),
    })
}

fn report_diagnostics<T: Tracer>(network: &Network, tracer: &mut T) {
    for message in network.messages() {
        for signal in message.signals() {
            for &diagnostic in signal.diagnostics() {
                crate::trace_event!(
                    tracer,
                    TraceLevel::Warn,
                    TraceEvent::SignalDiagnostic {
                        message: message.name(),
                        signal: signal.name(),
                        diagnostic,
                    }
                );
            }
        }
        for &diagnostic in message.diagnostics() {
            crate::trace_event!(
                tracer,
                TraceLevel::Warn,
                TraceEvent::MessageDiagnostic {
                    message: message.name(),
                    diagnostic,
                }
            );
        }
    }
}

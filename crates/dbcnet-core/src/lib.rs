//! dbcnet-core: DBC network parser and model library
//!
//! This crate parses CAN DBC text into a flat fact set and links the facts
//! into an immutable [`Network`](model::Network) of nodes, messages, signals,
//! environment variables, value tables and attributes.
//! It is designed to be `no_std` compatible and IO-free.
//!
//! # Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Document → Resolver → Network
//! ```
//!
//! A lexical or syntax error aborts the pipeline and yields no network.
//! Semantic problems (a signal that overruns its message, a float signal of
//! the wrong width, ...) never abort; they are attached to the entity and
//! reported through a [`Tracer`](resolver::Tracer).

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod ast;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod resolver;

use model::Network;
use resolver::{NoopTracer, Resolver, Tracer};

/// Parse and resolve DBC source text.
///
/// Returns `None` if the text does not parse.
#[must_use]
pub fn load_from_memory(source: &str) -> Option<Network> {
    load_from_memory_traced(source, &mut NoopTracer)
}

/// Parse and resolve DBC source text, reporting to `tracer`.
///
/// Returns `None` if the text does not parse.
pub fn load_from_memory_traced<T: Tracer>(source: &str, tracer: &mut T) -> Option<Network> {
    let doc = parser::parse(source).ok()?;
    Some(Resolver::resolve_traced(&doc, tracer))
}

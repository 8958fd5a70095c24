//! dbcnet-capi: C ABI boundary
//!
//! This crate exposes a resolved network to C and other host languages as
//! an opaque handle with read-only accessors.

pub mod ffi;

pub use dbcnet_core;

//! dbcnet-std: Filesystem loader and CLI utilities
//!
//! This crate provides convenience utilities for native Rust usage,
//! including file-based DBC loading, network caching and a stderr tracer.

pub mod cache;

pub use dbcnet_core;

use dbcnet_core::lexer::Diagnostic;
use dbcnet_core::model::Network;
use dbcnet_core::parser;
use dbcnet_core::resolver::{NoopTracer, Resolver, TraceEvent, TraceLevel, Tracer};
use std::fs;
use std::io;
use std::path::Path;

/// Error loading a DBC file.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io(io::Error),
    /// The file is not valid UTF-8.
    Encoding(std::str::Utf8Error),
    /// The text does not parse; no network was produced.
    Parse(Diagnostic),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Encoding(e) => write!(f, "invalid UTF-8: {e}"),
            Self::Parse(d) => write!(f, "parse failed: {d}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encoding(e) => Some(e),
            Self::Parse(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<Diagnostic> for LoadError {
    fn from(d: Diagnostic) -> Self {
        Self::Parse(d)
    }
}

/// Parse and resolve DBC source bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not UTF-8 or do not parse.
pub fn load_from_bytes(bytes: &[u8]) -> Result<Network, LoadError> {
    load_from_bytes_traced(bytes, &mut NoopTracer)
}

/// Parse and resolve DBC source bytes, reporting to `tracer`.
///
/// # Errors
///
/// Returns an error if the bytes are not UTF-8 or do not parse.
pub fn load_from_bytes_traced<T: Tracer>(bytes: &[u8], tracer: &mut T) -> Result<Network, LoadError> {
    let source = std::str::from_utf8(bytes).map_err(LoadError::Encoding)?;
    let doc = parser::parse(source)?;
    Ok(Resolver::resolve_traced(&doc, tracer))
}

/// Read, parse and resolve a DBC file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Network, LoadError> {
    load_from_file_traced(path, &mut NoopTracer)
}

/// Read, parse and resolve a DBC file, reporting to `tracer`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn load_from_file_traced<P: AsRef<Path>, T: Tracer>(
    path: P,
    tracer: &mut T,
) -> Result<Network, LoadError> {
    let bytes = fs::read(path)?;
    load_from_bytes_traced(&bytes, tracer)
}

/// Read, parse and resolve a DBC file; `None` if anything fails.
#[must_use]
pub fn load_network_from_file<P: AsRef<Path>>(path: P) -> Option<Network> {
    load_from_file(path).ok()
}

/// Tracer that writes events at or above its level to stderr.
#[derive(Clone, Copy, Debug)]
pub struct StderrTracer {
    level: TraceLevel,
}

impl StderrTracer {
    /// Create a tracer emitting events up to `level`.
    #[must_use]
    pub const fn new(level: TraceLevel) -> Self {
        Self { level }
    }
}

impl Default for StderrTracer {
    fn default() -> Self {
        Self::new(TraceLevel::Warn)
    }
}

impl Tracer for StderrTracer {
    fn level(&self) -> TraceLevel {
        self.level
    }

    fn trace(&mut self, level: TraceLevel, event: TraceEvent<'_>) {
        eprintln!("[{}] {}", level_name(level), format_event(&event));
    }
}

fn level_name(level: TraceLevel) -> &'static str {
    match level {
        TraceLevel::Error => "error",
        TraceLevel::Warn => "warn",
        TraceLevel::Info => "info",
        TraceLevel::Debug => "debug",
        TraceLevel::Trace => "trace",
    }
}

/// Render a trace event as one line.
#[must_use]
pub fn format_event(event: &TraceEvent<'_>) -> String {
    match event {
        TraceEvent::PhaseStart { phase } => format!("{phase}: start"),
        TraceEvent::PhaseEnd { phase } => format!("{phase}: end"),
        TraceEvent::IndexBuilt {
            facts,
            keys,
            overwritten,
        } => format!("index: {facts} facts under {keys} keys, {overwritten} overwritten"),
        TraceEvent::EntitiesBuilt { phase, count } => format!("{phase}: built {count}"),
        TraceEvent::SignalDiagnostic {
            message,
            signal,
            diagnostic,
        } => format!("{diagnostic}: {message}::{signal}"),
        TraceEvent::MessageDiagnostic {
            message,
            diagnostic,
        } => format!("{diagnostic}: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbcnet_core::model::SignalDiagnostic;
    use dbcnet_core::resolver::Phase;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"BU_: ECU1\nBO_ 1 M: 1 ECU1\n SG_ S : 4|8@1+ (1,0) [0|0] \"\" ECU1\n")
            .unwrap();

        let network = load_from_file(file.path()).unwrap();
        assert_eq!(network.nodes().len(), 1);
        assert!(network.messages()[0].signals()[0]
            .has_diagnostic(SignalDiagnostic::SignalExceedsMessageSize));
        assert!(load_network_from_file(file.path()).is_some());
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = load_from_file("/nonexistent/network.dbc");
        assert!(matches!(result, Err(LoadError::Io(_))));
        assert!(load_network_from_file("/nonexistent/network.dbc").is_none());
    }

    #[test]
    fn test_parse_failure_is_error() {
        assert!(matches!(
            load_from_bytes(b"BO_ 1 M 8 ECU1"),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            load_from_bytes(&[0xff, 0xfe]),
            Err(LoadError::Encoding(_))
        ));
    }

    #[test]
    fn test_format_event() {
        assert_eq!(
            format_event(&TraceEvent::EntitiesBuilt {
                phase: Phase::ValueTables,
                count: 3
            }),
            "value-tables: built 3"
        );
        assert_eq!(
            format_event(&TraceEvent::SignalDiagnostic {
                message: "Engine",
                signal: "Rpm",
                diagnostic: SignalDiagnostic::SignalExceedsMessageSize,
            }),
            "SignalExceedsMessageSize: Engine::Rpm"
        );
    }
}

//! Resolver tracing support.
//!
//! Provides structured trace events for observing network construction.
//! The tracer is also the sink for soft diagnostics: every fired signal or
//! message diagnostic is emitted at [`TraceLevel::Warn`].

use crate::model::{MessageDiagnostic, SignalDiagnostic};

/// Trace verbosity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    /// Critical errors only.
    Error,
    /// Warnings and errors (soft diagnostics).
    Warn,
    /// Informational messages (phase boundaries, summary stats).
    Info,
    /// Detailed debugging (index statistics, per-list counts).
    Debug,
    /// Verbose tracing (every operation).
    Trace,
}

/// Resolution phase identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Cross-reference index construction.
    Index,
    /// Node builder.
    Nodes,
    /// Value table builder.
    ValueTables,
    /// Message and signal builder.
    Messages,
    /// Environment variable builder.
    EnvironmentVariables,
    /// Attribute definition and network-level builder.
    Attributes,
    /// Assembly of the final network.
    Assembly,
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Phase::Index => write!(f, "index"),
            Phase::Nodes => write!(f, "nodes"),
            Phase::ValueTables => write!(f, "value-tables"),
            Phase::Messages => write!(f, "messages"),
            Phase::EnvironmentVariables => write!(f, "environment-variables"),
            Phase::Attributes => write!(f, "attributes"),
            Phase::Assembly => write!(f, "assembly"),
        }
    }
}

/// Structured trace events emitted during resolution.
#[derive(Clone, Debug)]
pub enum TraceEvent<'a> {
    /// A resolution phase is starting.
    PhaseStart { phase: Phase },
    /// A resolution phase has ended.
    PhaseEnd { phase: Phase },

    // === Index events ===
    /// The cross-reference index is complete.
    IndexBuilt {
        /// Number of side facts filed into buckets.
        facts: usize,
        /// Number of distinct keys across all buckets.
        keys: usize,
        /// Number of single-valued facts replaced by a later duplicate.
        overwritten: usize,
    },

    // === Builder events ===
    /// A builder finished one top-level list.
    EntitiesBuilt {
        /// The builder phase.
        phase: Phase,
        /// Number of entities produced.
        count: usize,
    },

    // === Diagnostics ===
    /// A signal-level diagnostic fired.
    SignalDiagnostic {
        /// Owning message name.
        message: &'a str,
        /// Signal name.
        signal: &'a str,
        /// What fired.
        diagnostic: SignalDiagnostic,
    },
    /// A message-level diagnostic fired.
    MessageDiagnostic {
        /// Message name.
        message: &'a str,
        /// What fired.
        diagnostic: MessageDiagnostic,
    },
}

/// Trait for receiving trace events during resolution.
///
/// Implement this trait to capture resolution diagnostics.
/// The tracer can filter events by returning a minimum trace level
/// from `level()`.
pub trait Tracer {
    /// Returns the minimum trace level to emit.
    ///
    /// Events below this level will not be passed to `trace()`.
    /// Default: `TraceLevel::Info`.
    fn level(&self) -> TraceLevel {
        TraceLevel::Info
    }

    /// Called for each trace event at or above the configured level.
    fn trace(&mut self, level: TraceLevel, event: TraceEvent<'_>);
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn level(&self) -> TraceLevel {
        (**self).level()
    }

    fn trace(&mut self, level: TraceLevel, event: TraceEvent<'_>) {
        (**self).trace(level, event);
    }
}

/// A no-op tracer that discards all events.
///
/// Used as the default when tracing is not needed.
#[derive(Default, Clone, Copy, Debug)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn level(&self) -> TraceLevel {
        TraceLevel::Error
    }

    fn trace(&mut self, _level: TraceLevel, _event: TraceEvent<'_>) {}
}

/// Emit a trace event if the tracer level permits.
///
/// This macro checks the tracer's level before constructing the event,
/// enabling zero-cost tracing when the level is too low.
/// Events are only emitted if their level is at or below the tracer's level.
#[macro_export]
macro_rules! trace_event {
    ($tracer:expr, $level:expr, $event:expr) => {
        if $level <= $tracer.level() {
            $tracer.trace($level, $event);
        }
    };
}

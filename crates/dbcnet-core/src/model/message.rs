//! Messages and signal groups.

use super::attribute::Attribute;
use super::signal::{Multiplexer, Signal};
use alloc::string::String;
use alloc::vec::Vec;

/// A named group of signals within one message (`SIG_GROUP_`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalGroup {
    pub(crate) message_id: u64,
    pub(crate) name: String,
    pub(crate) repetitions: u64,
    pub(crate) signal_names: Vec<String>,
}

impl SignalGroup {
    /// Get the owning message id.
    #[must_use]
    pub fn message_id(&self) -> u64 {
        self.message_id
    }

    /// Get the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the repetition count.
    #[must_use]
    pub fn repetitions(&self) -> u64 {
        self.repetitions
    }

    /// Get the member signal names.
    #[must_use]
    pub fn signal_names(&self) -> &[String] {
        &self.signal_names
    }
}

/// Non-fatal problem found while building a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageDiagnostic {
    /// At least one multiplexed signal but no switch signal.
    MuxValueWithoutMuxSignal,
}

impl MessageDiagnostic {
    /// Get the diagnostic name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MuxValueWithoutMuxSignal => "MuxValueWithoutMuxSignal",
        }
    }

    /// Get the bit for this kind in a diagnostic mask.
    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            Self::MuxValueWithoutMuxSignal => 1,
        }
    }
}

impl core::fmt::Display for MessageDiagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CAN message (`BO_`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) size: u64,
    pub(crate) transmitter: String,
    pub(crate) message_transmitters: Vec<String>,
    pub(crate) signals: Vec<Signal>,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) comment: String,
    pub(crate) signal_groups: Vec<SignalGroup>,
    pub(crate) diagnostics: Vec<MessageDiagnostic>,
}

impl Message {
    /// Get the CAN identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the message name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the payload size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get the transmitting node name.
    #[must_use]
    pub fn transmitter(&self) -> &str {
        &self.transmitter
    }

    /// Get the additional transmitters (`BO_TX_BU_`).
    #[must_use]
    pub fn message_transmitters(&self) -> &[String] {
        &self.message_transmitters
    }

    /// Get the signals in source order.
    #[must_use]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Get a signal by name.
    ///
    /// The first signal with the name wins if the message repeats it.
    #[must_use]
    pub fn signal_by_name(&self, name: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.name == name)
    }

    /// Get the multiplexer switch signal, if any.
    #[must_use]
    pub fn mux_switch(&self) -> Option<&Signal> {
        self.signals
            .iter()
            .find(|s| s.multiplexer == Multiplexer::MuxSwitch)
    }

    /// Get the attributes attached to this message, in source order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Get the comment (empty if none).
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Get the signal groups.
    #[must_use]
    pub fn signal_groups(&self) -> &[SignalGroup] {
        &self.signal_groups
    }

    /// Get the fired message-level diagnostics.
    #[must_use]
    pub fn diagnostics(&self) -> &[MessageDiagnostic] {
        &self.diagnostics
    }

    /// Check whether a message-level diagnostic fired.
    #[must_use]
    pub fn has_diagnostic(&self, kind: MessageDiagnostic) -> bool {
        self.diagnostics.contains(&kind)
    }

    /// Get the fired message-level diagnostics as a bit mask.
    #[must_use]
    pub fn diagnostic_mask(&self) -> u32 {
        self.diagnostics.iter().fold(0, |acc, d| acc | d.mask())
    }
}

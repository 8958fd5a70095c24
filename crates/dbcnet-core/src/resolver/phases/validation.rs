//! Soft diagnostics for signals and messages.
//!
//! None of these checks reject anything: the entity is built either way and
//! carries the fired kinds.

use crate::model::{ExtendedValueType, MessageDiagnostic, Multiplexer, Signal, SignalDiagnostic};
use alloc::vec::Vec;

/// Check whether the host `f32` is IEEE 754 binary32.
#[must_use]
pub fn host_float_is_ieee754() -> bool {
    1.0f32.to_bits() == 0x3F80_0000
        && (-2.5f32).to_bits() == 0xC020_0000
        && f32::MANTISSA_DIGITS == 24
}

/// Check whether the host `f64` is IEEE 754 binary64.
#[must_use]
pub fn host_double_is_ieee754() -> bool {
    1.0f64.to_bits() == 0x3FF0_0000_0000_0000
        && (-2.5f64).to_bits() == 0xC004_0000_0000_0000
        && f64::MANTISSA_DIGITS == 53
}

/// Run the signal checks, in [`SignalDiagnostic::ALL`] order.
#[must_use]
pub fn check_signal(signal: &Signal) -> Vec<SignalDiagnostic> {
    let mut fired = Vec::new();

    let end_bit = signal.start_bit.saturating_add(signal.bit_size);
    if end_bit > signal.message_size.saturating_mul(8) {
        fired.push(SignalDiagnostic::SignalExceedsMessageSize);
    }

    if let Some(required) = signal.extended_value_type.required_bit_size() {
        if signal.bit_size != required {
            fired.push(SignalDiagnostic::WrongBitSizeForExtendedDataType);
        }
    }

    match signal.extended_value_type {
        ExtendedValueType::Float if !host_float_is_ieee754() => {
            fired.push(SignalDiagnostic::MachineFloatEncodingNotSupported);
        }
        ExtendedValueType::Double if !host_double_is_ieee754() => {
            fired.push(SignalDiagnostic::MachineDoubleEncodingNotSupported);
        }
        _ => {}
    }

    fired
}

/// Run the message checks over the message's finished signals.
#[must_use]
pub fn check_message(signals: &[Signal]) -> Vec<MessageDiagnostic> {
    let has_value = signals
        .iter()
        .any(|s| matches!(s.multiplexer, Multiplexer::MuxValue(_)));
    let has_switch = signals
        .iter()
        .any(|s| s.multiplexer == Multiplexer::MuxSwitch);

    if has_value && !has_switch {
        alloc::vec![MessageDiagnostic::MuxValueWithoutMuxSignal]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ByteOrder, ValueType};
    use alloc::string::String;
    use alloc::vec;

    fn signal(start_bit: u64, bit_size: u64, message_size: u64) -> Signal {
        Signal {
            message_size,
            name: String::from("S"),
            multiplexer: Multiplexer::NoMux,
            start_bit,
            bit_size,
            byte_order: ByteOrder::LittleEndian,
            value_type: ValueType::Unsigned,
            factor: 1.0,
            offset: 0.0,
            minimum: 0.0,
            maximum: 0.0,
            unit: String::new(),
            receivers: Vec::new(),
            attributes: Vec::new(),
            value_encoding_descriptions: Vec::new(),
            comment: String::new(),
            extended_value_type: ExtendedValueType::Integer,
            signal_multiplexer_values: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn with_mux(mut s: Signal, multiplexer: Multiplexer) -> Signal {
        s.multiplexer = multiplexer;
        s
    }

    #[test]
    fn test_host_is_ieee754() {
        assert!(host_float_is_ieee754());
        assert!(host_double_is_ieee754());
    }

    #[test]
    fn test_exceeds_message_size_boundary() {
        // 56 + 8 == 64: exactly fills the payload
        assert!(check_signal(&signal(56, 8, 8)).is_empty());
        assert_eq!(
            check_signal(&signal(57, 8, 8)),
            [SignalDiagnostic::SignalExceedsMessageSize]
        );
        assert_eq!(
            check_signal(&signal(60, 8, 8)),
            [SignalDiagnostic::SignalExceedsMessageSize]
        );
    }

    #[test]
    fn test_exceeds_zero_sized_message() {
        assert_eq!(
            check_signal(&signal(0, 1, 0)),
            [SignalDiagnostic::SignalExceedsMessageSize]
        );
    }

    #[test]
    fn test_wrong_bit_size_for_extended_type() {
        let mut s = signal(0, 16, 8);
        s.extended_value_type = ExtendedValueType::Float;
        assert_eq!(
            check_signal(&s),
            [SignalDiagnostic::WrongBitSizeForExtendedDataType]
        );

        s.bit_size = 32;
        assert!(check_signal(&s).is_empty());

        s.extended_value_type = ExtendedValueType::Double;
        assert_eq!(
            check_signal(&s),
            [SignalDiagnostic::WrongBitSizeForExtendedDataType]
        );

        s.bit_size = 64;
        assert!(check_signal(&s).is_empty());
    }

    #[test]
    fn test_integer_signal_any_width() {
        assert!(check_signal(&signal(0, 13, 8)).is_empty());
    }

    #[test]
    fn test_mux_value_without_switch() {
        let signals = vec![with_mux(signal(0, 8, 8), Multiplexer::MuxValue(1))];
        assert_eq!(
            check_message(&signals),
            [MessageDiagnostic::MuxValueWithoutMuxSignal]
        );
    }

    #[test]
    fn test_mux_value_with_switch() {
        let signals = vec![
            with_mux(signal(0, 4, 8), Multiplexer::MuxSwitch),
            with_mux(signal(8, 8, 8), Multiplexer::MuxValue(1)),
        ];
        assert!(check_message(&signals).is_empty());
    }

    #[test]
    fn test_switch_without_values() {
        let signals = vec![with_mux(signal(0, 4, 8), Multiplexer::MuxSwitch)];
        assert!(check_message(&signals).is_empty());
        assert!(check_message(&[]).is_empty());
    }
}

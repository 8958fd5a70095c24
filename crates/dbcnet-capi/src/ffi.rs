//! C ABI exports.
//!
//! Provides the minimal set of exports needed for C and other host languages
//! to load a network and read it back.
//!
//! # Protocol
//!
//! 1. Host calls `dbcnet_network_load_from_file` or
//!    `dbcnet_network_load_from_memory` and receives an opaque handle
//! 2. A null handle means no network was produced; call `dbcnet_last_error`
//! 3. Host walks messages and signals by index with the accessors
//! 4. Host calls `dbcnet_network_free` when done
//!
//! # Memory Management
//!
//! - The handle owns the network; nothing else needs freeing
//! - Strings returned by accessors are NUL-terminated and valid until the
//!   handle is freed
//! - The string returned by `dbcnet_last_error` is valid until the next
//!   failing call on the same thread

use std::cell::RefCell;
use std::ffi::{CStr, CString, c_char};
use std::fmt::Write;

use dbcnet_core::model::{
    ByteOrder, ExtendedValueType, Message, Multiplexer, Network, Signal, ValueType,
};

/// Error codes returned by FFI functions.
pub mod error {
    /// Success.
    pub const SUCCESS: u32 = 0;
    /// Invalid pointer argument.
    pub const INVALID_POINTER: u32 = 1;
    /// Message or signal index out of range.
    pub const OUT_OF_RANGE: u32 = 2;
}

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_error(msg: &str) {
    let msg = CString::new(msg.replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|e| *e.borrow_mut() = Some(msg));
}

fn c_string(s: &str) -> CString {
    CString::new(s).unwrap_or_default()
}

/// Opaque network handle.
pub struct DbcNetwork {
    network: Network,
    message_names: Vec<CString>,
    signal_names: Vec<Vec<CString>>,
    diagnostics_json: CString,
}

impl DbcNetwork {
    fn new(network: Network) -> Self {
        let message_names = network.messages().iter().map(|m| c_string(m.name())).collect();
        let signal_names = network
            .messages()
            .iter()
            .map(|m| m.signals().iter().map(|s| c_string(s.name())).collect())
            .collect();
        let diagnostics_json = c_string(&diagnostics_json(&network));
        Self {
            network,
            message_names,
            signal_names,
            diagnostics_json,
        }
    }

    fn message(&self, index: usize) -> Option<&Message> {
        self.network.messages().get(index)
    }

    fn signal(&self, message: usize, signal: usize) -> Option<&Signal> {
        self.message(message)?.signals().get(signal)
    }
}

/// Message fields, filled by [`dbcnet_message_info`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct DbcMessageInfo {
    /// Message id.
    pub id: u64,
    /// Payload size in bytes.
    pub size: u64,
    /// Number of signals.
    pub signal_count: usize,
    /// Bitmask of fired message diagnostics.
    pub diagnostic_mask: u32,
}

/// Signal fields, filled by [`dbcnet_signal_info`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct DbcSignalInfo {
    /// Start bit.
    pub start_bit: u64,
    /// Width in bits.
    pub bit_size: u64,
    /// 0 = big endian, 1 = little endian.
    pub byte_order: u8,
    /// 0 = signed, 1 = unsigned.
    pub value_type: u8,
    /// 0 = none, 1 = switch, 2 = multiplexed value.
    pub multiplexer: u8,
    /// 0 = integer, 1 = float, 2 = double.
    pub extended_value_type: u8,
    /// Switch value when `multiplexer` is 2, else 0.
    pub multiplexer_value: u64,
    /// Scaling factor.
    pub factor: f64,
    /// Scaling offset.
    pub offset: f64,
    /// Physical minimum.
    pub minimum: f64,
    /// Physical maximum.
    pub maximum: f64,
    /// Bitmask of fired signal diagnostics.
    pub diagnostic_mask: u32,
}

impl From<&Signal> for DbcSignalInfo {
    fn from(signal: &Signal) -> Self {
        let (multiplexer, multiplexer_value) = match signal.multiplexer() {
            Multiplexer::NoMux => (0, 0),
            Multiplexer::MuxSwitch => (1, 0),
            Multiplexer::MuxValue(v) => (2, v),
        };
        Self {
            start_bit: signal.start_bit(),
            bit_size: signal.bit_size(),
            byte_order: match signal.byte_order() {
                ByteOrder::BigEndian => 0,
                ByteOrder::LittleEndian => 1,
            },
            value_type: match signal.value_type() {
                ValueType::Signed => 0,
                ValueType::Unsigned => 1,
            },
            multiplexer,
            extended_value_type: match signal.extended_value_type() {
                ExtendedValueType::Integer => 0,
                ExtendedValueType::Float => 1,
                ExtendedValueType::Double => 2,
            },
            multiplexer_value,
            factor: signal.factor(),
            offset: signal.offset(),
            minimum: signal.minimum(),
            maximum: signal.maximum(),
            diagnostic_mask: signal.diagnostic_mask(),
        }
    }
}

fn into_handle(result: Result<Network, dbcnet_std::LoadError>) -> *mut DbcNetwork {
    match result {
        Ok(network) => Box::into_raw(Box::new(DbcNetwork::new(network))),
        Err(e) => {
            set_error(&e.to_string());
            std::ptr::null_mut()
        }
    }
}

// === Loading ===

/// Load a network from a DBC file.
///
/// Returns null if the file cannot be read or does not parse.
///
/// # Safety
///
/// `path` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_network_load_from_file(path: *const c_char) -> *mut DbcNetwork {
    if path.is_null() {
        set_error("null pointer");
        return std::ptr::null_mut();
    }
    // SAFETY: caller guarantees a NUL-terminated string
    let path = unsafe { CStr::from_ptr(path) };
    let Ok(path) = path.to_str() else {
        set_error("path is not valid UTF-8");
        return std::ptr::null_mut();
    };
    into_handle(dbcnet_std::load_from_file(path))
}

/// Load a network from NUL-terminated DBC text.
///
/// Returns null if the text does not parse.
///
/// # Safety
///
/// `source` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_network_load_from_memory(source: *const c_char) -> *mut DbcNetwork {
    if source.is_null() {
        set_error("null pointer");
        return std::ptr::null_mut();
    }
    // SAFETY: caller guarantees a NUL-terminated string
    let source = unsafe { CStr::from_ptr(source) };
    into_handle(dbcnet_std::load_from_bytes(source.to_bytes()))
}

/// Free a network handle. Null is ignored.
///
/// # Safety
///
/// `network` must be null or a handle returned by a load function that has
/// not been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_network_free(network: *mut DbcNetwork) {
    if network.is_null() {
        return;
    }
    // SAFETY: caller guarantees the handle came from Box::into_raw
    drop(unsafe { Box::from_raw(network) });
}

/// Get the last error message on this thread, or null.
#[unsafe(no_mangle)]
pub extern "C" fn dbcnet_last_error() -> *const c_char {
    LAST_ERROR.with(|e| e.borrow().as_ref().map_or(std::ptr::null(), |s| s.as_ptr()))
}

// === Network ===

/// Number of messages; 0 for a null handle.
///
/// # Safety
///
/// `network` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_network_message_count(network: *const DbcNetwork) -> usize {
    // SAFETY: caller guarantees a live handle or null
    unsafe { network.as_ref() }.map_or(0, |n| n.network.messages().len())
}

/// Number of nodes; 0 for a null handle.
///
/// # Safety
///
/// `network` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_network_node_count(network: *const DbcNetwork) -> usize {
    // SAFETY: caller guarantees a live handle or null
    unsafe { network.as_ref() }.map_or(0, |n| n.network.nodes().len())
}

/// Number of environment variables; 0 for a null handle.
///
/// # Safety
///
/// `network` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_network_env_var_count(network: *const DbcNetwork) -> usize {
    // SAFETY: caller guarantees a live handle or null
    unsafe { network.as_ref() }.map_or(0, |n| n.network.environment_variables().len())
}

/// Whether any diagnostic fired; false for a null handle.
///
/// # Safety
///
/// `network` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_network_has_diagnostics(network: *const DbcNetwork) -> bool {
    // SAFETY: caller guarantees a live handle or null
    unsafe { network.as_ref() }.is_some_and(|n| n.network.has_diagnostics())
}

/// All fired diagnostics as a JSON array, or null for a null handle.
///
/// Format: `[{"kind": "...", "message": "...", "signal": "..."|null}, ...]`
///
/// # Safety
///
/// `network` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_network_diagnostics_json(network: *const DbcNetwork) -> *const c_char {
    // SAFETY: caller guarantees a live handle or null
    unsafe { network.as_ref() }.map_or(std::ptr::null(), |n| n.diagnostics_json.as_ptr())
}

// === Messages ===

/// Fill `out` with the fields of message `index`.
///
/// Returns: 0 = success, non-zero = error code.
///
/// # Safety
///
/// `network` must be null or a live handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_message_info(
    network: *const DbcNetwork,
    index: usize,
    out: *mut DbcMessageInfo,
) -> u32 {
    // SAFETY: caller guarantees a live handle or null, and a writable out or null
    let (Some(network), Some(out)) = (unsafe { network.as_ref() }, unsafe { out.as_mut() }) else {
        return error::INVALID_POINTER;
    };
    let Some(message) = network.message(index) else {
        return error::OUT_OF_RANGE;
    };
    *out = DbcMessageInfo {
        id: message.id(),
        size: message.size(),
        signal_count: message.signals().len(),
        diagnostic_mask: message.diagnostic_mask(),
    };
    error::SUCCESS
}

/// Name of message `index`, or null if out of range.
///
/// # Safety
///
/// `network` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_message_name(network: *const DbcNetwork, index: usize) -> *const c_char {
    // SAFETY: caller guarantees a live handle or null
    unsafe { network.as_ref() }
        .and_then(|n| n.message_names.get(index))
        .map_or(std::ptr::null(), |s| s.as_ptr())
}

/// Position of the message with `id`, or -1 if absent.
///
/// # Safety
///
/// `network` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_message_index_by_id(network: *const DbcNetwork, id: u64) -> isize {
    // SAFETY: caller guarantees a live handle or null
    let Some(network) = (unsafe { network.as_ref() }) else {
        return -1;
    };
    network
        .network
        .messages()
        .iter()
        .position(|m| m.id() == id)
        .and_then(|i| isize::try_from(i).ok())
        .unwrap_or(-1)
}

// === Signals ===

/// Fill `out` with the fields of signal `signal` of message `message`.
///
/// Returns: 0 = success, non-zero = error code.
///
/// # Safety
///
/// `network` must be null or a live handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_signal_info(
    network: *const DbcNetwork,
    message: usize,
    signal: usize,
    out: *mut DbcSignalInfo,
) -> u32 {
    // SAFETY: caller guarantees a live handle or null, and a writable out or null
    let (Some(network), Some(out)) = (unsafe { network.as_ref() }, unsafe { out.as_mut() }) else {
        return error::INVALID_POINTER;
    };
    let Some(signal) = network.signal(message, signal) else {
        return error::OUT_OF_RANGE;
    };
    *out = DbcSignalInfo::from(signal);
    error::SUCCESS
}

/// Name of signal `signal` of message `message`, or null if out of range.
///
/// # Safety
///
/// `network` must be null or a live handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn dbcnet_signal_name(
    network: *const DbcNetwork,
    message: usize,
    signal: usize,
) -> *const c_char {
    // SAFETY: caller guarantees a live handle or null
    unsafe { network.as_ref() }
        .and_then(|n| n.signal_names.get(message)?.get(signal))
        .map_or(std::ptr::null(), |s| s.as_ptr())
}

// === Helpers ===

/// Render every fired diagnostic as a JSON array.
fn diagnostics_json(network: &Network) -> String {
    let mut json = String::from("[");
    for (i, record) in network.diagnostics().iter().enumerate() {
        if i > 0 {
            json.push(',');
        }
        json.push_str("{\"kind\":\"");
        json.push_str(record.kind.as_str());
        json.push_str("\",\"message\":\"");
        escape_json_string(record.message, &mut json);
        json.push_str("\",\"signal\":");
        match record.signal {
            Some(signal) => {
                json.push('"');
                escape_json_string(signal, &mut json);
                json.push('"');
            }
            None => json.push_str("null"),
        }
        json.push('}');
    }
    json.push(']');
    json
}

/// Escape a string for JSON output.
fn escape_json_string(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
}

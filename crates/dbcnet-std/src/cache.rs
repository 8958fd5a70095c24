//! Network caching with fingerprint support.
//!
//! Provides serialization of the resolved network for fast startup.
//! Supports two workflows:
//!
//! 1. **Build → Deploy**: a build step resolves the DBC file and ships the
//!    cache; consumers load it without verification (no DBC file present).
//!
//! 2. **Tool with local DBC**: compute the fingerprint of the DBC source,
//!    verify the cache on load, regenerate it if stale.
//!
//! # File Format
//!
//! Cache files use the `.dbcn` extension by convention:
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Header (13 or 45 bytes)                │
//! │   magic: [u8; 4]        "DBCN"         │
//! │   version: u32          Schema version │
//! │   has_fingerprint: u8   0 or 1         │
//! │   fingerprint: [u8; 32] (if present)   │
//! ├────────────────────────────────────────┤
//! │ Payload (postcard-encoded NetworkParts)│
//! └────────────────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```ignore
//! // Build step: resolve and save with a fingerprint
//! let network = load_from_file("powertrain.dbc")?;
//! let fp = compute_fingerprint(&std::fs::read("powertrain.dbc")?);
//! save_cache(&network, "powertrain.dbcn", Some(fp))?;
//!
//! // Consumer: load without verification
//! let network = load_cache("powertrain.dbcn")?;
//!
//! // Or let the cache regenerate itself when the DBC changes
//! let network = load_network_cached("powertrain.dbc", "powertrain.dbcn")?;
//! ```

use crate::LoadError;
use dbcnet_core::model::{Network, NetworkParts};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

/// Current schema version. Bump on any breaking change to serialized format.
pub const SCHEMA_VERSION: u32 = 1;

/// Magic bytes identifying a dbcnet cache file.
const MAGIC: [u8; 4] = *b"DBCN";

/// Header size without fingerprint: magic(4) + version(4) + has_fp(1).
const HEADER_LEN: usize = 9;

/// Fingerprint length (SHA-256).
const FINGERPRINT_LEN: usize = 32;

/// Cache error.
#[derive(Debug)]
pub enum CacheError {
    /// File does not start with expected magic bytes.
    InvalidMagic,
    /// Schema version mismatch.
    VersionMismatch {
        /// Expected version.
        expected: u32,
        /// Found version.
        found: u32,
    },
    /// Fingerprint does not match expected value.
    FingerprintMismatch,
    /// Header is truncated.
    TruncatedHeader,
    /// Postcard serialization failed.
    SerializationFailed(postcard::Error),
    /// Postcard deserialization failed.
    DeserializationFailed(postcard::Error),
    /// The DBC source could not be loaded while regenerating.
    Load(LoadError),
    /// IO error.
    Io(io::Error),
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected DBCN)"),
            Self::VersionMismatch { expected, found } => {
                write!(f, "version mismatch: expected {expected}, found {found}")
            }
            Self::FingerprintMismatch => write!(f, "fingerprint mismatch"),
            Self::TruncatedHeader => write!(f, "truncated header"),
            Self::SerializationFailed(e) => write!(f, "postcard serialization failed: {e}"),
            Self::DeserializationFailed(e) => write!(f, "postcard deserialization failed: {e}"),
            Self::Load(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SerializationFailed(e) | Self::DeserializationFailed(e) => Some(e),
            Self::Load(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CacheError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<LoadError> for CacheError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

/// Compute a fingerprint of DBC source bytes.
///
/// The fingerprint includes the schema version so a format change
/// invalidates existing caches.
#[must_use]
pub fn compute_fingerprint(source: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(SCHEMA_VERSION.to_le_bytes());
    hasher.update(source);
    hasher.finalize().into()
}

/// Serialize a network to cache bytes.
///
/// # Errors
///
/// Returns [`CacheError::SerializationFailed`] if postcard rejects the payload.
pub fn serialize_network(
    network: &Network,
    fingerprint: Option<[u8; 32]>,
) -> Result<Vec<u8>, CacheError> {
    let parts = network.clone().into_parts();
    let payload = postcard::to_allocvec(&parts).map_err(CacheError::SerializationFailed)?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + FINGERPRINT_LEN + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
    if let Some(fp) = fingerprint {
        bytes.push(1);
        bytes.extend_from_slice(&fp);
    } else {
        bytes.push(0);
    }
    bytes.extend_from_slice(&payload);

    Ok(bytes)
}

/// Validate the header and return the stored fingerprint and payload offset.
fn read_header(bytes: &[u8]) -> Result<(Option<[u8; 32]>, usize), CacheError> {
    if bytes.len() < HEADER_LEN {
        return Err(CacheError::TruncatedHeader);
    }
    if bytes[0..4] != MAGIC {
        return Err(CacheError::InvalidMagic);
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != SCHEMA_VERSION {
        return Err(CacheError::VersionMismatch {
            expected: SCHEMA_VERSION,
            found: version,
        });
    }

    if bytes[8] == 0 {
        return Ok((None, HEADER_LEN));
    }
    let end = HEADER_LEN + FINGERPRINT_LEN;
    if bytes.len() < end {
        return Err(CacheError::TruncatedHeader);
    }
    let mut fp = [0u8; 32];
    fp.copy_from_slice(&bytes[HEADER_LEN..end]);
    Ok((Some(fp), end))
}

/// Deserialize a network from cache bytes.
///
/// If `expected_fingerprint` is `Some`, the stored fingerprint must be
/// present and equal; if `None`, verification is skipped.
///
/// # Errors
///
/// Returns an error if:
/// - Magic bytes don't match
/// - Schema version doesn't match
/// - Fingerprint doesn't match (when verification requested)
/// - Postcard deserialization fails
pub fn deserialize_network(
    bytes: &[u8],
    expected_fingerprint: Option<&[u8; 32]>,
) -> Result<Network, CacheError> {
    let (stored, payload_start) = read_header(bytes)?;

    if let Some(expected) = expected_fingerprint {
        if stored.as_ref() != Some(expected) {
            return Err(CacheError::FingerprintMismatch);
        }
    }

    let parts: NetworkParts = postcard::from_bytes(&bytes[payload_start..])
        .map_err(CacheError::DeserializationFailed)?;
    Ok(Network::from_parts(parts))
}

/// Get the fingerprint from cache bytes without deserializing the payload.
///
/// Returns `None` if the cache has no embedded fingerprint.
///
/// # Errors
///
/// Returns an error if the header is invalid.
pub fn get_fingerprint(bytes: &[u8]) -> Result<Option<[u8; 32]>, CacheError> {
    read_header(bytes).map(|(fp, _)| fp)
}

// === File-based convenience API ===

/// Save a network to a cache file.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_cache<P: AsRef<Path>>(
    network: &Network,
    path: P,
    fingerprint: Option<[u8; 32]>,
) -> Result<(), CacheError> {
    let bytes = serialize_network(network, fingerprint)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Load a network from a cache file without fingerprint verification.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the cache is invalid.
pub fn load_cache<P: AsRef<Path>>(path: P) -> Result<Network, CacheError> {
    let bytes = fs::read(path)?;
    deserialize_network(&bytes, None)
}

/// Load a network from a cache file with fingerprint verification.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the cache is invalid,
/// or the fingerprint doesn't match.
pub fn load_cache_verified<P: AsRef<Path>>(
    path: P,
    expected_fingerprint: &[u8; 32],
) -> Result<Network, CacheError> {
    let bytes = fs::read(path)?;
    deserialize_network(&bytes, Some(expected_fingerprint))
}

/// Check if a cache file exists and has a matching fingerprint.
pub fn is_cache_valid<P: AsRef<Path>>(path: P, expected_fingerprint: &[u8; 32]) -> bool {
    let Ok(bytes) = fs::read(path) else {
        return false;
    };

    match get_fingerprint(&bytes) {
        Ok(Some(fp)) => fp == *expected_fingerprint,
        _ => false,
    }
}

/// Load a DBC file through a cache, regenerating the cache when stale.
///
/// The DBC source is always read to compute its fingerprint. A valid cache
/// is returned as is; otherwise the source is parsed, resolved and the
/// cache rewritten.
///
/// # Errors
///
/// Returns an error if the DBC file cannot be read or parsed, or the cache
/// cannot be written.
pub fn load_network_cached<P: AsRef<Path>, Q: AsRef<Path>>(
    dbc_path: P,
    cache_path: Q,
) -> Result<Network, CacheError> {
    let bytes = fs::read(dbc_path.as_ref())?;
    let fp = compute_fingerprint(&bytes);

    if let Ok(network) = load_cache_verified(cache_path.as_ref(), &fp) {
        return Ok(network);
    }

    let network = crate::load_from_bytes(&bytes)?;
    save_cache(&network, cache_path, Some(fp))?;
    Ok(network)
}

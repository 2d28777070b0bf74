//! Binary serialization and deserialization of converters.
//!
//! This module provides a stable binary format for persisting a compiled
//! [`Converter`](crate::Converter). The format consists of a 32-byte fixed
//! header followed by a bincode-encoded payload.
//!
//! ## Wire Format
//!
//! ```text
//! Offset  Size  Field
//! 0       4     Magic bytes: b"UCNV"
//! 4       2     Format version (u16, little-endian)
//! 6       2     Engine version (u16, little-endian)
//! 8       4     Flags (u32, reserved)
//! 12      4     Payload length in bytes (u32, little-endian)
//! 16      16    BLAKE3 hash of the payload (truncated to 16 bytes)
//! 32..    var   Bincode-encoded payload
//! ```
//!
//! The format version in the header must match exactly, otherwise decoding
//! fails with [`DeserializeError::IncompatibleVersion`]. The engine version is
//! informational only.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{Converter, DefinitionError, Rule};

const MAGIC: &[u8; 4] = b"UCNV";
const FORMAT_VERSION: u16 = 1;
const ENGINE_VERSION: u16 = 1;
const HEADER_SIZE: usize = 32;

/// Errors that can occur when serializing a [`Converter`](crate::Converter) to bytes.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("failed to encode converter: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("payload of {0} bytes exceeds the 4 GiB format limit")]
    TooLarge(usize),

    #[error("I/O error during serialization: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when deserializing a [`Converter`](crate::Converter) from bytes.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("not a uniconv binary: invalid magic bytes")]
    BadMagic,

    #[error("incompatible format version: blob is v{blob}, engine supports v{supported}")]
    IncompatibleVersion { blob: u16, supported: u16 },

    #[error("integrity check failed: BLAKE3 checksum mismatch")]
    ChecksumMismatch,

    #[error("payload length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: u32, actual: usize },

    #[error("failed to decode payload: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("I/O error during deserialization: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DefinitionError> for DeserializeError {
    fn from(err: DefinitionError) -> Self {
        DeserializeError::Validation(err.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedConverter {
    metadata: ConverterMetadata,
    rules: Vec<Rule>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConverterMetadata {
    rule_count: usize,
    source_digest: Option<[u8; 32]>,
}

/// Metadata-only view of a cached blob, available without rebuilding the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheInfo {
    pub format_version: u16,
    pub engine_version: u16,
    pub rule_count: usize,
    pub source_digest: Option<[u8; 32]>,
}

impl CacheInfo {
    /// Whether the blob was produced from exactly this DSL source.
    #[must_use]
    pub fn matches_source(&self, source_text: &str) -> bool {
        self.source_digest == Some(*blake3::hash(source_text.as_bytes()).as_bytes())
    }
}

// -- Header I/O -------------------------------------------------------------

struct Header {
    format_version: u16,
    engine_version: u16,
    payload_len: u32,
    hash: [u8; 16],
}

fn write_header(buf: &mut Vec<u8>, payload: &[u8]) -> Result<(), SerializeError> {
    let payload_len = u32::try_from(payload.len()).map_err(|_| SerializeError::TooLarge(payload.len()))?;
    let hash = blake3::hash(payload);

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    buf.extend_from_slice(&ENGINE_VERSION.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // flags (reserved)
    buf.extend_from_slice(&payload_len.to_le_bytes());
    buf.extend_from_slice(&hash.as_bytes()[..16]);
    Ok(())
}

#[allow(clippy::cast_possible_truncation)] // HEADER_SIZE is 32, always fits in u32
fn read_header(bytes: &[u8]) -> Result<Header, DeserializeError> {
    if bytes.len() < HEADER_SIZE {
        return Err(DeserializeError::LengthMismatch {
            expected: HEADER_SIZE as u32,
            actual: bytes.len(),
        });
    }

    if &bytes[0..4] != MAGIC {
        return Err(DeserializeError::BadMagic);
    }

    let mut hash = [0u8; 16];
    hash.copy_from_slice(&bytes[16..32]);

    Ok(Header {
        format_version: u16::from_le_bytes([bytes[4], bytes[5]]),
        engine_version: u16::from_le_bytes([bytes[6], bytes[7]]),
        payload_len: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        hash,
    })
}

/// Check the header and checksum, returning the header and the payload slice.
fn checked_payload(bytes: &[u8]) -> Result<(Header, &[u8]), DeserializeError> {
    let header = read_header(bytes)?;

    if header.format_version != FORMAT_VERSION {
        return Err(DeserializeError::IncompatibleVersion {
            blob: header.format_version,
            supported: FORMAT_VERSION,
        });
    }

    let payload_end = HEADER_SIZE + header.payload_len as usize;
    if bytes.len() != payload_end {
        return Err(DeserializeError::LengthMismatch {
            expected: header.payload_len,
            actual: bytes.len() - HEADER_SIZE,
        });
    }
    let payload = &bytes[HEADER_SIZE..payload_end];

    if blake3::hash(payload).as_bytes()[..16] != header.hash {
        return Err(DeserializeError::ChecksumMismatch);
    }
    Ok((header, payload))
}

fn decode_payload(payload: &[u8]) -> Result<SerializedConverter, DeserializeError> {
    let (serialized, _): (SerializedConverter, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())?;
    Ok(serialized)
}

// -- Validation -------------------------------------------------------------

fn validate(ser: &SerializedConverter) -> Result<(), DeserializeError> {
    if ser.metadata.rule_count != ser.rules.len() {
        return Err(DeserializeError::Validation(format!(
            "metadata says {} rules but payload has {}",
            ser.metadata.rule_count,
            ser.rules.len()
        )));
    }
    crate::compile::validate(&ser.rules)?;
    Ok(())
}

// -- Public encode/decode ---------------------------------------------------

pub(crate) fn encode(converter: &Converter, source_text: Option<&str>) -> Result<Vec<u8>, SerializeError> {
    let serialized = SerializedConverter {
        metadata: ConverterMetadata {
            rule_count: converter.rules.len(),
            source_digest: source_text.map(|s| *blake3::hash(s.as_bytes()).as_bytes()),
        },
        rules: converter.rules.clone(),
    };
    let payload = bincode::serde::encode_to_vec(&serialized, bincode::config::standard())?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    write_header(&mut buf, &payload)?;
    buf.extend_from_slice(&payload);
    debug!(rules = converter.rules.len(), bytes = buf.len(), "encoded converter");
    Ok(buf)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<Converter, DeserializeError> {
    let (_, payload) = checked_payload(bytes)?;
    let serialized = decode_payload(payload)?;
    validate(&serialized)?;
    debug!(rules = serialized.rules.len(), bytes = bytes.len(), "decoded converter");
    Ok(Converter {
        rules: serialized.rules,
    })
}

/// Read the header and metadata of a cached converter without validating its
/// rules, e.g. to decide whether the cache is stale.
///
/// # Errors
///
/// Returns [`DeserializeError`] on format or integrity failure.
pub fn inspect(bytes: &[u8]) -> Result<CacheInfo, DeserializeError> {
    let (header, payload) = checked_payload(bytes)?;
    let serialized = decode_payload(payload)?;
    Ok(CacheInfo {
        format_version: header.format_version,
        engine_version: header.engine_version,
        rule_count: serialized.metadata.rule_count,
        source_digest: serialized.metadata.source_digest,
    })
}

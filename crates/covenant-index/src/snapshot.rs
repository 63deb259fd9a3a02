//! Snapshot codec.
//!
//! ```text
//! +--------+-----------+------------------+----------------------------+
//! | "CVIX" | version   | blake3(body)     | body = zstd(JSON contents) |
//! | 4 B    | u16 LE    | 32 B             | rest                       |
//! +--------+-----------+------------------+----------------------------+
//! ```
//!
//! Decoding validates the header, checksum, JSON shape and every embedding's
//! dimension before returning, so a successful decode can be swapped in as is.

use covenant_core::errors::{CovenantResult, IndexError};
use serde::{Deserialize, Serialize};

use crate::document::EmbeddedDocument;

pub const MAGIC: &[u8; 4] = b"CVIX";
pub const FORMAT_VERSION: u16 = 1;

const CHECKSUM_LEN: usize = 32;
const HEADER_LEN: usize = MAGIC.len() + 2 + CHECKSUM_LEN;
const ZSTD_LEVEL: i32 = 3;

/// Everything an index holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexContents {
    pub dimension: Option<usize>,
    pub documents: Vec<EmbeddedDocument>,
}

pub fn encode(contents: &IndexContents) -> CovenantResult<Vec<u8>> {
    let json = serde_json::to_vec(contents)?;
    let body = zstd::encode_all(json.as_slice(), ZSTD_LEVEL).map_err(|e| {
        IndexError::CorruptSnapshot {
            reason: format!("compression failed: {e}"),
        }
    })?;

    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    out.extend_from_slice(blake3::hash(&body).as_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<IndexContents, IndexError> {
    if bytes.len() < HEADER_LEN {
        return Err(corrupt(format!(
            "{} bytes is shorter than the {HEADER_LEN}-byte header",
            bytes.len()
        )));
    }
    let (magic, rest) = bytes.split_at(MAGIC.len());
    if magic != MAGIC {
        return Err(corrupt("bad magic".to_string()));
    }
    let (version, rest) = rest.split_at(2);
    let version = u16::from_le_bytes([version[0], version[1]]);
    if version != FORMAT_VERSION {
        return Err(corrupt(format!(
            "unsupported format version {version}, expected {FORMAT_VERSION}"
        )));
    }
    let (checksum, body) = rest.split_at(CHECKSUM_LEN);
    if blake3::hash(body).as_bytes() != checksum {
        return Err(corrupt("checksum mismatch".to_string()));
    }

    let json = zstd::decode_all(body).map_err(|e| corrupt(format!("decompression failed: {e}")))?;
    let contents: IndexContents =
        serde_json::from_slice(&json).map_err(|e| corrupt(format!("invalid body: {e}")))?;
    check_consistency(&contents)?;
    Ok(contents)
}

fn check_consistency(contents: &IndexContents) -> Result<(), IndexError> {
    match contents.dimension {
        None if !contents.documents.is_empty() => {
            Err(corrupt("documents present without a dimension".to_string()))
        }
        Some(0) => Err(corrupt("zero dimension".to_string())),
        Some(dim) => {
            for doc in &contents.documents {
                if doc.embedding.len() != dim {
                    return Err(corrupt(format!(
                        "document {} has {} dimensions, index has {dim}",
                        doc.id,
                        doc.embedding.len()
                    )));
                }
            }
            Ok(())
        }
        None => Ok(()),
    }
}

fn corrupt(reason: String) -> IndexError {
    IndexError::CorruptSnapshot { reason }
}

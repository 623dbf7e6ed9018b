//! Content-addressed corridor identifiers.

use crate::core::ElementId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

pub const CORRIDOR_ID_PREFIX: &str = "cor-";

/// Hex digits of the digest kept in an id.
const ID_HEX_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorridorId(String);

impl CorridorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorridorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CorridorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier for a member set.
///
/// Members are hashed as a sorted list so the id depends only on which
/// elements belong to the corridor. Each id is length-prefixed, so no two
/// distinct member lists share a digest input.
pub fn corridor_id<'a>(members: impl IntoIterator<Item = &'a ElementId>) -> CorridorId {
    let mut sorted: Vec<&ElementId> = members.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut hasher = Sha256::new();
    for id in sorted {
        let bytes = id.as_str().as_bytes();
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    let digest = format!("{:x}", hasher.finalize());
    CorridorId(format!("{}{}", CORRIDOR_ID_PREFIX, &digest[..ID_HEX_LEN]))
}

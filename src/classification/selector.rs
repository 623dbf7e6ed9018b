//! Seeded, reproducible selection from a fixed candidate list.
//!
//! The seed comes from the metric values themselves, so two corridors with
//! identical metrics always get the same picks while corridors that differ
//! in any metric usually start from a different offset.

use sha2::{Digest, Sha256};

/// Distance between successive picks in the candidate list.
pub const PICK_STRIDE: usize = 7;

/// Decimal places kept when hashing metric values.
const SEED_PRECISION: usize = 6;

/// Seed derived from metric values; `None` hashes differently from any value.
pub fn metrics_seed(values: &[Option<f64>]) -> u64 {
    let text = values
        .iter()
        .map(|v| match v {
            Some(v) => format!("{:.*}", SEED_PRECISION, v),
            None => "-".to_string(),
        })
        .collect::<Vec<_>>()
        .join("|");

    let digest = Sha256::digest(text.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicSelector {
    seed: u64,
}

impl DeterministicSelector {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Selector for an independent pick from the same metrics.
    pub fn offset(&self, by: u64) -> Self {
        Self::new(self.seed.wrapping_add(by))
    }

    /// Pick up to `count` distinct positions from a list of `len` items.
    ///
    /// Starts at `seed mod len` and strides through the list; a stride that
    /// lands on an already picked position walks forward to the next free one.
    pub fn pick_indices(&self, len: usize, count: usize) -> Vec<usize> {
        if len == 0 {
            return Vec::new();
        }
        let count = count.min(len);
        let offset = (self.seed % len as u64) as usize;
        let mut picked: Vec<usize> = Vec::with_capacity(count);

        for i in 0..count {
            let idx = (offset + i * PICK_STRIDE) % len;
            let free = (0..len)
                .map(|step| (idx + step) % len)
                .find(|candidate| !picked.contains(candidate));
            if let Some(free) = free {
                picked.push(free);
            }
        }
        picked
    }

    pub fn pick<'a, T>(&self, items: &'a [T], count: usize) -> Vec<&'a T> {
        self.pick_indices(items.len(), count)
            .into_iter()
            .map(|i| &items[i])
            .collect()
    }
}

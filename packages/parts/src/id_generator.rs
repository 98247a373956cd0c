use crc32fast::Hasher;

use crate::part::PartId;

/// Derive a short, stable seed from a session label using CRC32
pub fn session_seed(label: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(label.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for parts created within one editing session.
///
/// Ids are monotonic in creation order and never reused, even after the
/// part they were stamped on is removed.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(label: &str) -> Self {
        Self {
            seed: session_seed(label),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential id
    pub fn next_id(&mut self) -> PartId {
        self.count += 1;
        PartId::new(format!("{}-{}", self.seed, self.count))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.count
    }
}

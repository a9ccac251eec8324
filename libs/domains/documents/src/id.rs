use crate::error::{DocumentError, DocumentResult};
use rand::TryRngCore;
use rand::rngs::OsRng;

/// Number of random bytes behind each identifier.
pub const ID_BYTES: usize = 16;

/// Produces 32-character lowercase hex identifiers from the OS entropy source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueIdGenerator;

impl UniqueIdGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Fails only when the entropy source does.
    pub fn generate(&self) -> DocumentResult<String> {
        let mut bytes = [0u8; ID_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| DocumentError::IdGeneration(e.to_string()))?;
        Ok(const_hex::encode(bytes))
    }
}

//! Entity id generation.
//!
//! New entities get a UUIDv7: the leading 48 bits are the Unix millisecond
//! timestamp, so ids sort by creation time, and the random tail keeps two
//! entities created in the same millisecond apart.

use uuid::Uuid;

/// Hands out ids for `add_*` operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdGenerator;

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator
    }

    pub fn next_id(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

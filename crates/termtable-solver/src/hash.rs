//! Stable string hashing.
//!
//! 32-bit FNV-1a over the UTF-8 bytes of an identity's decimal text. Used only
//! to spread and interleave subjects reproducibly; it is not a security hash and
//! must never change between releases, since schedules depend on it bit for bit.

use termtable_core::SubjectId;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a of `text`
pub fn stable_hash(text: &str) -> u32 {
    text.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Hash of a subject identity, as used for ordering and day rotation
pub fn subject_hash(id: SubjectId) -> u32 {
    stable_hash(&id.to_string())
}

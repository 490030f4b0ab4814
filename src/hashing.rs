//! Hash strategies: a closed set of `i64 -> u64` functions.
//!
//! A [`HashKind`] names a strategy and is what callers configure. It is
//! resolved once, when a table is built, into a [`KeyHasher`] carrying
//! whatever state the strategy needs (only `Default` carries any: its
//! hash builder).
//! The table then calls [`HashKey::hash_key`] on every probe start and never
//! looks at the kind again.
//!
//! Every strategy except `Modulo` hashes the key's 8-byte big-endian
//! two's-complement encoding.

use crate::error::{Result, TableError};
use core::fmt;
use core::hash::BuildHasher;
use core::str::FromStr;
use hashbrown::hash_map::DefaultHashBuilder;
use sha2::{Digest as _, Sha256};
use std::io::Cursor;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Cryptographic digest used by [`HashKind::Digest64`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DigestAlgorithm {
    Sha256,
    Blake3,
}

/// Which hash strategy a table uses.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HashKind {
    /// The key's two's-complement value, reduced by the table.
    Modulo,
    /// The general-purpose hasher behind `hashbrown`. Its output is
    /// implementation-defined and not guaranteed stable across versions or
    /// builds.
    Default,
    /// FNV-1a 64.
    Mix64,
    /// xxHash64 with seed 0.
    Xxh64,
    /// MurmurHash3 x86_32 with seed 0, widened to 64 bits.
    Murmur3,
    /// A 256-bit digest reduced to its low 64 bits.
    Digest64(DigestAlgorithm),
}

impl HashKind {
    /// Every strategy, in the order the load-factor sweeps report them.
    pub const ALL: [HashKind; 7] = [
        HashKind::Modulo,
        HashKind::Default,
        HashKind::Xxh64,
        HashKind::Murmur3,
        HashKind::Mix64,
        HashKind::Digest64(DigestAlgorithm::Sha256),
        HashKind::Digest64(DigestAlgorithm::Blake3),
    ];

    /// Short name, accepted back by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            HashKind::Modulo => "modulo",
            HashKind::Default => "default",
            HashKind::Mix64 => "mix64",
            HashKind::Xxh64 => "xxh64",
            HashKind::Murmur3 => "murmur3",
            HashKind::Digest64(DigestAlgorithm::Sha256) => "sha256",
            HashKind::Digest64(DigestAlgorithm::Blake3) => "blake3",
        }
    }

    /// Whether this crate pins the hash function, so the same insertion
    /// order gives the same layout on every build. `Default` defers to
    /// `hashbrown` and makes no such promise.
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, HashKind::Default)
    }

    pub fn is_cryptographic(&self) -> bool {
        matches!(self, HashKind::Digest64(_))
    }

    /// Resolve into the hasher a table stores.
    pub fn build(&self) -> KeyHasher {
        match *self {
            HashKind::Modulo => KeyHasher::Modulo,
            HashKind::Default => KeyHasher::Default(DefaultHashBuilder::default()),
            HashKind::Mix64 => KeyHasher::Mix64,
            HashKind::Xxh64 => KeyHasher::Xxh64,
            HashKind::Murmur3 => KeyHasher::Murmur3,
            HashKind::Digest64(alg) => KeyHasher::Digest64(alg),
        }
    }
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashKind {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modulo" => Ok(HashKind::Modulo),
            "default" | "python_default" => Ok(HashKind::Default),
            "mix64" | "fnv1a" => Ok(HashKind::Mix64),
            "xxh64" | "xxhash" => Ok(HashKind::Xxh64),
            "murmur3" | "murmur" => Ok(HashKind::Murmur3),
            "sha256" | "digest64" => Ok(HashKind::Digest64(DigestAlgorithm::Sha256)),
            "blake3" => Ok(HashKind::Digest64(DigestAlgorithm::Blake3)),
            other => Err(TableError::invalid_config(format!(
                "unknown hash strategy {other:?}"
            ))),
        }
    }
}

/// The single capability a table needs from its strategy.
pub trait HashKey {
    fn hash_key(&self, key: i64) -> u64;
}

/// A resolved strategy. Built from a [`HashKind`] via [`HashKind::build`].
#[derive(Clone, Debug)]
pub enum KeyHasher {
    Modulo,
    Default(DefaultHashBuilder),
    Mix64,
    Xxh64,
    Murmur3,
    Digest64(DigestAlgorithm),
}

impl KeyHasher {
    pub fn kind(&self) -> HashKind {
        match self {
            KeyHasher::Modulo => HashKind::Modulo,
            KeyHasher::Default(_) => HashKind::Default,
            KeyHasher::Mix64 => HashKind::Mix64,
            KeyHasher::Xxh64 => HashKind::Xxh64,
            KeyHasher::Murmur3 => HashKind::Murmur3,
            KeyHasher::Digest64(alg) => HashKind::Digest64(*alg),
        }
    }
}

impl HashKey for KeyHasher {
    #[inline]
    fn hash_key(&self, key: i64) -> u64 {
        match self {
            KeyHasher::Modulo => key as u64,
            KeyHasher::Default(state) => state.hash_one(key),
            KeyHasher::Mix64 => fnv1a_64(&key.to_be_bytes()),
            KeyHasher::Xxh64 => xxhash_rust::xxh64::xxh64(&key.to_be_bytes(), 0),
            KeyHasher::Murmur3 => murmur3_32(&key.to_be_bytes()),
            KeyHasher::Digest64(alg) => digest_64(*alg, &key.to_be_bytes()),
        }
    }
}

/// FNV-1a over `bytes`, wrapping at 64 bits after every multiply.
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// MurmurHash3 x86_32 over `bytes` with seed 0.
pub fn murmur3_32(bytes: &[u8]) -> u64 {
    // Reading from an in-memory cursor cannot fail.
    murmur3::murmur3_32(&mut Cursor::new(bytes), 0)
        .map(u64::from)
        .unwrap_or_default()
}

/// The last 8 digest bytes as a big-endian integer, i.e. the full digest
/// reduced mod 2^64. Masking this with `capacity - 1` picks the same slot as
/// reducing the whole 256-bit value.
pub fn digest_64(alg: DigestAlgorithm, bytes: &[u8]) -> u64 {
    let mut tail = [0u8; 8];
    match alg {
        DigestAlgorithm::Sha256 => tail.copy_from_slice(&Sha256::digest(bytes)[24..]),
        DigestAlgorithm::Blake3 => tail.copy_from_slice(&blake3::hash(bytes).as_bytes()[24..]),
    }
    u64::from_be_bytes(tail)
}

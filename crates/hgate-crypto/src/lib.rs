//! hgate-crypto: honey-encryption primitives
//!
//! Pipeline: message → DTE encode → XOR with truncated KDF digest → ciphertext
//!
//! The defining property is *totality*: decryption under ANY key produces a
//! member of the message space, never an error. Equality with the original
//! message is the only honest correctness signal, and nothing in this crate
//! exposes it to the party supplying the password.
//!
//! ```text
//! password ++ salt ──SHA-256──► key (low `bits` bits)
//!                                 │
//! message ──DTE.encode──► seed ──XOR──► ciphertext
//! ciphertext ──XOR──► seed' ──DTE.decode (total)──► some valid message
//! ```

pub mod dte;
pub mod honey;
pub mod kdf;

pub use dte::Dte;
pub use honey::{HoneyCipher, HoneyCiphertext};
pub use kdf::{derive_decoy_seed, generate_salt, hash_password, honey_kdf, verify_password, HashParams};

/// Size of a KDF digest in bytes (SHA-256)
pub const DIGEST_SIZE: usize = 32;

/// Width of the decoy seed in bytes (taken from the front of a digest)
pub const SEED_BYTES: usize = 8;

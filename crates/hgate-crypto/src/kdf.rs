//! Key derivation: SHA-256 honey KDF, Argon2id credential hashing, seed derivation

use argon2::{Algorithm, Argon2, Params, Version};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::{DIGEST_SIZE, SEED_BYTES};
use hgate_core::types::SALT_SIZE;

/// Argon2id parameters for credential hashing.
///
/// The honey-encryption KDF deliberately does NOT use these: it must be a
/// cheap, exactly reproducible digest (see [`honey_kdf`]).
#[derive(Debug, Clone)]
pub struct HashParams {
    /// Memory cost in KiB (default: 65536 = 64 MiB)
    pub mem_cost_kib: u32,
    /// Time cost / iterations (default: 3)
    pub time_cost: u32,
    /// Parallelism (default: 4)
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            mem_cost_kib: 65536,
            time_cost: 3,
            parallelism: 4,
        }
    }
}

/// Generate a fresh random per-user salt.
pub fn generate_salt() -> [u8; SALT_SIZE] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// The honey-encryption KDF: SHA-256 over the UTF-8 password bytes followed
/// by the raw salt bytes.
///
/// One-way and deterministic; both the honey-encryption primitive and the
/// decoy synthesizer rely on the determinism.
pub fn honey_kdf(password: &str, salt: &[u8; SALT_SIZE]) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt);
    hasher.finalize().into()
}

/// Hash a password for credential storage using Argon2id.
///
/// Returns the raw 256-bit output hex-encoded. The salt travels separately
/// in the credential record (it is also an input to seed derivation).
pub fn hash_password(
    password: &SecretString,
    salt: &[u8; SALT_SIZE],
    params: &HashParams,
) -> anyhow::Result<String> {
    let argon2_params = Params::new(
        params.mem_cost_kib,
        params.time_cost,
        params.parallelism,
        Some(DIGEST_SIZE),
    )
    .map_err(|e| anyhow::anyhow!("invalid Argon2id params: {e}"))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut out = [0u8; DIGEST_SIZE];
    argon2
        .hash_password_into(password.expose_secret().as_bytes(), salt, &mut out)
        .map_err(|e| anyhow::anyhow!("Argon2id hashing failed: {e}"))?;

    Ok(hgate_core::hex::encode(&out))
}

/// Test a login attempt against a stored credential hash.
pub fn verify_password(
    attempt: &SecretString,
    salt: &[u8; SALT_SIZE],
    stored_hash: &str,
    params: &HashParams,
) -> anyhow::Result<bool> {
    let computed = hash_password(attempt, salt, params)?;
    Ok(constant_time_eq(computed.as_bytes(), stored_hash.as_bytes()))
}

/// Derive the 64-bit decoy seed: the first 8 bytes, big-endian, of
/// SHA-256(username ++ password_attempt ++ salt).
///
/// The same wrong password must always reproduce the same decoy, and
/// different wrong passwords different decoys; both follow from this digest.
pub fn derive_decoy_seed(username: &str, password_attempt: &str, salt: &[u8; SALT_SIZE]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(password_attempt.as_bytes());
    hasher.update(salt);
    let digest = hasher.finalize();

    let mut bytes = [0u8; SEED_BYTES];
    bytes.copy_from_slice(&digest[..SEED_BYTES]);
    u64::from_be_bytes(bytes)
}

/// Length-checked constant-time byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

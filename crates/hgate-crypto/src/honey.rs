//! XOR honey encryption over a DTE seed space
//!
//! Decryption is total: a wrong password re-derives a different key, which
//! XORs out to a different seed, which still decodes to a valid message.
//! Nothing here ever reports "wrong key".

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::dte::Dte;
use crate::kdf::{generate_salt, honey_kdf};
use hgate_core::types::SALT_SIZE;
use hgate_core::HgateResult;

/// Ciphertext plus the salt it was produced with. The salt is not secret and
/// must travel with the ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoneyCiphertext {
    pub ciphertext: u64,
    #[serde(with = "hgate_core::types::salt_hex")]
    pub salt: [u8; SALT_SIZE],
}

/// Honey-encryption over a fixed message space.
#[derive(Debug, Clone)]
pub struct HoneyCipher<T> {
    dte: Dte<T>,
}

impl<T: Clone + PartialEq> HoneyCipher<T> {
    pub fn new(dte: Dte<T>) -> Self {
        Self { dte }
    }

    pub fn dte(&self) -> &Dte<T> {
        &self.dte
    }

    /// Encrypt a message under a password with a fresh random salt.
    ///
    /// Fails only on the `UnknownMessage` contract violation.
    pub fn encrypt(&self, message: &T, password: &SecretString) -> HgateResult<HoneyCiphertext> {
        let salt = generate_salt();
        let seed = self.dte.encode(message)?;
        let key = self.derive_key(password, &salt);
        Ok(HoneyCiphertext {
            ciphertext: seed ^ key,
            salt,
        })
    }

    /// Decrypt a ciphertext. Total: never fails, for any password.
    pub fn decrypt(&self, ciphertext: u64, password: &SecretString, salt: &[u8; SALT_SIZE]) -> &T {
        let key = self.derive_key(password, salt);
        let seed = (ciphertext ^ key) & self.mask();
        self.dte.decode(seed as i128)
    }

    /// Low `bits` bits of the KDF digest, interpreted big-endian.
    fn derive_key(&self, password: &SecretString, salt: &[u8; SALT_SIZE]) -> u64 {
        let mut digest = honey_kdf(password.expose_secret(), salt);
        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        digest.zeroize();
        u64::from_be_bytes(word) & self.mask()
    }

    fn mask(&self) -> u64 {
        match self.dte.bits() {
            0 => 0,
            b if b >= 64 => u64::MAX,
            b => (1u64 << b) - 1,
        }
    }
}

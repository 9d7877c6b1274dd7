pub mod config;
pub mod error;
pub mod hex;
pub mod types;

pub use error::{HgateError, HgateResult};
pub use types::{CardBrand, CredentialRecord, Identity, SALT_SIZE};

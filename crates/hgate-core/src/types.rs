use serde::{Deserialize, Serialize};

/// Size of a per-user salt in bytes
pub const SALT_SIZE: usize = 16;

/// Payment card brand, detected from the card number's issuer prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Jcb,
    /// Anything outside the recognized issuer ranges
    Other,
}

impl CardBrand {
    /// Detect the brand from a card number's leading digits (IIN ranges).
    pub fn detect(card_number: &str) -> CardBrand {
        let digits: String = card_number.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.starts_with('4') {
            return CardBrand::Visa;
        }
        if let Ok(p2) = digits.get(..2).unwrap_or("").parse::<u32>() {
            if (51..=55).contains(&p2) {
                return CardBrand::Mastercard;
            }
            if p2 == 34 || p2 == 37 {
                return CardBrand::Amex;
            }
            if p2 == 65 {
                return CardBrand::Discover;
            }
        }
        if let Ok(p4) = digits.get(..4).unwrap_or("").parse::<u32>() {
            if (2221..=2720).contains(&p4) {
                return CardBrand::Mastercard;
            }
            if p4 == 6011 {
                return CardBrand::Discover;
            }
            if (3528..=3589).contains(&p4) {
                return CardBrand::Jcb;
            }
        }
        CardBrand::Other
    }

    /// CVV length the brand uses (Amex is the 4-digit outlier).
    pub fn cvv_len(&self) -> usize {
        match self {
            CardBrand::Amex => 4,
            _ => 3,
        }
    }
}

/// A full identity profile.
///
/// The same shape is used for real identities and for synthesized decoys —
/// a consumer must not be able to tell them apart by schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub account_id: String,
    pub full_name: String,
    pub email: String,
    pub card_number: String,
    pub card_brand: CardBrand,
    pub cvv: String,
    /// "MM/YY"
    pub expiration_date: String,
    /// e.g. "1234.56 RON"
    pub balance: String,
}

/// One stored credential record per registered username.
///
/// `password_hash` is the only material ever used to test a login attempt;
/// the plaintext password is never stored. `salt` is generated once at
/// registration and is immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub username: String,
    #[serde(with = "salt_hex")]
    pub salt: [u8; SALT_SIZE],
    pub password_hash: String,
    pub real_identity: Identity,
}

/// Serde adapter: a 16-byte salt as a hex string (the on-disk and wire format).
pub mod salt_hex {
    use super::SALT_SIZE;
    use crate::hex;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(salt: &[u8; SALT_SIZE], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&hex::encode(salt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<[u8; SALT_SIZE], D::Error> {
        let s = String::deserialize(de)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|v: Vec<u8>| serde::de::Error::custom(format!("salt must be {SALT_SIZE} bytes, got {}", v.len())))
    }
}

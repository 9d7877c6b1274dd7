//! Distribution-Transforming Encoder
//!
//! Bijection between a finite, ordered message space and positions in
//! `[0, n)`, with a *total* inverse over all integers. Totality is the
//! security property: decoding a seed recovered with the wrong key must
//! yield some valid message, never an explicit "wrong key" error.

use hgate_core::{HgateError, HgateResult};

/// A DTE over an ordered message space.
#[derive(Debug, Clone)]
pub struct Dte<T> {
    messages: Vec<T>,
}

impl<T: Clone + PartialEq> Dte<T> {
    /// Build a DTE over the given message space. Order is significant: the
    /// position of a message IS its encoding.
    pub fn new(messages: Vec<T>) -> HgateResult<Self> {
        if messages.is_empty() {
            return Err(HgateError::Config("DTE message space must be non-empty".into()));
        }
        Ok(Self { messages })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Seed width: `ceil(log2(n))`. Callers size key material from this.
    pub fn bits(&self) -> u32 {
        let n = self.messages.len() as u64;
        if n <= 1 {
            0
        } else {
            64 - (n - 1).leading_zeros()
        }
    }

    /// Encode a message to its seed.
    ///
    /// Fails with `UnknownMessage` only when the message is not a member of
    /// the configured space — a programming-contract violation, not a
    /// runtime/user error.
    pub fn encode(&self, message: &T) -> HgateResult<u64> {
        self.messages
            .iter()
            .position(|m| m == message)
            .map(|i| i as u64)
            .ok_or(HgateError::UnknownMessage)
    }

    /// Decode a seed to a message. Total over all integers: negative and
    /// out-of-range seeds reduce onto `[0, n)` via Euclidean modulo.
    pub fn decode(&self, seed: i128) -> &T {
        let n = self.messages.len() as i128;
        let idx = seed.rem_euclid(n) as usize;
        &self.messages[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn space() -> Dte<String> {
        Dte::new(vec![
            "transfer approved".to_string(),
            "transfer declined".to_string(),
            "account frozen".to_string(),
            "limit exceeded".to_string(),
            "pending review".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_space_rejected() {
        assert!(Dte::<u8>::new(vec![]).is_err());
    }

    #[test]
    fn test_bits() {
        assert_eq!(Dte::new(vec![0u8]).unwrap().bits(), 0);
        assert_eq!(Dte::new(vec![0u8, 1]).unwrap().bits(), 1);
        assert_eq!(Dte::new((0u16..5).collect()).unwrap().bits(), 3);
        assert_eq!(Dte::new((0u16..256).collect()).unwrap().bits(), 8);
        assert_eq!(Dte::new((0u16..257).collect()).unwrap().bits(), 9);
    }

    #[test]
    fn test_roundtrip_every_message() {
        let dte = space();
        for i in 0..dte.len() {
            let m = dte.decode(i as i128).clone();
            let seed = dte.encode(&m).unwrap();
            assert_eq!(dte.decode(seed as i128), &m);
            assert_eq!(seed, i as u64);
        }
    }

    #[test]
    fn test_unknown_message_is_contract_error() {
        let dte = space();
        assert!(matches!(
            dte.encode(&"not in space".to_string()),
            Err(HgateError::UnknownMessage)
        ));
    }

    #[test]
    fn test_decode_negative_and_out_of_range() {
        let dte = space();
        // -1 ≡ n-1 (mod n)
        assert_eq!(dte.decode(-1), dte.decode(dte.len() as i128 - 1));
        assert_eq!(dte.decode(i128::MIN), dte.decode(i128::MIN.rem_euclid(5)));
        assert_eq!(dte.decode(u64::MAX as i128), dte.decode((u64::MAX % 5) as i128));
    }

    proptest! {
        /// Totality: any integer seed decodes to a member of the space.
        #[test]
        fn prop_decode_total(seed in any::<i128>()) {
            let dte = space();
            let m = dte.decode(seed);
            prop_assert!(dte.encode(m).is_ok());
        }

        /// Many-to-one reduction is stable modulo n.
        #[test]
        fn prop_decode_mod_stable(seed in any::<i64>()) {
            let dte = space();
            let n = dte.len() as i128;
            prop_assert_eq!(dte.decode(seed as i128), dte.decode(seed as i128 + n));
        }
    }
}

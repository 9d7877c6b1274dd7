//! Seed-deterministic identity synthesis
//!
//! `synthesize` must return a bit-identical `Identity` for identical
//! `(real, seed)` inputs. Every random draw goes through one locally
//! constructed `ChaCha8Rng`, in a fixed order; do not reorder draws without
//! a migration plan, since that silently changes every outstanding decoy.

use chrono::{Datelike, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hgate_core::config::DecoyConfig;
use hgate_core::{CardBrand, Identity};

use crate::content;

/// Brands a decoy may carry. Preserving an allow-listed real brand avoids a
/// telltale "brand never matches" signal; an unusual real brand is replaced
/// so the decoy does not leak it.
const PRESERVED_BRANDS: [CardBrand; 4] = [
    CardBrand::Visa,
    CardBrand::Mastercard,
    CardBrand::Discover,
    CardBrand::Jcb,
];

/// Tunable plausibility heuristics. Shape parity and determinism hold for
/// any policy values.
#[derive(Debug, Clone)]
pub struct DecoyPolicy {
    pub preserve_given_name: bool,
    /// Maximum distance in years between decoy and real expiry (min 2)
    pub expiry_jitter_years: i32,
    pub horizon_min_years: i32,
    pub horizon_max_years: i32,
}

impl Default for DecoyPolicy {
    fn default() -> Self {
        Self {
            preserve_given_name: true,
            expiry_jitter_years: 3,
            horizon_min_years: 3,
            horizon_max_years: 6,
        }
    }
}

impl From<&DecoyConfig> for DecoyPolicy {
    fn from(cfg: &DecoyConfig) -> Self {
        Self {
            preserve_given_name: cfg.preserve_given_name,
            expiry_jitter_years: cfg.expiry_jitter_years,
            horizon_min_years: cfg.horizon_min_years,
            horizon_max_years: cfg.horizon_max_years,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    policy: DecoyPolicy,
}

impl Synthesizer {
    pub fn new(policy: DecoyPolicy) -> Self {
        Self { policy }
    }

    /// Synthesize the decoy identity for this seed.
    pub fn synthesize(&self, real: &Identity, seed: u64) -> Identity {
        self.synthesize_at(real, seed, Utc::now().year())
    }

    /// Synthesis with an explicit current year, so the expiry window is
    /// testable without clock dependence.
    pub fn synthesize_at(&self, real: &Identity, seed: u64, now_year: i32) -> Identity {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let given = self.pick_given_name(real, &mut rng);
        let family = content::family_name(&mut rng);
        let full_name = format!("{given} {family}");

        let email = format!(
            "{}.{}@{}",
            content::email_local(&given),
            content::email_local(family),
            content::email_domain(&mut rng)
        );

        let brand = if PRESERVED_BRANDS.contains(&real.card_brand) {
            real.card_brand
        } else {
            *PRESERVED_BRANDS.choose(&mut rng).unwrap_or(&CardBrand::Mastercard)
        };

        let card_number = content::card_number(brand, &mut rng);
        let cvv = content::cvv(brand, &mut rng);
        let expiration_date = self.expiry(&real.expiration_date, now_year, &mut rng);
        let balance = content::balance(&mut rng);
        let account_id = content::account_id(&mut rng);

        Identity {
            account_id,
            full_name,
            email,
            card_number,
            card_brand: brand,
            cvv,
            expiration_date,
            balance,
        }
    }

    fn pick_given_name(&self, real: &Identity, rng: &mut ChaCha8Rng) -> String {
        if self.policy.preserve_given_name {
            if let Some(first) = real.full_name.split_whitespace().next() {
                return first.to_string();
            }
        }
        content::given_name(rng).to_string()
    }

    /// Anchor near the real expiry (never the exact value); fall back to a
    /// "now + horizon" window when the real record has no usable expiry.
    fn expiry(&self, real_expiry: &str, now_year: i32, rng: &mut ChaCha8Rng) -> String {
        let mut month: u32 = rng.gen_range(1..=12);

        let year = match parse_expiry(real_expiry) {
            Some((real_month, real_year)) => {
                let jitter = self.policy.expiry_jitter_years.max(2);
                let magnitude = rng.gen_range(2..=jitter);
                let anchored = if rng.gen_bool(0.5) {
                    real_year + magnitude
                } else {
                    real_year - magnitude
                };
                // An already-expired card would be its own telltale.
                let year = if anchored <= now_year {
                    now_year + rng.gen_range(1..=3)
                } else {
                    anchored
                };
                if (month, year) == (real_month, real_year) {
                    month = month % 12 + 1;
                }
                year
            }
            None => {
                let lo = self.policy.horizon_min_years;
                let hi = self.policy.horizon_max_years.max(lo);
                now_year + rng.gen_range(lo..=hi)
            }
        };

        format!("{month:02}/{:02}", year.rem_euclid(100))
    }
}

/// Parse "MM/YY" into (month, full year). Anything malformed is `None`.
fn parse_expiry(s: &str) -> Option<(u32, i32)> {
    let (m, y) = s.trim().split_once('/')?;
    let month: u32 = m.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    let yy: i32 = y.parse().ok()?;
    if !(0..=99).contains(&yy) {
        return None;
    }
    Some((month, 2000 + yy))
}

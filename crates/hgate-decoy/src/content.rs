//! Decoy content provider: plausible names, card numbers, balances
//!
//! Everything here draws from the caller's RNG and nothing else, so output
//! is fully determined by the seed the synthesizer was given.

use rand::seq::SliceRandom;
use rand::Rng;

use hgate_core::CardBrand;

pub const GIVEN_NAMES: &[&str] = &[
    "Andrei", "Maria", "Ioana", "Stefan", "Elena", "Mihai", "Ana", "Radu",
    "Cristina", "Vlad", "Laura", "Daniel", "Alina", "George", "Diana", "Paul",
    "Sofia", "Victor", "Irina", "Adrian", "Bianca", "Florin", "Carmen", "Tudor",
];

pub const FAMILY_NAMES: &[&str] = &[
    "Popescu", "Ionescu", "Popa", "Stan", "Dumitru", "Gheorghe", "Stoica",
    "Constantin", "Marin", "Serban", "Dobre", "Barbu", "Nistor", "Florea",
    "Petrescu", "Manole", "Iliescu", "Vasile", "Tomescu", "Enache", "Radulescu",
    "Munteanu", "Craciun", "Lazar", "Moldovan", "Rusu", "Matei", "Toma",
    "Preda", "Olteanu", "Diaconu", "Neagu", "Pavel", "Sava", "Voicu", "Lungu",
];

pub const FREE_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com", "yahoo.com", "outlook.com", "hotmail.com", "proton.me", "mail.com",
];

const BALANCE_CURRENCY: &str = "RON";

pub fn given_name(rng: &mut impl Rng) -> &'static str {
    GIVEN_NAMES.choose(rng).copied().unwrap_or("Alex")
}

pub fn family_name(rng: &mut impl Rng) -> &'static str {
    FAMILY_NAMES.choose(rng).copied().unwrap_or("Popescu")
}

pub fn email_domain(rng: &mut impl Rng) -> &'static str {
    FREE_EMAIL_DOMAINS.choose(rng).copied().unwrap_or("gmail.com")
}

/// Lowercased, stripped to ASCII alphanumerics for an email local part.
pub fn email_local(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// A balance string in the same format real records use, e.g. "8412.37 RON".
pub fn balance(rng: &mut impl Rng) -> String {
    let whole: u32 = rng.gen_range(50..=15000);
    let cents: u32 = rng.gen_range(10..=99);
    format!("{whole}.{cents} {BALANCE_CURRENCY}")
}

/// A UUID-shaped account identifier built from RNG bytes, so it is
/// reproducible from the seed (unlike `Uuid::new_v4`).
pub fn account_id(rng: &mut impl Rng) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
}

/// A Luhn-valid card number carrying the brand's issuer prefix.
pub fn card_number(brand: CardBrand, rng: &mut impl Rng) -> String {
    let (prefix, total_len) = match brand {
        CardBrand::Visa => ("4".to_string(), 16),
        CardBrand::Mastercard | CardBrand::Other => {
            (format!("5{}", rng.gen_range(1..=5)), 16)
        }
        CardBrand::Amex => {
            (if rng.gen_bool(0.5) { "34" } else { "37" }.to_string(), 15)
        }
        CardBrand::Discover => ("6011".to_string(), 16),
        CardBrand::Jcb => (format!("{}", rng.gen_range(3528..=3589)), 16),
    };

    let mut digits = prefix;
    while digits.len() < total_len - 1 {
        digits.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }
    let check = luhn_check_digit(&digits);
    digits.push(char::from(b'0' + check as u8));
    digits
}

/// A CVV of the length the brand uses.
pub fn cvv(brand: CardBrand, rng: &mut impl Rng) -> String {
    (0..brand.cvv_len())
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Check digit that makes `payload ++ digit` pass the Luhn checksum.
fn luhn_check_digit(payload: &str) -> u32 {
    let mut sum = 0;
    for (i, c) in payload.chars().rev().enumerate() {
        let mut d = c.to_digit(10).unwrap_or(0);
        // Positions counted from the check digit: the payload's rightmost
        // digit is doubled.
        if i % 2 == 0 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    (10 - (sum % 10)) % 10
}

/// Full Luhn validation of a complete card number.
pub fn luhn_valid(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 2 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

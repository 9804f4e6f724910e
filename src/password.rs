use std::collections::HashSet;

use crate::credential::{InvalidReason, PasswordCheck};

/// Values shorter than this are rejected; four characters still admits PINs.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Flag blank, very short, and single-character-repeated passwords.
///
/// This is a hygiene check only; it does not score strength.
pub fn validate(password: Option<&str>) -> PasswordCheck {
    let pw = password.unwrap_or("").trim();
    if pw.is_empty() {
        return PasswordCheck::Invalid(InvalidReason::Blank);
    }
    if pw.chars().count() < MIN_PASSWORD_LEN {
        return PasswordCheck::Invalid(InvalidReason::TooShort);
    }
    let distinct: HashSet<char> = pw.chars().collect();
    if distinct.len() == 1 {
        return PasswordCheck::Invalid(InvalidReason::SameCharacter);
    }
    PasswordCheck::Valid
}

//! Indian mobile numbers as accepted by the SMS gateway.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::DomainError;

/// A normalised 10-digit mobile number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalises user input: separators are dropped and a `+91`, `91` or
    /// `0` trunk prefix is stripped. What remains must be exactly 10 digits
    /// starting with 6-9.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let mut digits = String::with_capacity(input.len());
        for (i, c) in input.trim().chars().enumerate() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '(' | ')' => {}
                '+' if i == 0 => {}
                _ => return Err(DomainError::InvalidPhone(input.to_string())),
            }
        }

        let national = match digits.len() {
            12 if digits.starts_with("91") => &digits[2..],
            11 if digits.starts_with('0') => &digits[1..],
            _ => digits.as_str(),
        };

        let valid = national.len() == 10 && matches!(national.as_bytes()[0], b'6'..=b'9');
        if !valid {
            return Err(DomainError::InvalidPhone(input.to_string()));
        }

        Ok(Self(national.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

//! IČO (Czech organization identification number) normalization and checksum.

use std::fmt;
use std::str::FromStr;

use super::AresError;

/// Number of digits in a normalized IČO.
pub const ICO_LEN: usize = 8;

/// A validated, zero-padded 8-digit IČO.
///
/// The only way to obtain one is through [`Ico::parse`], so holding an `Ico`
/// means the checksum has already been verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ico(String);

impl Ico {
    /// Strip spaces, left-pad with zeros to 8 characters and verify the checksum.
    ///
    /// ```
    /// use ares::core::Ico;
    ///
    /// assert_eq!(Ico::parse("25 596 641").unwrap().as_str(), "25596641");
    /// assert!(Ico::parse("25596642").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, AresError> {
        let padded = normalize_ico(raw);
        if is_valid_ico(&padded) {
            Ok(Self(padded))
        } else {
            Err(AresError::InvalidIdentifier(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ico {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ico {
    type Err = AresError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Ico {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Remove all spaces and left-pad with `'0'` to [`ICO_LEN`] characters.
///
/// Longer input is returned unchanged (and later rejected by the checksum).
pub fn normalize_ico(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| *c != ' ').collect();
    format!("{:0>width$}", compact, width = ICO_LEN)
}

/// Check an already padded IČO: exactly 8 ASCII digits with a valid check digit.
///
/// The first seven digits are weighted 8 down to 2, summed and reduced mod 11.
/// A remainder of 0 expects check digit 1, a remainder of 1 expects 0, anything
/// else expects `11 - remainder`.
pub fn is_valid_ico(ico: &str) -> bool {
    let bytes = ico.as_bytes();
    if bytes.len() != ICO_LEN || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let sum: u32 = bytes[..ICO_LEN - 1]
        .iter()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') * (ICO_LEN - i) as u32)
        .sum();

    let expected = match sum % 11 {
        0 => 1,
        1 => 0,
        a => 11 - a,
    };

    u32::from(bytes[ICO_LEN - 1] - b'0') == expected
}

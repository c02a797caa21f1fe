//! Fallback parser for the registry's single-line text address.

use std::sync::LazyLock;

use regex::Regex;

use super::Company;

/// `<street> <house>[/<orientation>] <zip> , <city>`, anchored at the line start.
static TEXT_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([\p{L}\s]+)([0-9]+)/?([0-9]*)\s([0-9]{3}\s?[0-9]{2})\s?,\s?(\p{L}+)")
        .expect("text address pattern is valid")
});

/// Address components extracted from a free-text address line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAddress {
    pub street: String,
    pub house_number: String,
    pub orientation_number: String,
    /// Postal code with the inner space removed.
    pub postal_code: String,
    pub city: String,
}

/// Parse a line such as `"Hlavní 12/3 110 00, Praha"`.
///
/// Returns `None` when the line does not match the pattern.
pub fn parse_text_address(line: &str) -> Option<TextAddress> {
    let caps = TEXT_ADDRESS.captures(line)?;
    let group = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");

    Some(TextAddress {
        street: group(1).trim().to_string(),
        house_number: group(2).trim().to_string(),
        orientation_number: group(3).trim().to_string(),
        postal_code: group(4).replace(' ', ""),
        city: group(5).trim().to_string(),
    })
}

impl TextAddress {
    /// Copy each component into `company` only where the field is still empty.
    pub fn fill_missing(self, company: &mut Company) {
        fill(&mut company.street, self.street);
        fill(&mut company.house_number, self.house_number);
        fill(&mut company.orientation_number, self.orientation_number);
        fill(&mut company.postal_code, self.postal_code);
        fill(&mut company.city, self.city);
    }
}

fn fill(field: &mut String, value: String) {
    if field.is_empty() {
        *field = value;
    }
}

/// Parse `line` and backfill empty address fields of `company`.
///
/// A line that does not match leaves the company untouched. Returns whether
/// the line matched.
pub fn apply_text_address(company: &mut Company, line: &str) -> bool {
    match parse_text_address(line) {
        Some(address) => {
            address.fill_missing(company);
            true
        }
        None => {
            tracing::warn!(address = line, "text address did not match the expected pattern");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Ico;

    fn company() -> Company {
        Company::new(Ico::parse("25596641").unwrap())
    }

    #[test]
    fn full_address_with_orientation_number() {
        let a = parse_text_address("Hlavní 12/3 110 00, Praha").unwrap();
        assert_eq!(a.street, "Hlavní");
        assert_eq!(a.house_number, "12");
        assert_eq!(a.orientation_number, "3");
        assert_eq!(a.postal_code, "11000");
        assert_eq!(a.city, "Praha");
    }

    #[test]
    fn without_orientation_number() {
        let a = parse_text_address("Na Příkopě 390 11000,Praha").unwrap();
        assert_eq!(a.street, "Na Příkopě");
        assert_eq!(a.house_number, "390");
        assert_eq!(a.orientation_number, "");
        assert_eq!(a.postal_code, "11000");
        assert_eq!(a.city, "Praha");
    }

    #[test]
    fn multi_digit_orientation_number() {
        let a = parse_text_address("Vinohradská 1511/230 100 00, Praha").unwrap();
        assert_eq!(a.house_number, "1511");
        assert_eq!(a.orientation_number, "230");
    }

    #[test]
    fn no_match_is_none() {
        assert!(parse_text_address("").is_none());
        assert!(parse_text_address("P.O. Box 12, Praha").is_none());
        assert!(parse_text_address("Hlavní 12 1100, Praha").is_none());
    }

    #[test]
    fn fills_only_empty_fields() {
        let mut c = company();
        c.street = "Dlouhá".into();
        c.postal_code = "60200".into();

        assert!(apply_text_address(&mut c, "Hlavní 12/3 110 00, Praha"));

        assert_eq!(c.street, "Dlouhá");
        assert_eq!(c.postal_code, "60200");
        assert_eq!(c.house_number, "12");
        assert_eq!(c.orientation_number, "3");
        assert_eq!(c.city, "Praha");
    }

    #[test]
    fn unmatched_line_leaves_company_untouched() {
        let mut c = company();
        assert!(!apply_text_address(&mut c, "nowhere"));
        assert_eq!(c, company());
    }
}

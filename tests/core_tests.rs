//! Property-based tests for IČO validation, name wrapping and record layout.
//!
//! Run with: `cargo test --test core_tests`

#![cfg(feature = "core")]

use ares::core::*;
use proptest::prelude::*;

fn company(name: &str) -> Company {
    let mut c = Company::new(Ico::parse("25596641").unwrap());
    c.name = name.into();
    c
}

fn check_digit(prefix: &str) -> u32 {
    let sum: u32 = prefix
        .bytes()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') * (8 - i as u32))
        .sum();
    match sum % 11 {
        0 => 1,
        1 => 0,
        a => 11 - a,
    }
}

// --- Checksum ---

proptest! {
    /// Every 7-digit prefix has exactly one accepted check digit.
    #[test]
    fn exactly_one_check_digit(prefix in "[0-9]{7}") {
        let accepted: Vec<u32> = (0..10)
            .filter(|d| is_valid_ico(&format!("{prefix}{d}")))
            .collect();
        prop_assert_eq!(accepted, vec![check_digit(&prefix)]);
    }

    /// Parsing pads, strips spaces and agrees with the checksum law.
    #[test]
    fn parse_agrees_with_checksum(digits in "[0-9]{1,8}") {
        let padded = format!("{digits:0>8}");
        let spaced: String = digits.chars().flat_map(|c| [c, ' ']).collect();
        match Ico::parse(&spaced) {
            Ok(ico) => {
                prop_assert_eq!(ico.as_str(), padded.as_str());
                prop_assert!(is_valid_ico(&padded));
            }
            Err(AresError::InvalidIdentifier(_)) => prop_assert!(!is_valid_ico(&padded)),
            Err(e) => prop_assert!(false, "unexpected error {e}"),
        }
    }

    #[test]
    fn non_digit_rejected(raw in "[0-9]{0,4}[A-Za-z./-][0-9]{0,3}") {
        prop_assert!(Ico::parse(&raw).is_err());
    }

    #[test]
    fn too_long_rejected(raw in "[0-9]{9,12}") {
        prop_assert!(Ico::parse(&raw).is_err());
    }
}

// --- Name wrapping ---

proptest! {
    #[test]
    fn first_line_fits_and_nothing_is_lost(name in "[A-Za-zÁČĎÉĚÍŇÓŘŠŤÚŮÝŽáčďéěíňóřšťúůýž .,&-]{0,90}") {
        let c = company(&name);
        let (line1, line2) = c.name_lines();

        prop_assert!(line1.chars().count() <= NAME_LINE_WIDTH);
        prop_assert!(name.starts_with(line1));
        prop_assert_eq!(name[line1.len()..].trim_start(), line2);

        if name.chars().count() <= NAME_LINE_WIDTH {
            prop_assert_eq!(line1, name.as_str());
            prop_assert_eq!(line2, "");
        }
    }

    #[test]
    fn break_falls_on_space_when_one_exists(
        words in prop::collection::vec("[a-z]{1,12}", 2..10)
    ) {
        let name = words.join(" ");
        prop_assume!(name.chars().count() > NAME_LINE_WIDTH);
        let c = company(&name);
        let (line1, _) = c.name_lines();

        if name[..NAME_LINE_WIDTH].contains(' ') {
            prop_assert!(name[line1.len()..].starts_with(' '));
        } else {
            prop_assert_eq!(line1.len(), NAME_LINE_WIDTH);
        }
    }
}

#[test]
fn forty_one_letters_wrap_at_width() {
    let c = company(&"A".repeat(41));
    assert_eq!(c.name_line1().len(), 35);
    assert_eq!(c.name_line2().len(), 6);
}

// --- Text address ---

proptest! {
    #[test]
    fn text_address_components_recovered(
        street in "[A-ZČŘŠŽ][a-zíáéůčřšž]{2,10}( [A-Z][a-z]{2,8})?",
        house in 1u32..10000,
        orientation in proptest::option::of(1u32..300),
        zip in 10000u32..80000,
        spaced_zip in any::<bool>(),
        city in "[A-ZČŘŠŽ][a-zíáéůčřšž]{2,12}",
    ) {
        let number = match orientation {
            Some(o) => format!("{house}/{o}"),
            None => house.to_string(),
        };
        let zip = zip.to_string();
        let zip_text = if spaced_zip { format!("{} {}", &zip[..3], &zip[3..]) } else { zip.clone() };
        let line = format!("{street} {number} {zip_text}, {city}");

        let parsed = parse_text_address(&line).unwrap();
        prop_assert_eq!(parsed.street, street);
        prop_assert_eq!(parsed.house_number, house.to_string());
        prop_assert_eq!(parsed.orientation_number, orientation.map(|o| o.to_string()).unwrap_or_default());
        prop_assert_eq!(parsed.postal_code, zip);
        prop_assert_eq!(parsed.city, city);
    }
}

// --- Diacritics ---

proptest! {
    #[test]
    fn stripping_is_idempotent(text in "[\\p{Latin}\\p{Greek} ,.]{0,40}") {
        let once = remove_diacritics(&text);
        prop_assert_eq!(remove_diacritics(&once), once);
    }
}

#[test]
fn search_key_for_czech_name() {
    assert_eq!(
        remove_diacritics("Stavební a obchodní společnost Horní Dolní s.r.o."),
        "Stavebni a obchodni spolecnost Horni Dolni s.r.o."
    );
}

// --- Record layout ---

proptest! {
    #[test]
    fn always_ten_fields(
        name in "[A-Za-z ]{0,80}",
        city in "[A-Za-z]{0,20}",
        vat_id in "[0-9]{0,10}",
        status in prop_oneof![
            Just(TaxpayerStatus::Reliable),
            Just(TaxpayerStatus::Unreliable),
            Just(TaxpayerStatus::NotATaxpayer),
        ],
    ) {
        let mut c = company(&name);
        c.city = city;
        c.vat_id = vat_id;
        c.taxpayer_status = status;

        let text = record::render(&c, &OutputFormat::semicolon());
        prop_assert_eq!(text.matches(';').count(), FIELD_COUNT - 1);

        let lines = record::render(&c, &OutputFormat::default());
        prop_assert_eq!(lines.matches("\r\n").count(), FIELD_COUNT);

        let fields = record::fields(&c);
        if status == TaxpayerStatus::NotATaxpayer {
            prop_assert_eq!(fields[7].as_str(), "");
            prop_assert_eq!(fields[8].as_str(), "");
        } else {
            prop_assert_eq!(fields[7].as_str(), "CZ");
            prop_assert_eq!(fields[8].as_str(), c.vat_id.as_str());
        }
        prop_assert_eq!(fields[9].as_str(), status.label());
    }
}

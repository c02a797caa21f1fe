//! ARES standard record (`darv_std`) parsing.

use chrono::NaiveDate;

use super::xml::XmlDocument;
use crate::core::{AresError, Company, apply_text_address};

/// Prefix of the ARES answer namespace.
pub const ARE: &str = "are";
/// Prefix of the ARES datatypes namespace.
pub const DTT: &str = "dtt";

/// Name recorded for an IČO the registry does not know.
pub const NOT_FOUND_NAME: &str = "Not found";

/// Whether the registry had a record for the IČO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryLookup {
    Found,
    NotFound,
}

/// Fill `company` from a registry response.
///
/// A record count of zero is a normal outcome: the name is set to
/// [`NOT_FOUND_NAME`] and [`RegistryLookup::NotFound`] returned. More than one
/// record is [`AresError::AmbiguousResult`]. Every other field is optional.
pub fn apply_registry_record(
    doc: &XmlDocument,
    company: &mut Company,
) -> Result<RegistryLookup, AresError> {
    let count_text = doc
        .find_text(ARE, "Pocet_zaznamu")?
        .ok_or_else(|| AresError::Xml("registry response has no Pocet_zaznamu".into()))?;
    let count: u64 = count_text.trim().parse().map_err(|_| {
        AresError::Xml(format!("invalid record count '{}'", count_text.trim()))
    })?;

    match count {
        0 => {
            tracing::warn!(ico = %company.ico(), "company not found in registry");
            company.name = NOT_FOUND_NAME.to_string();
            return Ok(RegistryLookup::NotFound);
        }
        1 => {}
        n => return Err(AresError::AmbiguousResult(n)),
    }

    if let Some(text) = doc.find_text(ARE, "Datum_vzniku")? {
        company.created = parse_registry_date(&text);
        if company.created.is_none() {
            tracing::warn!(date = %text, "unparsable registration date");
        }
    }

    let set = |prefix: &str, name: &str, field: &mut String| -> Result<(), AresError> {
        if let Some(text) = doc.find_text(prefix, name)? {
            *field = text;
        }
        Ok(())
    };

    set(ARE, "Obchodni_firma", &mut company.name)?;
    set(DTT, "Nazev_obce", &mut company.city)?;
    set(DTT, "Nazev_ulice", &mut company.street)?;
    set(DTT, "Cislo_domovni", &mut company.house_number)?;
    set(DTT, "Cislo_orientacni", &mut company.orientation_number)?;
    // Cislo_do_adresy replaces Cislo_domovni whenever both are present.
    set(DTT, "Cislo_do_adresy", &mut company.house_number)?;
    set(DTT, "PSC", &mut company.postal_code)?;

    if let Some(text) = doc.find_text(DTT, "Adresa_textem")? {
        apply_text_address(company, &text);
    }

    tracing::debug!(name = %company.name, city = %company.city, "registry record parsed");
    Ok(RegistryLookup::Found)
}

/// Parse a `YYYY-MM-DD` registry date; anything else yields `None`.
fn parse_registry_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().splitn(3, '-');
    let year = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let day = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

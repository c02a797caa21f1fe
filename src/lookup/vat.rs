//! ARES VAT listing (`ares_es`) parsing.

use super::registry::DTT;
use super::xml::XmlDocument;
use crate::core::{AresError, Ico};

const DIC_PREFIX: &str = "dic=";

/// Find the DIČ of `ico` in a VAT listing searched by company name.
///
/// The listing can contain several companies with similar names, so entries
/// are matched on their IČO. An entry for `ico` without a VAT field is
/// skipped. Returns `None` when no entry yields a VAT id.
pub fn find_vat_id(doc: &XmlDocument, ico: &Ico) -> Result<Option<String>, AresError> {
    let entries = doc.find_all(DTT, "S")?;
    let ns = doc.namespace(DTT).unwrap_or_default();
    for entry in entries {
        let Some(entry_ico) = entry.find_ns(ns, "ico") else {
            continue;
        };
        if entry_ico.text().trim() != ico.as_str() {
            continue;
        }
        if let Some(vat) = entry.find_ns(ns, "p_dph") {
            let text = vat.text();
            let vat_id = text.trim();
            let vat_id = vat_id.strip_prefix(DIC_PREFIX).unwrap_or(vat_id);
            tracing::debug!(%ico, vat_id, "VAT id found");
            return Ok(Some(vat_id.to_string()));
        }
    }

    tracing::warn!(%ico, "VAT id not found");
    Ok(None)
}

//! Reliable VAT payer status (`getStatusNespolehlivyPlatce`) request and response.

use super::xml::{XmlDocument, XmlWriter};
use crate::core::{AresError, TaxpayerStatus};

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
/// Namespace of the tax authority's CRPDPH interface.
pub const CRPDPH_NS: &str = "http://adis.mfcr.cz/rozhraniCRPDPH/";
/// SOAP action of the status operation.
pub const STATUS_ACTION: &str = "getStatusNespolehlivyPlatce";

/// Build the SOAP request asking for the status of `vat_id`.
pub fn status_request_envelope(vat_id: &str) -> Result<String, AresError> {
    let mut w = XmlWriter::new()?;
    w.start_element_with_attrs("soapenv:Envelope", &[("xmlns:soapenv", SOAP_ENV_NS)])?;
    w.start_element("soapenv:Body")?;
    w.start_element_with_attrs("StatusNespolehlivyPlatceRequest", &[("xmlns", CRPDPH_NS)])?;
    w.text_element("dic", vat_id)?;
    w.end_element("StatusNespolehlivyPlatceRequest")?;
    w.end_element("soapenv:Body")?;
    w.end_element("soapenv:Envelope")?;
    w.into_string()
}

/// Read the payer status from a status response.
///
/// The first `statusPlatceDPH` element in any namespace is used; a missing
/// element or attribute means the DIČ is not a VAT payer.
pub fn parse_taxpayer_status(doc: &XmlDocument) -> TaxpayerStatus {
    let flag = doc
        .find_local("statusPlatceDPH")
        .and_then(|e| e.attribute("nespolehlivyPlatce"));
    tracing::info!(result = flag.unwrap_or("NENALEZEN"), "taxpayer status result");
    flag.map(TaxpayerStatus::from_unreliable_flag)
        .unwrap_or_default()
}

//! The sequential lookup: registry record, VAT listing, taxpayer status.

use serde::{Deserialize, Serialize};

use super::fetch::{Fetch, Request};
use super::registry::{RegistryLookup, apply_registry_record};
use super::taxpayer::parse_taxpayer_status;
use super::vat::find_vat_id;
use super::xml::XmlDocument;
use crate::core::{AresError, Company, Ico, TaxpayerStatus, remove_diacritics};

/// Which optional stages run after the registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Look up the DIČ in the VAT listing.
    pub vat_lookup: bool,
    /// Ask the tax authority for the reliable-payer status.
    pub taxpayer_status: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            vat_lookup: true,
            taxpayer_status: true,
        }
    }
}

/// Runs one lookup against a [`Fetch`] implementation.
pub struct Pipeline<F> {
    fetcher: F,
    config: PipelineConfig,
}

impl<F: Fetch> Pipeline<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, PipelineConfig::default())
    }

    pub fn with_config(fetcher: F, config: PipelineConfig) -> Self {
        Self { fetcher, config }
    }

    /// Validate `raw_ico` and assemble the company record.
    ///
    /// The IČO is validated before any request is made. An IČO unknown to the
    /// registry yields a record named [`NOT_FOUND_NAME`](super::NOT_FOUND_NAME)
    /// without running the later stages.
    pub fn lookup(&self, raw_ico: &str) -> Result<Company, AresError> {
        let ico = Ico::parse(raw_ico)?;
        tracing::info!(%ico, "looking up company");
        let mut company = Company::new(ico.clone());

        let registry = self.fetch_document(&Request::Registry { ico })?;
        if apply_registry_record(&registry, &mut company)? == RegistryLookup::NotFound {
            return Ok(company);
        }

        if self.config.vat_lookup {
            company.vat_id = self.vat_id(&company, &registry)?.unwrap_or_default();
        }

        if self.config.taxpayer_status {
            company.taxpayer_status = self.taxpayer_status(&company.vat_id)?;
        }

        Ok(company)
    }

    fn vat_id(&self, company: &Company, registry: &XmlDocument) -> Result<Option<String>, AresError> {
        let name = remove_diacritics(&company.name);
        tracing::debug!(search = %name, "VAT listing search key");
        let mut listing = self.fetch_document(&Request::VatListing { name })?;
        listing.inherit_bindings(registry);
        find_vat_id(&listing, company.ico())
    }

    /// Status of `vat_id`; an empty id is answered without a request.
    pub fn taxpayer_status(&self, vat_id: &str) -> Result<TaxpayerStatus, AresError> {
        if vat_id.is_empty() {
            return Ok(TaxpayerStatus::NotATaxpayer);
        }
        let doc = self.fetch_document(&Request::TaxpayerStatus {
            vat_id: vat_id.to_string(),
        })?;
        Ok(parse_taxpayer_status(&doc))
    }

    fn fetch_document(&self, request: &Request) -> Result<XmlDocument, AresError> {
        let body = self.fetcher.fetch(request)?;
        if body.trim().is_empty() {
            return Err(AresError::EmptyResponse(request.service().to_string()));
        }
        XmlDocument::parse(&body)
    }
}

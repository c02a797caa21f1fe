//! Blocking HTTP transport for the three services.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::fetch::{Fetch, Request};
use super::taxpayer::{STATUS_ACTION, status_request_envelope};
use crate::core::AresError;

pub const REGISTRY_URL: &str = "https://wwwinfo.mfcr.cz/cgi-bin/ares/darv_std.cgi";
pub const VAT_LISTING_URL: &str = "https://wwwinfo.mfcr.cz/cgi-bin/ares/ares_es.cgi";
pub const TAXPAYER_STATUS_URL: &str =
    "http://adisrws.mfcr.cz/adistc/axis2/services/rozhraniCRPDPH.rozhraniCRPDPHSOAP";

/// Service locations and request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub registry_url: String,
    /// Query parameter carrying the IČO.
    pub registry_param: String,
    pub vat_listing_url: String,
    /// Query parameter carrying the company name.
    pub vat_listing_param: String,
    pub taxpayer_status_url: String,
    pub soap_action: String,
    pub timeout_secs: u64,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            registry_url: REGISTRY_URL.into(),
            registry_param: "ico".into(),
            vat_listing_url: VAT_LISTING_URL.into(),
            vat_listing_param: "obch_jm".into(),
            taxpayer_status_url: TAXPAYER_STATUS_URL.into(),
            soap_action: STATUS_ACTION.into(),
            timeout_secs: 30,
        }
    }
}

impl Endpoints {
    /// URL of a `GET` request, or `None` for the SOAP status request.
    pub fn query_url(&self, request: &Request) -> Result<Option<Url>, AresError> {
        let (base, param, value) = match request {
            Request::Registry { ico } => (&self.registry_url, &self.registry_param, ico.as_str()),
            Request::VatListing { name } => {
                (&self.vat_listing_url, &self.vat_listing_param, name.as_str())
            }
            Request::TaxpayerStatus { .. } => return Ok(None),
        };
        Url::parse_with_params(base, &[(param.as_str(), value)])
            .map(Some)
            .map_err(|e| AresError::Config(format!("invalid URL '{base}': {e}")))
    }
}

/// [`Fetch`] over HTTP.
pub struct HttpFetcher {
    client: Client,
    endpoints: Endpoints,
}

impl HttpFetcher {
    pub fn new(endpoints: Endpoints) -> Result<Self, AresError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(endpoints.timeout_secs))
            .build()
            .map_err(|e| AresError::Network(e.to_string()))?;
        Ok(Self { client, endpoints })
    }

    fn get(&self, url: Url) -> Result<String, AresError> {
        tracing::info!(uri = %url, "making request");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AresError::Network(e.to_string()))?;
        read_body(resp)
    }

    fn post_status(&self, vat_id: &str) -> Result<String, AresError> {
        tracing::info!(uri = %self.endpoints.taxpayer_status_url, "making request to tax authority");
        let envelope = status_request_envelope(vat_id)?;
        let resp = self
            .client
            .post(&self.endpoints.taxpayer_status_url)
            .header("SOAPAction", &self.endpoints.soap_action)
            .header(CONTENT_TYPE, r#"text/xml;charset="utf-8""#)
            .header(ACCEPT, "text/xml")
            .body(envelope)
            .send()
            .map_err(|e| AresError::Network(e.to_string()))?;
        read_body(resp)
    }
}

fn read_body(resp: reqwest::blocking::Response) -> Result<String, AresError> {
    let status = resp.status();
    let body = resp
        .text()
        .map_err(|e| AresError::Network(e.to_string()))?;
    if !status.is_success() {
        return Err(AresError::Network(format!("HTTP {status}: {body}")));
    }
    Ok(body)
}

impl Fetch for HttpFetcher {
    fn fetch(&self, request: &Request) -> Result<String, AresError> {
        match self.endpoints.query_url(request)? {
            Some(url) => self.get(url),
            None => match request {
                Request::TaxpayerStatus { vat_id } => self.post_status(vat_id),
                _ => Err(AresError::Config(format!(
                    "no URL for {} request",
                    request.service()
                ))),
            },
        }
    }
}

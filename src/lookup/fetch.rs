//! The seam between the lookup pipeline and its three remote services.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{AresError, Ico};

/// The three remote services a lookup talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    /// ARES standard record by IČO.
    Registry,
    /// ARES VAT listing searched by company name.
    VatListing,
    /// Tax authority reliable-payer status by DIČ.
    TaxpayerStatus,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Registry => "registry",
            Self::VatListing => "VAT listing",
            Self::TaxpayerStatus => "taxpayer status",
        })
    }
}

/// One remote call with its parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Registry { ico: Ico },
    /// `name` is already stripped of diacritics.
    VatListing { name: String },
    TaxpayerStatus { vat_id: String },
}

impl Request {
    pub fn service(&self) -> Service {
        match self {
            Self::Registry { .. } => Service::Registry,
            Self::VatListing { .. } => Service::VatListing,
            Self::TaxpayerStatus { .. } => Service::TaxpayerStatus,
        }
    }
}

/// Source of raw response documents.
pub trait Fetch {
    fn fetch(&self, request: &Request) -> Result<String, AresError>;
}

impl<F> Fetch for F
where
    F: Fn(&Request) -> Result<String, AresError>,
{
    fn fetch(&self, request: &Request) -> Result<String, AresError> {
        self(request)
    }
}

/// Fails every request; used when running without network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl Fetch for Offline {
    fn fetch(&self, request: &Request) -> Result<String, AresError> {
        Err(AresError::Network(format!(
            "{} request not available offline",
            request.service()
        )))
    }
}

/// Serves recorded responses from files for selected services and
/// delegates everything else to `inner`.
#[derive(Debug, Clone)]
pub struct Recorded<F> {
    inner: F,
    files: BTreeMap<Service, PathBuf>,
}

impl<F: Fetch> Recorded<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            files: BTreeMap::new(),
        }
    }

    /// Answer `service` requests with the contents of `path`.
    pub fn with_file(mut self, service: Service, path: impl Into<PathBuf>) -> Self {
        self.files.insert(service, path.into());
        self
    }
}

impl<F: Fetch> Fetch for Recorded<F> {
    fn fetch(&self, request: &Request) -> Result<String, AresError> {
        match self.files.get(&request.service()) {
            Some(path) => {
                tracing::info!(service = %request.service(), path = %path.display(), "using recorded response");
                Ok(std::fs::read_to_string(path)?)
            }
            None => self.inner.fetch(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_request() -> Request {
        Request::Registry {
            ico: Ico::parse("25596641").unwrap(),
        }
    }

    #[test]
    fn closure_fetcher() {
        let fetch = |r: &Request| -> Result<String, AresError> { Ok(format!("<{}/>", r.service())) };
        assert_eq!(
            Fetch::fetch(&fetch, &registry_request()).unwrap(),
            "<registry/>"
        );
    }

    #[test]
    fn offline_fails_with_network_error() {
        assert!(matches!(
            Offline.fetch(&registry_request()),
            Err(AresError::Network(_))
        ));
    }

    #[test]
    fn recorded_overrides_only_configured_services() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.xml");
        std::fs::write(&path, "<recorded/>").unwrap();

        let fetcher = Recorded::new(Offline).with_file(Service::Registry, &path);

        assert_eq!(fetcher.fetch(&registry_request()).unwrap(), "<recorded/>");
        let vat = Request::VatListing {
            name: "ACME".into(),
        };
        assert!(matches!(fetcher.fetch(&vat), Err(AresError::Network(_))));
    }

    #[test]
    fn recorded_missing_file_is_io_error() {
        let fetcher = Recorded::new(Offline).with_file(Service::Registry, "/nonexistent/ares.xml");
        assert!(matches!(
            fetcher.fetch(&registry_request()),
            Err(AresError::Io(_))
        ));
    }
}

//! Configuration of the `ares` command-line tool.
//!
//! Every field has a default, so an empty TOML file (or none at all) gives the
//! standard setup: one field per line, CRLF, ISO-8859-2, all three lookups.
//!
//! ```toml
//! output_path = "../Ares.txt"
//! log_path = "ares.log"
//!
//! [output]
//! separator = "semicolon"
//! encoding = "windows-1250"
//!
//! [pipeline]
//! taxpayer_status = false
//!
//! [recorded]
//! registry = "assets/response-standard-1.xml"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{AresError, OutputFormat};
use crate::lookup::{
    Endpoints, Fetch, HttpFetcher, Offline, PipelineConfig, Recorded, Request, Service,
};

/// Recorded response files that replace remote calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordedResponses {
    pub registry: Option<PathBuf>,
    pub vat_listing: Option<PathBuf>,
    pub taxpayer_status: Option<PathBuf>,
}

impl RecordedResponses {
    /// Wrap `inner` so the configured services are answered from files.
    pub fn wrap<F: Fetch>(&self, inner: F) -> Recorded<F> {
        [
            (Service::Registry, &self.registry),
            (Service::VatListing, &self.vat_listing),
            (Service::TaxpayerStatus, &self.taxpayer_status),
        ]
        .into_iter()
        .fold(Recorded::new(inner), |fetcher, (service, path)| match path {
            Some(path) => fetcher.with_file(service, path),
            None => fetcher,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output record file, overwritten on success.
    pub output_path: PathBuf,
    /// Diagnostics log, truncated each run.
    pub log_path: PathBuf,
    /// Fail every call without a recorded response instead of using HTTP.
    pub offline: bool,
    pub output: OutputFormat,
    pub pipeline: PipelineConfig,
    pub endpoints: Endpoints,
    pub recorded: RecordedResponses,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("Ares.txt"),
            log_path: PathBuf::from("ares.log"),
            offline: false,
            output: OutputFormat::default(),
            pipeline: PipelineConfig::default(),
            endpoints: Endpoints::default(),
            recorded: RecordedResponses::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self, AresError> {
        let config: Self = toml::from_str(text).map_err(|e| AresError::Config(e.to_string()))?;
        config.output.charset()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AresError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            AresError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&text)
    }

    /// The fetcher this configuration describes.
    pub fn fetcher(&self) -> Result<ConfiguredFetcher, AresError> {
        if self.offline {
            Ok(ConfiguredFetcher::Offline(self.recorded.wrap(Offline)))
        } else {
            let http = HttpFetcher::new(self.endpoints.clone())?;
            Ok(ConfiguredFetcher::Http(self.recorded.wrap(http)))
        }
    }
}

/// Transport selected by [`AppConfig::fetcher`].
pub enum ConfiguredFetcher {
    Offline(Recorded<Offline>),
    Http(Recorded<HttpFetcher>),
}

impl Fetch for ConfiguredFetcher {
    fn fetch(&self, request: &Request) -> Result<String, AresError> {
        match self {
            Self::Offline(f) => f.fetch(request),
            Self::Http(f) => f.fetch(request),
        }
    }
}

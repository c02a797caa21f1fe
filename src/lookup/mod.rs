//! Registry, VAT listing and taxpayer status lookups.
//!
//! Each remote response is parsed into an [`XmlDocument`] whose root declares
//! the namespace prefixes used for all queries into it. The three calls run
//! strictly in sequence through a [`Pipeline`], since each needs the previous
//! result: the registry yields the name for the VAT search, which yields the
//! DIČ for the status request.
//!
//! # Example
//!
//! ```no_run
//! use ares::lookup::*;
//!
//! let fetcher = Recorded::new(Offline)
//!     .with_file(Service::Registry, "assets/response-standard-1.xml")
//!     .with_file(Service::VatListing, "assets/response-dph-1.xml");
//! let config = PipelineConfig { taxpayer_status: false, ..Default::default() };
//! let company = Pipeline::with_config(fetcher, config).lookup("25596641")?;
//! println!("{}", company.name);
//! # Ok::<(), ares::core::AresError>(())
//! ```

mod fetch;
mod pipeline;
mod registry;
mod taxpayer;
mod vat;
pub mod xml;

#[cfg(feature = "http")]
mod http;

pub use fetch::{Fetch, Offline, Recorded, Request, Service};
pub use pipeline::{Pipeline, PipelineConfig};
pub use registry::{NOT_FOUND_NAME, RegistryLookup, apply_registry_record};
pub use taxpayer::{parse_taxpayer_status, status_request_envelope};
pub use vat::find_vat_id;
pub use xml::XmlDocument;

#[cfg(feature = "http")]
pub use http::{Endpoints, HttpFetcher};

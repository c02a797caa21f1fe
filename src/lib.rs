//! # ares
//!
//! Looks up a Czech company by its IČO in the ARES business registry, finds
//! its DIČ (VAT id), checks the reliable VAT payer status with the tax
//! authority and writes a fixed-field record in a single-byte legacy charset.
//!
//! ## Quick Start
//!
//! ```rust
//! use ares::core::*;
//!
//! let mut company = Company::new(Ico::parse("25596641").unwrap());
//! company.name = "Company Name That Is Quite Long Indeed Yes".into();
//! apply_text_address(&mut company, "Hlavní 12/3 110 00, Praha");
//!
//! assert_eq!(company.name_lines(), ("Company Name That Is Quite Long", "Indeed Yes"));
//! assert_eq!(company.address_line(), "Hlavní 12/3");
//! assert_eq!(record::fields(&company).len(), FIELD_COUNT);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | IČO validation, company record, record output |
//! | `lookup` (default) | XML parsing of registry / VAT / status responses, pipeline |
//! | `http` | Blocking HTTP transport for the three services |
//! | `cli` | The `ares` command-line tool |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "lookup")]
pub mod lookup;

#[cfg(feature = "cli")]
pub mod config;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

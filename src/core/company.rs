//! The company record assembled by a lookup run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Ico;

/// Maximum characters per name line in the output record.
pub const NAME_LINE_WIDTH: usize = 35;

/// Default VAT country prefix.
pub const CZ_VAT_PREFIX: &str = "CZ";

/// Reliability of a VAT payer as published by the tax authority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxpayerStatus {
    /// Registered VAT payer not flagged as unreliable.
    Reliable,
    /// Registered VAT payer flagged as unreliable.
    Unreliable,
    /// Not a VAT payer, or the status could not be determined.
    #[default]
    NotATaxpayer,
}

impl TaxpayerStatus {
    /// Map the tax authority's `nespolehlivyPlatce` attribute value.
    pub fn from_unreliable_flag(flag: &str) -> Self {
        match flag {
            "ANO" => Self::Unreliable,
            "NE" => Self::Reliable,
            _ => Self::NotATaxpayer,
        }
    }

    /// Label written to the output record.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotATaxpayer => "not-a-payer",
            Self::Reliable => "reliable",
            Self::Unreliable => "unreliable",
        }
    }
}

/// A legal entity as reported by the registry, the VAT listing and the tax authority.
///
/// Constructed with only the IČO set and filled in stage by stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    ico: Ico,
    pub name: String,
    /// Date of registration (`Datum_vzniku`).
    pub created: Option<NaiveDate>,
    pub street: String,
    /// Číslo domovní / popisné.
    pub house_number: String,
    /// Číslo orientační.
    pub orientation_number: String,
    pub city: String,
    pub postal_code: String,
    pub vat_prefix: String,
    /// DIČ number part, empty when not registered for VAT.
    pub vat_id: String,
    pub taxpayer_status: TaxpayerStatus,
}

impl Company {
    pub fn new(ico: Ico) -> Self {
        Self {
            ico,
            name: String::new(),
            created: None,
            street: String::new(),
            house_number: String::new(),
            orientation_number: String::new(),
            city: String::new(),
            postal_code: String::new(),
            vat_prefix: CZ_VAT_PREFIX.to_string(),
            vat_id: String::new(),
            taxpayer_status: TaxpayerStatus::default(),
        }
    }

    pub fn ico(&self) -> &Ico {
        &self.ico
    }

    /// Split the name into two lines for the fixed-width consumer.
    ///
    /// Names up to [`NAME_LINE_WIDTH`] characters stay on the first line.
    /// Longer names break at the last space whose index is below the width;
    /// without such a space the name is cut at the width, mid-word if needed.
    /// The second line has leading whitespace removed and is not truncated.
    pub fn name_lines(&self) -> (&str, &str) {
        let Some(split) = name_split_index(&self.name) else {
            return (&self.name, "");
        };
        let (first, rest) = self.name.split_at(split);
        (first, rest.trim_start())
    }

    pub fn name_line1(&self) -> &str {
        self.name_lines().0
    }

    pub fn name_line2(&self) -> &str {
        self.name_lines().1
    }

    /// `"{street} {house}/{orientation}"`, or `"{street} {house}"` without an orientation number.
    pub fn address_line(&self) -> String {
        if self.orientation_number.is_empty() {
            format!("{} {}", self.street, self.house_number)
        } else {
            format!(
                "{} {}/{}",
                self.street, self.house_number, self.orientation_number
            )
        }
    }

    /// Registration date as `DD.MM.YY`, empty when unknown.
    pub fn created_display(&self) -> String {
        self.created
            .map(|d| d.format("%d.%m.%y").to_string())
            .unwrap_or_default()
    }

    /// VAT prefix as reported; empty for non-payers.
    pub fn vat_prefix_display(&self) -> &str {
        if self.taxpayer_status == TaxpayerStatus::NotATaxpayer {
            ""
        } else {
            &self.vat_prefix
        }
    }

    /// VAT id as reported; empty for non-payers.
    pub fn vat_id_display(&self) -> &str {
        if self.taxpayer_status == TaxpayerStatus::NotATaxpayer {
            ""
        } else {
            &self.vat_id
        }
    }
}

/// Byte offset at which a long name is split, or `None` if it fits on one line.
fn name_split_index(name: &str) -> Option<usize> {
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    if chars.len() <= NAME_LINE_WIDTH {
        return None;
    }

    let mut end = chars.len();
    let split_char = loop {
        match chars[..end].iter().rposition(|(_, c)| *c == ' ') {
            Some(i) if i >= NAME_LINE_WIDTH => end = i,
            Some(i) => break i,
            None => break NAME_LINE_WIDTH,
        }
    };

    Some(chars[split_char].0)
}

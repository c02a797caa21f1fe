//! Fixed-field output record and its single-byte encoding.

use std::path::Path;

use encoding_rs::{EncoderResult, Encoding};
use serde::{Deserialize, Serialize};

use super::{AresError, Company};

/// Number of fields in every output record.
pub const FIELD_COUNT: usize = 10;

/// Default output charset.
pub const DEFAULT_ENCODING: &str = "iso-8859-2";

/// Byte written in place of each character the charset cannot represent.
pub const SUBSTITUTE_BYTE: u8 = b'?';

/// How fields are separated in the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// One field per line.
    #[default]
    Newline,
    /// All fields on one line joined by `;`. A `;` inside a field becomes `,`.
    Semicolon,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

/// What to do with characters the target charset cannot represent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unmappable {
    /// Replace each one with a single [`SUBSTITUTE_BYTE`], keeping byte length equal to char count.
    #[default]
    Substitute,
    /// Abort with [`AresError::Encoding`].
    Fail,
}

/// Layout and charset of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFormat {
    pub separator: Separator,
    pub line_ending: LineEnding,
    /// WHATWG encoding label, e.g. `iso-8859-2` or `windows-1250`.
    pub encoding: String,
    pub unmappable: Unmappable,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            separator: Separator::default(),
            line_ending: LineEnding::default(),
            encoding: DEFAULT_ENCODING.to_string(),
            unmappable: Unmappable::default(),
        }
    }
}

impl OutputFormat {
    /// Single `;`-joined line, the layout of the variant without the status lookup.
    pub fn semicolon() -> Self {
        Self {
            separator: Separator::Semicolon,
            ..Self::default()
        }
    }

    /// Resolve the configured label, rejecting multi-byte and unknown charsets.
    pub fn charset(&self) -> Result<&'static Encoding, AresError> {
        let encoding = Encoding::for_label(self.encoding.trim().as_bytes()).ok_or_else(|| {
            AresError::Encoding(format!("unknown charset '{}'", self.encoding))
        })?;
        if !encoding.is_single_byte() {
            return Err(AresError::Encoding(format!(
                "charset '{}' is not a single-byte encoding",
                encoding.name()
            )));
        }
        Ok(encoding)
    }
}

/// The ten output fields in their fixed order.
///
/// IČO, created date, name line 1, name line 2, street address, city,
/// postal code, VAT prefix, VAT id, taxpayer status.
pub fn fields(company: &Company) -> [String; FIELD_COUNT] {
    let (name1, name2) = company.name_lines();
    [
        company.ico().to_string(),
        company.created_display(),
        name1.to_string(),
        name2.to_string(),
        company.address_line(),
        company.city.clone(),
        company.postal_code.clone(),
        company.vat_prefix_display().to_string(),
        company.vat_id_display().to_string(),
        company.taxpayer_status.label().to_string(),
    ]
}

/// Render the record as text; every line ends with the configured line ending.
pub fn render(company: &Company, format: &OutputFormat) -> String {
    let eol = format.line_ending.as_str();
    let fields = fields(company);
    match format.separator {
        Separator::Newline => fields.iter().map(|f| format!("{f}{eol}")).collect(),
        Separator::Semicolon => {
            let joined = fields
                .iter()
                .map(|f| f.replace(';', ","))
                .collect::<Vec<_>>()
                .join(";");
            format!("{joined}{eol}")
        }
    }
}

/// Transcode `text` into the configured single-byte charset.
///
/// Every input character yields exactly one output byte, so a line that fits
/// its width in characters also fits it in bytes.
pub fn encode(text: &str, format: &OutputFormat) -> Result<Vec<u8>, AresError> {
    let charset = format.charset()?;
    let mut encoder = charset.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 512];
    let mut rest = text;
    let mut offending = String::new();

    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(rest, &mut buf, true);
        out.extend_from_slice(&buf[..written]);
        rest = &rest[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(c) => {
                offending.push(c);
                out.push(SUBSTITUTE_BYTE);
            }
        }
    }

    if offending.is_empty() {
        return Ok(out);
    }
    if format.unmappable == Unmappable::Fail {
        return Err(AresError::Encoding(format!(
            "characters not representable in {}: {offending}",
            charset.name()
        )));
    }
    tracing::warn!(
        charset = charset.name(),
        characters = %offending,
        "substituted unmappable characters"
    );
    Ok(out)
}

/// Render, encode and write the record, replacing any existing file.
///
/// The file is only touched once the whole record has been encoded.
pub fn write_record(
    path: impl AsRef<Path>,
    company: &Company,
    format: &OutputFormat,
) -> Result<(), AresError> {
    let path = path.as_ref();
    let text = render(company, format);
    let bytes = encode(&text, format)?;
    tracing::info!(path = %path.display(), "writing record");
    tracing::debug!(record = %text.trim_end());
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Ico, NAME_LINE_WIDTH, TaxpayerStatus};
    use chrono::NaiveDate;

    fn sample() -> Company {
        let mut c = Company::new(Ico::parse("25596641").unwrap());
        c.name = "Žluťoučký kůň s.r.o.".into();
        c.created = NaiveDate::from_ymd_opt(2001, 11, 20);
        c.street = "Hlavní".into();
        c.house_number = "12".into();
        c.orientation_number = "3".into();
        c.city = "Praha".into();
        c.postal_code = "11000".into();
        c.vat_id = "25596641".into();
        c.taxpayer_status = TaxpayerStatus::Reliable;
        c
    }

    #[test]
    fn field_order() {
        let f = fields(&sample());
        assert_eq!(
            f,
            [
                "25596641",
                "20.11.01",
                "Žluťoučký kůň s.r.o.",
                "",
                "Hlavní 12/3",
                "Praha",
                "11000",
                "CZ",
                "25596641",
                "reliable",
            ]
        );
    }

    #[test]
    fn empty_company_still_has_ten_fields() {
        let c = Company::new(Ico::parse("25596641").unwrap());
        let text = render(&c, &OutputFormat::default());
        assert_eq!(text.matches("\r\n").count(), FIELD_COUNT);
        assert!(text.starts_with("25596641\r\n\r\n"));
        assert!(text.ends_with("not-a-payer\r\n"));
    }

    #[test]
    fn semicolon_layout() {
        let mut format = OutputFormat::semicolon();
        format.line_ending = LineEnding::Lf;
        let text = render(&sample(), &format);
        assert_eq!(
            text,
            "25596641;20.11.01;Žluťoučký kůň s.r.o.;;Hlavní 12/3;Praha;11000;CZ;25596641;reliable\n"
        );
    }

    #[test]
    fn iso_8859_2_bytes() {
        let bytes = encode("Žluťoučký kůň", &OutputFormat::default()).unwrap();
        assert_eq!(
            bytes,
            [0xAE, b'l', b'u', 0xBB, b'o', b'u', 0xE8, b'k', 0xFD, b' ', b'k', 0xF9, 0xF2]
        );
    }

    #[test]
    fn unmappable_substitute_and_fail() {
        let mut format = OutputFormat::default();
        assert_eq!(encode("a€b", &format).unwrap(), b"a?b");

        format.unmappable = Unmappable::Fail;
        let err = encode("a€b", &format).unwrap_err();
        assert!(matches!(err, AresError::Encoding(ref m) if m.contains('€')));
    }

    #[test]
    fn encoded_name_line_fits_width() {
        let mut c = Company::new(Ico::parse("25596641").unwrap());
        c.name = format!("{}€€€€ a další", "A".repeat(31));
        let (line1, line2) = c.name_lines();
        assert_eq!(line1.chars().count(), NAME_LINE_WIDTH);

        let bytes = encode(line1, &OutputFormat::default()).unwrap();
        assert_eq!(bytes.len(), NAME_LINE_WIDTH);
        assert!(bytes.ends_with(b"????"));
        assert_eq!(encode(line2, &OutputFormat::default()).unwrap(), b"a dal\xB9\xED");
    }

    #[test]
    fn semicolon_inside_field_keeps_ten_fields() {
        let mut c = sample();
        c.name = "Alfa; Beta s.r.o.".into();
        let text = render(&c, &OutputFormat::semicolon());
        assert_eq!(text.trim_end().split(';').count(), FIELD_COUNT);
        assert!(text.contains(";Alfa, Beta s.r.o.;"));
    }

    #[test]
    fn rejects_unknown_and_multibyte_charsets() {
        let mut format = OutputFormat::default();
        format.encoding = "klingon".into();
        assert!(format.charset().is_err());
        format.encoding = "utf-8".into();
        assert!(format.charset().is_err());
        format.encoding = "windows-1250".into();
        assert_eq!(format.charset().unwrap().name(), "windows-1250");
    }

    #[test]
    fn write_record_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Ares.txt");
        std::fs::write(&path, "stale content that is longer than the record, surely longer").unwrap();

        write_record(&path, &sample(), &OutputFormat::semicolon()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"25596641;20.11.01;"));
        assert!(bytes.ends_with(b"reliable\r\n"));
    }
}

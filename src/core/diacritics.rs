use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Remove combining diacritical marks: decompose, drop the marks, recompose.
///
/// Used to build the company-name search key for the VAT listing query.
///
/// ```
/// assert_eq!(ares::core::remove_diacritics("Žluťoučký kůň s.r.o."), "Zlutoucky kun s.r.o.");
/// ```
pub fn remove_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

#![no_main]

use ares::core::{Company, Ico};
use ares::lookup::{XmlDocument, apply_registry_record, find_vat_id, parse_taxpayer_status};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        if let Ok(doc) = XmlDocument::parse(s) {
            let ico = Ico::parse("25596641").unwrap();
            let mut company = Company::new(ico.clone());
            let _ = apply_registry_record(&doc, &mut company);
            let _ = find_vat_id(&doc, &ico);
            let _ = parse_taxpayer_status(&doc);
        }
    }
});

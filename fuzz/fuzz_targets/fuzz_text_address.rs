#![no_main]

use ares::core::parse_text_address;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(a) = parse_text_address(s) {
            assert!(!a.house_number.is_empty());
            assert_eq!(a.postal_code.len(), 5);
        }
    }
});

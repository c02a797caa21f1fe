#![no_main]

use ares::core::{Company, Ico, NAME_LINE_WIDTH, record};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|name: String| {
    let mut company = Company::new(Ico::parse("25596641").unwrap());
    company.name = name;
    let (line1, _) = company.name_lines();
    assert!(line1.chars().count() <= NAME_LINE_WIDTH);
    assert_eq!(record::fields(&company).len(), record::FIELD_COUNT);
});

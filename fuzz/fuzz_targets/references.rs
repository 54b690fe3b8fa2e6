#![no_main]

use libfuzzer_sys::fuzz_target;
use mycroft_i18n_helpers::references::parse;

fuzz_target!(|comment: &str| {
    if let Ok(references) = parse(comment) {
        for reference in references {
            assert!(reference.line_number >= 1);
            assert!(!reference.target_file.is_empty());
        }
    }
});

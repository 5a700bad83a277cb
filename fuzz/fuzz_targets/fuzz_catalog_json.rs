#![no_main]

use filesig_core::{Catalog, CatalogOptions, WildcardMode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for mode in [WildcardMode::MatchAny, WildcardMode::Drop] {
        let options = CatalogOptions::new().with_wildcards(mode);
        if let Ok(catalog) = Catalog::from_json(text, &options) {
            for signature in &catalog {
                assert!(!signature.description().trim().is_empty());
                assert!(signature.header().is_none_or(|h| !h.is_empty()));
            }
        }
    }
});

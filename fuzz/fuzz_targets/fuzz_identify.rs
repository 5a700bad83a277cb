#![no_main]

use filesig_core::{Catalog, Identifier, Phase};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use std::path::Path;
use std::sync::OnceLock;

static CATALOG: OnceLock<Catalog> = OnceLock::new();

fuzz_target!(|input: &[u8]| {
    // First byte: file name length, then the name, then the content.
    let Some((&name_len, rest)) = input.split_first() else {
        return;
    };
    let (name, data) = rest.split_at((name_len as usize).min(rest.len()));
    let name = String::from_utf8_lossy(name);
    let catalog = CATALOG.get_or_init(|| Catalog::builtin().expect("built-in catalog"));
    let identifier = Identifier::new(catalog);

    let found = identifier
        .identify(Path::new(&*name), &mut Cursor::new(data))
        .expect("in-memory reads cannot fail");
    let full = identifier
        .scan_all(&mut Cursor::new(data))
        .expect("in-memory reads cannot fail");

    for signature in &found.matches {
        assert!(full.contains(signature));
    }
    if found.resolved_by == Phase::Fallback {
        assert_eq!(found.matches, full);
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use walletgen_core::{resolve_selection, NetworkRegistry};

fuzz_target!(|data: &[u8]| {
    // Selection text comes straight from stdin or argv.
    if let Ok(s) = std::str::from_utf8(data) {
        let registry = NetworkRegistry::builtin();
        if let Ok(ids) = resolve_selection(&registry, s) {
            assert!(ids.iter().all(|id| registry.get(*id).is_some()));
        }
    }
});

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use monocle_sanitizer::config::{ConfigLoader, sanitize_monocle};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Loading and sanitizing must never panic, whatever the input.
    if let Ok(raw) = ConfigLoader::with_defaults().load_from_str(text) {
        let _ = sanitize_monocle(&raw, Path::new("/opt/monocle"));
    }
});

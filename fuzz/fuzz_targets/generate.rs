#![no_main]

use libfuzzer_sys::fuzz_target;
use proxygen::{GeneratorConfig, proxy_for_source};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Any input may fail, none may panic
        let _ = proxy_for_source("fuzz.rs", s, &GeneratorConfig::default());
    }
});

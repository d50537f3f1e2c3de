#![no_main]

use std::path::PathBuf;

use libfuzzer_sys::fuzz_target;
use sema_extract::extract::resolver::resolve_type;
use sema_extract::extract::{Bindings, extract};
use sema_extract::parse::{SourceFile, parse_source};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let source = SourceFile::from_string(PathBuf::from("fuzz.go"), text.to_string());

    // Either builder may fail; neither may panic.
    let _ = extract(&source, &Bindings::default());

    if let Ok(file) = parse_source(&source) {
        for spec in file.var_specs() {
            for value in &spec.values {
                let _ = resolve_type(value);
            }
        }
    }
});

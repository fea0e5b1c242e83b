#![no_main]
use std::fmt::Write;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut sink = String::new();
    // Validation, decoding and both reports must never panic.
    let _ = write!(sink, "{}", bmpinfo::HexDump::new(data));
    let Ok(inspection) = bmpinfo::InspectRequest::new(data).inspect() else {
        return;
    };
    let _ = write!(sink, "{}", bmpinfo::FieldReport(&inspection.info));
    let _ = write!(
        sink,
        "{}",
        bmpinfo::PixelListing::new(inspection.pixels(), &inspection.info)
    );
    let decoded = inspection.pixels().take_while(Result::is_ok).count() as u64;
    assert!(decoded <= inspection.info.pixel_count());
});

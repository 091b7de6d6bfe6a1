//! Conversion fuzz target: whatever parses must convert or fail cleanly, for both targets.
//! Build with: cargo fuzz run convert_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    let config = structconv::Config::new().with_prefix("F");
    let _ = structconv::convert(&[s], structconv::Target::C, &config);
    let _ = structconv::convert(&[s], structconv::Target::TypeScript, &config);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run convert_fuzz");
}

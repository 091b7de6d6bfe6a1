//! Parser fuzz target: arbitrary text must parse or fail without panicking, and
//! parsing the same text twice must produce the same declarations.
//! Seeds live in `fuzz/corpus/parser_fuzz` (Go files with tags, groups and generics).
//! Build with: cargo fuzz run parser_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(first) = structconv::parse(src) else {
        return;
    };
    let second = structconv::parse(src).expect("second parse of accepted source");
    let names = |f: &structconv::SourceFile| f.decls.iter().map(|d| d.name.clone()).collect::<Vec<_>>();
    assert_eq!(names(&first), names(&second));
    assert_eq!(first.comments, second.comments);
    for decl in &first.decls {
        assert!(!decl.name.is_empty());
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run parser_fuzz");
}

//! Fuzz target for Target and ActionKind parsing
//!
//! Arbitrary strings must either be rejected or parse into a value whose
//! textual form parses back to the same value.

#![no_main]

use arbitrary::Arbitrary;
use core_permission::{ActionKind, Target};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct ParseInput {
    target: String,
    kind: String,
}

fuzz_target!(|input: ParseInput| {
    if let Ok(target) = input.target.parse::<Target>() {
        let reparsed: Target = target.to_string().parse().expect("display output must parse");
        assert_eq!(reparsed, target);
    }

    if let Ok(kind) = input.kind.parse::<ActionKind>() {
        let reparsed: ActionKind = kind.to_string().parse().expect("display output must parse");
        assert_eq!(reparsed, kind);
    }
});

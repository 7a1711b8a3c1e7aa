//! Fuzz target for PermissionSet::from_toml / from_json
//!
//! Deserialization must never panic on any input, and every set it accepts
//! must satisfy the size limits and pass validation.

#![no_main]

use core_permission::{Action, PermissionSet, Target, MAX_RULES_PER_LIST, MAX_SUBJECTS_PER_ACTION};
use libfuzzer_sys::fuzz_target;

fn check(set: &PermissionSet) {
    assert!(set.authorizations().len() <= MAX_RULES_PER_LIST, "authorized list exceeds limit");
    assert!(set.unauthorizations().len() <= MAX_RULES_PER_LIST, "unauthorized list exceeds limit");
    assert!(set.validate().is_ok(), "parsed set failed validation");

    for action in set.authorizations().iter().chain(set.unauthorizations()) {
        assert!(action.subjects().len() <= MAX_SUBJECTS_PER_ACTION);
    }

    // Resolution never panics
    if let Ok(target) = Target::type_of("Fuzz") {
        let _ = set.can(&Action::manage(), &target);
        let _ = set.can(&Action::read(), &target);
    }
}

fuzz_target!(|data: &str| {
    if let Ok(set) = PermissionSet::from_toml(data) {
        check(&set);
    }

    if let Ok(set) = PermissionSet::from_json(data) {
        check(&set);
    }
});

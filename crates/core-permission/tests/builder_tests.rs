//! Integration tests for PermissionSetBuilder

use core_permission::{
    Action, ActionKind, Decision, PermissionError, PermissionSetBuilder, Target,
    MAX_SUBJECTS_PER_ACTION,
};

#[test]
fn test_permission_set_builder() {
    let address = Target::type_of("Address").unwrap();

    let set = PermissionSetBuilder::new()
        .allow(Action::read())
        .allow_with(ActionKind::Update, |a| a.with_subject(address.clone()))
        .deny(Action::delete())
        .build()
        .unwrap();

    assert_eq!(set.authorizations().len(), 2);
    assert_eq!(set.unauthorizations().len(), 1);
    assert_eq!(set.can(&Action::update(), &address), Decision::Allow);
    assert_eq!(set.can(&Action::delete(), &address), Decision::Deny);
}

#[test]
fn test_builder_keeps_first_action_of_a_kind() {
    let first = Target::instance("Address", "1").unwrap();
    let second = Target::instance("Address", "2").unwrap();

    let set = PermissionSetBuilder::new()
        .allow_with(ActionKind::Update, |a| a.with_subject(first.clone()))
        .allow_with(ActionKind::Update, |a| a.with_subject(second.clone()))
        .build()
        .unwrap();

    assert_eq!(set.authorizations().len(), 1);
    assert_eq!(set.can(&Action::update(), &first), Decision::Allow);
    assert_eq!(set.can(&Action::update(), &second), Decision::Deny);
}

#[test]
fn test_builder_empty() {
    let set = PermissionSetBuilder::new().build().unwrap();
    assert!(set.is_empty());
}

#[test]
fn test_builder_rejects_blank_custom_action() {
    let result = PermissionSetBuilder::new().allow(Action::custom("")).build();
    assert!(matches!(result, Err(PermissionError::InvalidAction(_))));
}

#[test]
fn test_builder_rejects_too_many_subjects() {
    let result = PermissionSetBuilder::new()
        .deny_with(ActionKind::Read, |mut action| {
            for i in 0..=MAX_SUBJECTS_PER_ACTION {
                action.add_subject(Target::instance("Address", i.to_string()).unwrap());
            }
            action
        })
        .build();

    assert!(matches!(
        result,
        Err(PermissionError::TooManySubjects { max, .. }) if max == MAX_SUBJECTS_PER_ACTION
    ));
}

//! Integration tests for RuleAuthorizer

use core_permission::{
    Action, Authorizer, Decision, PermissionSet, Rule, RuleAuthorizer, SharedPermissionSet, Target,
};

#[test]
fn test_authorizer_can() {
    let authorized = vec![
        Action::read(),
        Action::update().with_subject(Target::type_of("Draft").unwrap()),
    ];
    let unauthorized = vec![Action::update().with_subject(Target::instance("Draft", "locked").unwrap())];
    let auth = RuleAuthorizer::new(&authorized, &unauthorized);

    // Read anything
    assert_eq!(
        auth.can(&Action::read(), &Target::type_of("Report").unwrap()),
        Decision::Allow
    );

    // Update drafts, except the locked one
    assert_eq!(
        auth.can(&Action::update(), &Target::instance("Draft", "d1").unwrap()),
        Decision::Allow
    );
    assert_eq!(
        auth.can(&Action::update(), &Target::instance("Draft", "locked").unwrap()),
        Decision::Deny
    );
    assert_eq!(
        auth.can(&Action::update(), &Target::type_of("Report").unwrap()),
        Decision::Deny
    );

    // Nothing about deletes
    assert_eq!(
        auth.can(&Action::delete(), &Target::type_of("Draft").unwrap()),
        Decision::Undetermined
    );
}

#[test]
fn test_authorizer_matching_rules() {
    let authorized = vec![
        Action::manage(),
        Action::read().with_subject(Target::type_of("Report").unwrap()),
        Action::update(),
    ];
    let unauthorized = vec![Action::read().with_subject(Target::instance("Report", "q3").unwrap())];
    let auth = RuleAuthorizer::new(&authorized, &unauthorized);

    let action = Action::read();
    let target = Target::instance("Report", "q3").unwrap();
    let matches: Vec<Rule> = auth.matching_rules(&action, &target).map(|(r, _)| r).collect();
    assert_eq!(
        matches,
        vec![Rule::Unauthorized(0), Rule::Authorized(0), Rule::Authorized(1)]
    );

    let target = Target::instance("Report", "q4").unwrap();
    let matches: Vec<Rule> = auth.matching_rules(&action, &target).map(|(r, _)| r).collect();
    assert_eq!(matches, vec![Rule::Authorized(0), Rule::Authorized(1)]);
}

#[test]
fn test_authorizer_rule_count() {
    let authorized = vec![Action::read(), Action::update()];
    let unauthorized = vec![Action::delete()];
    let auth = RuleAuthorizer::new(&authorized, &unauthorized);

    assert_eq!(auth.rule_count(), 3);
}

#[test]
fn test_authorizer_empty_rules() {
    let auth = RuleAuthorizer::new(&[], &[]);

    assert_eq!(
        auth.can(&Action::manage(), &Target::type_of("Anything").unwrap()),
        Decision::Undetermined
    );
    assert_eq!(auth.rule_count(), 0);
}

#[test]
fn test_authorizer_trait_implementation() {
    fn check_authorization<A: Authorizer>(authorizer: &A, target: &Target) -> Decision {
        authorizer.can(&Action::read(), target)
    }

    let mut set = PermissionSet::new();
    set.add_authorization(Action::read().with_subject(Target::type_of("Report").unwrap()));

    let report = Target::type_of("Report").unwrap();
    let invoice = Target::type_of("Invoice").unwrap();

    assert_eq!(check_authorization(&set, &report), Decision::Allow);
    assert_eq!(check_authorization(&set.authorizer(), &invoice), Decision::Deny);

    let shared = SharedPermissionSet::new(set);
    assert_eq!(check_authorization(&shared, &report), Decision::Allow);
    assert_eq!(check_authorization(&shared, &invoice), Decision::Deny);
}

#[test]
fn test_authorizer_boxed_dyn() {
    let mut set = PermissionSet::new();
    set.add_unauthorization(Action::share());

    let authorizers: Vec<Box<dyn Authorizer>> = vec![
        Box::new(set.clone()),
        Box::new(SharedPermissionSet::from(set)),
    ];

    for authorizer in &authorizers {
        assert_eq!(
            authorizer.can(&Action::share(), &Target::type_of("Doc").unwrap()),
            Decision::Deny
        );
    }
}

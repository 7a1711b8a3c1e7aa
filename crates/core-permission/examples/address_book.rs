//! # Address Book Example
//!
//! Walks through the permission workflow for an address book application:
//!
//! 1. Map application types onto subjects (`Subject` / `Identified`)
//! 2. Grant and deny actions at type and instance level
//! 3. Resolve queries, including the undetermined outcome
//! 4. Persist the set and reload it
//!
//! ## Run
//!
//! ```bash
//! cargo run -p core-permission --example address_book
//! ```

use core_permission::{
    Action, ActionKind, Decision, Identified, PermissionSet, PermissionSetBuilder, Subject, Target,
};

struct Address {
    id: u64,
    owner: &'static str,
}

impl Subject for Address {
    const TYPE_NAME: &'static str = "Address";
}

impl Identified for Address {
    fn instance_key(&self) -> String {
        self.id.to_string()
    }
}

struct Contact;

impl Subject for Contact {
    const TYPE_NAME: &'static str = "Contact";
}

fn show(set: &PermissionSet, action: &Action, target: &Target) {
    let evaluation = set.evaluate(action, target);
    let because = match evaluation.rule {
        Some(rule) => format!("{rule:?}"),
        None => "no applicable rule".to_string(),
    };
    println!(
        "   {:<8} {:<12} -> {:<12} ({because})",
        action.kind().to_string(),
        target.to_string(),
        evaluation.decision.to_string()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Address Book Example ===\n");

    let home = Address { id: 1, owner: "alice" };
    let office = Address { id: 2, owner: "alice" };
    println!("1. Subjects");
    println!("   {} owns {} and {}", home.owner, home.id, office.id);
    println!();

    let addresses = Target::of::<Address>()?;
    let contacts = Target::of::<Contact>()?;
    let home_target = Target::instance_of(&home)?;
    let office_target = Target::instance_of(&office)?;

    // ========================================================================
    // Grants
    // ========================================================================
    println!("2. Building the permission set...");
    let user = PermissionSetBuilder::new()
        // Read every address and every contact
        .allow(Action::read())
        // Update addresses in general...
        .allow_with(ActionKind::Update, |a| a.with_subject(addresses.clone()))
        // ...except the office address
        .deny_with(ActionKind::Update, |a| a.with_subject(office_target.clone()))
        // Share only the home address
        .allow_with(ActionKind::Share, |a| a.with_subject(home_target.clone()))
        .build()?;
    println!("   {} authorizations", user.authorizations().len());
    println!("   {} unauthorizations\n", user.unauthorizations().len());

    // ========================================================================
    // Queries
    // ========================================================================
    println!("3. Resolving queries...");
    show(&user, &Action::read(), &contacts);
    show(&user, &Action::update(), &home_target);
    show(&user, &Action::update(), &office_target);
    show(&user, &Action::share(), &home_target);
    show(&user, &Action::share(), &office_target);
    show(&user, &Action::delete(), &home_target);
    println!();

    // Undetermined is resolved by the application, here deny-by-default
    let can_delete = user.can(&Action::delete(), &home_target).or_deny();
    println!("   delete allowed at the boundary: {can_delete}\n");

    // ========================================================================
    // Persistence
    // ========================================================================
    println!("4. Persisting and reloading...");
    let toml = user.to_toml()?;
    println!("{}", toml.lines().map(|l| format!("   {l}")).collect::<Vec<_>>().join("\n"));

    let reloaded = PermissionSet::from_toml(&toml)?;
    for (action, target) in [
        (Action::update(), &office_target),
        (Action::share(), &home_target),
        (Action::delete(), &home_target),
    ] {
        assert_eq!(reloaded.can(&action, target), user.can(&action, target));
    }
    assert_eq!(
        reloaded.can(&Action::update(), &office_target),
        Decision::Deny
    );
    println!("\n   Reloaded set resolves identically");

    Ok(())
}

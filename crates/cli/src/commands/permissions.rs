use super::{load, Format};
use colored::*;
use core_permission::{Action, ActionKind, Decision, Rule, Target};
use std::fs;
use std::process::ExitCode;

pub fn check(file_path: &str) -> anyhow::Result<()> {
    println!("{} {}", "Checking permissions:".bold(), file_path);

    let (set, format) = load(file_path)?;

    println!("  {} Format: {:?}", "✓".green(), format);
    println!("  {} Authorizations: {}", "✓".green(), set.authorizations().len());
    println!("  {} Unauthorizations: {}", "✓".green(), set.unauthorizations().len());

    let mut warnings = 0;

    // A kind both granted and denied is legal, but deny always wins where both apply
    for denied in set.unauthorizations() {
        if set.authorizations().contains(denied) {
            println!(
                "  {} '{}' is both authorized and unauthorized",
                "⚠".yellow(),
                denied.kind()
            );
            warnings += 1;
        }
    }

    if set.unauthorizations().iter().any(|a| a.kind() == &ActionKind::Manage) {
        println!(
            "  {} An unauthorized 'manage' rule denies every action it applies to",
            "⚠".yellow()
        );
        warnings += 1;
    }

    if set.is_empty() {
        println!("  {} No rules: every query is undetermined", "⚠".yellow());
        warnings += 1;
    }

    println!();
    if warnings == 0 {
        println!("{} Permission set is valid!", "✓".green().bold());
    } else {
        println!(
            "{} Permission set is valid with {} warning(s)",
            "⚠".yellow().bold(),
            warnings
        );
    }

    Ok(())
}

pub fn can(file_path: &str, action: &str, target: &str, explain: bool) -> anyhow::Result<Decision> {
    let (set, _) = load(file_path)?;

    let kind: ActionKind = action
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid action: {}", e))?;
    let target: Target = target
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid target: {}", e))?;
    let requested = Action::new(kind);

    let evaluation = set.evaluate(&requested, &target);
    let label = match evaluation.decision {
        Decision::Allow => "allow".green().bold(),
        Decision::Deny => "deny".red().bold(),
        Decision::Undetermined => "undetermined".yellow().bold(),
    };
    println!("{}", label);

    if explain {
        match evaluation.rule {
            Some(Rule::Authorized(i)) => {
                println!("  authorized[{}]: {}", i, set.authorizations()[i]);
            }
            Some(Rule::Unauthorized(i)) => {
                println!("  unauthorized[{}]: {}", i, set.unauthorizations()[i]);
            }
            None if evaluation.decision.is_denied() => {
                println!("  rules of this kind exist, none applies to {}", target);
            }
            None => println!("  no rule of this kind"),
        }
    }

    Ok(evaluation.decision)
}

pub fn convert(file_path: &str, to: Format, output: Option<&str>) -> anyhow::Result<()> {
    let (set, from) = load(file_path)?;

    let rendered = match to {
        Format::Toml => set.to_toml(),
        Format::Json => set.to_json_pretty(),
    }
    .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
    tracing::debug!(?from, ?to, rules = set.len(), "converted permission set");

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .map_err(|e| anyhow::anyhow!("Failed to write file: {}", e))?;
            eprintln!("{} Wrote {}", "✓".green(), path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Maps a decision onto the process exit status; 1 stays reserved for errors
pub fn exit_status(decision: Decision) -> u8 {
    match decision {
        Decision::Allow => 0,
        Decision::Deny => 2,
        Decision::Undetermined => 3,
    }
}

pub fn exit_code(decision: Decision) -> ExitCode {
    ExitCode::from(exit_status(decision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_permission::PermissionSet;
    use tempfile::TempDir;

    const ADDRESS_BOOK: &str = r#"
[[authorized]]
kind = "update"
subjects = [{ type = "Address" }]

[[unauthorized]]
kind = "update"
subjects = [{ type = "Address", instance = "2" }]

[[authorized]]
kind = { custom = "approve" }
"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_exit_status_per_decision() {
        assert_eq!(exit_status(Decision::Allow), 0);
        assert_eq!(exit_status(Decision::Deny), 2);
        assert_eq!(exit_status(Decision::Undetermined), 3);
    }

    #[test]
    fn test_can_resolves_each_decision() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(&dir, "perms.toml", ADDRESS_BOOK);

        assert_eq!(can(&file, "update", "Address#1", false).unwrap(), Decision::Allow);
        assert_eq!(can(&file, "UPDATE", "Address#2", true).unwrap(), Decision::Deny);
        assert_eq!(can(&file, "delete", "Address#1", true).unwrap(), Decision::Undetermined);
        assert_eq!(can(&file, "custom:approve", "Invoice", false).unwrap(), Decision::Allow);
    }

    #[test]
    fn test_can_rejects_bad_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(&dir, "perms.toml", ADDRESS_BOOK);

        let err = can(&file, "approve", "Address", false).unwrap_err();
        assert!(err.to_string().starts_with("Invalid action"), "{err}");

        let err = can(&file, "read", "Address#", false).unwrap_err();
        assert!(err.to_string().starts_with("Invalid target"), "{err}");
    }

    #[test]
    fn test_convert_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let source = write(&dir, "perms.toml", ADDRESS_BOOK);
        let json = dir.path().join("perms.json").to_string_lossy().into_owned();

        convert(&source, Format::Json, Some(&json)).unwrap();
        let converted = PermissionSet::from_json(&fs::read_to_string(&json).unwrap()).unwrap();
        let original = PermissionSet::from_toml(ADDRESS_BOOK).unwrap();

        assert_eq!(converted.authorizations().len(), 2);
        assert_eq!(converted.unauthorizations().len(), 1);
        for target in ["Address", "Address#1", "Address#2", "Invoice"] {
            let target: Target = target.parse().unwrap();
            for kind in ["update", "delete", "custom:approve"] {
                let action = Action::new(kind.parse().unwrap());
                assert_eq!(converted.can(&action, &target), original.can(&action, &target));
            }
        }

        // And back, picking JSON from the extension
        let toml = dir.path().join("back.toml").to_string_lossy().into_owned();
        convert(&json, Format::Toml, Some(&toml)).unwrap();
        let back = PermissionSet::from_toml(&fs::read_to_string(&toml).unwrap()).unwrap();
        assert_eq!(back.len(), original.len());
    }

    #[test]
    fn test_check_accepts_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(&dir, "perms.toml", ADDRESS_BOOK);
        assert!(check(&file).is_ok());

        let bad = write(&dir, "bad.json", r#"{ "authorised": [] }"#);
        assert!(check(&bad).is_err());
    }
}

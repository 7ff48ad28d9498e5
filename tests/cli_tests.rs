//! CLI parsing and config template tests

use clap::Parser;
use coursepad::cli::{Cli, Commands, OutputFormat};
use coursepad::config::{loader, Config};

#[test]
fn test_default_config_template_parses() {
    let content = loader::default_config_content();
    let config: Config = toml::from_str(&content.replace("${COURSEPAD_BCRYPT_COST:-12}", "12"))
        .expect("Template should parse");
    assert_eq!(config.auth.password.bcrypt_cost, 12);
    assert_eq!(config.auth.session_ttl_secs, 86_400);
}

#[test]
fn test_parse_demo_format() {
    let cli = Cli::try_parse_from(["coursepad", "demo", "--format", "json"]).expect("Should parse");
    assert!(matches!(
        cli.command,
        Commands::Demo {
            format: OutputFormat::Json
        }
    ));
}

#[test]
fn test_parse_hash_password_legacy() {
    let cli = Cli::try_parse_from(["coursepad", "hash-password", "Passw0rd", "--legacy"])
        .expect("Should parse");
    match cli.command {
        Commands::HashPassword { password, legacy } => {
            assert_eq!(password.as_deref(), Some("Passw0rd"));
            assert!(legacy);
        }
        _ => panic!("Expected hash-password"),
    }
}

#[test]
fn test_verify_password_requires_hash() {
    assert!(Cli::try_parse_from(["coursepad", "verify-password", "Passw0rd"]).is_err());
}

#[test]
fn test_unknown_format_rejected() {
    assert!(Cli::try_parse_from(["coursepad", "demo", "--format", "xml"]).is_err());
}

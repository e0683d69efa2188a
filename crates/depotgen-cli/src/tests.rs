use clap::Parser;

use super::*;

#[test]
fn parses_depots_with_multiple_ids() {
    let cli = Cli::try_parse_from(["depotgen-cli", "depots", "730", "440"])
        .expect("expected valid cli args");

    let Commands::Depots {
        app_ids,
        concurrency,
        source,
    } = cli.command
    else {
        panic!("expected depots command");
    };
    assert_eq!(app_ids, vec!["730".to_string(), "440".to_string()]);
    assert_eq!(concurrency, 4);
    assert!(!source.base_url.is_empty());
}

#[test]
fn depots_requires_an_app_id() {
    assert!(Cli::try_parse_from(["depotgen-cli", "depots"]).is_err());
}

#[test]
fn parses_generate_with_optional_fields() {
    let cli = Cli::try_parse_from([
        "depotgen-cli",
        "generate",
        "--app-id",
        "730",
        "--depot-id",
        "731",
        "--out",
        "/tmp/pkg.zip",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Generate {
            ref app_id,
            ref depot_id,
            manifest_id: None,
            out: Some(_),
        } if app_id == "730" && depot_id == "731"
    ));
}

#[test]
fn generate_requires_depot_id() {
    assert!(Cli::try_parse_from(["depotgen-cli", "generate", "--app-id", "730"]).is_err());
}

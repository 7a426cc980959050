use super::*;
use clap::{CommandFactory, Parser};

#[test]
fn verify_cli_args() {
    Cli::command().debug_assert();
}

#[test]
fn test_lineage_defaults() {
    let cli = Cli::try_parse_from(["lmap", "lineage"]).unwrap();
    match cli.command {
        Commands::Lineage(args) => {
            assert!(args.format.is_none());
            assert_eq!(args.direction, LineageDirectionArg::Both);
            assert!(!args.no_write);
            assert!(!args.fail_on_skip);
        }
        other => panic!("unexpected command {other:?}"),
    }
    assert!(!cli.global.verbose);
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "lmap", "lineage", "-v", "-c", "cfg/lineage.yml", "-f", "json", "-m", "t1", "-d",
        "upstream",
    ])
    .unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.config.as_deref(), Some("cfg/lineage.yml"));
    let Commands::Lineage(args) = cli.command else {
        panic!("expected lineage");
    };
    assert_eq!(args.format, Some(LineageFormat::Json));
    assert_eq!(args.model.as_deref(), Some("t1"));
    assert_eq!(args.direction, LineageDirectionArg::Upstream);
}

#[test]
fn test_render_requires_input() {
    assert!(Cli::try_parse_from(["lmap", "render"]).is_err());
    assert!(Cli::try_parse_from(["lmap", "render", "-i", "lineage.md"]).is_ok());
}

#[test]
fn test_parse_output_values() {
    let cli = Cli::try_parse_from(["lmap", "parse", "--output", "json"]).unwrap();
    let Commands::Parse(args) = cli.command else {
        panic!("expected parse");
    };
    assert_eq!(args.output, ParseOutput::Json);
    assert!(Cli::try_parse_from(["lmap", "parse", "--output", "xml"]).is_err());
}

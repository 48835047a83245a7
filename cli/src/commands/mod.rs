pub mod init;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stratus",
    author,
    version,
    about = "Stratus - command line for the Stratus cloud",
    long_about = "Manage Stratus cloud resources from the terminal.\n\nRun `stratus init` once to \
                  store credentials and defaults in the local config."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Initialize the active profile (credentials, zone, organization)")]
    Init(init::InitArgs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_init_with_flags() {
        let cli = Cli::try_parse_from([
            "stratus",
            "init",
            "--secret-key",
            "11111111-2222-3333-4444-555555555555",
            "--zone",
            "nl-ams-1",
            "--send-usage",
            "false"
        ])
        .unwrap();

        let Commands::Init(args) = cli.command;
        assert_eq!(
            args.secret_key.as_deref(),
            Some("11111111-2222-3333-4444-555555555555")
        );
        assert_eq!(args.zone.unwrap().as_str(), "nl-ams-1");
        assert_eq!(args.send_usage, Some(false));
    }

    #[test]
    fn test_parse_rejects_malformed_secret_key() {
        let result = Cli::try_parse_from(["stratus", "init", "--secret-key", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_zone() {
        let result = Cli::try_parse_from(["stratus", "init", "--zone", "paris"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_organization_id() {
        let result = Cli::try_parse_from(["stratus", "init", "--organization-id", "acme"]);
        assert!(result.is_err());
    }
}

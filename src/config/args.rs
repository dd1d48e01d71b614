//! Command-line argument parsing

use clap::{Parser, Subcommand};

use super::DEFAULT_CONFIG_PATH;

#[derive(Debug, Parser)]
#[command(name = "ttlinker", version, about = "In-memory URL shortener with expiring aliases")]
pub struct CliArgs {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Write a sample configuration file and exit
    GenerateConfig {
        #[arg(short, long, default_value = "config.example.toml")]
        output: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_server_mode() {
        let args = CliArgs::try_parse_from(["ttlinker"]).unwrap();
        assert_eq!(args.config, DEFAULT_CONFIG_PATH);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_custom_config_path() {
        let args = CliArgs::try_parse_from(["ttlinker", "-c", "custom.toml"]).unwrap();
        assert_eq!(args.config, "custom.toml");

        let args = CliArgs::try_parse_from(["ttlinker", "--config=other.toml"]).unwrap();
        assert_eq!(args.config, "other.toml");
    }

    #[test]
    fn test_generate_config_subcommand() {
        let args =
            CliArgs::try_parse_from(["ttlinker", "generate-config", "-o", "out.toml"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::GenerateConfig {
                output: "out.toml".to_string()
            })
        );
    }
}

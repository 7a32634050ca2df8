//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through the environment (a `.env`
//! file in the working directory is loaded first).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DATABASE_PATH: &str = "attrbase.sqlite3";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Attribute registry server and maintenance commands.
#[derive(Parser, Debug)]
#[command(name = "attrbase", version, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, env = "DATABASE_PATH", default_value = DEFAULT_DATABASE_PATH)]
    pub database: PathBuf,

    /// trace|debug|info|warn|error. Defaults to debug in debug builds, info otherwise.
    #[arg(long, global = true, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotated log files. Logs go to stderr when unset.
    #[arg(long, global = true, env = "LOG_DIR")]
    pub log_dir: Option<String>,

    /// Server options used when no subcommand is given.
    #[command(flatten)]
    pub serve: ServeArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API (default).
    Serve(ServeArgs),
    /// Create attributes from comma, semicolon or newline separated text.
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Print attributes, optionally filtered or sampled.
    List {
        #[arg(long)]
        search: Option<String>,
        /// Random sample size; 0 lists everything.
        #[arg(long, default_value_t = 0)]
        limit: usize,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Browser origin allowed by CORS.
    #[arg(long, env = "CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,
}

impl Cli {
    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(attrbase_core::default_log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, ServeArgs};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_collects_every_argument() {
        let cli = Cli::try_parse_from(["attrbase", "add", "Color, Size", "Brand"]).unwrap();
        match cli.command {
            Some(Command::Add { text }) => assert_eq!(text, vec!["Color, Size", "Brand"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "attrbase",
            "serve",
            "--port",
            "8080",
            "--cors-origin",
            "https://example.com",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(
                args,
                ServeArgs {
                    port: 8080,
                    cors_origin: "https://example.com".to_string(),
                }
            ),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bare_command_reads_server_options_from_env() {
        std::env::set_var("PORT", "5555");
        std::env::set_var("CORS_ORIGIN", "https://admin.example.com");
        let bare = Cli::try_parse_from(["attrbase"]);
        let explicit = Cli::try_parse_from(["attrbase", "serve"]);
        std::env::remove_var("PORT");
        std::env::remove_var("CORS_ORIGIN");

        let bare = bare.unwrap();
        assert!(bare.command.is_none());
        assert_eq!(
            bare.serve,
            ServeArgs {
                port: 5555,
                cors_origin: "https://admin.example.com".to_string(),
            }
        );
        match explicit.unwrap().command {
            Some(Command::Serve(args)) => assert_eq!(args, bare.serve),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn bare_command_accepts_server_flags() {
        let cli = Cli::try_parse_from(["attrbase", "--port", "9090"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, 9090);
    }

    #[test]
    fn server_flags_before_subcommand_are_rejected() {
        assert!(Cli::try_parse_from(["attrbase", "--port", "9090", "list"]).is_err());
    }

    #[test]
    fn list_accepts_global_database_after_subcommand() {
        let cli = Cli::try_parse_from(["attrbase", "list", "--limit", "3", "--database", "x.db"])
            .unwrap();
        assert_eq!(cli.database.to_str(), Some("x.db"));
        assert!(matches!(cli.command, Some(Command::List { limit: 3, .. })));
    }
}

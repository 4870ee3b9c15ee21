use crate::models::Dataset;
use crate::sanitize::{recover_partial, sanitize_or_fallback};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "dashboard-data")]
#[command(about = "Validate, sanitize and health-check intranet dashboard datasets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug diagnostics (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors (overridden by RUST_LOG)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Strictly validate fixtures, failing on the first violation
    #[command(visible_alias = "check")]
    Validate {
        /// Fixture file or directory of *.json fixtures
        path: String,

        /// Report every violation instead of only the first
        #[arg(long)]
        all: bool,
    },

    /// Print the sanitized dataset as JSON
    Sanitize {
        /// Fixture file or directory of *.json fixtures
        path: String,

        /// How to handle invalid input
        #[arg(short, long, value_enum, default_value = "recover")]
        mode: SanitizeMode,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Report content health after sanitizing
    Health {
        /// Fixture file or directory of *.json fixtures
        path: String,

        /// How to handle invalid input
        #[arg(short, long, value_enum, default_value = "recover")]
        mode: SanitizeMode,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Show totals across all fixtures
        #[arg(long)]
        summary: bool,
    },

    /// Print the validation summary of each fixture
    Summary {
        /// Fixture file or directory of *.json fixtures
        path: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum SanitizeMode {
    /// Replace the whole dataset with defaults on any violation
    Fallback,
    /// Keep every field and item that passes on its own
    Recover,
}

impl SanitizeMode {
    pub fn apply(&self, data: &Value) -> Dataset {
        match self {
            SanitizeMode::Fallback => sanitize_or_fallback(data),
            SanitizeMode::Recover => recover_partial(data),
        }
    }
}

#[derive(Debug, Clone, ValueEnum, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_health_defaults() {
        let cli = Cli::try_parse_from(["dashboard-data", "health", "fixtures"]).unwrap();
        match cli.command {
            Commands::Health {
                path,
                mode,
                format,
                summary,
            } => {
                assert_eq!(path, "fixtures");
                assert_eq!(mode, SanitizeMode::Recover);
                assert_eq!(format, OutputFormat::Table);
                assert!(!summary);
            }
            other => panic!("Expected Health, got {:?}", other),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["dashboard-data", "-v", "-q", "summary", "x.json"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dashboard-data", "validate", "x.json", "--all", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Validate { all: true, .. }));
    }

    #[test]
    fn test_sanitize_modes() {
        let data = json!({ "news": [], "events": "oops" });
        assert_eq!(SanitizeMode::Fallback.apply(&data).counts().total(), 0);
        assert_eq!(
            SanitizeMode::Recover.apply(&data).current_user.id,
            "fallback-user"
        );
    }
}

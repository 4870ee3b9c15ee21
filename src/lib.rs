pub mod checks;
pub mod cli;
pub mod error;
pub mod formatters;
pub mod health;
pub mod loader;
pub mod logging;
pub mod models;
pub mod sanitize;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{LoadError, ValidationError};
pub use formatters::summarize;
pub use health::{health_of, HealthReport, HealthStatus};
pub use models::{fallback_dataset, Dataset};
pub use sanitize::{recover_partial, sanitize_or_fallback};
pub use validator::{all_violations, first_violation, is_structurally_valid, validate_or_throw, Violation};

use anyhow::{Context, Result};
use cli::{Cli, Commands, OutputFormat, SanitizeMode};
use colored::Colorize;
use formatters::FixtureReport;
use loader::{FixtureLoader, LoadedFixture};
use serde_json::{Map, Value};

/// Runs one CLI command. Returns `false` when any fixture failed strict
/// validation, so the binary can exit non-zero.
pub fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Validate { path, all } => {
            let (loader, fixtures) = load(&path)?;
            Ok(validate_fixtures(&loader, &fixtures, all))
        }
        Commands::Sanitize { path, mode, pretty } => {
            let (loader, fixtures) = load(&path)?;
            println!("{}", sanitize_fixtures(&loader, &fixtures, mode, pretty)?);
            Ok(true)
        }
        Commands::Health {
            path,
            mode,
            format,
            summary,
        } => {
            let (loader, fixtures) = load(&path)?;
            let reports = health_reports(&loader, &fixtures, mode);

            match format {
                OutputFormat::Table => println!("{}", formatters::format_table(&reports)),
                OutputFormat::Json => println!("{}", formatters::format_json(&reports)?),
                OutputFormat::Csv => print!("{}", formatters::format_csv(&reports)?),
                OutputFormat::Markdown => println!("{}", formatters::format_markdown(&reports)),
            }

            if summary {
                formatters::print_summary(&reports);
            }
            Ok(true)
        }
        Commands::Summary { path } => {
            let (loader, fixtures) = load(&path)?;
            let many = fixtures.len() > 1;
            for fixture in &fixtures {
                if many {
                    println!("{}", format!("== {} ==", fixture.display_name(loader.root())).bold());
                }
                println!("{}", summarize(&fixture.data));
            }
            Ok(true)
        }
    }
}

fn load(path: &str) -> Result<(FixtureLoader, Vec<LoadedFixture>)> {
    let loader = FixtureLoader::new(path);
    let fixtures = loader
        .load()
        .with_context(|| format!("Failed to load fixtures from {}", path))?;

    if fixtures.is_empty() {
        anyhow::bail!("No fixtures found at: {}", loader.root().display());
    }
    Ok((loader, fixtures))
}

fn validate_fixtures(loader: &FixtureLoader, fixtures: &[LoadedFixture], all: bool) -> bool {
    let mut passed = 0usize;

    for fixture in fixtures {
        let name = fixture.display_name(loader.root());
        let violations = if all {
            all_violations(&fixture.data)
        } else {
            first_violation(&fixture.data).into_iter().collect()
        };

        if violations.is_empty() {
            passed += 1;
            println!("{} {}", "✓".green().bold(), name);
        } else {
            print!("{}", formatters::format_violations(&name, &violations));
        }
    }

    println!("\n{}/{} fixtures valid", passed, fixtures.len());
    passed == fixtures.len()
}

fn sanitize_fixtures(
    loader: &FixtureLoader,
    fixtures: &[LoadedFixture],
    mode: SanitizeMode,
    pretty: bool,
) -> Result<String> {
    let output = if let [fixture] = fixtures {
        serde_json::to_value(mode.apply(&fixture.data))?
    } else {
        let mut by_name = Map::new();
        for fixture in fixtures {
            by_name.insert(
                fixture.display_name(loader.root()),
                serde_json::to_value(mode.apply(&fixture.data))?,
            );
        }
        Value::Object(by_name)
    };

    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(json)
}

fn health_reports(loader: &FixtureLoader, fixtures: &[LoadedFixture], mode: SanitizeMode) -> Vec<FixtureReport> {
    fixtures
        .iter()
        .map(|fixture| {
            let dataset = mode.apply(&fixture.data);
            FixtureReport {
                source: fixture.display_name(loader.root()),
                user: dataset.current_user.name.clone(),
                counts: dataset.counts(),
                health: health_of(&dataset),
            }
        })
        .collect()
}

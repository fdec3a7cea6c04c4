//! bmx - end-to-end verification harness for the Beta Max front-end
//!
//! Usage:
//!   bmx run                      Run the builtin suite
//!   bmx run --scenario login     Run selected scenarios
//!   bmx run --suite suite.json   Run a suite loaded from JSON
//!   bmx list                     List available scenarios
//!   bmx init                     Write a default bmx.toml
//!
//! Exit code 0 means every scenario passed; anything else is nonzero.

use anyhow::{bail, Context, Result};
use bmx_browser::{BrowserConfig, ChromeSessionProvider};
use bmx_core::{load_suite, HarnessConfig, Scenario};
use bmx_runner::{report, SuiteRunner};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod suite;

#[derive(Parser)]
#[command(name = "bmx")]
#[command(author, version, about = "End-to-end verification harness for the Beta Max front-end")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file
    #[arg(long, value_name = "FILE", default_value = "bmx.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the suite against a running target application
    Run {
        /// Load scenarios from a JSON file instead of the builtin suite
        #[arg(long, value_name = "FILE")]
        suite: Option<PathBuf>,

        /// Run only the named scenarios (repeatable)
        #[arg(long = "scenario", value_name = "NAME")]
        scenarios: Vec<String>,

        /// Override the configured base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Run with a visible browser window
        #[arg(long)]
        headed: bool,

        /// Override the configured artifacts directory
        #[arg(long, value_name = "DIR")]
        artifacts_dir: Option<PathBuf>,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List available scenarios
    List {
        /// List a JSON suite file instead of the builtin suite
        #[arg(long, value_name = "FILE")]
        suite: Option<PathBuf>,
    },

    /// Write the default configuration file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run {
            suite,
            scenarios,
            base_url,
            headed,
            artifacts_dir,
            json,
        } => {
            cmd_run(
                &cli.config,
                suite,
                scenarios,
                base_url,
                headed,
                artifacts_dir,
                json,
            )
            .await
        }
        Commands::List { suite } => cmd_list(&cli.config, suite),
        Commands::Init => cmd_init(&cli.config),
    }
}

#[allow(clippy::too_many_arguments)]
async fn cmd_run(
    config_path: &PathBuf,
    suite_file: Option<PathBuf>,
    selected: Vec<String>,
    base_url: Option<String>,
    headed: bool,
    artifacts_dir: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut config = HarnessConfig::load_or_default(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    // CLI flags win over file values
    if let Some(url) = base_url {
        config.base_url = url;
    }
    if headed {
        config.headless = false;
    }
    if let Some(dir) = artifacts_dir {
        config.artifacts_dir = dir;
    }

    let suite = resolve_suite(&config, suite_file, &selected)?;
    info!(
        "Running {} scenario(s) against {}",
        suite.len(),
        config.base_url
    );

    let provider = ChromeSessionProvider::new(BrowserConfig {
        headless: config.headless,
        ..BrowserConfig::default()
    });
    let runner = SuiteRunner::new(provider, config);
    let suite_report = runner.run(&suite).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&suite_report)?);
    } else {
        print!("{}", report::render(&suite_report));
    }

    std::process::exit(suite_report.exit_code());
}

fn cmd_list(config_path: &PathBuf, suite_file: Option<PathBuf>) -> Result<()> {
    let config = HarnessConfig::load_or_default(config_path)?;
    let suite = resolve_suite(&config, suite_file, &[])?;

    for scenario in &suite {
        println!(
            "{:<18} {:>2} steps  {}",
            scenario.name,
            scenario.steps.len(),
            scenario.description
        );
    }
    Ok(())
}

fn cmd_init(config_path: &PathBuf) -> Result<()> {
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }
    HarnessConfig::write_default(config_path)
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    println!("Wrote {}", config_path.display());
    Ok(())
}

/// Builtin or file-loaded suite, filtered to the selected names
fn resolve_suite(
    config: &HarnessConfig,
    suite_file: Option<PathBuf>,
    selected: &[String],
) -> Result<Vec<Scenario>> {
    let all = match suite_file {
        Some(path) => {
            load_suite(&path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => suite::builtin_suite(config),
    };

    if selected.is_empty() {
        return Ok(all);
    }

    let mut picked = Vec::new();
    for name in selected {
        match all.iter().find(|s| &s.name == name) {
            Some(scenario) => picked.push(scenario.clone()),
            None => {
                let available: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
                bail!(
                    "unknown scenario '{}' (available: {})",
                    name,
                    available.join(", ")
                );
            }
        }
    }
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_suite_filters_by_name() {
        let config = HarnessConfig::default();
        let picked = resolve_suite(
            &config,
            None,
            &["login".to_string(), "version-sync".to_string()],
        )
        .unwrap();

        let names: Vec<&str> = picked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["login", "version-sync"]);
    }

    #[test]
    fn test_resolve_suite_rejects_unknown_name() {
        let config = HarnessConfig::default();
        let err = resolve_suite(&config, None, &["nope".to_string()]).unwrap_err();
        assert!(err.to_string().contains("unknown scenario 'nope'"));
        assert!(err.to_string().contains("login"));
    }
}

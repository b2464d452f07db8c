use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use compatgen_core::{ChainSide, CompatibilityDescriptor, Config, RelayerType};
use compatgen_extract::SourceFile;
use compatgen_releases::{compatible_releases, FileReleases, GitHubReleases, ReleaseSource};

/// Default config file looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "compatgen.toml";

/// compatgen - Generate the compatibility test matrix for a CI workflow
///
/// Prints a single JSON line (no trailing newline) describing which release
/// versions run on each chain, the suite entry point and the tests to run.
#[derive(Parser)]
#[command(name = "compatgen")]
#[command(author, about, long_about = None)]
struct Cli {
    /// The test file to look at
    #[arg(long)]
    file: PathBuf,

    /// The version to run tests for (annotation match and release reference)
    #[arg(long)]
    version: String,

    /// The release tag pinned on the selected chain
    #[arg(long = "release_version")]
    release_version: String,

    /// Which chain is pinned to the release tag
    #[arg(long, default_value = "chain-a")]
    chain: ChainSide,

    /// Relayer the suite runs with
    #[arg(long, default_value = "hermes")]
    relayer: RelayerType,

    /// Path to config file (default: compatgen.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read the releases listing from a JSON file instead of the network
    #[arg(long)]
    releases_file: Option<PathBuf>,

    /// Print progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the descriptor
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    // A .env file may carry the API token for local runs
    dotenvy::dotenv().ok();

    let config = load_config(cli.config.as_deref(), cli.verbose)?;
    let descriptor = build_descriptor(&cli, &config)?;

    descriptor
        .write_to(std::io::stdout().lock())
        .context("Failed to write descriptor to stdout")?;

    if cli.verbose {
        eprintln!();
        eprintln!(
            "{} {} test(s), {} release(s) on the {} side",
            "Generated descriptor:".green(),
            descriptor.test.len(),
            compatible_side_len(&descriptor, cli.chain),
            other_side(cli.chain),
        );
    }

    Ok(())
}

/// Load `--config`, else `compatgen.toml` in the working directory, else defaults
fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return Config::from_file(default_path)
            .with_context(|| format!("Failed to load config from {}", default_path.display()));
    }

    if verbose {
        eprintln!("{}", "No config file found, using defaults".yellow());
    }
    Ok(Config::default())
}

/// Extract, fetch, filter and assemble. Nothing is printed on failure.
fn build_descriptor(cli: &Cli, config: &Config) -> Result<CompatibilityDescriptor> {
    if cli.verbose {
        eprintln!("{} {}", "Reading test file:".cyan(), cli.file.display());
    }

    let source = SourceFile::from_file(&cli.file)?;
    let extraction = compatgen_extract::extract(&source, &cli.version, &config.annotations)
        .with_context(|| format!("Failed to extract tests from {}", cli.file.display()))?;

    if cli.verbose {
        eprintln!(
            "  {} {} ({} test(s) annotated for {})",
            "Suite".cyan(),
            extraction.suite_name,
            extraction.test_functions.len(),
            cli.version
        );
    }

    let release_source: Box<dyn ReleaseSource> = match &cli.releases_file {
        Some(path) => Box::new(FileReleases::new(path)),
        None => Box::new(GitHubReleases::from_config(&config.releases)),
    };

    if cli.verbose {
        eprintln!("{} {}...", "Fetching releases from".cyan(), release_source_label(cli, config));
    }

    let releases = compatible_releases(release_source.as_ref(), &cli.version)
        .context("Failed to determine compatible releases")?;

    tracing::info!(
        suite = %extraction.suite_name,
        tests = extraction.test_functions.len(),
        releases = releases.len(),
        chain = %cli.chain,
        "assembling compatibility descriptor"
    );

    Ok(CompatibilityDescriptor::assemble(
        cli.release_version.clone(),
        releases,
        cli.chain,
        extraction.suite_name,
        extraction.test_functions,
        cli.relayer,
    ))
}

fn release_source_label(cli: &Cli, config: &Config) -> String {
    match &cli.releases_file {
        Some(path) => path.display().to_string(),
        None => config.releases.url.clone(),
    }
}

/// Number of compatible releases, i.e. the side that was not pinned
fn compatible_side_len(descriptor: &CompatibilityDescriptor, chain: ChainSide) -> usize {
    match chain {
        ChainSide::ChainA => descriptor.chain_b.len(),
        ChainSide::ChainB => descriptor.chain_a.len(),
    }
}

fn other_side(chain: ChainSide) -> ChainSide {
    match chain {
        ChainSide::ChainA => ChainSide::ChainB,
        ChainSide::ChainB => ChainSide::ChainA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_select_chain_a_and_hermes() {
        let cli = Cli::try_parse_from([
            "compatgen",
            "--file",
            "e2e/tests/transfer/base_test.go",
            "--version",
            "v7.3.0",
            "--release_version",
            "v7.3.0",
        ])
        .unwrap();

        assert_eq!(cli.chain, ChainSide::ChainA);
        assert_eq!(cli.relayer, RelayerType::Hermes);
        assert!(cli.releases_file.is_none());
    }

    #[test]
    fn chain_b_and_rly_are_selectable() {
        let cli = Cli::try_parse_from([
            "compatgen",
            "--file",
            "base_test.go",
            "--version",
            "v7.3.0",
            "--release_version",
            "v8.0.0",
            "--chain",
            "chain-b",
            "--relayer",
            "rly",
        ])
        .unwrap();

        assert_eq!(cli.chain, ChainSide::ChainB);
        assert_eq!(cli.relayer, RelayerType::Rly);
        assert_eq!(other_side(cli.chain), ChainSide::ChainA);
    }

    #[test]
    fn unknown_chain_rejected() {
        let result = Cli::try_parse_from([
            "compatgen",
            "--file",
            "base_test.go",
            "--version",
            "v7.3.0",
            "--release_version",
            "v8.0.0",
            "--chain",
            "chain-c",
        ]);

        let err = result.err().unwrap().to_string();
        assert!(err.contains("Unknown chain 'chain-c'"), "{err}");
    }

    #[test]
    fn unknown_relayer_rejected() {
        let result = Cli::try_parse_from([
            "compatgen",
            "--file",
            "base_test.go",
            "--version",
            "v7.3.0",
            "--release_version",
            "v8.0.0",
            "--relayer",
            "go-relayer",
        ]);

        let err = result.err().unwrap().to_string();
        assert!(err.contains("Unknown relayer 'go-relayer'"), "{err}");
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/compatgen.toml")), false).is_err());
    }
}

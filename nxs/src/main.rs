use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod context;
mod format;
mod version;

use commands::search::SearchArgs;
use context::{AppContext, Overrides, VerbosityLevel};

/// nxs - Nexus Docker image search
///
/// Searches a Nexus Docker repository for images matching name patterns and
/// reports the `latest` tag plus the two highest versions of each image.
#[derive(Parser, Debug)]
#[command(name = "nxs")]
#[command(about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Image name patterns to search for (e.g. "team/*")
    #[arg(required_unless_present_any = ["completions", "version", "init_config", "input"])]
    patterns: Vec<String>,

    /// Filter records saved by an earlier `--raw -f json` run instead of searching
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["patterns", "raw"])]
    input: Option<PathBuf>,

    /// Nexus server URL
    #[arg(long, env = "NXS_URL")]
    url: Option<String>,

    /// Docker repository to search
    #[arg(long, env = "NXS_REPOSITORY")]
    repository: Option<String>,

    /// Username for Basic authentication
    #[arg(long, env = "NXS_USERNAME")]
    username: Option<String>,

    /// Password for Basic authentication (prompted for when omitted on a terminal)
    #[arg(long, env = "NXS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Verify TLS certificates: true, false
    #[arg(long, env = "NXS_VERIFY_SSL", value_name = "BOOL")]
    verify_ssl: Option<bool>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Output the deduplicated search records instead of filtered tags
    #[arg(long)]
    raw: bool,

    /// Images left without tags after filtering: keep, omit
    #[arg(long, value_parser = ["keep", "omit"])]
    empty_groups: Option<String>,

    /// Output format: json, yaml, pretty
    #[arg(short, long, value_parser = ["json", "yaml", "pretty"])]
    format: Option<String>,

    /// Write results to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Control colored output: auto, always, never
    #[arg(long, value_parser = ["auto", "always", "never"])]
    color: Option<String>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,

    /// Write the resolved settings to the config file and exit
    #[arg(long)]
    init_config: bool,

    /// Display version information
    #[arg(short = 'V', long)]
    version: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            repository: self.repository.clone(),
            username: self.username.clone(),
            verify_ssl: self.verify_ssl,
            timeout: self.timeout,
            format: self.format.as_deref().map(format::OutputFormat::from),
            color: self.color.as_deref().map(format::ColorChoice::from),
            empty_groups: self.empty_groups.as_deref().and_then(|v| v.parse().ok()),
        }
    }
}

fn init_tracing(verbosity: VerbosityLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| verbosity.tracing_directive().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version::get_version_string());
        return;
    }

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        return;
    }

    let verbosity = VerbosityLevel::from_count(cli.verbose);
    init_tracing(verbosity);

    // Build context with precedence: defaults > config file > env vars > CLI flags
    let ctx = match AppContext::build(&cli.overrides(), verbosity) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.init_config {
        commands::handle_init_config(&ctx);
        return;
    }

    let args = SearchArgs {
        patterns: cli.patterns,
        input: cli.input,
        password: cli.password,
        raw: cli.raw,
        output: cli.output,
    };
    commands::search::handlers::handle_search(&ctx, &args).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_patterns_required_without_completions() {
        assert!(Cli::try_parse_from(["nxs"]).is_err());
        assert!(Cli::try_parse_from(["nxs", "--completions", "bash"]).is_ok());
        assert!(Cli::try_parse_from(["nxs", "--version"]).is_ok());
        assert!(Cli::try_parse_from(["nxs", "--init-config"]).is_ok());
    }

    #[test]
    fn test_cli_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "nxs",
            "--url",
            "https://nexus.example.com",
            "--verify-ssl",
            "false",
            "--empty-groups",
            "omit",
            "-f",
            "yaml",
            "-vv",
            "team/*",
            "other/*",
        ])
        .unwrap();

        assert_eq!(cli.patterns, vec!["team/*", "other/*"]);
        assert_eq!(cli.verbose, 2);

        let overrides = cli.overrides();
        assert_eq!(overrides.url.as_deref(), Some("https://nexus.example.com"));
        assert_eq!(overrides.verify_ssl, Some(false));
        assert_eq!(overrides.empty_groups, Some(libnxs::EmptyGroups::Omit));
        assert_eq!(overrides.format, Some(format::OutputFormat::Yaml));
        assert_eq!(overrides.color, None);
    }

    #[test]
    fn test_input_replaces_patterns() {
        let cli = Cli::try_parse_from(["nxs", "-i", "records.json", "-f", "pretty"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("records.json")));
        assert!(cli.patterns.is_empty());

        assert!(Cli::try_parse_from(["nxs", "--input", "records.json", "team/*"]).is_err());
        assert!(Cli::try_parse_from(["nxs", "--input", "records.json", "--raw"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["nxs", "-f", "xml", "x"]).is_err());
    }
}

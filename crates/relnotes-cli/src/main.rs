mod display;

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use relnotes_cms::config::{CMS_TOKEN_ENV, CMS_URL_ENV};
use relnotes_cms::{CmsConfig, CmsMode, ReleaseNotes};
use relnotes_core::ALL_SCOPES;
use relnotes_core::scope::is_known_scope;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "relnotes", version, about = "Release notes from the content backend")]
struct Cli {
    /// CMS base URL; without it (or the token) sample content is shown.
    #[arg(long, env = CMS_URL_ENV, global = true)]
    cms_url: Option<String>,

    /// CMS access token.
    #[arg(long, env = CMS_TOKEN_ENV, global = true, hide_env_values = true)]
    cms_token: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 5, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the current release.
    Latest {
        /// Only show sections for this project.
        #[arg(long, default_value = ALL_SCOPES)]
        scope: String,
    },
    /// Show a release by period key, e.g. 2025-W52.
    Show {
        key: String,
        #[arg(long, default_value = ALL_SCOPES)]
        scope: String,
    },
    /// List past releases.
    Archive,
    /// List the projects sections can be filtered by.
    Scopes,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("relnotes v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = CmsConfig::new(CmsMode::from_parts(cli.cms_url, cli.cms_token))
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let notes = ReleaseNotes::new(config)?;

    if let Command::Latest { scope } | Command::Show { scope, .. } = &cli.command
        && !is_known_scope(scope)
    {
        tracing::warn!(scope = %scope, "unknown scope, no sections will match");
    }

    let mut out = String::new();
    match cli.command {
        Command::Latest { scope } => match notes.latest_page(Some(&scope)).await {
            Some(page) => display::render_release_page(&mut out, &page, &scope)?,
            None => {
                display::render_not_found(&mut out, None)?;
                eprint!("{out}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Show { key, scope } => match notes.release_page(&key, Some(&scope)).await {
            Some(page) => display::render_release_page(&mut out, &page, &scope)?,
            None => {
                display::render_not_found(&mut out, Some(&key))?;
                eprint!("{out}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Archive => display::render_archive(&mut out, &notes.archive().await)?,
        Command::Scopes => display::render_scopes(&mut out)?,
    }
    print!("{out}");

    Ok(ExitCode::SUCCESS)
}

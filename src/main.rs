use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pkg_release::cli::{Orchestrator, ReleaseArgs};
use pkg_release::config;
use pkg_release::domain::{DistTag, ExecutionMode, VersionSpecifier};
use pkg_release::logging;
use pkg_release::toolchain::NpmToolchain;
use pkg_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "pkg-release",
    version,
    about = "Stage, version, and publish workspace packages to the npm registry"
)]
struct Args {
    #[arg(
        id = "release_version",
        value_name = "VERSION",
        default_value = "minor",
        help = "Release version (1.2.0, 1.2.0-beta.0) or bump keyword (major|minor|patch|premajor|preminor|prepatch|prerelease)"
    )]
    version: String,

    #[arg(long, help = "Report the publish command instead of running it")]
    dry_run: bool,

    #[arg(long, value_name = "REF", help = "Lower bound reference for changelog generation")]
    from: Option<String>,

    #[arg(long, default_value = "origin", help = "Remote the hosted release is created against")]
    git_remote: String,

    #[arg(long, value_name = "TAG", help = "Publish under this distribution tag instead of resolving one")]
    dist_tag: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init_tracing(args.verbose) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("loading configuration")?;

    let version: VersionSpecifier = args.version.parse()?;
    let dist_tag = args
        .dist_tag
        .as_deref()
        .map(str::parse::<DistTag>)
        .transpose()?;

    let mode = ExecutionMode::detect(&config.ci_env_var);
    tracing::debug!(%mode, marker = %config.ci_env_var, "execution mode detected");

    let release_args = ReleaseArgs {
        version,
        dry_run: args.dry_run,
        from: args.from,
        git_remote: args.git_remote,
        dist_tag,
    };

    let auth_token_present = std::env::var_os(&config.auth_token_env).is_some();

    let toolchain = NpmToolchain::from_config(&config);
    let mut orchestrator =
        Orchestrator::new(&config, mode, &toolchain).with_auth_token_present(auth_token_present);
    let outcome = orchestrator.run(&release_args)?;

    ui::display_outcome(&outcome);
    Ok(())
}

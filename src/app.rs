use std::path::PathBuf;

use crate::{
    config::{ApiConfig, TOKEN_ENV},
    helpers::get_pr_number_from_env,
    logger::init_local_logger,
    prelude::*,
    uploader::{UploadClient, UploadError, UploadOptions, UploadResult, prepare_upload_request},
};
use clap::{
    Args, Parser, Subcommand,
    builder::{Styles, styling},
};
use console::style;

fn create_styles() -> Styles {
    styling::Styles::styled()
        .header(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(styling::AnsiColor::Magenta.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::Cyan.on_default())
}

#[derive(Parser, Debug)]
#[command(version, about = "The Vizdiff CLI tool", styles = create_styles())]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a Storybook build to Vizdiff for visual comparison
    Upload(UploadArgs),
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// The Storybook build directory, usually `storybook-static`
    pub storybook_dir: PathBuf,

    /// The project token to authenticate the upload
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// The commit being tested, defaults to the checked out commit
    #[arg(long, env = "VIZDIFF_COMMIT_SHA")]
    pub commit: Option<String>,

    /// The branch being tested, defaults to the checked out branch
    #[arg(long, env = "VIZDIFF_BRANCH")]
    pub branch: Option<String>,

    /// The commit to compare against, defaults to the merge base with the base branch
    #[arg(long, env = "VIZDIFF_BASE_COMMIT_SHA")]
    pub base_commit: Option<String>,

    /// The branch to compare against, defaults to the default branch of `origin`
    #[arg(long, env = "VIZDIFF_BASE_BRANCH")]
    pub base_branch: Option<String>,

    /// The pull request number, detected on GitHub Actions
    #[arg(long, env = "VIZDIFF_PR_NUMBER")]
    pub pr_number: Option<u64>,
}

impl TryFrom<UploadArgs> for UploadOptions {
    type Error = Error;
    fn try_from(args: UploadArgs) -> Result<Self> {
        let project_token = args
            .token
            .filter(|token| !token.is_empty())
            .with_context(|| format!("No project token provided, pass --token or set {TOKEN_ENV}"))?;

        Ok(Self {
            storybook_dir: args.storybook_dir,
            project_token,
            commit_sha: args.commit,
            branch: args.branch,
            base_commit_sha: args.base_commit,
            base_branch: args.base_branch,
            pr_number: args.pr_number.or_else(get_pr_number_from_env),
        })
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_local_logger()?;

    match cli.command {
        Commands::Upload(args) => upload(args).await?,
    }
    Ok(())
}

async fn upload(args: UploadArgs) -> Result<()> {
    let options = UploadOptions::try_from(args)?;
    let request = prepare_upload_request(options)?;
    info!(
        "Uploading {} for {} on {}",
        request.storybook_dir.display(),
        style(&request.commit_sha).bold(),
        style(&request.branch).bold()
    );
    match request.baseline() {
        Some((base_commit_sha, base_branch)) => {
            info!("Comparing against {base_commit_sha} on {base_branch}")
        }
        None => warn!("No comparison baseline found, the upload will not be compared"),
    }

    let client = UploadClient::new(ApiConfig::from_env()?);
    match client.upload(&request).await {
        Ok(result) => {
            print_result(&result);
            Ok(())
        }
        Err(err) => Err(explain_upload_error(err)),
    }
}

fn print_result(result: &UploadResult) {
    if let Some(test_id) = &result.test_id {
        info!("Test ID: {}", style(test_id).bold());
    }
    if let Some(upload_id) = &result.upload_id {
        debug!("Upload ID: {upload_id}");
    }
}

fn explain_upload_error(err: UploadError) -> Error {
    let hint = if err.is_authentication_error() {
        Some(format!(
            "Check that {TOKEN_ENV} is set to this project's token and that the commit exists"
        ))
    } else if err.is_quota_error() {
        Some("Your Vizdiff plan has no snapshots left, check the billing settings".to_string())
    } else {
        None
    };

    match hint {
        Some(hint) => anyhow!(
            "{}\n  -> {} {}",
            err,
            style("Hint:").bold(),
            style(hint).yellow()
        ),
        None => err.into(),
    }
}

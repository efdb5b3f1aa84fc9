//! Submit mode CLI logic
//!
//! The terminal stands in for the config page: a file or stdin is the
//! editor, and the banner is a line on stdout (success) or stderr.

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    Settings,
    config::{ConfigLoader, Overrides},
    submit::{ConfigSubmitter, ConsoleDisplay, SubmitOutcome, editor_for_path},
};

/// Arguments for submit mode
#[derive(Debug, Clone)]
pub struct SubmitArgs {
    pub gid: String,
    pub file: String,
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub config: Option<String>,
    pub generic_errors_only: bool,
    pub verbose: bool,
}

/// Load settings for submit mode with the CLI overrides applied
///
/// Unlike server mode, invalid settings are an error: there is no sensible
/// default endpoint to submit to.
pub fn resolve_settings(args: &SubmitArgs) -> Result<Settings> {
    let overrides = Overrides {
        base_url: args.base_url.clone(),
        token: args.token.clone(),
        generic_errors_only: args.generic_errors_only,
        verbose: args.verbose,
        ..Overrides::default()
    };

    ConfigLoader::new(args.config.as_deref())
        .load(&overrides)
        .context("loading settings")
}

/// Run submit mode with the given arguments
///
/// Returns the outcome so the caller can turn it into an exit code.
pub async fn run_submit_mode(args: SubmitArgs) -> Result<SubmitOutcome> {
    let settings = resolve_settings(&args)?;

    // --verbose > RUST_LOG > logging.level > warn; stderr only, stdout
    // carries the banner
    let env_filter = if settings.logging.verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(settings.logging.level_or("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    debug!(
        gid = %args.gid,
        editor = %args.file,
        base_url = %settings.client.base_url,
        recognized_errors = ?settings.client.recognized_errors,
        "Submitting configuration"
    );

    let submitter = ConfigSubmitter::from_boxed(
        &settings.client,
        editor_for_path(&args.file),
        Box::new(ConsoleDisplay),
    )
    .context("creating submitter")?;

    let outcome = submitter
        .submit(&args.gid)
        .await
        .with_context(|| format!("submitting configuration for guild {}", args.gid))?;

    Ok(outcome)
}

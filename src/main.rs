mod app;
mod config;
mod domain;
mod error;
mod notify;
mod repo;
mod usecase;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{App, Outcome};
use config::{Config, SlackWebhookConfig, Workflow};
use domain::users::UserDirectory;
use error::Error;
use notify::slack::SlackWebhook;
use repo::github::auth::resolve_token;
use repo::github::{GithubPulls, GithubSettings};
use repo::memory::InMemoryPulls;
use usecase::classify::policy_for;
use usecase::message::MessageBuilder;

#[derive(Parser, Debug)]
#[command(author, version, about = "prnotify — remind reviewers about open pull requests on Slack", long_about = None)]
struct Args {
    /// Path to config.json (default: ~/.config/prnotify/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which entry of `slack_webhooks` to post to
    #[arg(long = "webhook-index", visible_alias = "sci", default_value_t = 0)]
    webhook_index: usize,

    /// Print the message instead of posting it
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Log classification details
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Run against built-in sample pull requests (implies --dry-run, needs no config)
    #[arg(long, default_value_t = false)]
    demo: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    let outcome = if args.demo {
        rt.block_on(run_demo())?
    } else {
        let config = load_config(&args)?;
        rt.block_on(run(config, &args))?
    };

    match outcome {
        Outcome::NothingToReport => info!("no open pull requests; nothing to report"),
        Outcome::Reported { pulls } => info!(pulls, "report delivered"),
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("prnotify=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prnotify=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Everything that can be checked without touching the network.
fn load_config(args: &Args) -> Result<Config> {
    let path = match args.config.as_ref() {
        Some(p) => std::path::absolute(p)
            .with_context(|| format!("could not resolve config path {}", p.display()))?,
        None => Config::default_path()
            .ok_or_else(|| anyhow!("could not determine home directory; pass --config"))?,
    };
    let config = Config::load(&path)?;
    config.validate(args.webhook_index)?;
    info!(path = %path.display(), repo = %config.repo_slug(), "config loaded");
    Ok(config)
}

async fn run(config: Config, args: &Args) -> Result<Outcome, Error> {
    let token = resolve_token(&config.github.access_token)?;
    let users = match config.users_path() {
        Some(path) => UserDirectory::load(&path)?,
        None => UserDirectory::default(),
    };
    let timeout = Duration::from_secs(config.app.request_timeout_secs);
    let notifier = SlackWebhook::new(
        config.webhook(args.webhook_index)?.clone(),
        timeout,
        args.dry_run,
    )?;

    let gh = config.github;
    let messages = MessageBuilder::new(gh.owner.clone(), gh.repo.clone());
    let policy = policy_for(config.app.workflow, gh.minimum_approved);
    let provider = GithubPulls::connect(GithubSettings {
        token,
        api_base: gh.api_base,
        owner: gh.owner,
        repo: gh.repo,
        per_page: gh.per_page,
        timeout,
    })?;

    App::new(provider, notifier, policy, users, messages)
        .run()
        .await
}

async fn run_demo() -> Result<Outcome, Error> {
    let notifier = SlackWebhook::new(
        SlackWebhookConfig {
            channel: "#demo".to_string(),
            username: "prnotify".to_string(),
            icon_emoji: ":eyes:".to_string(),
            webhook_url: String::new(),
        },
        Duration::from_secs(5),
        true,
    )?;
    App::new(
        InMemoryPulls::demo(),
        notifier,
        policy_for(Workflow::Reviewers, 2),
        UserDirectory::default(),
        MessageBuilder::new("octo-org", "demo"),
    )
    .run()
    .await
}

use clap::Parser;
use release_page::commands::{self, GenerateOptions, Services};
use release_page::core::context::{ActionInputs, EventPayload, RunContext};
use release_page::core::error::{PageError, PageResult, ResultExt, print_error};
use release_page::remote::{AirtableClient, HttpFetcher};
use release_page::storage::AwsCli;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Assemble and publish per-version release download pages
#[derive(Parser)]
#[command(name = "release-page")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  // ============================================================================
  // Action inputs
  // ============================================================================
  /// Record table API key (record write is skipped when empty)
  #[arg(long, env = "INPUT_APIKEY", default_value = "", hide_env_values = true)]
  api_key: String,

  /// Bucket receiving the rendered pages
  #[arg(long, env = "INPUT_BUCKET-RELEASE", default_value = "")]
  bucket_release: String,

  /// Bucket holding the prebuilt downloads
  #[arg(long, env = "INPUT_BUCKET-PREBUILT", default_value = "")]
  bucket_prebuilt: String,

  /// Record table base identifier
  #[arg(long, env = "INPUT_AIRTABLE-BASEID", default_value = "")]
  base_id: String,

  /// Repository as `owner/name`
  #[arg(long, env = "GITHUB_REPOSITORY")]
  repository: Option<String>,

  /// Release pull-request title; the version is its second word
  #[arg(long, env = "PR_TITLE")]
  title: Option<String>,

  /// Event payload supplying the title and repository when not given
  #[arg(long, env = "GITHUB_EVENT_PATH")]
  event_path: Option<PathBuf>,

  // ============================================================================
  // Run options
  // ============================================================================
  /// Repository root (manifests, lock document, release-page.toml)
  #[arg(long)]
  root: Option<PathBuf>,

  /// Default log level, overridden by RUST_LOG
  #[arg(long, default_value = "info")]
  log_level: String,

  /// Show a progress bar over artifacts
  #[arg(long)]
  progress: bool,

  /// Render pages locally, skip sync and record writes
  #[arg(long)]
  dry_run: bool,

  /// Output directory for --dry-run (default: <root>/release-pages)
  #[arg(long, requires = "dry_run")]
  out: Option<PathBuf>,
}

impl Cli {
  fn inputs(&self) -> PageResult<ActionInputs> {
    let mut inputs = ActionInputs {
      api_key: self.api_key.clone(),
      bucket_release: self.bucket_release.clone(),
      bucket_prebuilt: self.bucket_prebuilt.clone(),
      base_id: self.base_id.clone(),
      pull_request_title: self.title.clone().unwrap_or_default(),
      ..Default::default()
    };

    if let Some((owner, repo)) = self.repository.as_deref().and_then(|r| r.split_once('/')) {
      inputs.owner = owner.to_string();
      inputs.repo = repo.to_string();
    }

    if let Some(path) = &self.event_path
      && path.exists()
    {
      EventPayload::load(path)?.fill(&mut inputs);
    }

    Ok(inputs)
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_logging(level: &str) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(&cli.log_level);

  if let Err(err) = run(&cli) {
    handle_error(err);
  }
}

fn run(cli: &Cli) -> PageResult<()> {
  let root = match &cli.root {
    Some(root) => root.clone(),
    None => std::env::current_dir().context("Failed to get current directory")?,
  };

  let inputs = cli.inputs()?;
  let ctx = RunContext::build(&root, inputs)?;

  let store = AwsCli::new();
  let fetcher = HttpFetcher::new();
  let table = AirtableClient::new(&ctx.inputs.api_key, &ctx.inputs.base_id);
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  let options = GenerateOptions {
    dry_run: cli.dry_run,
    out_dir: cli.out.clone(),
    progress: cli.progress,
  };

  let summary = commands::run_generate(&ctx, &services, &options)?;
  commands::print_summary(&summary, options.dry_run);
  Ok(())
}

fn handle_error(err: PageError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}

//! CLI binary for wxrto.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wxrto::{
    convert, BatchReport, ConversionConfig, ConversionProgressCallback, InputSource,
    ProgressCallback, SkipReason,
};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live bar plus one line per written,
/// skipped or failed document. Documents finish out of order.
struct CliProgressCallback {
    bar: ProgressBar,
    errors: AtomicUsize,
}

impl CliProgressCallback {
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Reading export…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            errors: AtomicUsize::new(0),
        })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>4}/{len} items  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_items: usize) {
        self.activate_bar(total_items);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_items} items…"))
        ));
    }

    fn on_item_written(&self, title: &str, path: &Path) {
        self.bar.println(format!(
            "  {} {:?}  {}",
            green("✓"),
            title,
            dim(&path.display().to_string()),
        ));
        self.bar.inc(1);
    }

    fn on_item_skipped(&self, title: &str, reason: SkipReason) {
        // Attachments and menu items far outnumber posts; only trash gets a line.
        if reason == SkipReason::Trashed {
            self.bar
                .println(format!("  {} {:?}  {}", dim("-"), title, dim(&reason.to_string())));
        }
        self.bar.inc(1);
    }

    fn on_item_failed(&self, title: &str, error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);

        let msg = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };

        self.bar
            .println(format!("  {} {:?}  {}", red("✗"), title, red(&msg)));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_items: usize, written: usize) {
        self.bar.finish_and_clear();
        let failed = self.errors.load(Ordering::SeqCst);

        if failed == 0 {
            eprintln!(
                "{} {} of {} items written",
                green("✔"),
                bold(&written.to_string()),
                total_items
            );
        } else {
            eprintln!(
                "{} {} of {} items written  ({} failed)",
                cyan("⚠"),
                bold(&written.to_string()),
                total_items,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert an export into ./output/content
  wxrto --input example.WordPress.2021-08-07.xml

  # Read from stdin, write elsewhere
  cat export.xml | wxrto --outdir my-site

  # Limit parallelism and get a machine-readable report
  wxrto -i export.xml -c 2 --json > report.json

OUTPUT LAYOUT:
  <outdir>/content/posts/YYYY-MM-DD-<slug>.md   posts
  <outdir>/content/<slug>.md                    pages

  Attachments, menu items and trashed items are skipped. Items that fail
  (bad date, unwritable file) are reported and the rest still convert.

SUPPORTED GENERATORS:
  hugo (default)
"#;

/// Convert a WordPress WXR export into Markdown for a static site generator.
#[derive(Parser, Debug)]
#[command(
    name = "wxrto",
    version,
    about = "Convert a WordPress WXR export into Markdown files",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// The WordPress WXR file to convert (stdin when omitted).
    #[arg(short, long, env = "WXRTO_INPUT")]
    input: Option<PathBuf>,

    /// Static site generator output format.
    #[arg(short, long, env = "WXRTO_GENERATOR", default_value = "hugo")]
    generator: String,

    /// Directory to save converted files to.
    #[arg(short, long, env = "WXRTO_OUTDIR", default_value = "output")]
    outdir: PathBuf,

    /// Number of documents converted concurrently.
    #[arg(short, long, env = "WXRTO_CONCURRENCY", default_value_t = 8)]
    concurrency: usize,

    /// Print the batch report as JSON on stdout.
    #[arg(long, env = "WXRTO_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "WXRTO_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "WXRTO_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "WXRTO_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar already prints one line per document.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    // An unknown generator fails here, before any document is touched.
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let source = InputSource::from_arg(cli.input.clone());
    let report = convert(&source, &config)
        .await
        .context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet && !show_progress {
        print_summary(&report, &config);
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .output_dir(&cli.outdir)
        .concurrency(cli.concurrency)
        .generator_name(&cli.generator);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn print_summary(report: &BatchReport, config: &ConversionConfig) {
    let stats = &report.stats;
    eprintln!(
        "{}  {}/{} items written  {} skipped  {} failed  {}ms  →  {}",
        if stats.failed == 0 {
            green("✔")
        } else {
            cyan("⚠")
        },
        stats.written,
        stats.total,
        stats.skipped,
        stats.failed,
        stats.duration_ms,
        bold(&config.output_dir.display().to_string()),
    );
}

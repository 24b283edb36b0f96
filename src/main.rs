//! govfill CLI: fill a government portal form from an INI input file.
//!
//! Exit codes: 0 normal termination, 3 browser launch failure, 4 invalid
//! input file, 6 error during automation.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use govfill::{
    ChromeSessionFactory, FillOptions, FillPlan, FormFiller, MissingFieldPolicy, PortalBrowser,
};

/// Fill a government portal form from an INI input file.
#[derive(Parser)]
#[command(name = "govfill", version, about)]
struct Cli {
    /// Input file (INI format) with the portal URL and field values
    #[arg(short, long, default_value = "govfill.ini")]
    input_file: PathBuf,

    /// Fill the form but do not submit it
    #[arg(short = 'n', long, conflicts_with = "submit")]
    no_submit: bool,

    /// Click the submit control once all fields are filled
    #[arg(short, long)]
    submit: bool,

    /// Run the browser without a visible window
    #[arg(short = 'd', long)]
    headless: bool,

    /// Per-field progress and page diagnostics
    #[arg(short, long)]
    verbose: bool,

    /// Skip fields missing from the page instead of aborting
    #[arg(long)]
    lenient: bool,

    /// Re-read each field after writing and require the value to match
    #[arg(long)]
    verify: bool,

    /// Element wait deadline in seconds
    #[arg(long, default_value_t = 20)]
    timeout: u64,

    /// Explicit Chrome/Chromium executable path
    #[arg(long)]
    chrome: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "govfill=debug"
    } else {
        "govfill=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("govfill: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> govfill::Result<()> {
    let plan = FillPlan::load(&cli.input_file)?;

    let mut builder = PortalBrowser::builder()
        .headless(cli.headless)
        .timeout(Duration::from_secs(cli.timeout));
    if let Some(path) = &cli.chrome {
        builder = builder.chrome_path(path.to_string_lossy());
    }
    let factory = ChromeSessionFactory::new(builder.build_config());

    let options = FillOptions {
        submit: cli.submit,
        missing_field: if cli.lenient {
            MissingFieldPolicy::Skip
        } else {
            MissingFieldPolicy::Abort
        },
        verify: cli.verify,
    };

    let report = FormFiller::new(plan, options).run(&factory).await?;
    info!(
        filled = report.filled.len(),
        skipped = report.skipped.len(),
        submitted = report.submitted,
        "run complete"
    );
    Ok(())
}

mod config;
mod progress;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use weekplan_core::emit::{Emitter, OutputFormat};
use weekplan_core::latex::{self, TitlePage};
use weekplan_core::planner::Planner;
use weekplan_core::weeks::year_weeks;
use weekplan_core::PlannerError;
use weekplan_provider_google::{FileCredentialStore, GoogleCalendarSource};

use crate::config::Settings;
use crate::progress::LogWriter;

#[derive(Parser)]
#[command(name = "weekplan")]
#[command(about = "Render a yearly weekly planner from your Google calendars")]
struct Cli {
    /// Year to render
    #[arg(value_parser = clap::value_parser!(i32).range(1..=9999))]
    year: i32,

    /// Destination file, ending in .tex or .pdf
    outfile: PathBuf,

    /// Name printed on the title page
    author: String,

    /// Mail address printed on the title page
    author_mail: String,

    /// Phone number printed on the title page
    author_phone: String,

    /// Only render this ISO week
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=53))]
    week: Option<u32>,

    /// Config file (defaults to ~/.config/weekplan/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let bars = MultiProgress::new();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(LogWriter::new(bars.clone()))
        .init();

    let cli = Cli::parse();

    match run(cli, &bars).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => match err.downcast_ref::<PlannerError>() {
            Some(PlannerError::CompilerFailed { output, .. }) => {
                println!("{}", output);
                eprintln!("{} {}", "Error:".red(), err);
                Ok(ExitCode::FAILURE)
            }
            Some(PlannerError::UnsupportedOutput(_)) => {
                eprintln!("{} {}", "Error:".red(), err);
                Ok(ExitCode::FAILURE)
            }
            _ => Err(err),
        },
    }
}

async fn run(cli: Cli, bars: &MultiProgress) -> Result<()> {
    // Reject the destination before touching the network.
    let format = OutputFormat::from_path(&cli.outfile)?;

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Settings::default_path()?,
    };
    let settings = Settings::load(&config_path)?;
    let tz = settings.time_zone()?;

    let mut weeks = year_weeks(cli.year)?;
    if let Some(number) = cli.week {
        weeks.retain(|week| week.number() == number);
        if weeks.is_empty() {
            anyhow::bail!("Week {} does not occur in {}", number, cli.year);
        }
    }

    let store = FileCredentialStore::new(settings.session_path());
    let source =
        GoogleCalendarSource::connect(&settings.credentials_path(), &settings.account, &store)
            .await?;

    let planner = Planner::connect(source, settings.locale, tz).await?;
    tracing::info!(
        calendars = planner.calendars().len(),
        locale = %settings.locale,
        timezone = %tz,
        "connected"
    );

    let bar = progress::create_week_bar(bars, weeks.len());
    let mut pages = String::new();
    for week in &weeks {
        bar.set_message(format!("Rendering week {}", week.number()));
        pages.push_str(&planner.render_week(week).await?);
        bar.inc(1);
    }
    bar.finish_and_clear();

    let title = TitlePage {
        year: cli.year,
        author: cli.author,
        author_mail: cli.author_mail,
        author_phone: cli.author_phone,
    };
    let document = latex::document(&title, &pages);

    let emitter = Emitter::new(settings.compiler.clone());
    let spinner = (format == OutputFormat::Binary).then(|| {
        progress::create_spinner(bars, format!("Compiling with {}", settings.compiler.program))
    });
    let result = emitter.emit(&document, &cli.outfile, format).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result?;

    println!(
        "{} {}",
        "Wrote".green(),
        cli.outfile.display().to_string().bold()
    );

    Ok(())
}

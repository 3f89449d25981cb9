use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blog_timeline::loader::{load_content_totals, load_locations, load_posts};
use blog_timeline::report::{Dashboard, Section};
use blog_timeline::settings::{OutputFormat, Overrides, Settings, DEFAULT_CONFIG_FILE};

/// Blog timeline report
/// Reads the scraped post list and prints timeline statistics
#[derive(Parser, Debug)]
#[command(name = "blog-timeline")]
#[command(version)]
#[command(about = "Timeline statistics for a scraped blog post dataset")]
struct Args {
    /// Settings file (TOML); missing file is fine
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Post list (JSON array with a `date` field per post)
    #[arg(short, long)]
    posts: Option<PathBuf>,

    /// Content totals (JSON object)
    #[arg(long)]
    counts: Option<PathBuf>,

    /// Location list for the map (JSON array)
    #[arg(long)]
    locations: Option<PathBuf>,

    /// How many of the busiest days to list
    #[arg(short, long)]
    top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Every section (default)
    Report,
    /// Headline numbers
    Summary,
    /// Gap-filled day-by-day counts
    Daily,
    /// Posts per month, chronological and ranked
    Monthly,
    /// Posts per weekday with percentages
    Weekdays,
    /// The busiest days
    Top,
    /// Content totals from the counts file
    Totals,
    /// Locations for the map view
    Locations,
}

impl Command {
    fn sections(self) -> Vec<Section> {
        match self {
            Command::Report => Section::ALL.to_vec(),
            Command::Summary => vec![Section::Summary],
            Command::Daily => vec![Section::Daily],
            Command::Monthly => vec![Section::Monthly],
            Command::Weekdays => vec![Section::Weekdays],
            Command::Top => vec![Section::Top],
            Command::Totals => vec![Section::Totals],
            Command::Locations => vec![Section::Locations],
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = Settings::load(&args.config)
        .with_context(|| format!("failed to load settings from {}", args.config.display()))?
        .apply(Overrides {
            posts_file: args.posts,
            counts_file: args.counts,
            locations_file: args.locations,
            top_n: args.top,
            format: args.format,
        });
    info!("Using posts file {}", settings.posts_file.display());

    let sections = args.command.unwrap_or(Command::Report).sections();

    let posts = load_posts(&settings.posts_file).with_context(|| {
        format!(
            "no data loaded; make sure {} exists and holds a list of posts with a `date` field",
            settings.posts_file.display()
        )
    })?;
    let mut dashboard = Dashboard::build(posts, settings.top_n)
        .context("no post in the dataset has a valid YYYY/MM/DD date")?;

    // Totals and locations are optional extras; a broken file only costs its section.
    if sections.contains(&Section::Totals) {
        if let Some(path) = &settings.counts_file {
            match load_content_totals(path) {
                Ok(totals) => dashboard = dashboard.with_content_totals(totals),
                Err(e) => warn!("Skipping content totals: {}", e),
            }
        }
    }
    if sections.contains(&Section::Locations) {
        if let Some(path) = &settings.locations_file {
            match load_locations(path) {
                Ok(locations) => dashboard = dashboard.with_locations(locations),
                Err(e) => warn!("Skipping locations: {}", e),
            }
        }
    }

    let output = match settings.format {
        OutputFormat::Text => dashboard.render_text(&sections),
        OutputFormat::Json => dashboard
            .render_json(&sections)
            .context("failed to serialize report")?,
    };
    println!("{}", output);

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

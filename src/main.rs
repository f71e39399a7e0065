//! rym-scraper main entry point
//!
//! Command-line interface: one subcommand per page type, results exported to
//! a timestamped TSV or JSON file.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rym_scraper::config::{read_config, validate, Config, ExportFormat};
use rym_scraper::output::{self, print_statistics, ExtractionStatistics, Operation};
use rym_scraper::{ChartQuery, ChromeLauncher, Coordinator, Record, Target};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// rym-scraper: scrape rateyourmusic.com through a headless browser
#[derive(Parser, Debug)]
#[command(name = "rym-scraper")]
#[command(version)]
#[command(about = "Scrape albums, artists, charts and discographies from rateyourmusic.com", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Show the browser window
    #[arg(long, global = true)]
    no_headless: bool,

    /// Export format, overriding the configuration
    #[arg(long, global = true, value_enum)]
    format: Option<ExportFormat>,

    /// Export directory, overriding the configuration
    #[arg(long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Album pages
    Album {
        #[command(flatten)]
        targets: TargetArgs,

        /// Also export each album to its own file
        #[arg(short, long)]
        separate_export: bool,
    },

    /// Artist pages
    Artist {
        #[command(flatten)]
        targets: TargetArgs,

        /// Also export each artist to its own file
        #[arg(short, long)]
        separate_export: bool,
    },

    /// Rating timeline of albums
    Timeline {
        #[command(flatten)]
        targets: TargetArgs,

        /// Last timeline page to read
        #[arg(long)]
        max_page: Option<u32>,
    },

    /// A chart listing
    Chart(ChartArgs),

    /// Artist discographies
    Discography {
        #[command(flatten)]
        targets: TargetArgs,

        /// Also load every release page for its details (one extra page load per release)
        #[arg(long)]
        complementary: bool,

        /// Also export each artist's discography to its own file
        #[arg(short, long)]
        separate_export: bool,
    },
}

/// URLs or names to look up
#[derive(Args, Debug)]
struct TargetArgs {
    /// Page URLs (comma separated or repeated)
    #[arg(short, long, value_delimiter = ',')]
    url: Vec<String>,

    /// Names to search for; albums use the "Artist - Album" form (comma separated or repeated)
    #[arg(short, long, value_delimiter = ',')]
    name: Vec<String>,

    /// File with one URL per line
    #[arg(long, value_name = "FILE")]
    url_file: Option<PathBuf>,

    /// File with one name per line
    #[arg(long, value_name = "FILE")]
    name_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Chart URL copied from the site, instead of the filter flags
    #[arg(
        short,
        long,
        conflicts_with_all = ["kind", "year", "genre", "country", "language", "descriptor", "page"]
    )]
    url: Option<String>,

    /// Release kinds, e.g. album, ep, or release for everything
    #[arg(long, value_delimiter = ',')]
    kind: Vec<String>,

    /// Year, range (1984-2002) or decade (2010s)
    #[arg(short, long)]
    year: Option<String>,

    /// Genres (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    genre: Vec<String>,

    /// Origin countries (comma separated)
    #[arg(long, value_delimiter = ',')]
    country: Vec<String>,

    /// Language
    #[arg(long)]
    language: Option<String>,

    /// Descriptors (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    descriptor: Vec<String>,

    /// First page to read
    #[arg(long)]
    page: Option<u32>,

    /// Last page to read (0 reads every page)
    #[arg(long)]
    max_page: Option<u32>,
}

/// What a subcommand produced
struct Outcome {
    operation: Operation,
    /// File name suffix of the combined export
    suffix: Option<String>,
    records: Vec<Record>,
    /// Also write one file per item
    separate: bool,
}

impl Outcome {
    fn new(operation: Operation, suffix: Option<String>, records: Vec<Record>) -> Self {
        Self {
            operation,
            suffix,
            records,
            separate: false,
        }
    }

    fn separately(mut self, separate: bool) -> Self {
        self.separate = separate;
        self
    }
}

impl TargetArgs {
    fn collect(&self) -> anyhow::Result<Vec<Target>> {
        let mut targets: Vec<Target> = clean(self.url.iter().cloned()).map(Target::Url).collect();
        if let Some(path) = &self.url_file {
            targets.extend(read_lines(path)?.into_iter().map(Target::Url));
        }
        targets.extend(clean(self.name.iter().cloned()).map(Target::Name));
        if let Some(path) = &self.name_file {
            targets.extend(read_lines(path)?.into_iter().map(Target::Name));
        }
        Ok(targets)
    }
}

impl ChartArgs {
    fn query(&self, base_url: &str) -> anyhow::Result<ChartQuery> {
        if let Some(url) = &self.url {
            return ChartQuery::from_url(url)
                .with_context(|| format!("Cannot read chart URL {}", url));
        }

        let mut query = ChartQuery::new()
            .with_base_url(base_url)
            .with_kinds(&self.kind)
            .with_genres(&self.genre)
            .with_countries(&self.country)
            .with_descriptors(&self.descriptor)
            .starting_at(self.page.unwrap_or(1));
        if let Some(year) = &self.year {
            query = query.with_year(year);
        }
        if let Some(language) = &self.language {
            query = query.with_language(language);
        }
        Ok(query)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;
    if cli.no_headless {
        config.browser.headless = false;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.to_string_lossy().into_owned();
    }

    let started = Instant::now();
    let launcher = ChromeLauncher::from_config(&config.browser);
    let mut coordinator =
        Coordinator::new(launcher, config.clone()).context("Failed to start the browser")?;

    let outcome = match run(&mut coordinator, &cli.command, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Scraping failed: {:#}", e);
            return Err(e);
        }
    };
    coordinator.shutdown();

    if !cli.quiet {
        print_statistics(&ExtractionStatistics::from_records(&outcome.records));
    }

    if outcome.records.is_empty() {
        tracing::warn!("No records extracted, nothing exported");
    } else {
        let path = output::export(
            &outcome.records,
            outcome.operation,
            outcome.suffix.as_deref(),
            &config.output,
        )
        .context("Failed to export records")?;
        println!("Exported to: {}", path.display());

        if outcome.separate {
            let paths = output::export_each(&outcome.records, outcome.operation, &config.output)
                .context("Failed to export separate files")?;
            for path in paths {
                println!("Exported to: {}", path.display());
            }
        }
    }

    tracing::debug!("Runtime: {:.2} seconds", started.elapsed().as_secs_f64());
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rym_scraper=info,warn"),
            1 => EnvFilter::new("rym_scraper=debug,info"),
            2 => EnvFilter::new("rym_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        let config = Config::default();
        validate(&config)?;
        return Ok(config);
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match read_config(path) {
        Ok(loaded) => {
            tracing::info!("Configuration loaded successfully (hash: {})", loaded.hash);
            if !loaded.marker_overrides.is_empty() {
                tracing::info!("Marker overrides: {}", loaded.marker_overrides.join(", "));
            }
            Ok(loaded.config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

fn run(
    coordinator: &mut Coordinator<ChromeLauncher>,
    command: &Command,
    config: &Config,
) -> anyhow::Result<Outcome> {
    match command {
        Command::Album {
            targets,
            separate_export,
        } => {
            let targets = targets.collect()?;
            let records = coordinator.albums_info(&targets)?;
            Ok(Outcome::new(Operation::Album, single_label(&targets), records)
                .separately(*separate_export))
        }
        Command::Artist {
            targets,
            separate_export,
        } => {
            let targets = targets.collect()?;
            let records = coordinator.artists_info(&targets)?;
            Ok(Outcome::new(Operation::Artist, single_label(&targets), records)
                .separately(*separate_export))
        }
        Command::Timeline { targets, max_page } => {
            let targets = targets.collect()?;
            let timelines = coordinator.albums_timeline(&targets, *max_page)?;
            let records = timelines.into_iter().flatten().collect();
            Ok(Outcome::new(Operation::Timeline, single_label(&targets), records))
        }
        Command::Chart(args) => {
            let mut query = args.query(&config.site.base_url)?;
            let label = query.label();
            let records = coordinator.chart(&mut query, args.max_page)?;
            Ok(Outcome::new(Operation::Chart, Some(label), records))
        }
        Command::Discography {
            targets,
            complementary,
            separate_export,
        } => {
            let targets = targets.collect()?;
            let records = coordinator.discographies(&targets, *complementary)?;
            Ok(Outcome::new(Operation::Discography, single_label(&targets), records)
                .separately(*separate_export))
        }
    }
}

/// File name suffix when exactly one target was given
fn single_label(targets: &[Target]) -> Option<String> {
    match targets {
        [Target::Name(name)] => Some(name.clone()),
        [Target::Url(url)] => {
            let segments: Vec<&str> = url.trim_end_matches('/').rsplit('/').take(2).collect();
            Some(segments.into_iter().rev().collect::<Vec<_>>().join(" - "))
        }
        _ => None,
    }
}

fn clean(values: impl Iterator<Item = String>) -> impl Iterator<Item = String> {
    values
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Non-empty lines of a file, `#` comment lines skipped
fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(clean(content.lines().map(str::to_string))
        .filter(|line| !line.starts_with('#'))
        .collect())
}

//! hrstat CLI
//!
//! Command-line front end for the dashboard core:
//! - Render chart specs for a view state as JSON
//! - Inspect the loaded axis, canton set and build diagnostics
//! - Export publications into the static folder the server hands out
//! - Print a default config file

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use hrstat::config::{generate_default_config, Config};
use hrstat::data::{CantonCode, GeoScope, Metric};
use hrstat::export::{export_dashboard_data, read_publications};
use hrstat::index::RangeWidth;
use hrstat::loader::{DocumentSource, FsSource, HttpSource};
use hrstat::logging::init_logging;
use hrstat::session::DashboardSession;
use hrstat::view::ViewEvent;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hrstat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Swiss commercial-registry monthly statistics")]
#[command(
    long_about = "hrstat loads the monthly HR01/HR03 dashboard documents,\n\
                  builds month-aligned indices and projects chart specs for a view state."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: user config dir, /etc/hrstat, ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Read documents from a static folder instead of the server
    #[arg(long, global = true, conflicts_with = "base_url")]
    pub data_dir: Option<PathBuf>,

    /// Dashboard server URL (overrides the config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project both charts and print them as JSON
    Render {
        /// Metric: HR01, HR03 or NET
        #[arg(short, long)]
        metric: Option<Metric>,
        /// Geography: ch or kt
        #[arg(short, long)]
        geo: Option<GeoScope>,
        /// Canton shown in cantonal mode
        #[arg(long)]
        canton: Option<String>,
        /// Plot HR01 and HR03 together
        #[arg(long)]
        compare: bool,
        /// Window width: a month count or "all"
        #[arg(short, long)]
        range: Option<RangeWidth>,
        /// Simulate a heatmap click on this canton, applied last
        #[arg(long)]
        click: Option<String>,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show axis, canton and index build statistics
    Inspect {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Aggregate publications into the dashboard documents
    Export {
        /// Publication file: CSV with a header row, or a JSON array
        input: PathBuf,
        /// Static folder to write into (default: --data-dir, then server.static_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// JSON document printed by `render`
#[derive(Serialize)]
struct RenderOutput<'a> {
    status: String,
    view: &'a hrstat::view::ViewState,
    geo_label: String,
    range_choices: Vec<String>,
    frame: hrstat::view::RenderFrame,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.base_url {
        config.source.base_url = url.clone();
    }

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Logging unavailable: {}", e);
    }

    match cli.command {
        Commands::Render {
            metric,
            geo,
            canton,
            compare,
            range,
            click,
            compact,
        } => {
            let mut session = open_session(&cli.data_dir, &config).await?;

            let mut events = Vec::new();
            if let Some(metric) = metric {
                events.push(ViewEvent::SelectMetric(metric));
            }
            if let Some(geo) = geo {
                events.push(ViewEvent::SetGeoMode(geo));
            }
            if let Some(canton) = canton {
                events.push(ViewEvent::SelectCanton(CantonCode::new(canton)));
            }
            if compare {
                events.push(ViewEvent::SetCompare(true));
            }
            if let Some(range) = range {
                events.push(ViewEvent::SetRange(range));
            }
            if let Some(canton) = click {
                events.push(ViewEvent::HeatmapCellClicked(CantonCode::new(canton)));
            }

            let mut frame = session.render();
            for event in events {
                frame = session.dispatch(event);
            }

            let output = RenderOutput {
                status: session.status_line(),
                view: session.view(),
                geo_label: session.view().geo_label(),
                range_choices: session.range_choices().iter().map(|r| r.label()).collect(),
                frame,
            };

            let json = if compact {
                serde_json::to_string(&output)?
            } else {
                serde_json::to_string_pretty(&output)?
            };
            println!("{}", json);
        }

        Commands::Inspect { json } => {
            let session = open_session(&cli.data_dir, &config).await?;
            let diagnostics = session.diagnostics();

            if json {
                let output = serde_json::json!({
                    "status": session.status_line(),
                    "months": session.data().axis.len(),
                    "first_month": session.data().axis.first(),
                    "last_month": session.data().axis.last(),
                    "cantons": session.data().cantons.codes(),
                    "diagnostics": diagnostics,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                let axis = &session.data().axis;
                println!("hrstat data");
                println!("===========");
                println!();
                println!("Status:      {}", session.status_line());
                match (axis.first(), axis.last()) {
                    (Some(first), Some(last)) => {
                        println!("Months:      {} ({} .. {})", axis.len(), first, last)
                    }
                    _ => println!("Months:      0"),
                }
                println!("Cantons:     {}", session.data().cantons.len());
                println!();
                println!("Fact rows:   {}", diagnostics.rows_seen);
                println!("  placed:    {}", diagnostics.rows_placed);
                println!("  dropped:   {}", diagnostics.rows_dropped());

                let reasons = [
                    ("missing month", diagnostics.missing_month),
                    ("unknown month", diagnostics.unknown_month),
                    ("unknown scope", diagnostics.unknown_scope),
                    ("missing canton", diagnostics.missing_canton),
                    ("unknown canton", diagnostics.unknown_canton),
                    ("unknown metric", diagnostics.unknown_metric),
                    ("invalid count", diagnostics.invalid_count),
                ];
                for (label, count) in reasons.iter().filter(|(_, n)| *n > 0) {
                    println!("    {:<15} {}", label, count);
                }
            }
        }

        Commands::Export { input, out } => {
            let static_dir = out
                .or_else(|| cli.data_dir.clone())
                .unwrap_or_else(|| PathBuf::from(&config.server.static_dir));

            let publications = read_publications(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;

            match export_dashboard_data(&publications, &static_dir, Utc::now())? {
                Some(summary) => {
                    let diag = &summary.diagnostics;
                    println!("Export written to {}", static_dir.display());
                    println!();
                    println!("Publications:   {}", diag.publications);
                    println!("  counted:      {}", diag.counted);
                    println!("  bad date:     {}", diag.invalid_date);
                    println!("  bad canton:   {}", diag.invalid_canton);
                    println!("  other rubric: {}", diag.other_rubric);
                    println!("Months:         {}", summary.months);
                    println!("Fact rows:      {}", summary.rows_written);
                }
                None => println!("No publications in {}, nothing written", input.display()),
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Load all documents and build the session
async fn open_session(data_dir: &Option<PathBuf>, config: &Config) -> Result<DashboardSession> {
    let source: Box<dyn DocumentSource> = match data_dir {
        Some(dir) => Box::new(FsSource::new(dir)),
        None => Box::new(HttpSource::new(config.source.clone())?),
    };

    DashboardSession::initialize(source.as_ref(), &config.view)
        .await
        .map_err(|e| anyhow::anyhow!(e.status_message()))
}

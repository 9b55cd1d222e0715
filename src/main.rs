//! Headless host for the data sweeper session.
//!
//! Uploads the given files, runs the requested cleaning steps, writes each
//! export (and optionally the chart spec and the combined archive) into the
//! output directory, and prints every notification.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use data_sweeper::data::{Transform, UploadedFile};
use data_sweeper::session::Session;
use data_sweeper::settings::Settings;
use data_sweeper::types::{ChartSelection, ChartType, FileFormat, Theme};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "data-sweeper", version, about = "Clean, chart and convert CSV and Excel files")]
struct Cli {
    /// CSV or Excel files to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Remove duplicate rows
    #[arg(long)]
    dedup: bool,

    /// Fill missing numeric values with the column mean
    #[arg(long)]
    fill_missing: bool,

    /// Drop columns with no values
    #[arg(long)]
    drop_empty: bool,

    /// Lowercase text columns
    #[arg(long)]
    lowercase: bool,

    /// Export format (defaults to each file's own format)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Chart kind to write as <name>.chart.json
    #[arg(long, value_enum)]
    chart: Option<ChartArg>,

    /// X axis column for the chart
    #[arg(long, requires = "chart")]
    x: Option<String>,

    /// Y axis column for the chart
    #[arg(long, requires = "chart")]
    y: Option<String>,

    /// Chart theme
    #[arg(long, value_enum)]
    theme: Option<ThemeArg>,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Also write processed_files.zip
    #[arg(long)]
    zip: bool,

    /// Print a preview of each cleaned table
    #[arg(long)]
    preview: bool,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Csv,
    Excel,
}

impl From<FormatArg> for FileFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => FileFormat::Csv,
            FormatArg::Excel => FileFormat::Excel,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChartArg {
    Bar,
    Pie,
    Line,
}

impl From<ChartArg> for ChartType {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Bar => ChartType::Bar,
            ChartArg::Pie => ChartType::Pie,
            ChartArg::Line => ChartType::Line,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let preview_rows = settings.preview_rows;

    let mut session = Session::new(settings);
    if let Some(theme) = cli.theme {
        session.set_theme(theme.into());
    }

    let mut uploads = Vec::new();
    for path in &cli.files {
        match UploadedFile::from_path(path) {
            Ok(upload) => uploads.push(upload),
            Err(e) => warn!("Cannot read {}: {}", path.display(), e),
        }
    }

    let report = session.upload(uploads);
    if report.accepted.is_empty() {
        print_notifications(&mut session);
        anyhow::bail!("No file could be processed");
    }

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("Failed to create {}", cli.out.display()))?;

    for name in &report.accepted {
        if let Err(e) = process_file(&mut session, &cli, name, preview_rows) {
            warn!("{}: {:#}", name, e);
        }
    }

    if cli.zip {
        match session.bundle() {
            Ok(archive) => {
                let path = cli.out.join(&archive.name);
                std::fs::write(&path, &archive.bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote {}", path.display());
            }
            Err(e) => warn!("{}", e),
        }
    }

    print_notifications(&mut session);
    info!("Processing completed");
    Ok(())
}

/// Run the requested steps for one uploaded file
fn process_file(session: &mut Session, cli: &Cli, name: &str, preview_rows: usize) -> Result<()> {
    let steps = [
        (cli.dedup, Transform::RemoveDuplicates),
        (cli.fill_missing, Transform::FillMissing),
        (cli.drop_empty, Transform::DropEmptyColumns),
    ];
    for (_, transform) in steps.iter().filter(|(enabled, _)| *enabled) {
        session.apply_transform(name, *transform)?;
    }
    if cli.lowercase {
        session.set_lowercase(name, true)?;
    }

    if cli.preview {
        if let Some(file) = session.file(name) {
            println!("{} ({})", file.name(), file.size_label());
            print!("{}", data_sweeper::data::write_csv_content(&file.preview(preview_rows), ','));
        }
    }

    if let Some(chart) = cli.chart {
        write_chart(session, cli, name, chart.into())?;
    }

    if let Some(format) = cli.format {
        session.set_export_format(name, format.into())?;
    }
    let processed = session.export(name)?;
    let path = cli.out.join(&processed.name);
    std::fs::write(&path, &processed.bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} ({})", path.display(), processed.mime_type);

    Ok(())
}

fn write_chart(session: &mut Session, cli: &Cli, name: &str, chart_type: ChartType) -> Result<()> {
    let Some(options) = session.chart_options(name)? else {
        info!("{}: fewer than two numeric columns, skipping chart", name);
        return Ok(());
    };

    let x = cli.x.clone().unwrap_or_else(|| options.numeric_columns[0].clone());
    let y = cli.y.clone().unwrap_or_else(|| options.numeric_columns[1].clone());
    session.select_chart(name, ChartSelection::new(chart_type, x, y))?;

    if let Some(spec) = session.chart(name)? {
        let stem = Path::new(name).file_stem().and_then(|s| s.to_str()).unwrap_or(name);
        let path = cli.out.join(format!("{}.chart.json", stem));
        std::fs::write(&path, serde_json::to_string_pretty(&spec)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}

fn print_notifications(session: &mut Session) {
    for toast in session.drain_notifications() {
        println!("{}", toast.display());
    }
}

//! plandoc CLI - strategic plan PDF export tool

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use plandoc::render::{to_json, to_text};
use plandoc::{
    build_sections, Document, ExportOptions, Exporter, FileRasterSource, JsonFormat, Orientation,
    StrategicPlanData,
};

#[derive(Parser)]
#[command(name = "plandoc")]
#[command(author = "plandoc contributors")]
#[command(version)]
#[command(about = "Export strategic planning data to paginated PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a strategic plan (JSON) to PDF
    Plan {
        /// Plan data file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (name derived from the title if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pdf")]
        format: OutputFormat,

        /// Directory chart regions and the logo are resolved from
        /// (defaults to the data file's directory)
        #[arg(long, value_name = "DIR")]
        assets: Option<PathBuf>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Export a single captured image region to PDF
    Capture {
        /// PNG or JPEG image
        #[arg(value_name = "IMAGE")]
        input: PathBuf,

        /// Output file (name derived from the title if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Show the section outline of a plan
    Info {
        /// Plan data file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct ExportArgs {
    /// Load export options from a JSON file
    #[arg(long, value_name = "FILE", env = "PLANDOC_OPTIONS")]
    options: Option<PathBuf>,

    /// Document title
    #[arg(long, env = "PLANDOC_TITLE")]
    title: Option<String>,

    /// Subtitle (the cover shows the company name if omitted)
    #[arg(long, env = "PLANDOC_SUBTITLE")]
    subtitle: Option<String>,

    /// Page orientation
    #[arg(long, value_enum, env = "PLANDOC_ORIENTATION")]
    orientation: Option<PageOrientation>,

    /// Stamp every page with this watermark text
    #[arg(long, value_name = "TEXT", env = "PLANDOC_WATERMARK")]
    watermark: Option<String>,

    /// Company logo image
    #[arg(long, value_name = "FILE", env = "PLANDOC_LOGO")]
    logo: Option<String>,

    /// Cover date (YYYY-MM-DD)
    #[arg(long, env = "PLANDOC_DATE")]
    date: Option<NaiveDate>,

    /// Author written to the document metadata
    #[arg(long, env = "PLANDOC_AUTHOR")]
    author: Option<String>,

    /// Entitlement flag (true unless the options file says otherwise)
    #[arg(long, value_name = "BOOL", env = "PLANDOC_CAN_EXPORT")]
    can_export: Option<bool>,
}

impl ExportArgs {
    fn to_options(&self) -> Result<ExportOptions, Box<dyn std::error::Error>> {
        let mut options = match self.options {
            Some(ref path) => ExportOptions::from_json(&fs::read_to_string(path)?)?,
            None => ExportOptions::new().with_export_permission(true),
        };

        if let Some(ref title) = self.title {
            options = options.with_title(title);
        }
        if let Some(ref subtitle) = self.subtitle {
            options = options.with_subtitle(subtitle);
        }
        if let Some(orientation) = self.orientation {
            options = options.with_orientation(orientation.into());
        }
        if let Some(ref text) = self.watermark {
            options = options.with_watermark_text(text);
        }
        if let Some(ref logo) = self.logo {
            options = options.with_logo(logo);
        }
        if let Some(date) = self.date {
            options = options.with_date(date);
        }
        if let Some(ref author) = self.author {
            options = options.with_author(author);
        }
        if let Some(allowed) = self.can_export {
            options = options.with_export_permission(allowed);
        }
        Ok(options)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageOrientation {
    /// Portrait A4
    Portrait,
    /// Landscape A4
    Landscape,
}

impl From<PageOrientation> for Orientation {
    fn from(orientation: PageOrientation) -> Self {
        match orientation {
            PageOrientation::Portrait => Orientation::Portrait,
            PageOrientation::Landscape => Orientation::Landscape,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// PDF document
    Pdf,
    /// Layout dump (pages and draw operations)
    Json,
    /// Plain text per page
    Text,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Plan {
            input,
            output,
            format,
            assets,
            export,
        }) => cmd_plan(&input, output.as_deref(), format, assets.as_deref(), &export),
        Some(Commands::Capture {
            input,
            output,
            export,
        }) => cmd_capture(&input, output.as_deref(), &export),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: plandoc plan <FILE> [-o OUTPUT]".yellow());
            println!("       plandoc --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb
}

fn read_plan(input: &Path) -> Result<StrategicPlanData, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    Ok(StrategicPlanData::from_json(&json)?)
}

fn cmd_plan(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    assets: Option<&Path>,
    export: &ExportArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = export.to_options()?;
    let data = read_plan(input)?;
    let root = assets
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    let files = FileRasterSource::new(root);

    let pb = spinner();
    pb.set_message("Composing pages...");
    let doc = Exporter::new(options)
        .with_raster_source(&files)
        .with_asset_source(&files)
        .export_plan(&data);
    pb.finish_and_clear();
    let doc = doc?;

    match format {
        OutputFormat::Pdf => save_pdf(&doc, output),
        OutputFormat::Json => emit(&to_json(&doc, JsonFormat::Pretty)?, output),
        OutputFormat::Text => emit(&to_text(&doc, true)?, output),
    }
}

fn cmd_capture(
    input: &Path,
    output: Option<&Path>,
    export: &ExportArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = export.to_options()?;
    let files = FileRasterSource::current_dir();
    let region = input.to_string_lossy();

    let doc = Exporter::new(options)
        .with_raster_source(&files)
        .with_asset_source(&files)
        .export_region(&region)?;
    save_pdf(&doc, output)
}

fn save_pdf(doc: &Document, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(doc.suggested_filename()));
    fs::write(&path, doc.to_pdf_bytes()?)?;

    println!("{} {}", "Saved to".green(), path.display());
    println!(
        "  {} {} pages, {} images",
        "├─".dimmed(),
        doc.page_count(),
        doc.stats.image_count
    );
    println!(
        "  {} watermark on {} pages",
        "└─".dimmed(),
        doc.stats.watermarked_pages
    );
    Ok(())
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_plan(input)?;
    let sections = build_sections(&data);

    println!("{}", "Plan Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Company".bold(), data.company.name);
    if let Some(ref sector) = data.company.sector {
        println!("{}: {}", "Sector".bold(), sector);
    }

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (i, section) in sections.iter().enumerate() {
        let regions: Vec<&str> = section.raster_regions().collect();
        println!(
            "{:>2}. {} ({} blocks)",
            i + 1,
            section.title.bold(),
            section.blocks.len()
        );
        for region in regions {
            println!("      {} {}", "chart".dimmed(), region);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "plandoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Strategic plan PDF export tool");
    println!();
    println!("Repository: {}", "https://github.com/plandoc/plandoc".dimmed());
    println!("License: MIT");
}

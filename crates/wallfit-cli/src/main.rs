//! wallfit - turn a folder of images into 1920x1080 wallpapers

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use wallfit_layout::AspectClass;

mod commands;

#[derive(Parser)]
#[command(name = "wallfit")]
#[command(author, version, about = "Convert images into 1920x1080 wallpapers")]
#[command(long_about = "
Converts images into 1920x1080 wallpapers.

16:9 images at exactly 1920x1080 are kept as they are. Portrait (9:16),
square and other images are placed over a blurred copy of themselves;
square and other images get rounded corners.

Examples:
  wallfit batch ~/Pictures/wallpapers     # writes ~/Pictures/wallpapers/result/*.png
  wallfit batch                           # asks for the folder
  wallfit batch photos --dry-run          # show what would be done
  wallfit layout photo.jpg -o wall.png
  wallfit layout photo.jpg -o wall.png --class square
  wallfit classify a.png b.jpg
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every PNG/JPEG in a folder into its `result` subfolder
    #[command(visible_alias = "b")]
    Batch(BatchArgs),

    /// Convert a single image
    #[command(visible_alias = "l")]
    Layout(LayoutArgs),

    /// Show the aspect class of images
    #[command(visible_alias = "c")]
    Classify(ClassifyArgs),
}

/// Arguments for the `batch` command.
#[derive(Args)]
struct BatchArgs {
    /// Folder containing the images (prompted for when omitted)
    input: Option<PathBuf>,

    /// Name of the output subfolder created inside the input folder
    #[arg(long, default_value = "result")]
    output_name: String,

    /// List the files and their layout class without writing anything
    #[arg(long)]
    dry_run: bool,
}

/// Arguments for the `layout` command.
#[derive(Args)]
struct LayoutArgs {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// Force a layout instead of classifying the image
    #[arg(long, value_enum)]
    class: Option<ClassArg>,
}

/// Arguments for the `classify` command.
#[derive(Args)]
struct ClassifyArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

/// Layout class selectable from the command line.
#[derive(Clone, Copy, ValueEnum)]
enum ClassArg {
    /// Keep the image as the canvas
    Exact,
    /// Full-height foreground
    Portrait,
    /// 500x500 rounded tile
    Square,
    /// Fitted rounded foreground
    Other,
}

impl From<ClassArg> for AspectClass {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Exact => AspectClass::Exact1080p,
            ClassArg::Portrait => AspectClass::Portrait9x16,
            ClassArg::Square => AspectClass::Square,
            ClassArg::Other => AspectClass::Other,
        }
    }
}

/// Installs the global tracing subscriber.
///
/// Logs go to stderr, or to `log_file` when given. The returned guard must
/// live until exit so buffered file output is flushed.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log.as_deref())?;

    match cli.command {
        Commands::Batch(args) => commands::batch::run(args, cli.verbose),
        Commands::Layout(args) => commands::layout::run(args, cli.verbose),
        Commands::Classify(args) => commands::classify::run(args),
    }
}

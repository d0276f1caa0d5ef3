use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use pdf_booklet::{
    BookletOptions, BookletRequest, BookletResponse, BookletStatistics, OrientationFlags,
    PdfiumRasterizer, SheetSidePair,
};
use pdf_booklet_runtime::{BookletCommand, BookletUpdate};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

mod logger;

use logger::ActionLogger;

#[derive(Parser)]
#[command(name = "pdfb", about = "Print-ready booklets from PDF documents", version)]
struct Cli {
    /// Action log file (JSON lines) [default: ~/.pdf_booklet_creator/pdf_booklet_creator.log]
    #[arg(long, global = true, conflicts_with = "no_log_file")]
    log_file: Option<PathBuf>,

    /// Don't write the action log
    #[arg(long, global = true)]
    no_log_file: bool,

    /// Log debug messages
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a booklet PDF and sheet previews
    Create(CreateArgs),

    /// Print the order pages are placed on sheet sides
    #[command(group(ArgGroup::new("source").required(true).args(["pages", "input"])))]
    Plan {
        /// Number of source pages
        #[arg(long)]
        pages: Option<usize>,

        /// Take the page count from this PDF
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        orientation: OrientationArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show sheet statistics for a PDF
    Stats {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        orientation: OrientationArgs,
    },
}

#[derive(Args)]
struct CreateArgs {
    /// Input PDF file
    #[arg(short, long)]
    input: PathBuf,

    /// Output PDF file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    orientation: OrientationArgs,

    /// Output paper size [default: a4]
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Resolution source pages are rendered at [default: 200]
    #[arg(long)]
    dpi: Option<f32>,

    /// Resolution of the printed sheets [default: 300]
    #[arg(long)]
    print_dpi: Option<f32>,

    /// Directory sheet previews are written to [default: previews]
    #[arg(long)]
    preview_dir: Option<PathBuf>,

    /// Load options from this JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the effective options to this JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// Directory containing the PDFium library
    #[arg(long)]
    pdfium_dir: Option<PathBuf>,
}

#[derive(Args, Clone, Copy, Default)]
struct OrientationArgs {
    /// Swap left and right pages on every sheet side
    #[arg(long)]
    rotate_all: bool,

    /// Swap left and right pages on back sides
    #[arg(long)]
    rotate_alternate: bool,

    /// Mirror back-side pages left to right
    #[arg(long)]
    flip_horizontal: bool,

    /// Mirror back-side pages top to bottom
    #[arg(long)]
    flip_vertical: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

impl From<PaperArg> for pdf_booklet::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl OrientationArgs {
    /// Switch on the flags given on the command line
    fn apply(self, flags: &mut OrientationFlags) {
        flags.rotate_all_pairs |= self.rotate_all;
        flags.rotate_alternate_pairs |= self.rotate_alternate;
        flags.flip_horizontal_on_back |= self.flip_horizontal;
        flags.flip_vertical_on_back |= self.flip_vertical;
    }
}

impl From<OrientationArgs> for OrientationFlags {
    fn from(args: OrientationArgs) -> Self {
        let mut flags = Self::default();
        args.apply(&mut flags);
        flags
    }
}

impl CreateArgs {
    /// Override loaded options with what was given on the command line
    fn apply(&self, options: &mut BookletOptions) {
        self.orientation.apply(&mut options.flags);
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(dpi) = self.dpi {
            options.render_dpi = dpi;
        }
        if let Some(dpi) = self.print_dpi {
            options.print_dpi = dpi;
        }
        if let Some(dir) = &self.preview_dir {
            options.preview_dir = dir.clone();
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_path = if cli.no_log_file {
        None
    } else {
        cli.log_file.clone().or_else(logger::default_log_path)
    };
    let file = log_path.and_then(|path| match logger::open_log_file(&path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Cannot open log file {}: {}", path.display(), e);
            None
        }
    });

    ActionLogger::new(level, file).init()?;
    Ok(())
}

/// Options from `--config`, else from the saved defaults when present
async fn load_options(config: Option<&Path>) -> Result<BookletOptions> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => match logger::default_config_path().filter(|p| p.is_file()) {
            Some(path) => path,
            None => return Ok(BookletOptions::default()),
        },
    };

    let options = BookletOptions::load(&path)
        .await
        .with_context(|| format!("Failed to load options from {}", path.display()))?;
    log::info!("Loaded options from {}", path.display());
    Ok(options)
}

fn print_statistics(stats: &BookletStatistics) {
    println!("Booklet Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Sheet sides: {}", stats.sheet_sides);
    println!("  Sheets: {}", stats.sheets);
    println!("  Blank slots: {}", stats.blank_slots);
}

fn slot(page: Option<usize>) -> String {
    page.map_or_else(|| "-".to_string(), |n| n.to_string())
}

fn print_plan(total_pages: usize, sequence: &[SheetSidePair]) {
    println!("{} pages → {} sheet sides", total_pages, sequence.len());
    for (index, pair) in sequence.iter().enumerate() {
        let side = if pdf_booklet::is_back_side(index) {
            "back"
        } else {
            "front"
        };
        println!(
            "  {:>3} {:<5} {:>4} | {:<4}",
            index + 1,
            side,
            slot(pair.left),
            slot(pair.right)
        );
    }
}

fn print_response(response: &BookletResponse) {
    println!("{}", response.message);
    if response.is_success() {
        println!("  Sheet sides: {}", response.sheet_sides);
    }
    for preview in &response.previews {
        println!(
            "  Side {} ({}): {}",
            preview.sheet_index,
            if preview.is_back_side { "back" } else { "front" },
            preview.preview_path.display()
        );
    }
}

async fn run_create(args: CreateArgs) -> Result<()> {
    let mut options = load_options(args.config.as_deref()).await?;
    args.apply(&mut options);
    options.validate()?;

    if let Some(path) = &args.save_config {
        options
            .save(path)
            .await
            .with_context(|| format!("Failed to save options to {}", path.display()))?;
        log::info!("Options saved to {}", path.display());
    }

    if args.stats_only {
        let total_pages = pdf_booklet::count_pages(&args.input).await?;
        print_statistics(&pdf_booklet::calculate_statistics(
            total_pages,
            &options.flags,
        ));
        return Ok(());
    }

    let rasterizer = match &args.pdfium_dir {
        Some(dir) => PdfiumRasterizer::with_library_dir(dir),
        None => PdfiumRasterizer::new(),
    };
    let request = BookletRequest::new(args.input, args.output).with_options(options);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(pdf_booklet_runtime::worker_task(
        rasterizer, command_rx, update_tx,
    ));

    command_tx.send(BookletCommand::Create { request })?;
    drop(command_tx);

    let mut response = None;
    while let Some(update) = update_rx.recv().await {
        match update {
            BookletUpdate::Progress {
                operation,
                current,
                total,
            } => {
                if !args.json {
                    eprint!("\r{}: {}/{}", operation, current, total);
                    if current == total {
                        eprintln!();
                    }
                    let _ = std::io::stderr().flush();
                }
            }
            BookletUpdate::Created { response: r } => response = Some(r),
            BookletUpdate::Error { message } => log::error!("{}", message),
            BookletUpdate::StatsCalculated { .. } | BookletUpdate::OptionsLoaded { .. } => {}
        }
    }
    worker.await?;

    let response = response.context("Worker stopped without a result")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if response.is_success() {
        print_response(&response);
    }

    if !response.is_success() {
        bail!("{}", response.message);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    match cli.command {
        Commands::Create(args) => run_create(args).await?,

        Commands::Plan {
            pages,
            input,
            orientation,
            json,
        } => {
            let total_pages = match (pages, input) {
                (Some(pages), _) => pages,
                (None, Some(input)) => pdf_booklet::count_pages(&input).await?,
                (None, None) => bail!("Either --pages or --input is required"),
            };

            let sequence = pdf_booklet::plan(total_pages, &orientation.into());
            if json {
                println!("{}", serde_json::to_string_pretty(&sequence)?);
            } else {
                print_plan(total_pages, &sequence);
            }
        }

        Commands::Stats { input, orientation } => {
            let total_pages = pdf_booklet::count_pages(&input).await?;
            let stats = pdf_booklet::calculate_statistics(total_pages, &orientation.into());
            print_statistics(&stats);
        }
    }

    Ok(())
}

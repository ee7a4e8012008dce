use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use photo_batch::text::{parse_hex_color, DEFAULT_FONT_SIZE};
use photo_batch::{
    Anchor, BatchDriver, BatchOptions, BatchReport, ItemOutcome, Operation, OutputFormat,
    OutputTarget, TextWatermark, WatermarkSource,
};

#[derive(Parser)]
#[command(
    name = "photo-batch",
    about = "Watermark, convert and rename batches of photos",
    version,
    after_help = "INPUT may be image files, directories or zip archives.\n\
                  OUTPUT ending in .zip is written as an archive, anything else as a directory.\n\
                  A processing log is written alongside the results."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Skip images larger than this many megabytes
    #[arg(long, global = true, default_value = "50")]
    max_size_mb: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Give images sequential names per folder
    Rename {
        #[command(flatten)]
        io: InputOutput,

        /// Text placed before each number
        #[arg(short, long, default_value = "")]
        prefix: String,
    },

    /// Convert images to another format
    Convert {
        #[command(flatten)]
        io: InputOutput,

        /// Output format (jpg, png, webp, bmp)
        #[arg(short, long, default_value = "jpg")]
        format: OutputFormat,
    },

    /// Add an image or text watermark
    Watermark(WatermarkArgs),
}

#[derive(Args)]
struct InputOutput {
    /// Input images, directories or zip archives
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output zip archive or directory
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct WatermarkArgs {
    #[command(flatten)]
    io: InputOutput,

    /// Watermark image (PNG with transparency works best)
    #[arg(long, conflicts_with = "text")]
    image: Option<PathBuf>,

    /// Watermark text
    #[arg(long)]
    text: Option<String>,

    /// Placement: top-left, top-right, center, bottom-left, bottom-right
    #[arg(short, long, default_value = "bottom-right")]
    anchor: Anchor,

    /// Opacity in percent (0-100)
    #[arg(long, default_value = "50")]
    opacity: f32,

    /// Watermark width in percent of the image width (5-80)
    #[arg(short, long, default_value = "20")]
    scale: f32,

    /// Initial font size for text, before fitting to the scale
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
    font_size: f32,

    /// Text color as #RRGGBB or #RGB
    #[arg(long, default_value = "#FFFFFF")]
    color: String,

    /// TrueType/OpenType font file for text (embedded font if omitted)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output format (jpg, png, webp, bmp)
    #[arg(short, long, default_value = "jpg")]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let (io, operation) = match cli.command {
        Command::Rename { io, prefix } => (io, Operation::Rename { prefix }),
        Command::Convert { io, format } => (io, Operation::Convert { format }),
        Command::Watermark(args) => {
            let operation = match watermark_operation(&args) {
                Ok(op) => op,
                Err(message) => {
                    eprintln!("Error: {message}");
                    process::exit(1);
                }
            };
            (args.io, operation)
        }
    };

    let options = BatchOptions {
        max_input_bytes: cli.max_size_mb.saturating_mul(1024 * 1024),
        ..BatchOptions::default()
    };
    let mut batch = BatchDriver::new(options);

    for input in &io.inputs {
        match batch.add_path(input) {
            Ok(0) if !cli.quiet => {
                eprintln!("[WARN] {}: no images found", input.display());
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: {}: {e}", input.display());
                process::exit(1);
            }
        }
    }

    if !cli.quiet {
        eprintln!(
            "Running {} on {} image(s)",
            operation.name(),
            batch.inputs().len()
        );
        eprintln!();
    }

    let report = match batch.run(&operation, &OutputTarget::from_path(&io.output)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    for outcome in &report.outcomes {
        print_outcome(outcome, cli.verbose, cli.quiet);
    }
    if !cli.quiet {
        print_summary(&report);
        eprintln!("Output written to {}", io.output.display());
    }

    if report.failed() > 0 {
        process::exit(1);
    }
}

/// Validate the user-facing percentages and build the operation.
fn watermark_operation(args: &WatermarkArgs) -> Result<Operation, String> {
    if !(0.0..=100.0).contains(&args.opacity) {
        return Err("Opacity must be between 0 and 100".to_string());
    }
    if !(5.0..=80.0).contains(&args.scale) {
        return Err("Scale must be between 5 and 80".to_string());
    }

    let color = parse_hex_color(&args.color).map_err(|e| e.to_string())?;
    let style = TextWatermark {
        font_size: args.font_size,
        color,
        font_path: args.font.clone(),
        ..TextWatermark::default()
    };
    let source = WatermarkSource::from_parts(args.image.clone(), args.text.clone(), style)
        .map_err(|e| e.to_string())?;

    Ok(Operation::Watermark {
        source,
        anchor: args.anchor,
        opacity: args.opacity / 100.0,
        scale: args.scale / 100.0,
        format: args.format,
    })
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "photo_batch=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_outcome(outcome: &ItemOutcome, verbose: bool, quiet: bool) {
    if quiet && outcome.success {
        return;
    }

    if outcome.skipped {
        eprintln!("[SKIP] {}: {}", outcome.source, outcome.message);
    } else if let (true, Some(output)) = (outcome.success, &outcome.output) {
        eprintln!("[OK] {} -> {output}", outcome.source);
        if verbose && !outcome.message.is_empty() {
            eprintln!("  -> {}", outcome.message);
        }
    } else {
        eprintln!("[FAIL] {}: {}", outcome.source, outcome.message);
    }
}

fn print_summary(report: &BatchReport) {
    eprintln!();
    eprint!("[Summary] Processed: {}", report.processed());
    if report.skipped() > 0 {
        eprint!(", Skipped: {}", report.skipped());
    }
    if report.failed() > 0 {
        eprint!(", Failed: {}", report.failed());
    }
    eprintln!(" (Total: {})", report.total());
}

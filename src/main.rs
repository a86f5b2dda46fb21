use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;
use line_diff::print::DEFAULT_UNIFIED_CONTEXT;
use line_diff::{LineDiffError, OutputError, Printer, UnifiedFormatter, diff_files, parse_colors};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "line-diff", version)]
#[command(about = "Compare two files line by line")]
struct Cli {
    /// Left (old) file, or `-` for standard input
    #[arg(required_unless_present_any = ["completions", "man"])]
    left: Option<PathBuf>,

    /// Right (new) file, or `-` for standard input
    #[arg(required_unless_present_any = ["completions", "man"])]
    right: Option<PathBuf>,

    /// Print unified hunks with the default number of context lines
    #[arg(short, long)]
    unified: bool,

    /// Context lines around each change (implies --unified)
    #[arg(short = 'U', long, value_name = "N", allow_negative_numbers = true)]
    context: Option<i64>,

    /// When to use colors
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = ColorWhen::Auto)]
    color: ColorWhen,

    /// Color overrides, e.g. "add=1;32:del=31:lbl=36"
    #[arg(long, env = "LINE_DIFF_COLORS", value_name = "SPEC")]
    colors: Option<String>,

    /// Name shown for the left side instead of its path
    #[arg(long, value_name = "NAME")]
    left_label: Option<String>,

    /// Name shown for the right side instead of its path
    #[arg(long, value_name = "NAME")]
    right_label: Option<String>,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Print a man page and exit
    #[arg(long)]
    man: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Exit status like classic diff: 0 same, 1 different, 2 trouble.
const DIFFERENT: u8 = 1;
const TROUBLE: u8 = 2;

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("line-diff: {e}");
            ExitCode::from(TROUBLE)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, LineDiffError> {
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "line-diff", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }
    if cli.man {
        clap_mangen::Man::new(Cli::command())
            .render(&mut io::stdout())
            .map_err(OutputError::from)?;
        return Ok(ExitCode::SUCCESS);
    }
    let (Some(left), Some(right)) = (cli.left.as_deref(), cli.right.as_deref()) else {
        Cli::command().print_help().map_err(OutputError::from)?;
        return Ok(ExitCode::from(TROUBLE));
    };

    let colors = cli
        .colors
        .as_deref()
        .map(parse_colors)
        .transpose()?
        .unwrap_or_default();

    let mut result = diff_files(left, right)?;
    if let Some(label) = cli.left_label {
        result.left_name = label;
    }
    if let Some(label) = cli.right_label {
        result.right_name = label;
    }

    let printer = match cli.color {
        ColorWhen::Auto => Printer::detect(io::stdout()),
        ColorWhen::Always => Printer::new(io::stdout()).with_ansi(true),
        ColorWhen::Never => Printer::new(io::stdout()).with_ansi(false),
    }
    .with_colors(colors);

    let mut printer = match (cli.context, cli.unified) {
        (Some(context), _) => {
            if context < 0 {
                tracing::warn!(
                    context,
                    default = DEFAULT_UNIFIED_CONTEXT,
                    "negative context, using default"
                );
            }
            printer.with_formatter(UnifiedFormatter::from_signed(context))
        }
        (None, true) => printer.with_unified(DEFAULT_UNIFIED_CONTEXT),
        (None, false) => printer,
    };

    printer.print(&result).map_err(OutputError::from)?;

    if result.is_identical() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(DIFFERENT))
    }
}

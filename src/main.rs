use std::io::Write;
use std::path::PathBuf;

use cartera_stats::analysis::{self, Analysis};
use cartera_stats::io::excel_read;
use cartera_stats::model::{ColumnMap, PRODUCT_HEADER, REASON_HEADER, TAX_ID_HEADER};
use cartera_stats::report::{self, ReportFormat};
use cartera_stats::{Result, ToolError};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&cli.log_level).and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    // Reports are rendered in full before anything reaches stdout.
    let mut buffer = Vec::new();
    match cli.command {
        Command::Report(args) => {
            let stats = analyse(&args.input)?;
            if let Some(path) = &args.export {
                analysis::export(&stats, path)?;
            }
            report::write_report(&mut buffer, &stats, args.format.into())?;
        }
        Command::Motivos(args) => {
            let stats = analyse(&args)?;
            report::write_motives(&mut buffer, &stats.motives)?;
        }
        Command::CrossSell(args) => {
            let stats = analyse(&args.input)?;
            report::write_cross_sell(&mut buffer, &stats.cross_sell, args.format.into())?;
        }
        Command::Columns(args) => {
            for header in excel_read::read_headers(&args.input)? {
                writeln!(buffer, "{header}")?;
            }
        }
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&buffer)?;
    stdout.flush()?;
    Ok(())
}

fn analyse(args: &InputArgs) -> Result<Analysis> {
    analysis::analyse(&args.input, &args.columns())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Cancellation and cross-selling statistics for a policy listing workbook."
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the cancellation tally and the cross-selling ratio.
    Report(ReportArgs),
    /// Print policies per cancellation reason.
    Motivos(InputArgs),
    /// Print single- and multi-product client counts.
    CrossSell(CrossSellArgs),
    /// List the column headers of the first sheet.
    Columns(ColumnsArgs),
}

#[derive(clap::Args)]
struct InputArgs {
    /// Policy listing workbook (first sheet is read).
    #[arg(long)]
    input: PathBuf,

    /// Header of the cancellation-reason column.
    #[arg(long, default_value = REASON_HEADER)]
    reason_column: String,

    /// Header of the client tax identifier column.
    #[arg(long, default_value = TAX_ID_HEADER)]
    tax_id_column: String,

    /// Header of the product column.
    #[arg(long, default_value = PRODUCT_HEADER)]
    product_column: String,
}

impl InputArgs {
    fn columns(&self) -> ColumnMap {
        ColumnMap {
            reason: self.reason_column.clone(),
            tax_id: self.tax_id_column.clone(),
            product: self.product_column.clone(),
        }
    }
}

#[derive(clap::Args)]
struct ReportArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output rendering.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also save the tallies to this xlsx file.
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(clap::Args)]
struct CrossSellArgs {
    #[command(flatten)]
    input: InputArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(clap::Args)]
struct ColumnsArgs {
    #[arg(long)]
    input: PathBuf,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

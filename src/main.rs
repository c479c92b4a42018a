use anyhow::{bail, Context};
use bloomlink::config::{default_schema, default_thresholds};
use bloomlink::{
    add_salt, compare, relink_segmented, BitVector, CompareMode, SegmentLayout, Thresholds,
};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Bloom-filter encoding and matching for privacy-preserving record linkage
#[derive(Parser, Debug)]
#[command(name = "bloomlink")]
#[command(about = "Encode person records as Bloom filters and match them without plaintext", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode person records from a CSV file into record filters
    ///
    /// Input rows: first_name,last_name,date_of_birth,gender[,mdat].
    /// Output rows: filter bit string plus the pass-through mdat column.
    Encode {
        /// Input CSV file (no header row)
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of random salt bits to set per filter before export
        #[arg(long, default_value_t = 0)]
        salt_amount: usize,

        /// Comma-separated fixed salt indices; takes precedence over
        /// --salt-amount, out-of-range indices are skipped
        #[arg(long, value_delimiter = ',')]
        salt_fixed: Vec<usize>,
    },

    /// Compare two encoded filters (as 0/1 bit strings)
    Compare {
        /// First filter bit string
        a: String,

        /// Second filter bit string
        b: String,

        /// Aggregate all segments into one total score
        #[arg(long)]
        total: bool,

        /// Replace transposed name segments with their cross scores
        #[arg(long)]
        swap: bool,

        /// Rating thresholds, three values in (0,1]
        #[arg(long, value_delimiter = ',')]
        thresholds: Option<Vec<f64>>,
    },

    /// Match a query record against a file of encoded filters
    Relink {
        /// CSV of encoded filters as produced by `encode`
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        date_of_birth: String,

        #[arg(long, default_value = "other")]
        gender: String,

        /// Report rows rated not-alike as well
        #[arg(long)]
        include_not_alike: bool,

        /// Disable swap correction of transposed name segments
        #[arg(long)]
        no_swap: bool,

        /// Rating thresholds, three values in (0,1]
        #[arg(long, value_delimiter = ',')]
        thresholds: Option<Vec<f64>>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Encode { input, output, salt_amount, salt_fixed } => {
            encode_file(&input, output.as_deref(), salt_amount, &salt_fixed)
        }
        Command::Compare { a, b, total, swap, thresholds } => {
            compare_filters(&a, &b, total, swap, thresholds.as_deref())
        }
        Command::Relink {
            input,
            first_name,
            last_name,
            date_of_birth,
            gender,
            include_not_alike,
            no_swap,
            thresholds,
        } => relink_file(
            &input,
            [&first_name, &last_name, &date_of_birth, &gender],
            include_not_alike,
            !no_swap,
            thresholds.as_deref(),
        ),
    }
}

fn parse_thresholds(values: Option<&[f64]>) -> anyhow::Result<Thresholds> {
    match values {
        Some(values) => Ok(Thresholds::from_slice(values)?),
        None => Ok(default_thresholds()),
    }
}

fn encode_file(
    input: &std::path::Path,
    output: Option<&std::path::Path>,
    salt_amount: usize,
    salt_fixed: &[usize],
) -> anyhow::Result<()> {
    let schema = default_schema();
    schema.validate()?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(input)
        .with_context(|| format!("opening {}", input.display()))?;

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path).with_context(|| format!("creating {}", path.display()))?),
        None => Box::new(io::stdout()),
    };
    let mut writer = csv::Writer::from_writer(sink);

    let mut rng = rand::rng();
    let mut encoded = 0usize;
    let mut skipped = 0usize;
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() < 4 {
            info!("skipping malformed row {}: expected at least 4 columns, got {}", line + 1, row.len());
            skipped += 1;
            continue;
        }
        let values = [&row[0], &row[1], &row[2], &row[3]];
        let mdat = row.get(4).unwrap_or("");

        let mut filter = schema.encode_record(&values)?;
        if !salt_fixed.is_empty() || salt_amount > 0 {
            filter = add_salt(&filter, salt_amount, salt_fixed, &mut rng);
        }
        writer.write_record([filter.to_bitstring().as_str(), mdat])?;
        encoded += 1;
    }
    writer.flush()?;

    info!("encoded {encoded} records ({skipped} skipped)");
    Ok(())
}

fn compare_filters(
    a: &str,
    b: &str,
    total: bool,
    swap: bool,
    thresholds: Option<&[f64]>,
) -> anyhow::Result<()> {
    let schema = default_schema();
    let layout = SegmentLayout::from_schema(&schema)?;
    let thresholds = parse_thresholds(thresholds)?;

    let filter_a = BitVector::from_bitstring(a)?;
    let filter_b = BitVector::from_bitstring(b)?;

    let mode = if total { CompareMode::Total } else { CompareMode::PerSegment };
    let outcome = compare(&filter_a, &filter_b, &layout, mode, &thresholds, swap)?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn relink_file(
    input: &std::path::Path,
    query: [&str; 4],
    include_not_alike: bool,
    allow_swap: bool,
    thresholds: Option<&[f64]>,
) -> anyhow::Result<()> {
    let schema = default_schema();
    let layout = SegmentLayout::from_schema(&schema)?;
    let thresholds = parse_thresholds(thresholds)?;

    let query_filter = schema.encode_record(&query)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(input)
        .with_context(|| format!("opening {}", input.display()))?;

    let mut rows: Vec<(u64, Vec<u8>)> = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        let Some(bits) = row.get(0) else {
            bail!("row {} has no filter column", line + 1);
        };
        rows.push((line as u64 + 1, BitVector::from_bitstring(bits)?.to_bytes()));
    }
    info!("loaded {} encoded rows from {}", rows.len(), input.display());

    let matches = relink_segmented(
        &query_filter,
        &rows,
        &layout,
        &thresholds,
        allow_swap,
        include_not_alike,
    )?;
    info!("{} of {} rows matched", matches.len(), rows.len());

    println!("{}", serde_json::to_string_pretty(&matches)?);
    Ok(())
}

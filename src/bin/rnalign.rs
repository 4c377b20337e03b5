//! A binary that aligns RNA sequences and prints the resulting position map.
//!
//! ```shell
//! cargo run --release --bin=rnalign --features=binaries -- construct.fa reference.fa
//! ```
//!
//! The first record of each FASTA file (optionally gzipped) is used. When one
//! or more `--via` files are provided, the sequences are aligned hop by hop
//! (source to the first intermediate, the first intermediate to the second,
//! and so on) and the maps are composed into a single chain. If `--profile` is
//! provided, the values in that file (one per line, `NaN` or blank for missing
//! values) are reprojected onto the target and reported alongside the map.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use clap::ValueEnum;
use clap_verbosity_flag::Verbosity;
use flate2::read::GzDecoder;
use noodles::fasta;
use rnalign::AlignmentChain;
use rnalign::AlignmentMap;
use rnalign::Sequence;
use rnalign::alignment::Cache;
use rnalign::data::Dataset as _;
use rnalign::data::Profile;
use rnalign::reproject::Threshold;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Rows;
use tracing::debug;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Arguments
////////////////////////////////////////////////////////////////////////////////////////

/// The format of the position map.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum Format {
    /// A human readable table.
    #[default]
    Table,

    /// Tab-separated values.
    Tsv,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The FASTA file containing the source sequence.
    source: PathBuf,

    /// The FASTA file containing the target sequence.
    target: PathBuf,

    /// FASTA files containing intermediate sequences to align through, in
    /// order.
    #[arg(long)]
    via: Vec<PathBuf>,

    /// A file of per-nucleotide values over the source sequence to reproject
    /// onto the target.
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// The fraction of lost values above which a warning is reported.
    #[arg(short, long, default_value_t = 0.5)]
    threshold: f64,

    /// Accept any character in the input sequences, replacing unknown ones
    /// with `N`.
    #[arg(short, long, default_value_t = false)]
    lenient: bool,

    /// The output format.
    #[arg(short, long, value_enum, default_value_t)]
    format: Format,

    #[command(flatten)]
    verbose: Verbosity,
}

////////////////////////////////////////////////////////////////////////////////////////
// Input
////////////////////////////////////////////////////////////////////////////////////////

/// Opens a file for buffered reading, decompressing it if it ends in `.gz`.
fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

/// Reads the first record of a FASTA file as a [`Sequence`].
fn read_sequence(path: &Path, lenient: bool) -> Result<Sequence> {
    let mut reader = fasta::Reader::new(open(path)?);

    let record = match reader.records().next() {
        Some(result) => result.with_context(|| format!("reading {}", path.display()))?,
        None => bail!("no FASTA records in {}", path.display()),
    };

    let raw = String::from_utf8_lossy(record.sequence().as_ref()).to_string();

    let sequence = if lenient {
        Sequence::lenient(raw)
    } else {
        Sequence::try_new(raw).with_context(|| format!("parsing sequence in {}", path.display()))?
    };

    info!(
        "read {} ({} nt) from {}",
        String::from_utf8_lossy(record.name()),
        sequence.len(),
        path.display()
    );

    Ok(sequence)
}

/// Reads one value per line, treating blank lines and `NaN` as missing.
fn read_values(path: &Path) -> Result<Vec<f64>> {
    let mut values = Vec::new();

    for (i, line) in open(path)?.lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        let line = line.trim();

        if line.is_empty() {
            values.push(f64::NAN);
            continue;
        }

        let value = line
            .parse::<f64>()
            .with_context(|| format!("parsing value on line {} of {}", i + 1, path.display()))?;
        values.push(value);
    }

    Ok(values)
}

////////////////////////////////////////////////////////////////////////////////////////
// Output
////////////////////////////////////////////////////////////////////////////////////////

/// Formats a position, printing the sentinel as `-`.
fn position(value: Option<usize>) -> String {
    value.map(|v| v.to_string()).unwrap_or(String::from("-"))
}

/// Formats a value, printing missing values as `NaN`.
fn value(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v}"),
        _ => String::from("NaN"),
    }
}

/// Prints the position map (and the reprojected profile, if any).
fn report(map: &AlignmentMap, profile: Option<(&Profile, &Profile)>, format: Format) {
    let mut header = vec!["Source", "Nt", "Target", "Nt"];

    if profile.is_some() {
        header.extend(["Value", "Reprojected"]);
    }

    let rows = (1..=map.len()).map(|s| {
        let t = map.get(s);

        let mut row = vec![
            s.to_string(),
            map.source().get(s).unwrap_or('-').to_string(),
            position(t),
            t.and_then(|t| map.target().get(t))
                .unwrap_or('-')
                .to_string(),
        ];

        if let Some((original, reprojected)) = profile {
            row.push(value(original.get(s)));
            row.push(value(t.and_then(|t| reprojected.get(t))));
        }

        row
    });

    match format {
        Format::Tsv => {
            println!("{}", header.join("\t"));
            for row in rows {
                println!("{}", row.join("\t"));
            }
        }
        Format::Table => {
            let mut builder = Builder::default();
            builder.push_record(header);

            for row in rows {
                builder.push_record(row);
            }

            let table = builder
                .build()
                .with(Style::rounded())
                .modify(Rows::new(1..), Alignment::left())
                .to_string();

            println!("{}", table);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

fn run(args: &Args) -> Result<()> {
    let threshold = match Threshold::new(args.threshold) {
        Some(threshold) => threshold,
        None => bail!("threshold must be between 0 and 1, found {}", args.threshold),
    };

    let mut sequences = vec![read_sequence(&args.source, args.lenient)?];
    for path in &args.via {
        sequences.push(read_sequence(path, args.lenient)?);
    }
    sequences.push(read_sequence(&args.target, args.lenient)?);

    let mut cache = Cache::new();
    let mut maps = Vec::new();

    for (hop, pair) in sequences.windows(2).enumerate() {
        let alignment = cache
            .get_or_align(&pair[0], &pair[1])
            .with_context(|| format!("aligning hop {}", hop + 1))?;

        let (a, b) = alignment.aligned();
        debug!("hop {} (score {}):", hop + 1, alignment.score());
        debug!("  {a}");
        debug!("  {b}");

        maps.push(alignment.map().clone());
    }

    let chain = AlignmentChain::try_from_vec(maps).context("building alignment chain")?;
    let map = chain.compose();

    info!(
        "{} of {} source positions map onto the target ({:.1}% unmapped)",
        map.mapped_count(),
        map.len(),
        map.unmapped_fraction() * 100.0
    );

    match &args.profile {
        Some(path) => {
            let values = read_values(path)?;
            let profile = Profile::try_new(map.source().clone(), values)
                .with_context(|| format!("loading profile from {}", path.display()))?;

            // Any warning is logged while reprojecting.
            let reprojected = profile
                .get_aligned_data_with(&chain, threshold)
                .context("reprojecting profile")?
                .into_inner();

            report(map, Some((&profile, &reprojected)), args.format);
        }
        None => report(map, None, args.format),
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    run(&args)
}

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};
use tubemap::{
    config::{Config, OutputFormat},
    fixture::SAMPLE_CSV,
    pipeline::{load, LoadOptions},
    view,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Normalize a tube-map dataset (lines, stations, benefits)")]
struct Args {
    /// Input file, or `-` for stdin. Defaults to the bundled sample.
    input: Option<PathBuf>,

    /// YAML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail on any normalization diagnostic.
    #[arg(long)]
    strict: bool,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Print only this station's benefits.
    #[arg(long)]
    station: Option<String>,

    /// With `--station`, print the bubble chart instead of the raw list.
    #[arg(long, requires = "station")]
    bubbles: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) config: file, then flags ─────────────────────────────────
    let mut config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if args.strict {
        config.strict = true;
    }
    if let Some(format) = args.format {
        config.output = format;
    }

    // ─── 2) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
    debug!(?config, "config resolved");

    // ─── 3) read + load ──────────────────────────────────────────────
    let text = read_input(args.input.as_ref())?;
    let loaded = load(&text, &LoadOptions::from(&config))?;

    // ─── 4) emit ─────────────────────────────────────────────────────
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.station {
        Some(id) => {
            if loaded.graph.station(id).is_none() {
                info!(station = %id, "unknown station");
            }
            emit(&mut out, config.output, &view::select(&loaded.graph, id, args.bubbles))?
        }
        None => emit(&mut out, config.output, &loaded.graph)?,
    }
    Ok(())
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        None => {
            info!("no input given; using bundled sample");
            Ok(SAMPLE_CSV.to_string())
        }
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
    }
}

fn emit<W: Write, T: Serialize + ?Sized>(out: &mut W, format: OutputFormat, value: &T) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value).context("serializing JSON")?;
            out.write_all(b"\n")?;
        }
        OutputFormat::Yaml => {
            serde_yaml::to_writer(&mut *out, value).context("serializing YAML")?;
        }
    }
    Ok(())
}

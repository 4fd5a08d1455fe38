mod cli;
mod timing;

use cli::Config;
use timing::{PhaseTimer, TimingReport};

use cube_stitch::prelude::*;

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufReader, BufWriter, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    run(&config)
}

fn run(config: &Config) -> anyhow::Result<()> {
    let manifest = Manifest::load_from_dir(&config.input_dir, &config.manifest)?;

    let stdin = io::stdin();
    let mut stdout = BufWriter::new(io::stdout());
    let report = stitch(&manifest, config, BufReader::new(stdin.lock()), &mut stdout)?;

    if config.time {
        report
            .append_to(&config.time_file)
            .with_context(|| format!("failed to write timing report to {:?}", config.time_file))?;
    }

    Ok(())
}

/// Reads the surface from `input` and writes its records to `output`. The clock of the returned report starts here, so
/// loading the manifest is not part of any phase.
fn stitch<W>(
    manifest: &Manifest,
    config: &Config,
    input: impl Read,
    output: W,
) -> anyhow::Result<TimingReport>
where
    W: Write + Send,
{
    let mut timer = PhaseTimer::start();

    let indexer = manifest.indexer();
    let cube = manifest.cube_shape();
    tracing::info!(
        "cube {:?} split into fragments of {:?}",
        cube.shape(),
        indexer.fragment_shape()
    );

    let (header, surface) = read_surface(input)?;
    validate_surface(&cube, &surface)?;
    timer.surface_parsed();
    tracing::info!(points = header.size, "parsed surface");

    let bins = FragmentBins::bin_surface(&indexer, &cube, &surface);
    drop(surface);
    timer.surface_binned();
    tracing::info!(fragments = bins.len(), "binned surface");

    let source = MappedFragmentSource::new(manifest.layout(&config.input_dir), &indexer);
    let extractor = Extractor::new(indexer, cube, source);
    let sink = LockedWriterSink::new(output);

    let stats = match config.threads {
        Some(num_threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .context("failed to build the worker pool")?;
            extractor.extract_in_pool(&pool, &bins, &sink)?
        }
        None => extractor.extract(&bins, &sink)?,
    };
    sink.flush()?;
    timer.finished();
    tracing::info!(
        records = stats.records,
        fragments = stats.fragments,
        "extracted surface"
    );

    Ok(timer.report(indexer.fragment_shape()))
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

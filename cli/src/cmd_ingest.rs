//! `chainassets ingest`: run the ingestion loop over a block file.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use chainassets_batch::{
    IngestConfig, IngestReport, Ingestor, JsonFileFeed, StorageConfig, UnknownVersionPolicy,
};
use chainassets_core::record::CanonicalTransfer;
use chainassets_observability::init_tracing;
use chainassets_storage::{MemorySink, PostgresSink, SqliteSink};

#[derive(Args)]
pub struct IngestArgs {
    /// JSON array or NDJSON file of blocks
    #[arg(long)]
    blocks: PathBuf,
    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Persist to this SQLite database
    #[arg(long, conflicts_with = "postgres")]
    sqlite: Option<String>,
    /// Persist to this PostgreSQL database
    #[arg(long)]
    postgres: Option<String>,
    #[arg(long)]
    from_block: Option<u32>,
    #[arg(long)]
    to_block: Option<u32>,
    #[arg(long)]
    batch_size: Option<usize>,
    /// Skip events with an unregistered spec version instead of failing
    #[arg(long)]
    skip_unknown: bool,
    /// Ignore the sink's last persisted height
    #[arg(long)]
    no_resume: bool,
    /// Print the stored records as JSON after the run
    #[arg(long)]
    print_records: bool,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl IngestArgs {
    /// Config file values overridden by command-line flags.
    fn config(&self, verbose: bool) -> Result<IngestConfig> {
        let mut config = match &self.config {
            Some(path) => IngestConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => IngestConfig::default(),
        };

        if let Some(path) = &self.sqlite {
            config.storage = StorageConfig::Sqlite { path: path.clone() };
        }
        if let Some(url) = &self.postgres {
            config.storage = StorageConfig::Postgres { url: url.clone() };
        }
        if let Some(from) = self.from_block {
            config.from_block = from;
        }
        if self.to_block.is_some() {
            config.to_block = self.to_block;
        }
        if let Some(size) = self.batch_size {
            config.batch_size = size;
        }
        if self.skip_unknown {
            config.unknown_version = UnknownVersionPolicy::Skip;
        }
        if self.no_resume {
            config.resume = false;
        }
        if verbose {
            config.log.level = "debug".into();
        }

        config.validate()?;
        Ok(config)
    }
}

pub async fn run(args: IngestArgs, verbose: bool) -> Result<()> {
    let config = args.config(verbose)?;
    init_tracing(&config.log);

    let (report, records) = ingest(&args, &config).await?;
    if let Some(records) = records {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }
    print_report(&report, args.json)
}

/// Run the ingestor into the configured sink. Returns the stored records
/// too when `--print-records` is set.
async fn ingest(
    args: &IngestArgs,
    config: &IngestConfig,
) -> Result<(IngestReport, Option<Vec<CanonicalTransfer>>)> {
    let ingestor = Ingestor::from_config(config);
    let mut feed = JsonFileFeed::open(&args.blocks)
        .await
        .with_context(|| format!("reading blocks from {}", args.blocks.display()))?;

    match &config.storage {
        StorageConfig::Memory => {
            let sink = MemorySink::new();
            let report = ingestor.run(&mut feed, &sink).await?;
            let records = args.print_records.then(|| sink.records());
            Ok((report, records))
        }
        StorageConfig::Sqlite { path } => {
            let sink = SqliteSink::open(path).await?;
            let report = ingestor.run(&mut feed, &sink).await?;
            let records = if args.print_records {
                Some(sink.transfers().await?)
            } else {
                None
            };
            Ok((report, records))
        }
        StorageConfig::Postgres { url } => {
            let sink = PostgresSink::connect(url).await?;
            let report = ingestor.run(&mut feed, &sink).await?;
            let records = if args.print_records {
                Some(sink.transfers().await?)
            } else {
                None
            };
            Ok((report, records))
        }
    }
}

fn print_report(report: &IngestReport, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("Batches:      {}", report.batches);
    println!("Blocks:       {}", report.blocks);
    println!("Records:      {}", report.records);
    println!("Skipped:      {}", report.skipped);
    println!("Ignored:      {}", report.ignored);
    match report.last_height {
        Some(h) => println!("Last height:  {h}"),
        None => println!("Last height:  -"),
    }
    Ok(())
}

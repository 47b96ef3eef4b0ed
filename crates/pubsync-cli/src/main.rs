//! pubsync - import recent zbMATH publications as markdown page bundles
//!
//! One pass per run: resolve the author roster, query the zbMATH document
//! search API for this year's publications, and create or refresh one page
//! bundle per document under the output directory.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, Utc};
use clap::{ArgGroup, Parser};

mod authors;
mod config;

use authors::AuthorRoster;
use config::Config;
use pubsync_zbmath::{CitationClient, ImportOptions, ZbMathClient, build_query, import_all};

#[derive(Parser)]
#[command(name = "pubsync")]
#[command(about = "Import recent zbMATH publications as markdown page bundles")]
#[command(version)]
#[command(group(ArgGroup::new("roster").required(true).args(["config", "authors"])))]
struct Cli {
    /// Author roster file (YAML list of zbMATH author codes)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Author profile directory; slugs and codes are read from each
    /// profile's front matter
    #[arg(short, long)]
    authors: Option<PathBuf>,

    /// Output directory for publication bundles
    #[arg(short, long, default_value = "content/publication/")]
    output: PathBuf,

    /// Mark imported publications as featured
    #[arg(long)]
    featured: bool,

    /// Drop empty front matter fields when writing
    #[arg(long)]
    compact: bool,

    /// Log every decision without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// Rewrite bundles even when the provider revision is unchanged
    #[arg(long)]
    overwrite: bool,

    /// Suppress info logs (only warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    pubsync_core::init_logging(cli.quiet, cli.verbose);

    let settings = Config::load()?;

    let roster = match (&cli.config, &cli.authors) {
        (Some(path), _) => AuthorRoster::from_config(path)?,
        (_, Some(dir)) => AuthorRoster::from_profiles(dir)?,
        _ => unreachable!("clap enforces the roster group"),
    };
    anyhow::ensure!(
        !roster.codes.is_empty(),
        "no zbMATH author codes found in the roster"
    );
    log::info!(
        "{} author codes in roster, {} mapped to local slugs",
        roster.codes.len(),
        roster.directory.len()
    );

    let query = build_query(&roster.codes, Local::now().date_naive());
    log::info!("searching zbMATH: {query}");

    let client = ZbMathClient::new(&settings.zbmath.base_url)?;
    let records = client.search(&query)?;
    log::info!("{} documents returned", records.len());

    if cli.dry_run {
        log::info!("dry run: no files will be written");
    }

    let citations = CitationClient::new(&settings.citation.resolver_url)?;
    let opts = ImportOptions {
        pub_dir: cli.output,
        featured: cli.featured,
        overwrite: cli.overwrite,
        compact: cli.compact,
        dry_run: cli.dry_run,
    };
    let summary = import_all(&records, &roster.directory, &citations, &opts, Utc::now());

    if std::io::stderr().is_terminal() {
        summary.print();
    } else {
        summary.log();
    }
    Ok(())
}

//! The `process` command: the batch driver over a stream of raw scrape
//! records.
//!
//! Failures are local to a single record — a malformed line or a rejected
//! item is logged with its line number and reason, then skipped, so one bad
//! record never aborts the rest of the batch.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use pricelens_core::{AppConfig, RawRecord, SiteConfig};
use pricelens_ingest::{Catalog, SalesOutcome};
use pricelens_pipeline::{ItemAssembler, RuleTable};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProcessStats {
    pub ingested: usize,
    pub rejected: usize,
    pub cheaper_wins: usize,
    pub reviews_added: usize,
}

pub(crate) fn run_process(
    config: &AppConfig,
    input: &Path,
    site: Option<&str>,
    sites_path: Option<&Path>,
) -> anyhow::Result<()> {
    let sites_path = sites_path.unwrap_or(&config.sites_path);
    let sites_file = pricelens_core::load_sites(sites_path)?;
    let site = sites_file.get(site.unwrap_or(&config.default_site))?;

    let file = File::open(input)
        .map_err(|e| anyhow::anyhow!("failed to open {}: {e}", input.display()))?;

    let mut catalog = Catalog::new();
    let stats = process_reader(BufReader::new(file), site, &mut catalog)?;

    println!(
        "processed {} records for {}: {} ingested, {} rejected, {} cheaper-price merges, {} reviews",
        stats.ingested + stats.rejected,
        site.name,
        stats.ingested,
        stats.rejected,
        stats.cheaper_wins,
        stats.reviews_added,
    );
    println!(
        "catalog: {} stores, {} categories, {} products, {} sales details",
        catalog.stores().len(),
        catalog.categories().len(),
        catalog.products().len(),
        catalog.sales_details().len(),
    );

    Ok(())
}

/// Streams JSON-lines raw records through the pipeline into the catalog.
///
/// Only I/O errors on the reader propagate; per-record failures increment
/// the rejected count.
fn process_reader<R: BufRead>(
    reader: R,
    site: &SiteConfig,
    catalog: &mut Catalog,
) -> anyhow::Result<ProcessStats> {
    let rules = RuleTable::product_listing();
    let assembler = ItemAssembler::new(site, &rules);
    let mut stats = ProcessStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: RawRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "skipping unparseable record");
                stats.rejected += 1;
                continue;
            }
        };

        let item = match assembler.load_item(&record) {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "rejected record");
                stats.rejected += 1;
                continue;
            }
        };

        match catalog.ingest(&item) {
            Ok(outcome) => {
                stats.ingested += 1;
                stats.reviews_added += outcome.reviews_added;
                if outcome.sales == SalesOutcome::CheaperWins {
                    stats.cheaper_wins += 1;
                }
            }
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "rejected item at ingestion");
                stats.rejected += 1;
            }
        }
    }

    Ok(stats)
}

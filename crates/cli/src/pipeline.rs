//! Per-region processing: matrices, differences, totals and the report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use lccqa_algorithms::change::{aggregate, build_matrix, difference, AggregateParams};
use lccqa_algorithms::severity::{classify, flagged, RuleTable, SeverityCounts};
use lccqa_algorithms::totals::{merge_all, reduce_totals};
use lccqa_core::{
    ChangeMatrix, ClassRegistry, DifferenceMatrix, MatrixKey, SeverityGrid, TotalsTable,
    TransitionCodes,
};
use lccqa_report::{Palette, Sheet, Workbook};

use crate::config::{Config, VersionConfig};
use crate::source::read_attribute_table;

/// Sheet name of the merged totals
pub const TOTALS_SHEET: &str = "LC_Totals";

/// Everything resolved from the configuration that the engine needs.
///
/// Built once per run and shared by every region.
#[derive(Debug, Clone)]
pub struct Engine {
    pub registry: ClassRegistry,
    pub codes: TransitionCodes,
    pub rules: RuleTable,
    pub palette: Palette,
    pub params: AggregateParams,
}

impl Engine {
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = config.registry().context("Invalid class registry")?;
        let codes = config.codes().context("Invalid transition codes")?;
        let rules = config.rules(&registry).context("Invalid severity rules")?;
        let palette = config.palette().context("Invalid severity colors")?;
        Ok(Self {
            registry,
            codes,
            rules,
            palette,
            params: config.aggregate_params(),
        })
    }
}

/// Results for one region.
#[derive(Debug, Clone)]
pub struct RegionReport {
    pub region: String,
    pub matrices: Vec<(ChangeMatrix, SeverityGrid)>,
    pub differences: Vec<(DifferenceMatrix, SeverityGrid)>,
    pub totals: TotalsTable,
}

impl RegionReport {
    /// Matrix for a version and period, if built
    pub fn matrix(&self, version: &str, sheet_name: &str) -> Option<&ChangeMatrix> {
        self.matrices
            .iter()
            .map(|(m, _)| m)
            .find(|m| m.version() == version && m.key().sheet_name() == sheet_name)
    }

    pub fn workbook(&self, palette: &Palette) -> Workbook {
        let mut book = Workbook::new(format!("{} land cover change QA", self.region), palette.clone());
        for (matrix, tags) in &self.matrices {
            book.push(Sheet::matrix(matrix, Some(tags.clone())));
        }
        for (diff, tags) in &self.differences {
            book.push(Sheet::difference(diff, Some(tags.clone())));
        }
        book.push(Sheet::totals(TOTALS_SHEET, &self.totals));
        book
    }
}

/// Build every matrix, difference and totals table for one region.
pub fn run_region(config: &Config, engine: &Engine, region: &str) -> Result<RegionReport> {
    let years = config
        .regions
        .get(region)
        .with_context(|| format!("No survey years configured for {}", region))?;

    let mut matrices = Vec::new();
    let mut totals = Vec::new();

    for version in &config.versions {
        info!("{} Creating matrices for {} edition", region, version.name);
        for period in version.periods(years)? {
            let key = MatrixKey::new(region, period, version.name.clone());
            let (matrix, tags, period_totals) = process_period(engine, version, key)?;
            matrices.push((matrix, tags));
            totals.push(period_totals);
        }
    }

    let mut differences = Vec::new();
    if let Some(compare) = &config.compare {
        for (newer, _) in matrices.iter().filter(|(m, _)| m.version() == compare.newer) {
            let older = matrices
                .iter()
                .map(|(m, _)| m)
                .find(|m| m.version() == compare.older && m.period() == newer.period());
            let Some(older) = older else {
                continue;
            };

            info!("{} Differencing matrices for {}", region, newer.period());
            let diff = difference(newer, older)
                .with_context(|| format!("Failed to difference {}", newer.key()))?;
            let tags = classify(&diff, &engine.rules)?;
            differences.push((diff, tags));
        }
    }

    info!("{} Merging LC totals", region);
    let totals = merge_all(&totals)?
        .reorder_rows(engine.registry.full_classes())
        .sorted_columns();

    Ok(RegionReport {
        region: region.to_string(),
        matrices,
        differences,
        totals,
    })
}

fn process_period(
    engine: &Engine,
    version: &VersionConfig,
    key: MatrixKey,
) -> Result<(ChangeMatrix, SeverityGrid, TotalsTable)> {
    let path = version.source_path(&key.region, key.period);
    let rows = read_attribute_table(&path)
        .with_context(|| format!("Failed to load {} for {}", path.display(), key))?;
    let observations = engine
        .codes
        .observations(rows)
        .with_context(|| format!("Unmapped transition in {}", path.display()))?;

    let areas = aggregate(&observations, &engine.registry, engine.params.clone())
        .with_context(|| format!("Failed to aggregate {}", key))?;
    debug!("{}: {:.4} acres mapped", key, areas.total_area());
    let totals = reduce_totals(&areas, key.period, &key.version)?;
    let matrix = build_matrix(&areas, key)?;

    let tags = classify(&matrix, &engine.rules)?;
    let counts = SeverityCounts::from_tags(&tags);
    if counts.flagged() > 0 {
        warn!(
            "{}: {} invalid and {} unlikely transitions",
            matrix.key(),
            counts.invalid,
            counts.needs_review
        );
        for flag in flagged(&matrix, &tags) {
            info!(
                "  {} {} -> {}: {:.4} acres",
                flag.severity.name(),
                flag.early,
                flag.late,
                flag.value
            );
        }
    }

    Ok((matrix, tags, totals))
}

/// Write the region's workbook as HTML plus per-sheet CSV files.
///
/// Returns the HTML path.
pub fn write_report(report: &RegionReport, palette: &Palette, out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let stem = format!("{}_LCC_QA", report.region);
    let book = report.workbook(palette);
    let html = out_dir.join(format!("{}.html", stem));
    book.save_html(&html)
        .with_context(|| format!("Failed to write {}", html.display()))?;
    book.save_csv(out_dir.join(&stem))
        .with_context(|| format!("Failed to write CSV sheets for {}", report.region))?;
    Ok(html)
}

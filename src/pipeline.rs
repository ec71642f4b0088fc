//! End-to-end mining run: load inputs, build executives, mine relationships,
//! write outputs.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::canonical::CanonicalTable;
use crate::config::AppConfig;
use crate::export;
use crate::graph::{self, MiningCounts};
use crate::ingest::{self, ExecutiveSet};
use crate::model::{BioAtom, CompanyRecord, Executive, RelationshipEdge};
use crate::successor;

/// Which relationship files to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Both,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            "both" => Some(OutputFormat::Both),
            _ => None,
        }
    }

    fn wants_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    fn wants_csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both)
    }
}

/// Everything a completed run produced, for the summary and for tests.
#[derive(Debug)]
pub struct MiningReport {
    pub executives: Vec<Executive>,
    pub relationships: Vec<RelationshipEdge>,
    pub atom_coverage: usize,
    pub counts: MiningCounts,
    pub successor_count: usize,
}

/// Mine relationships from already-loaded inputs. Pure in-memory pass; the
/// file-level entry point is [`run`].
pub fn mine(
    companies: &[CompanyRecord],
    atoms: &HashMap<String, BioAtom>,
    table: &CanonicalTable,
    config: &AppConfig,
) -> MiningReport {
    let set: ExecutiveSet = ingest::build_executives(companies, atoms, table);

    let (edges, counts) = graph::mine_undirected(&set, &config.mining);
    let successors = successor::infer_successors(&set);
    let successor_count = successors.len();

    let mut relationships = edges.into_edges();
    relationships.extend(successors);
    info!("Total relationships after dedup: {}", relationships.len());

    MiningReport {
        executives: set.executives,
        relationships,
        atom_coverage: set.atom_coverage,
        counts,
        successor_count,
    }
}

/// Full run: load the three inputs, mine, export, print the summary.
pub fn run(config: &AppConfig, format: OutputFormat) -> Result<MiningReport> {
    let table = CanonicalTable::load(Path::new(&config.paths.canonical_file))
        .context("Failed to load canonical name table")?;
    let companies = ingest::load_roster(Path::new(&config.paths.roster_file))?;
    let atoms = ingest::load_atoms(Path::new(&config.paths.atoms_file))?;

    let report = mine(&companies, &atoms, &table, config);

    let output_dir = Path::new(&config.paths.output_dir);
    export::ensure_output_dir(output_dir)?;
    export::export_executives_json(&report.executives, output_dir)?;
    if format.wants_json() {
        export::export_relationships_json(&report.relationships, output_dir)?;
    }
    if format.wants_csv() {
        export::export_relationships_csv(&report.relationships, output_dir)?;
    }

    export::print_mining_summary(&report.executives, &report.relationships, report.atom_coverage);
    Ok(report)
}

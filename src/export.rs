//! Output writers: executives.json, relationships.json, relationships.csv
//! and the console summary.

use anyhow::{Context, Result};
use chrono::Utc;
use csv::Writer;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::model::{EdgeType, Executive, RelationshipEdge};

pub fn export_executives_json(executives: &[Executive], output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join("executives.json");
    debug!("Exporting {} executives to {}", executives.len(), path.display());

    let json_string = serde_json::to_string_pretty(executives)?;
    let mut file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(json_string.as_bytes())?;

    info!("Exported {} executives to {}", executives.len(), path.display());
    Ok(path)
}

pub fn export_relationships_json(
    relationships: &[RelationshipEdge],
    output_dir: &Path,
) -> Result<PathBuf> {
    let path = output_dir.join("relationships.json");
    debug!(
        "Exporting {} relationships to {}",
        relationships.len(),
        path.display()
    );

    let json_string = serde_json::to_string_pretty(relationships)?;
    let mut file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(json_string.as_bytes())?;

    info!(
        "Exported {} relationships to {}",
        relationships.len(),
        path.display()
    );
    Ok(path)
}

pub fn export_relationships_csv(
    relationships: &[RelationshipEdge],
    output_dir: &Path,
) -> Result<PathBuf> {
    let path = output_dir.join("relationships.csv");
    debug!(
        "Exporting {} relationships to {}",
        relationships.len(),
        path.display()
    );

    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(["source", "target", "type", "strength", "label"])?;
    for edge in relationships {
        wtr.write_record([
            edge.source.to_string().as_str(),
            edge.target.to_string().as_str(),
            edge.edge_type.as_str(),
            edge.strength.to_string().as_str(),
            edge.label.as_str(),
        ])?;
    }
    wtr.flush()?;

    info!(
        "Exported {} relationships to {}",
        relationships.len(),
        path.display()
    );
    Ok(path)
}

/// Create the output directory if needed.
pub fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))
}

pub fn print_mining_summary(
    executives: &[Executive],
    relationships: &[RelationshipEdge],
    atom_coverage: usize,
) {
    let mut type_counts: HashMap<EdgeType, usize> = HashMap::new();
    for edge in relationships {
        *type_counts.entry(edge.edge_type).or_insert(0) += 1;
    }

    println!("\n=== Mining Summary ===");
    println!("Generated at: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Executives: {}", executives.len());
    println!("Bio atom coverage: {}/{}", atom_coverage, executives.len());
    println!("Relationships (deduplicated): {}", relationships.len());
    for edge_type in [
        EdgeType::Colleague,
        EdgeType::Alumni,
        EdgeType::Former,
        EdgeType::Regulator,
        EdgeType::Successor,
    ] {
        let count = type_counts.get(&edge_type).copied().unwrap_or(0);
        if count > 0 {
            println!("  {}: {}", edge_type, count);
        }
    }
    println!("======================\n");
}

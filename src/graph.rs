//! Undirected relationship mining.
//!
//! Four passes over the finalized executive list: colleague (shared current
//! employer), alumni (shared school), former (shared previous employer) and
//! regulator (shared regulator background). Each pass groups executives by a
//! key, caps the group, and emits every pair inside it. All pairs land in one
//! dedup map keyed by the unordered id pair, where a stronger classification
//! replaces a weaker one and ties keep the incumbent. Group iteration follows
//! insertion order, so reruns over the same input produce identical output.

use indexmap::IndexMap;
use tracing::info;

use crate::config::MiningConfig;
use crate::ingest::ExecutiveSet;
use crate::model::{EdgeType, RelationshipEdge};

/// Dedup map over unordered executive pairs. At most one edge survives per
/// pair; a later edge wins only with strictly greater strength.
#[derive(Debug, Default)]
pub struct EdgeMap {
    edges: IndexMap<(u32, u32), RelationshipEdge>,
}

impl EdgeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edge for the unordered pair, keeping source/target in
    /// discovery order. Returns true when the edge was stored.
    pub fn add(&mut self, source: u32, target: u32, edge_type: EdgeType, label: &str) -> bool {
        let key = (source.min(target), source.max(target));
        match self.edges.get_mut(&key) {
            Some(existing) => {
                if edge_type.strength() > existing.strength {
                    *existing = RelationshipEdge::new(source, target, edge_type, label);
                    true
                } else {
                    false
                }
            }
            None => {
                self.edges
                    .insert(key, RelationshipEdge::new(source, target, edge_type, label));
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Surviving edges in first-discovery order of their pairs.
    pub fn into_edges(self) -> Vec<RelationshipEdge> {
        self.edges.into_values().collect()
    }
}

/// Pair emission counts per pass, before cross-type dedup.
#[derive(Debug, Default, Clone, Copy)]
pub struct MiningCounts {
    pub colleague: usize,
    pub alumni: usize,
    pub former: usize,
    pub regulator: usize,
}

/// Run the four undirected passes and return the dedup map plus the raw
/// per-pass emission counts.
pub fn mine_undirected(set: &ExecutiveSet, cfg: &MiningConfig) -> (EdgeMap, MiningCounts) {
    let mut edges = EdgeMap::new();
    let mut counts = MiningCounts::default();

    counts.colleague = mine_colleagues(set, cfg.colleague_cap, &mut edges);
    info!("colleague: {} pairs", counts.colleague);

    counts.alumni = mine_grouped(
        set,
        EdgeType::Alumni,
        cfg.group_cap,
        cfg.min_school_len,
        |e| &e.extracted.schools,
        &mut edges,
    );
    info!("alumni: {} pairs", counts.alumni);

    counts.former = mine_grouped(
        set,
        EdgeType::Former,
        cfg.group_cap,
        cfg.min_company_len,
        |e| &e.extracted.former_companies,
        &mut edges,
    );
    info!("former: {} pairs", counts.former);

    // Regulator tokens are curated upstream; no length filter.
    counts.regulator = mine_grouped(
        set,
        EdgeType::Regulator,
        cfg.group_cap,
        0,
        |e| &e.extracted.regulator_bg,
        &mut edges,
    );
    info!("regulator: {} pairs", counts.regulator);

    (edges, counts)
}

/// Colleague pass: every pair of executives at the same current employer,
/// capped per company. The company name is the edge label.
fn mine_colleagues(set: &ExecutiveSet, cap: usize, edges: &mut EdgeMap) -> usize {
    let mut count = 0;
    for (company, ids) in &set.company_to_execs {
        let ids = &ids[..ids.len().min(cap)];
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                edges.add(a, b, EdgeType::Colleague, company);
                count += 1;
            }
        }
    }
    count
}

/// Shared-attribute pass: group by each value the accessor yields, filter
/// keys shorter than `min_len` chars, cap the group, emit every pair with
/// the group key as label.
fn mine_grouped<'a, F>(
    set: &'a ExecutiveSet,
    edge_type: EdgeType,
    cap: usize,
    min_len: usize,
    accessor: F,
    edges: &mut EdgeMap,
) -> usize
where
    F: Fn(&'a crate::model::Executive) -> &'a Vec<String>,
{
    let mut groups: IndexMap<&str, Vec<u32>> = IndexMap::new();
    for exec in &set.executives {
        for key in accessor(exec) {
            if key.chars().count() >= min_len {
                groups.entry(key.as_str()).or_default().push(exec.id);
            }
        }
    }

    let mut count = 0;
    for (key, ids) in &groups {
        if ids.len() < 2 {
            continue;
        }
        let ids = &ids[..ids.len().min(cap)];
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                edges.add(a, b, edge_type, key);
                count += 1;
            }
        }
    }
    count
}

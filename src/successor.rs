//! Successor inference: directed predecessor-to-incumbent edges.
//!
//! Indexes every (company, key role) post with its current holders and its
//! former holders, then links each former holder to each current one. Former
//! holders come from non-current career steps at companies that are
//! themselves in the roster; a step at the executive's own current employer
//! in a role they still hold is a continuation, not a predecessor stint.

use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::info;

use crate::ingest::ExecutiveSet;
use crate::model::{EdgeType, RelationshipEdge};
use crate::roles::extract_key_roles;

/// Chars of the company name carried into the edge label.
const LABEL_COMPANY_CHARS: usize = 8;

#[derive(Debug, Default)]
struct RoleHolders {
    current: Vec<u32>,
    former: Vec<u32>,
}

/// Infer successor edges across the executive set. Directed from former
/// holder to current holder, one edge per ordered pair, labelled with a
/// truncated company name and the role.
pub fn infer_successors(set: &ExecutiveSet) -> Vec<RelationshipEdge> {
    let mut role_index: IndexMap<(String, &'static str), RoleHolders> = IndexMap::new();
    let mut seen_former: HashSet<(String, String, &'static str)> = HashSet::new();

    for exec in &set.executives {
        let current_roles = extract_key_roles(&exec.title);
        for &role in &current_roles {
            role_index
                .entry((exec.company.clone(), role))
                .or_default()
                .current
                .push(exec.id);
        }

        for step in &exec.career_path {
            if step.is_current || !set.company_names.contains(&step.company) {
                continue;
            }
            for role in extract_key_roles(&step.title) {
                // Still holding the same role at the same company: the step
                // is the person's own tenure, not a predecessor's.
                if exec.company == step.company && current_roles.contains(&role) {
                    continue;
                }
                let dedup_key = (exec.name.clone(), step.company.clone(), role);
                if seen_former.insert(dedup_key) {
                    role_index
                        .entry((step.company.clone(), role))
                        .or_default()
                        .former
                        .push(exec.id);
                }
            }
        }
    }

    let mut seen_pairs: HashSet<(u32, u32)> = HashSet::new();
    let mut edges = Vec::new();
    for ((company, role), holders) in &role_index {
        if holders.current.is_empty() || holders.former.is_empty() {
            continue;
        }
        let short: String = company.chars().take(LABEL_COMPANY_CHARS).collect();
        let label = format!("{}·{}", short, role);
        for &curr_id in &holders.current {
            for &form_id in &holders.former {
                if curr_id != form_id && seen_pairs.insert((form_id, curr_id)) {
                    edges.push(RelationshipEdge::new(
                        form_id,
                        curr_id,
                        EdgeType::Successor,
                        label.as_str(),
                    ));
                }
            }
        }
    }

    info!("successor: {} edges", edges.len());
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalTable;
    use crate::ingest::build_executives;
    use crate::model::{BioAtom, CareerStep, CompanyRecord, RawExecutive};
    use std::collections::HashMap;

    fn exec(name: &str, title: &str) -> RawExecutive {
        RawExecutive {
            name: Some(name.to_string()),
            title: Some(title.to_string()),
            bio: None,
        }
    }

    fn company(name: &str, execs: Vec<RawExecutive>) -> CompanyRecord {
        CompanyRecord {
            name: name.to_string(),
            region: None,
            website: None,
            executives: execs,
        }
    }

    fn former_step(company: &str, title: &str) -> CareerStep {
        CareerStep {
            company: company.to_string(),
            title: title.to_string(),
            start_year: None,
            end_year: None,
            is_current: false,
        }
    }

    fn atom_with_steps(steps: Vec<CareerStep>) -> BioAtom {
        BioAtom {
            career: steps,
            ..Default::default()
        }
    }

    #[test]
    fn test_predecessor_links_to_incumbent() {
        // 乙 currently runs 太平人寿; 甲 held 总经理 there before moving on.
        let roster = vec![
            company("太平人寿保险有限公司", vec![exec("乙", "总经理")]),
            company("富卫人寿保险有限公司", vec![exec("甲", "董事长")]),
        ];
        let mut atoms = HashMap::new();
        atoms.insert(
            "甲|富卫人寿保险有限公司".to_string(),
            atom_with_steps(vec![former_step("太平人寿保险有限公司", "总经理")]),
        );
        let set = build_executives(&roster, &atoms, &CanonicalTable::default());
        let edges = infer_successors(&set);
        assert_eq!(edges.len(), 1);
        let edge = &edges[0];
        // Directed: predecessor is the source.
        let jia = set.executives.iter().find(|e| e.name == "甲").unwrap().id;
        let yi = set.executives.iter().find(|e| e.name == "乙").unwrap().id;
        assert_eq!((edge.source, edge.target), (jia, yi));
        assert_eq!(edge.edge_type, EdgeType::Successor);
        assert!((edge.strength - 0.8).abs() < f64::EPSILON);
        assert_eq!(edge.label, "太平人寿保险有限·总经理");
    }

    #[test]
    fn test_step_outside_roster_ignored() {
        let roster = vec![
            company("太平人寿保险有限公司", vec![exec("乙", "总经理")]),
            company("富卫人寿保险有限公司", vec![exec("甲", "董事长")]),
        ];
        let mut atoms = HashMap::new();
        atoms.insert(
            "甲|富卫人寿保险有限公司".to_string(),
            atom_with_steps(vec![former_step("别处保险股份有限公司", "总经理")]),
        );
        let set = build_executives(&roster, &atoms, &CanonicalTable::default());
        assert!(infer_successors(&set).is_empty());
    }

    #[test]
    fn test_own_continued_role_is_not_a_predecessor_stint() {
        // 甲's old step at their current employer in their current role must
        // not make 甲 their own predecessor or anyone else's.
        let roster = vec![company("太平人寿保险有限公司", vec![exec("甲", "总经理")])];
        let mut atoms = HashMap::new();
        atoms.insert(
            "甲|太平人寿保险有限公司".to_string(),
            atom_with_steps(vec![
                CareerStep::synthetic_current("太平人寿保险有限公司", "总经理"),
                former_step("太平人寿保险有限公司", "总经理"),
            ]),
        );
        let set = build_executives(&roster, &atoms, &CanonicalTable::default());
        assert!(infer_successors(&set).is_empty());
    }

    #[test]
    fn test_different_role_at_own_company_counts() {
        // 甲 was 副总经理 at the company where they are now 总经理; 乙 is the
        // current 副总经理, so 甲 precedes 乙.
        let roster = vec![company(
            "太平人寿保险有限公司",
            vec![exec("甲", "总经理"), exec("乙", "副总经理")],
        )];
        let mut atoms = HashMap::new();
        atoms.insert(
            "甲|太平人寿保险有限公司".to_string(),
            atom_with_steps(vec![
                CareerStep::synthetic_current("太平人寿保险有限公司", "总经理"),
                former_step("太平人寿保险有限公司", "副总经理"),
            ]),
        );
        let set = build_executives(&roster, &atoms, &CanonicalTable::default());
        let edges = infer_successors(&set);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].label, "太平人寿保险有限·副总经理");
    }

    #[test]
    fn test_never_own_successor() {
        // Same person is both the former and the current holder under two
        // listings; no self-loop may appear.
        let roster = vec![company("太平人寿保险有限公司", vec![exec("甲", "总经理")])];
        let mut atoms = HashMap::new();
        atoms.insert(
            "甲|太平人寿保险有限公司".to_string(),
            atom_with_steps(vec![
                CareerStep::synthetic_current("太平人寿保险有限公司", "董事长兼总经理"),
                former_step("太平人寿保险有限公司", "副总经理"),
            ]),
        );
        let set = build_executives(&roster, &atoms, &CanonicalTable::default());
        for edge in infer_successors(&set) {
            assert_ne!(edge.source, edge.target);
        }
    }

    #[test]
    fn test_repeated_step_dedups_per_person() {
        // The same stint listed twice yields a single edge.
        let roster = vec![
            company("太平人寿保险有限公司", vec![exec("乙", "总经理")]),
            company("富卫人寿保险有限公司", vec![exec("甲", "董事长")]),
        ];
        let mut atoms = HashMap::new();
        atoms.insert(
            "甲|富卫人寿保险有限公司".to_string(),
            atom_with_steps(vec![
                former_step("太平人寿保险有限公司", "总经理"),
                former_step("太平人寿保险有限公司", "总经理兼首席执行官"),
            ]),
        );
        let set = build_executives(&roster, &atoms, &CanonicalTable::default());
        let edges = infer_successors(&set);
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn test_short_company_label_not_truncated() {
        let roster = vec![
            company("太平人寿", vec![exec("乙", "总经理")]),
            company("富卫人寿保险有限公司", vec![exec("甲", "董事长")]),
        ];
        let mut atoms = HashMap::new();
        atoms.insert(
            "甲|富卫人寿保险有限公司".to_string(),
            atom_with_steps(vec![former_step("太平人寿", "总经理")]),
        );
        let set = build_executives(&roster, &atoms, &CanonicalTable::default());
        let edges = infer_successors(&set);
        assert_eq!(edges[0].label, "太平人寿·总经理");
    }
}

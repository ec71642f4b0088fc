//! Roster and atom ingestion: builds the finalized executive list.
//!
//! This is the per-record cleanup pass. Every executive record gets a
//! sequential id, a normalized title, and an `extracted` block derived from
//! its bio atom: canonicalized schools, former employers matched against the
//! legitimate institution set, and regulator-background tokens. Records
//! degrade instead of failing - a missing atom falls back to a synthetic
//! single-step career, an unmatched company becomes an absent entry, and only
//! a missing name skips the record outright.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::canonical::{CanonicalTable, CompanyMatcher};
use crate::model::{BioAtom, CareerStep, CompanyRecord, Executive, ExtractedProfile};
use crate::title::TitleNormalizer;

/// Region labels in the source data mapped to region codes.
fn region_code(region: Option<&str>) -> &'static str {
    match region {
        Some("中国香港") => "HK",
        Some("新加坡") => "SG",
        _ => "CN",
    }
}

/// Load the company roster from a JSON file.
pub fn load_roster(path: &Path) -> Result<Vec<CompanyRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
    let companies: Vec<CompanyRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse roster file: {}", path.display()))?;
    info!("Loaded roster: {} companies", companies.len());
    Ok(companies)
}

/// Load the bio atoms mapping keyed by `"<name>|<company>"`. A missing file
/// is tolerated: the pipeline then runs on synthetic careers only.
pub fn load_atoms(path: &Path) -> Result<HashMap<String, BioAtom>> {
    if !path.exists() {
        info!("No bio atoms file at {}, continuing without atoms", path.display());
        return Ok(HashMap::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read atoms file: {}", path.display()))?;
    let atoms: HashMap<String, BioAtom> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse atoms file: {}", path.display()))?;
    info!("Loaded bio atoms: {} people", atoms.len());
    Ok(atoms)
}

/// The finalized executive set plus the indices later passes need.
#[derive(Debug)]
pub struct ExecutiveSet {
    pub executives: Vec<Executive>,
    /// Executives per current employer, in roster order.
    pub company_to_execs: IndexMap<String, Vec<u32>>,
    /// Names of all current employers in the roster.
    pub company_names: HashSet<String>,
    /// How many executives had a bio atom.
    pub atom_coverage: usize,
}

/// Minimum chars for an extracted school name to be kept at all.
const MIN_SCHOOL_CHARS: usize = 4;

/// Build finalized executive records from the roster and the atoms mapping.
pub fn build_executives(
    companies: &[CompanyRecord],
    atoms: &HashMap<String, BioAtom>,
    table: &CanonicalTable,
) -> ExecutiveSet {
    let company_names: HashSet<String> =
        companies.iter().map(|c| c.name.clone()).collect();
    let normalizer = TitleNormalizer::new(company_names.iter().cloned());
    let matcher = CompanyMatcher::new(table, company_names.iter().cloned());

    let mut executives = Vec::new();
    let mut company_to_execs: IndexMap<String, Vec<u32>> = IndexMap::new();
    let mut atom_coverage = 0;
    let mut next_id: u32 = 0;

    for company in companies {
        let region = region_code(company.region.as_deref());
        let website = company.website.clone().unwrap_or_default();

        for raw in &company.executives {
            let name = raw.name.as_deref().unwrap_or("").trim().to_string();
            if name.is_empty() {
                debug!("Skipping nameless executive record at {}", company.name);
                continue;
            }
            let title = normalizer.normalize(raw.title.as_deref().unwrap_or(""));
            let bio = raw.bio.as_deref().unwrap_or("").trim().to_string();

            let atom_key = format!("{}|{}", name, company.name);
            let atom = atoms.get(&atom_key);
            if atom.is_some() {
                atom_coverage += 1;
            }
            let atom = atom.cloned().unwrap_or_default();

            let extracted = extract_profile(&atom, &company.name, table, &matcher);
            let career_path = career_with_current(&atom.career, &company.name, &title);

            let exec = Executive {
                id: next_id,
                name,
                title,
                company: company.name.clone(),
                region: region.to_string(),
                website: website.clone(),
                bio,
                extracted,
                career_path,
                identity: atom.identity,
                education: atom.education,
                qualifications: atom.qualifications,
                board_roles: atom.board_roles,
                industry_roles: atom.industry_roles,
            };
            company_to_execs
                .entry(company.name.clone())
                .or_default()
                .push(exec.id);
            executives.push(exec);
            next_id += 1;
        }
    }

    info!(
        "Built {} executives, atom coverage {}/{}",
        executives.len(),
        atom_coverage,
        executives.len()
    );
    ExecutiveSet {
        executives,
        company_to_execs,
        company_names,
        atom_coverage,
    }
}

/// Derive the extracted block: schools, former employers, regulator tokens.
fn extract_profile(
    atom: &BioAtom,
    current_company: &str,
    table: &CanonicalTable,
    matcher: &CompanyMatcher,
) -> ExtractedProfile {
    // Schools from education entries, long enough to identify, deduped in
    // first-seen order, then canonicalized.
    let mut schools_raw = Vec::new();
    let mut seen = HashSet::new();
    for edu in &atom.education {
        if let Some(school) = edu.school.as_deref() {
            if school.chars().count() >= MIN_SCHOOL_CHARS && seen.insert(school.to_string()) {
                schools_raw.push(school.to_string());
            }
        }
    }
    let schools = table.apply("schools", &schools_raw);

    // Former employers from non-current career steps, then non-current board
    // roles, matched against the legitimate institution set. The current
    // employer never counts as a former one.
    let mut former_companies = Vec::new();
    for step in &atom.career {
        if step.is_current {
            continue;
        }
        if let Some(canonical) = matcher.match_company(&step.company) {
            if canonical != current_company {
                former_companies.push(canonical);
            }
        }
    }
    for role in &atom.board_roles {
        if role.is_current {
            continue;
        }
        if let Some(canonical) = matcher.match_company(&role.company) {
            if canonical != current_company && !former_companies.contains(&canonical) {
                former_companies.push(canonical);
            }
        }
    }
    let mut deduped = Vec::new();
    let mut seen = HashSet::new();
    for fc in former_companies {
        if seen.insert(fc.clone()) {
            deduped.push(fc);
        }
    }
    let former_companies = table.apply("companies", &deduped);

    let regulator_bg = table.apply("regulators", &atom.regulator_bg);

    ExtractedProfile {
        schools,
        former_companies,
        regulator_bg,
    }
}

/// The career path with the current-step invariant enforced: an empty
/// extraction yields one synthetic current step, and a career with no
/// current step gets one injected at the front.
fn career_with_current(career: &[CareerStep], company: &str, title: &str) -> Vec<CareerStep> {
    if career.is_empty() {
        return vec![CareerStep::synthetic_current(company, title)];
    }
    let mut path = career.to_vec();
    if !path.iter().any(|s| s.is_current) {
        path.insert(0, CareerStep::synthetic_current(company, title));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoardRole, Education, RawExecutive};

    fn roster() -> Vec<CompanyRecord> {
        vec![
            CompanyRecord {
                name: "太平人寿保险有限公司".to_string(),
                region: Some("中国大陆".to_string()),
                website: Some("https://example.cn".to_string()),
                executives: vec![
                    RawExecutive {
                        name: Some("张三".to_string()),
                        title: Some("现任本公司总经理".to_string()),
                        bio: Some("张三先生……".to_string()),
                    },
                    RawExecutive {
                        name: None,
                        title: Some("董事长".to_string()),
                        bio: None,
                    },
                ],
            },
            CompanyRecord {
                name: "富卫人寿保险有限公司".to_string(),
                region: Some("中国香港".to_string()),
                website: None,
                executives: vec![RawExecutive {
                    name: Some("李四".to_string()),
                    title: Some("Chief Executive Officer".to_string()),
                    bio: None,
                }],
            },
        ]
    }

    fn atom_with_career() -> BioAtom {
        BioAtom {
            education: vec![
                Education {
                    school: Some("原中南财经大学".to_string()),
                    degree: Some("硕士".to_string()),
                    major: None,
                    year: None,
                },
                Education {
                    school: Some("清华".to_string()),
                    degree: None,
                    major: None,
                    year: None,
                },
            ],
            career: vec![
                CareerStep {
                    company: "太平人寿保险有限公司".to_string(),
                    title: "总经理".to_string(),
                    start_year: Some(2018),
                    end_year: None,
                    is_current: true,
                },
                CareerStep {
                    company: "富卫人寿保险有限公司".to_string(),
                    title: "副总经理".to_string(),
                    start_year: Some(2012),
                    end_year: Some(2018),
                    is_current: false,
                },
            ],
            ..Default::default()
        }
    }

    fn canonical() -> CanonicalTable {
        CanonicalTable::from_json_str(
            r#"{"schools": {"原中南财经大学": "中南财经政法大学"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_sequential_ids_and_nameless_skip() {
        let set = build_executives(&roster(), &HashMap::new(), &canonical());
        // The nameless record is dropped; ids stay dense.
        assert_eq!(set.executives.len(), 2);
        assert_eq!(set.executives[0].id, 0);
        assert_eq!(set.executives[1].id, 1);
    }

    #[test]
    fn test_region_codes() {
        let set = build_executives(&roster(), &HashMap::new(), &canonical());
        assert_eq!(set.executives[0].region, "CN");
        assert_eq!(set.executives[1].region, "HK");
    }

    #[test]
    fn test_titles_normalized() {
        let set = build_executives(&roster(), &HashMap::new(), &canonical());
        assert_eq!(set.executives[0].title, "总经理");
        assert_eq!(set.executives[1].title, "首席执行官");
    }

    #[test]
    fn test_missing_atom_yields_synthetic_career() {
        let set = build_executives(&roster(), &HashMap::new(), &canonical());
        let exec = &set.executives[0];
        assert_eq!(exec.career_path.len(), 1);
        assert!(exec.career_path[0].is_current);
        assert_eq!(exec.career_path[0].company, "太平人寿保险有限公司");
        assert_eq!(exec.career_path[0].title, "总经理");
        assert_eq!(set.atom_coverage, 0);
    }

    #[test]
    fn test_atom_schools_filtered_and_canonicalized() {
        let mut atoms = HashMap::new();
        atoms.insert("张三|太平人寿保险有限公司".to_string(), atom_with_career());
        let set = build_executives(&roster(), &atoms, &canonical());
        let exec = &set.executives[0];
        // 清华 (2 chars) is filtered; the pre-merger alias resolves.
        assert_eq!(exec.extracted.schools, vec!["中南财经政法大学"]);
        assert_eq!(set.atom_coverage, 1);
    }

    #[test]
    fn test_former_companies_matched_and_current_excluded() {
        let mut atoms = HashMap::new();
        atoms.insert("张三|太平人寿保险有限公司".to_string(), atom_with_career());
        let set = build_executives(&roster(), &atoms, &canonical());
        let exec = &set.executives[0];
        assert_eq!(
            exec.extracted.former_companies,
            vec!["富卫人寿保险有限公司"]
        );
    }

    #[test]
    fn test_board_role_contributes_former_company() {
        let mut atom = BioAtom::default();
        atom.board_roles.push(BoardRole {
            company: "富卫人寿保险有限公司".to_string(),
            role: "独立非执行董事".to_string(),
            is_current: false,
        });
        let mut atoms = HashMap::new();
        atoms.insert("张三|太平人寿保险有限公司".to_string(), atom);
        let set = build_executives(&roster(), &atoms, &canonical());
        assert_eq!(
            set.executives[0].extracted.former_companies,
            vec!["富卫人寿保险有限公司"]
        );
    }

    #[test]
    fn test_unmatched_former_company_omitted() {
        let mut atom = BioAtom::default();
        atom.career.push(CareerStep {
            company: "无名小公司".to_string(),
            title: "总经理".to_string(),
            start_year: None,
            end_year: None,
            is_current: false,
        });
        let mut atoms = HashMap::new();
        atoms.insert("张三|太平人寿保险有限公司".to_string(), atom);
        let set = build_executives(&roster(), &atoms, &canonical());
        // Degrade, never guess: the unknown employer is simply absent.
        assert!(set.executives[0].extracted.former_companies.is_empty());
    }

    #[test]
    fn test_career_without_current_step_gains_one() {
        let mut atom = BioAtom::default();
        atom.career.push(CareerStep {
            company: "富卫人寿保险有限公司".to_string(),
            title: "副总经理".to_string(),
            start_year: Some(2010),
            end_year: Some(2016),
            is_current: false,
        });
        let mut atoms = HashMap::new();
        atoms.insert("张三|太平人寿保险有限公司".to_string(), atom);
        let set = build_executives(&roster(), &atoms, &canonical());
        let path = &set.executives[0].career_path;
        assert_eq!(path.len(), 2);
        assert!(path[0].is_current);
        assert_eq!(path[0].company, "太平人寿保险有限公司");
        assert_eq!(path.iter().filter(|s| s.is_current).count(), 1);
    }

    #[test]
    fn test_company_index_in_roster_order() {
        let set = build_executives(&roster(), &HashMap::new(), &canonical());
        let companies: Vec<&String> = set.company_to_execs.keys().collect();
        assert_eq!(
            companies,
            vec!["太平人寿保险有限公司", "富卫人寿保险有限公司"]
        );
        assert_eq!(set.company_to_execs["太平人寿保险有限公司"], vec![0]);
    }
}

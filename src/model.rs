//! Data model for the mining pipeline.
//!
//! The serde field names on these types are the external contract: roster
//! records and bio atoms arrive as JSON produced upstream, and the executive
//! and relationship lists are consumed downstream by the upload step. Input
//! types are deliberately tolerant - every field defaults when absent, since
//! the source data is scraped free text and the extraction model may omit
//! anything.

use serde::{Deserialize, Serialize};

/// One company from the source roster, with its executive sub-records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub executives: Vec<RawExecutive>,
}

/// An executive sub-record as scraped: raw name, raw title, raw bio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawExecutive {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// One stint at one employer, inside a career path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerStep {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub is_current: bool,
}

impl CareerStep {
    /// Synthetic single current step used when extraction yielded no career.
    pub fn synthetic_current(company: &str, title: &str) -> Self {
        CareerStep {
            company: company.to_string(),
            title: title.to_string(),
            start_year: None,
            end_year: None,
            is_current: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRole {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_current: bool,
}

/// A structured per-person extraction produced upstream by the LLM pass,
/// keyed in the atoms file by `"<name>|<company>"`. Read-only input here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BioAtom {
    #[serde(default)]
    pub identity: Identity,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub career: Vec<CareerStep>,
    #[serde(default)]
    pub board_roles: Vec<BoardRole>,
    #[serde(default)]
    pub industry_roles: Vec<String>,
    #[serde(default)]
    pub regulator_bg: Vec<String>,
    #[serde(default)]
    pub experience_years: Option<i32>,
}

/// Attributes derived during enrichment: canonicalized schools, matched
/// former employers, regulator-background tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub schools: Vec<String>,
    pub former_companies: Vec<String>,
    pub regulator_bg: Vec<String>,
}

/// One real-world person holding one current position at one company.
/// Constructed once during the build pass and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Executive {
    pub id: u32,
    pub name: String,
    pub title: String,
    pub company: String,
    pub region: String,
    pub website: String,
    pub bio: String,
    pub extracted: ExtractedProfile,
    pub career_path: Vec<CareerStep>,
    pub identity: Identity,
    pub education: Vec<Education>,
    pub qualifications: Vec<String>,
    pub board_roles: Vec<BoardRole>,
    pub industry_roles: Vec<String>,
}

/// Relationship classification. Each type carries a fixed strength used only
/// to arbitrate which single classification wins for an unordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    Colleague,
    Alumni,
    Former,
    Regulator,
    Successor,
}

impl EdgeType {
    pub fn strength(&self) -> f64 {
        match self {
            EdgeType::Colleague => 1.0,
            EdgeType::Alumni => 0.7,
            EdgeType::Former => 0.6,
            EdgeType::Regulator => 0.4,
            EdgeType::Successor => 0.8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Colleague => "colleague",
            EdgeType::Alumni => "alumni",
            EdgeType::Former => "former",
            EdgeType::Regulator => "regulator",
            EdgeType::Successor => "successor",
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An inferred connection between two executives. Undirected types hold the
/// source/target in discovery order; `successor` edges are directed from
/// predecessor to current holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub source: u32,
    pub target: u32,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    pub strength: f64,
    pub label: String,
}

impl RelationshipEdge {
    pub fn new(source: u32, target: u32, edge_type: EdgeType, label: impl Into<String>) -> Self {
        RelationshipEdge {
            source,
            target,
            edge_type,
            strength: edge_type.strength(),
            label: label.into(),
        }
    }
}

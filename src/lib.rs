//! Relationship mining over an executive roster.
//!
//! Takes a scraped company roster plus per-person structured bio extractions,
//! normalizes names and titles against curated tables, and mines a
//! relationship graph: colleague, alumni, former-employer, shared-regulator
//! and successor edges.

pub mod canonical;
pub mod cli;
pub mod config;
pub mod export;
pub mod graph;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod roles;
pub mod successor;
pub mod title;

pub use canonical::{CanonicalTable, CompanyMatcher};
pub use config::AppConfig;
pub use model::{EdgeType, Executive, RelationshipEdge};
pub use pipeline::{mine, run, MiningReport, OutputFormat};

//! # Pharmflow — Drug-Discovery Workflow Service
//!
//! ## Overview
//! This library implements a skeletal web service for a drug-discovery
//! workflow. Most pipeline steps (workflow run, ligand lookup, docking,
//! simulation, ADMET prediction) are placeholders; the one real integration
//! is protein-target search against the RCSB PDB entry-search API with a
//! two-tier cache (in-memory TTL memoization plus durable per-term JSON
//! files).
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `targets`: RCSB PDB query building, fetching, and two-tier caching
//! - `planner`: Static workflow-plan placeholder
//! - `api`: REST API endpoints
//! - `config`: Configuration management and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Free-text condition/disease terms and research goals
//! - **Output**: Ordered RCSB entry identifiers, static workflow plans
//! - **Degradation**: Fetch failures surface as empty result lists, never as
//!   errors to the caller
//!
//! ## Usage
//! ```rust,no_run
//! use pharmflow::config::TargetsConfig;
//! use pharmflow::targets::TargetSelector;
//!
//! #[tokio::main]
//! async fn main() -> pharmflow::Result<()> {
//!     let selector = TargetSelector::new(TargetsConfig::default()).await?;
//!     let targets = selector.find_targets("diabetes").await?;
//!     println!("Found {} targets", targets.len());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod config;
pub mod errors;
pub mod planner;
pub mod targets;

// Re-exports for convenience
pub use config::Config;
pub use errors::{DiscoveryError, Result};
pub use planner::SciencePlanner;
pub use targets::TargetSelector;

use std::sync::Arc;

/// Application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub selector: Arc<targets::TargetSelector>,
    pub planner: Arc<planner::SciencePlanner>,
}

//! # Science Planner Module
//!
//! ## Purpose
//! Produces the workflow plan for a research goal. This is a placeholder: the
//! plan is a fixed five-step structure with the goal interpolated into the
//! step details, standing in for a future planning component.
//!
//! ## Input/Output Specification
//! - **Input**: Free-text research goal
//! - **Output**: Static `WorkflowPlan` with named steps and detail strings
//! - **Decision logic**: None — the step list never varies

use serde::{Deserialize, Serialize};
use tracing::info;

/// A planned workflow as an ordered list of steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowPlan {
    pub steps: Vec<WorkflowStep>,
}

/// A single named step in a workflow plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub name: String,
    pub details: String,
}

/// Placeholder workflow planner
#[derive(Debug, Default)]
pub struct SciencePlanner;

impl SciencePlanner {
    pub fn new() -> Self {
        Self
    }

    /// Build the static five-step plan for a goal
    pub fn plan_workflow(&self, goal: &str) -> WorkflowPlan {
        info!("Planning workflow for goal: {}", goal);

        WorkflowPlan {
            steps: vec![
                WorkflowStep {
                    name: "Find Protein Target".to_string(),
                    details: format!("Search RCSB PDB for targets related to {}", goal),
                },
                WorkflowStep {
                    name: "Find Ligands".to_string(),
                    details: format!("Search PubChem/ChEMBL for ligands related to {}", goal),
                },
                WorkflowStep {
                    name: "Docking".to_string(),
                    details: "Run docking simulation".to_string(),
                },
                WorkflowStep {
                    name: "Predict ADMET".to_string(),
                    details: "Predict ADMET properties".to_string(),
                },
                WorkflowStep {
                    name: "Rank Results".to_string(),
                    details: "Rank ligands based on criteria".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_has_five_fixed_steps() {
        let planner = SciencePlanner::new();
        let plan = planner.plan_workflow("cure diabetes");

        assert_eq!(plan.steps.len(), 5);
        assert_eq!(plan.steps[0].name, "Find Protein Target");
        assert_eq!(plan.steps[4].name, "Rank Results");
        assert!(plan.steps[0].details.contains("cure diabetes"));
    }

    #[test]
    fn test_plan_serializes_with_steps_field() {
        let plan = SciencePlanner::new().plan_workflow("x");
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json["steps"].is_array());
    }
}

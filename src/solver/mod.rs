//! Opaque boundary to the external LP engine.
//!
//! The core never inspects the engine's algorithm; it only consumes the
//! narrow [`LpEngine`] contract and re-keys the raw result arrays onto
//! domain identifiers via [`SolveResult::from_outcome`].

pub mod highs;

use std::time::Duration;

use crate::error::FlowError;
use crate::formulation::{ConstraintId, ConstraintSense, LpInstance, VariableId};

pub use self::highs::HighsEngine;

/// Terminal outcome of one solve, in the classic status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    #[strum(serialize = "Not Solved")]
    NotSolved,
    Undefined,
}

/// Raw per-solve data as the engine hands it back: parallel arrays in the
/// instance's variable/constraint order.
#[derive(Debug, Clone)]
pub struct EngineOutcome {
    pub status: SolveStatus,
    pub objective_value: f64,
    pub variable_values: Vec<f64>,
    pub reduced_costs: Vec<f64>,
    pub row_activity: Vec<f64>,
    pub shadow_prices: Vec<f64>,
}

impl EngineOutcome {
    /// Outcome carrying only a terminal status, no solution data.
    pub fn status_only(status: SolveStatus) -> Self {
        Self {
            status,
            objective_value: 0.0,
            variable_values: Vec::new(),
            reduced_costs: Vec::new(),
            row_activity: Vec::new(),
            shadow_prices: Vec::new(),
        }
    }
}

/// Narrow contract to the external solving engine. Synchronous and
/// blocking; no retries (the LP is deterministic, retrying an identical
/// instance cannot change the outcome). The optional wall-clock budget is
/// passed through to the engine; exceeding it is a status, not an error.
#[cfg_attr(test, mockall::automock)]
pub trait LpEngine {
    fn solve(
        &self,
        instance: &LpInstance,
        time_budget: Option<Duration>,
    ) -> Result<EngineOutcome, FlowError>;
}

/// Value and reduced cost of one decision variable.
#[derive(Debug, Clone)]
pub struct VariableOutcome {
    pub id: VariableId,
    pub label: String,
    pub value: f64,
    pub reduced_cost: f64,
}

/// Slack and shadow price of one constraint.
#[derive(Debug, Clone)]
pub struct ConstraintOutcome {
    pub id: ConstraintId,
    pub label: String,
    pub slack: f64,
    pub shadow_price: f64,
}

/// Solver output re-keyed onto domain identity.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub status: SolveStatus,
    pub objective_value: Option<f64>,
    pub variables: Vec<VariableOutcome>,
    pub constraints: Vec<ConstraintOutcome>,
}

impl SolveResult {
    /// Zip the engine's raw arrays with the instance's identifier tables.
    ///
    /// A length mismatch means the formulation and the engine result have
    /// drifted out of sync; that is an internal invariant violation, never
    /// silently ignored. Non-Optimal outcomes carry only the status.
    pub fn from_outcome(
        instance: &LpInstance,
        outcome: EngineOutcome,
    ) -> Result<Self, FlowError> {
        let status = outcome.status;

        if status != SolveStatus::Optimal {
            return Ok(Self {
                status,
                objective_value: None,
                variables: Vec::new(),
                constraints: Vec::new(),
            });
        }

        let n_vars = instance.variables.len();
        let n_rows = instance.constraints.len();
        if outcome.variable_values.len() != n_vars || outcome.reduced_costs.len() != n_vars {
            return Err(FlowError::Invariant(format!(
                "engine returned {} values / {} reduced costs for {} variables",
                outcome.variable_values.len(),
                outcome.reduced_costs.len(),
                n_vars
            )));
        }
        if outcome.row_activity.len() != n_rows || outcome.shadow_prices.len() != n_rows {
            return Err(FlowError::Invariant(format!(
                "engine returned {} activities / {} duals for {} constraints",
                outcome.row_activity.len(),
                outcome.shadow_prices.len(),
                n_rows
            )));
        }

        let variables = instance
            .variables
            .iter()
            .zip(outcome.variable_values.iter().zip(&outcome.reduced_costs))
            .map(|(def, (&value, &reduced_cost))| VariableOutcome {
                id: def.id.clone(),
                label: def.label.clone(),
                value,
                reduced_cost,
            })
            .collect();

        let constraints = instance
            .constraints
            .iter()
            .zip(outcome.row_activity.iter().zip(&outcome.shadow_prices))
            .map(|(def, (&activity, &shadow_price))| ConstraintOutcome {
                id: def.id.clone(),
                label: def.label.clone(),
                slack: slack_of(def.sense, def.rhs, activity),
                shadow_price,
            })
            .collect();

        Ok(Self {
            status,
            objective_value: Some(outcome.objective_value),
            variables,
            constraints,
        })
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

/// Slack is non-negative for a satisfied inequality and zero when binding.
fn slack_of(sense: ConstraintSense, rhs: f64, activity: f64) -> f64 {
    match sense {
        ConstraintSense::LessEqual => rhs - activity,
        ConstraintSense::GreaterEqual => activity - rhs,
        ConstraintSense::Equal => activity - rhs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::build;
    use crate::model::{Lane, Location, ModelData};
    use std::collections::HashMap;

    fn tiny_instance() -> LpInstance {
        let model = ModelData::new(
            vec![Location::from("Gou")],
            vec![Location::from("Ams")],
            HashMap::from([(Location::from("Gou"), 10.0)]),
            HashMap::from([(Location::from("Ams"), 4.0)]),
            vec![(Lane::new("Gou", "Ams"), 1.0)],
            vec![],
        )
        .unwrap();
        build(&model)
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(SolveStatus::Optimal.to_string(), "Optimal");
        assert_eq!(SolveStatus::NotSolved.to_string(), "Not Solved");
    }

    #[test]
    fn test_non_optimal_outcome_carries_only_status() {
        let instance = tiny_instance();
        let result = SolveResult::from_outcome(
            &instance,
            EngineOutcome::status_only(SolveStatus::Infeasible),
        )
        .unwrap();
        assert_eq!(result.status, SolveStatus::Infeasible);
        assert!(result.objective_value.is_none());
        assert!(result.variables.is_empty());
        assert!(result.constraints.is_empty());
    }

    #[test]
    fn test_slack_signs_per_sense() {
        // Capacity 10 with 4 shipped leaves 6; demand 4 exactly met is binding.
        let instance = tiny_instance();
        let outcome = EngineOutcome {
            status: SolveStatus::Optimal,
            objective_value: 4.0,
            variable_values: vec![4.0],
            reduced_costs: vec![0.0],
            row_activity: vec![4.0, 4.0],
            shadow_prices: vec![0.0, 1.0],
        };
        let result = SolveResult::from_outcome(&instance, outcome).unwrap();
        assert_eq!(result.constraints[0].slack, 6.0);
        assert_eq!(result.constraints[1].slack, 0.0);
        assert_eq!(result.constraints[1].shadow_price, 1.0);
    }

    #[test]
    fn test_array_length_mismatch_is_invariant_violation() {
        let instance = tiny_instance();
        let outcome = EngineOutcome {
            status: SolveStatus::Optimal,
            objective_value: 0.0,
            variable_values: vec![0.0, 0.0],
            reduced_costs: vec![0.0],
            row_activity: vec![0.0, 0.0],
            shadow_prices: vec![0.0, 0.0],
        };
        let err = SolveResult::from_outcome(&instance, outcome).unwrap_err();
        assert!(matches!(err, FlowError::Invariant(_)), "{err}");
    }
}

//! HiGHS-backed implementation of the engine contract.

use std::time::Duration;

use highs::HighsModelStatus;

use crate::error::FlowError;
use crate::formulation::{ConstraintSense, LpInstance};
use crate::solver::{EngineOutcome, LpEngine, SolveStatus};

/// Solves LP instances with the HiGHS engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsEngine;

impl LpEngine for HighsEngine {
    fn solve(
        &self,
        instance: &LpInstance,
        time_budget: Option<Duration>,
    ) -> Result<EngineOutcome, FlowError> {
        let mut problem = highs::RowProblem::default();

        let columns: Vec<highs::Col> = instance
            .variables
            .iter()
            .map(|var| problem.add_column(var.objective_cost, 0.0..))
            .collect();

        for constraint in &instance.constraints {
            let factors: Vec<(highs::Col, f64)> = constraint
                .terms
                .iter()
                .map(|&(idx, coefficient)| (columns[idx], coefficient))
                .collect();
            match constraint.sense {
                ConstraintSense::LessEqual => {
                    problem.add_row(..=constraint.rhs, factors);
                }
                ConstraintSense::GreaterEqual => {
                    problem.add_row(constraint.rhs.., factors);
                }
                ConstraintSense::Equal => {
                    problem.add_row(constraint.rhs..=constraint.rhs, factors);
                }
            }
        }

        let mut model = problem.optimise(highs::Sense::Minimise);
        model.set_option("output_flag", false);
        if let Some(budget) = time_budget {
            model.set_option("time_limit", budget.as_secs_f64());
        }

        let solved = model.solve();
        let status = map_status(solved.status())?;
        if status != SolveStatus::Optimal {
            return Ok(EngineOutcome::status_only(status));
        }

        let solution = solved.get_solution();
        let variable_values = solution.columns().to_vec();
        let reduced_costs = solution.dual_columns().to_vec();
        let row_activity = solution.rows().to_vec();
        let shadow_prices = solution.dual_rows().to_vec();

        let objective_value = instance
            .variables
            .iter()
            .zip(&variable_values)
            .map(|(var, value)| var.objective_cost * value)
            .sum();

        Ok(EngineOutcome {
            status,
            objective_value,
            variable_values,
            reduced_costs,
            row_activity,
            shadow_prices,
        })
    }
}

/// Map the engine's terminal status onto the closed status set. Statuses
/// signalling an engine-internal failure become a "solve failed" error,
/// distinct from the legitimate LP outcomes.
fn map_status(status: HighsModelStatus) -> Result<SolveStatus, FlowError> {
    match status {
        HighsModelStatus::Optimal => Ok(SolveStatus::Optimal),
        HighsModelStatus::Infeasible => Ok(SolveStatus::Infeasible),
        HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
            Ok(SolveStatus::Unbounded)
        }
        HighsModelStatus::ReachedTimeLimit
        | HighsModelStatus::ReachedIterationLimit
        | HighsModelStatus::ObjectiveBound
        | HighsModelStatus::ObjectiveTarget => Ok(SolveStatus::NotSolved),
        HighsModelStatus::NotSet | HighsModelStatus::ModelEmpty | HighsModelStatus::Unknown => {
            Ok(SolveStatus::Undefined)
        }
        other => Err(FlowError::Engine(format!(
            "engine terminated abnormally: {other:?}"
        ))),
    }
}

//! Post-optimal sensitivity interpretation.
//!
//! Maps shadow prices of binding constraints and reduced costs of
//! zero-valued variables back onto domain semantics: which location or lane,
//! and in which direction the total cost would move per additional ton.
//!
//! Pure function of the solve result; computation is decoupled from
//! presentation (the report renders the statement records).

use std::collections::HashSet;
use std::fmt;

use crate::formulation::ConstraintId;
use crate::model::{Lane, Location};
use crate::solver::SolveResult;

/// Tolerance for "binding" slack and "zero-valued" variables.
pub const ZERO_TOL: f64 = 1e-6;

/// Direction of the marginal cost impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostDirection {
    Decrease,
    Increase,
    NoChange,
}

/// What a statement is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementSubject {
    /// One additional ton of capacity available at a source.
    SourceCapacity(Location),
    /// One additional ton of demand served at a customer.
    CustomerDemand(Location),
    /// One ton shipped on a lane that carries nothing at the optimum.
    UnusedLane(Lane),
}

/// One directional cost-impact conclusion.
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivityStatement {
    pub subject: StatementSubject,
    pub direction: CostDirection,
    /// Cost change per ton; zero when the direction is `NoChange`.
    pub magnitude: f64,
}

impl SensitivityStatement {
    fn from_signed(subject: StatementSubject, signed: f64) -> Self {
        let direction = if signed < -ZERO_TOL {
            CostDirection::Decrease
        } else if signed > ZERO_TOL {
            CostDirection::Increase
        } else {
            CostDirection::NoChange
        };
        let magnitude = match direction {
            CostDirection::NoChange => 0.0,
            _ => signed.abs(),
        };
        Self {
            subject,
            direction,
            magnitude,
        }
    }
}

impl fmt::Display for SensitivityStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            CostDirection::Decrease => write!(
                f,
                "The total transportation cost would be reduced by {} euros {}",
                self.magnitude,
                per_ton(&self.subject)
            ),
            CostDirection::Increase => write!(
                f,
                "The total transportation cost would be increased by {} euros {}",
                self.magnitude,
                per_ton(&self.subject)
            ),
            CostDirection::NoChange => write!(
                f,
                "The total transportation cost would remain equal {}",
                per_ton(&self.subject)
            ),
        }
    }
}

fn per_ton(subject: &StatementSubject) -> String {
    match subject {
        StatementSubject::SourceCapacity(loc) => {
            format!("for each additional ton available in {loc}")
        }
        StatementSubject::CustomerDemand(loc) => {
            format!("for each additional ton supplied at {loc}")
        }
        StatementSubject::UnusedLane(lane) => {
            format!("for each ton shipped from {} to {}", lane.source, lane.customer)
        }
    }
}

/// Derive the ordered sequence of conclusions from a solve result.
///
/// Constraints: only binding production/demand rows are narrated; the
/// capacity-vs-demand wording is chosen purely by membership of the
/// constraint's location in the source set, so a code naming both a source
/// and a customer reads as a source. Fixed-flow rows get no narrative.
///
/// Variables: only zero-valued ones are narrated; a variable already in the
/// basis at a positive value has no meaningful reduced cost.
pub fn interpret(result: &SolveResult, sources: &[Location]) -> Vec<SensitivityStatement> {
    let source_set: HashSet<&Location> = sources.iter().collect();
    let mut statements = Vec::new();

    for constraint in &result.constraints {
        if constraint.slack.abs() > ZERO_TOL {
            continue;
        }
        let location = match &constraint.id {
            ConstraintId::Production(loc) | ConstraintId::Demand(loc) => loc,
            ConstraintId::FixedFlow(_) => continue,
        };
        let subject = if source_set.contains(location) {
            StatementSubject::SourceCapacity(location.clone())
        } else {
            StatementSubject::CustomerDemand(location.clone())
        };
        statements.push(SensitivityStatement::from_signed(
            subject,
            constraint.shadow_price,
        ));
    }

    for variable in &result.variables {
        if variable.value.abs() > ZERO_TOL {
            continue;
        }
        statements.push(SensitivityStatement::from_signed(
            StatementSubject::UnusedLane(variable.id.lane.clone()),
            variable.reduced_cost,
        ));
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::VariableId;
    use crate::solver::{ConstraintOutcome, SolveStatus, VariableOutcome};
    use rstest::rstest;

    fn constraint(id: ConstraintId, slack: f64, shadow_price: f64) -> ConstraintOutcome {
        let label = id.label();
        ConstraintOutcome {
            id,
            label,
            slack,
            shadow_price,
        }
    }

    fn variable(lane: Lane, value: f64, reduced_cost: f64) -> VariableOutcome {
        let id = VariableId::new(lane);
        let label = id.label();
        VariableOutcome {
            id,
            label,
            value,
            reduced_cost,
        }
    }

    fn result(
        constraints: Vec<ConstraintOutcome>,
        variables: Vec<VariableOutcome>,
    ) -> SolveResult {
        SolveResult {
            status: SolveStatus::Optimal,
            objective_value: Some(0.0),
            variables,
            constraints,
        }
    }

    fn sources() -> Vec<Location> {
        vec![Location::from("Gou"), Location::from("Arn")]
    }

    #[rstest]
    #[case(-0.6, CostDirection::Decrease, 0.6)]
    #[case(0.4, CostDirection::Increase, 0.4)]
    #[case(0.0, CostDirection::NoChange, 0.0)]
    fn test_shadow_price_sign_convention(
        #[case] shadow_price: f64,
        #[case] direction: CostDirection,
        #[case] magnitude: f64,
    ) {
        let result = result(
            vec![constraint(
                ConstraintId::Production(Location::from("Gou")),
                0.0,
                shadow_price,
            )],
            vec![],
        );
        let statements = interpret(&result, &sources());
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].direction, direction);
        assert_eq!(statements[0].magnitude, magnitude);
        assert_eq!(
            statements[0].subject,
            StatementSubject::SourceCapacity(Location::from("Gou"))
        );
    }

    #[rstest]
    #[case(-1.5, CostDirection::Decrease)]
    #[case(2.5, CostDirection::Increase)]
    #[case(0.0, CostDirection::NoChange)]
    fn test_reduced_cost_sign_convention(
        #[case] reduced_cost: f64,
        #[case] direction: CostDirection,
    ) {
        let result = result(
            vec![],
            vec![variable(Lane::new("Arn", "Lon"), 0.0, reduced_cost)],
        );
        let statements = interpret(&result, &sources());
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].direction, direction);
        assert_eq!(
            statements[0].subject,
            StatementSubject::UnusedLane(Lane::new("Arn", "Lon"))
        );
    }

    #[test]
    fn test_non_binding_constraints_skipped() {
        let result = result(
            vec![constraint(
                ConstraintId::Production(Location::from("Arn")),
                1.0,
                -0.6,
            )],
            vec![],
        );
        assert!(interpret(&result, &sources()).is_empty());
    }

    #[test]
    fn test_positive_variables_never_interpreted() {
        let result = result(
            vec![],
            vec![
                variable(Lane::new("Gou", "Lon"), 8.0, 0.0),
                variable(Lane::new("Arn", "Lon"), 0.0, 0.4),
            ],
        );
        let statements = interpret(&result, &sources());
        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0].subject,
            StatementSubject::UnusedLane(Lane::new("Arn", "Lon"))
        );
    }

    #[test]
    fn test_fixed_flow_constraints_get_no_narrative() {
        let result = result(
            vec![constraint(
                ConstraintId::FixedFlow(Lane::new("Arn", "Lon")),
                0.0,
                1.2,
            )],
            vec![],
        );
        assert!(interpret(&result, &sources()).is_empty());
    }

    #[test]
    fn test_demand_location_reads_as_customer() {
        let result = result(
            vec![constraint(
                ConstraintId::Demand(Location::from("Lon")),
                0.0,
                3.1,
            )],
            vec![],
        );
        let statements = interpret(&result, &sources());
        assert_eq!(
            statements[0].subject,
            StatementSubject::CustomerDemand(Location::from("Lon"))
        );
    }

    #[test]
    fn test_shared_code_reads_as_source() {
        // A code naming both a source and a customer is narrated as a
        // source, whatever the constraint family says.
        let result = result(
            vec![constraint(
                ConstraintId::Demand(Location::from("Gou")),
                0.0,
                1.0,
            )],
            vec![],
        );
        let statements = interpret(&result, &sources());
        assert_eq!(
            statements[0].subject,
            StatementSubject::SourceCapacity(Location::from("Gou"))
        );
    }

    #[test]
    fn test_statement_rendering() {
        let statement = SensitivityStatement::from_signed(
            StatementSubject::SourceCapacity(Location::from("Gou")),
            -0.6,
        );
        assert_eq!(
            statement.to_string(),
            "The total transportation cost would be reduced by 0.6 euros \
             for each additional ton available in Gou"
        );

        let statement = SensitivityStatement::from_signed(
            StatementSubject::UnusedLane(Lane::new("Arn", "Lon")),
            0.0,
        );
        assert_eq!(
            statement.to_string(),
            "The total transportation cost would remain equal \
             for each ton shipped from Arn to Lon"
        );
    }
}

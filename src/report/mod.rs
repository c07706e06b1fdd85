//! Human-facing report: solver status, total cost, flow and sensitivity
//! tables, and the narrative conclusions.

use std::fmt::Write as _;

use crate::model::Lane;
use crate::sensitivity::{SensitivityStatement, ZERO_TOL};
use crate::solver::{ConstraintOutcome, SolveResult, SolveStatus, VariableOutcome};

/// One positive-quantity shipment at the optimum.
#[derive(Debug, Clone)]
pub struct FlowRow {
    pub lane: Lane,
    pub quantity: f64,
}

/// Everything the user sees for one problem instance.
#[derive(Debug, Clone)]
pub struct Report {
    pub status: SolveStatus,
    pub total_cost: Option<f64>,
    pub flows: Vec<FlowRow>,
    pub constraints: Vec<ConstraintOutcome>,
    pub variables: Vec<VariableOutcome>,
    pub conclusions: Vec<SensitivityStatement>,
}

impl Report {
    /// Report for a solve that produced no usable solution: the status is
    /// the user-visible result and every table stays empty.
    pub fn status_only(status: SolveStatus) -> Self {
        Self {
            status,
            total_cost: None,
            flows: Vec::new(),
            constraints: Vec::new(),
            variables: Vec::new(),
            conclusions: Vec::new(),
        }
    }

    pub fn from_result(result: SolveResult, conclusions: Vec<SensitivityStatement>) -> Self {
        let flows = result
            .variables
            .iter()
            .filter(|v| v.value > ZERO_TOL)
            .map(|v| FlowRow {
                lane: v.id.lane.clone(),
                quantity: v.value,
            })
            .collect();
        Self {
            status: result.status,
            total_cost: result.objective_value,
            flows,
            constraints: result.constraints,
            variables: result.variables,
            conclusions,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Solver status: {}", self.status);
        let Some(total_cost) = self.total_cost else {
            return out;
        };

        let _ = writeln!(out);
        let _ = writeln!(out, "Total transportation cost: {total_cost}");

        let _ = writeln!(out);
        let _ = writeln!(out, "Quantity exchanged between sources and customers:");
        let _ = writeln!(out, "{:<8} {:<8} {:>10}", "Source", "Customer", "Quantity");
        for flow in &self.flows {
            let _ = writeln!(
                out,
                "{:<8} {:<8} {:>10}",
                flow.lane.source, flow.lane.customer, flow.quantity
            );
        }

        let label_width = self
            .constraints
            .iter()
            .map(|c| c.label.len())
            .chain(self.variables.iter().map(|v| v.label.len()))
            .max()
            .unwrap_or(0);

        let _ = writeln!(out);
        let _ = writeln!(out, "Sensitivity analysis - constraints:");
        let _ = writeln!(
            out,
            "{:<label_width$} {:>10} {:>14}",
            "Constraint", "Slack", "Shadow price"
        );
        for c in &self.constraints {
            let _ = writeln!(
                out,
                "{:<label_width$} {:>10} {:>14}",
                c.label, c.slack, c.shadow_price
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Sensitivity analysis - variables:");
        let _ = writeln!(
            out,
            "{:<label_width$} {:>10} {:>14}",
            "Variable", "Value", "Reduced cost"
        );
        for v in &self.variables {
            let _ = writeln!(
                out,
                "{:<label_width$} {:>10} {:>14}",
                v.label, v.value, v.reduced_cost
            );
        }

        if !self.conclusions.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Conclusions:");
            for statement in &self.conclusions {
                let _ = writeln!(out, "{statement}");
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::{ConstraintId, VariableId};
    use crate::model::Location;
    use crate::sensitivity;

    fn optimal_result() -> SolveResult {
        let gou_lon = VariableId::new(Lane::new("Gou", "Lon"));
        let arn_lon = VariableId::new(Lane::new("Arn", "Lon"));
        let cap_gou = ConstraintId::Production(Location::from("Gou"));
        SolveResult {
            status: SolveStatus::Optimal,
            objective_value: Some(33.3),
            variables: vec![
                VariableOutcome {
                    label: gou_lon.label(),
                    id: gou_lon,
                    value: 8.0,
                    reduced_cost: 0.0,
                },
                VariableOutcome {
                    label: arn_lon.label(),
                    id: arn_lon,
                    value: 0.0,
                    reduced_cost: 0.4,
                },
            ],
            constraints: vec![ConstraintOutcome {
                label: cap_gou.label(),
                id: cap_gou,
                slack: 0.0,
                shadow_price: -0.6,
            }],
        }
    }

    #[test]
    fn test_flows_keep_only_positive_quantities() {
        let result = optimal_result();
        let conclusions = sensitivity::interpret(&result, &[Location::from("Gou")]);
        let report = Report::from_result(result, conclusions);
        assert_eq!(report.flows.len(), 1);
        assert_eq!(report.flows[0].lane, Lane::new("Gou", "Lon"));
    }

    #[test]
    fn test_render_optimal() {
        let result = optimal_result();
        let conclusions = sensitivity::interpret(&result, &[Location::from("Gou")]);
        let report = Report::from_result(result, conclusions);
        let rendered = report.render();
        assert!(rendered.contains("Solver status: Optimal"));
        assert!(rendered.contains("Total transportation cost: 33.3"));
        assert!(rendered.contains("c01_production_Gou"));
        assert!(rendered.contains("quantity_in_tons_('Arn',_'Lon')"));
        assert!(rendered.contains("reduced by 0.6 euros"));
        assert!(rendered.contains("increased by 0.4 euros"));
    }

    #[test]
    fn test_render_infeasible_has_no_tables() {
        let report = Report::status_only(SolveStatus::Infeasible);
        let rendered = report.render();
        assert!(rendered.contains("Solver status: Infeasible"));
        assert!(!rendered.contains("Sensitivity"));
        assert!(!rendered.contains("Total transportation cost"));
    }
}

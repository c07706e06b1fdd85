//! Builds the LP instance from model data.
//!
//! One continuous variable per lane (lower bound 0, no upper bound), a
//! minimization objective over unit costs, and three constraint families:
//! production limits (one per source), demand limits (one per customer) and
//! fixed-flow equalities (one per lane with a mandatory quantity). Sums are
//! assembled from the model's adjacency lists, so lanes absent from the cost
//! table contribute nothing anywhere.

use std::collections::HashMap;

use crate::formulation::ids::{ConstraintId, VariableId};
use crate::model::{Lane, ModelData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

/// One decision variable together with its objective coefficient.
#[derive(Debug, Clone)]
pub struct VariableDef {
    pub id: VariableId,
    pub label: String,
    pub objective_cost: f64,
}

/// One constraint row. Terms reference variables by index into
/// [`LpInstance::variables`].
#[derive(Debug, Clone)]
pub struct ConstraintDef {
    pub id: ConstraintId,
    pub label: String,
    pub terms: Vec<(usize, f64)>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

/// A fully built LP instance for a single solve.
///
/// Variable and constraint order is deterministic: variables in source-major
/// lane order, then production rows in declared source order, demand rows in
/// declared customer order, fixed-flow rows in lane order. Engine result
/// arrays are expected in exactly this order.
#[derive(Debug, Clone)]
pub struct LpInstance {
    pub variables: Vec<VariableDef>,
    pub constraints: Vec<ConstraintDef>,
    var_index: HashMap<Lane, usize>,
}

impl LpInstance {
    pub fn variable_index(&self, lane: &Lane) -> Option<usize> {
        self.var_index.get(lane).copied()
    }
}

/// Derive the LP instance from validated model data.
pub fn build(model: &ModelData) -> LpInstance {
    let mut variables = Vec::with_capacity(model.lanes().len());
    let mut var_index = HashMap::with_capacity(model.lanes().len());
    for lane in model.lanes() {
        let id = VariableId::new(lane.clone());
        let label = id.label();
        let objective_cost = model.cost(lane).unwrap_or_default();
        var_index.insert(lane.clone(), variables.len());
        variables.push(VariableDef {
            id,
            label,
            objective_cost,
        });
    }

    let mut constraints = Vec::new();

    // Family 01: production limit per source. Sources with no lanes still
    // get a (trivially satisfied) row, matching one constraint per source.
    for (source, capacity) in model.capacities() {
        let terms = model
            .customers_of(source)
            .iter()
            .map(|customer| {
                let lane = Lane::new(source.clone(), customer.clone());
                (var_index[&lane], 1.0)
            })
            .collect();
        let id = ConstraintId::Production(source.clone());
        let label = id.label();
        constraints.push(ConstraintDef {
            id,
            label,
            terms,
            sense: ConstraintSense::LessEqual,
            rhs: capacity,
        });
    }

    // Family 02: demand limit per customer.
    for (customer, demand) in model.demands() {
        let terms = model
            .sources_of(customer)
            .iter()
            .map(|source| {
                let lane = Lane::new(source.clone(), customer.clone());
                (var_index[&lane], 1.0)
            })
            .collect();
        let id = ConstraintId::Demand(customer.clone());
        let label = id.label();
        constraints.push(ConstraintDef {
            id,
            label,
            terms,
            sense: ConstraintSense::GreaterEqual,
            rhs: demand,
        });
    }

    // Family 03: fixed-flow equality per lane with a mandatory quantity.
    for lane in model.lanes() {
        if let Some(quantity) = model.fixed_flow(lane) {
            let id = ConstraintId::FixedFlow(lane.clone());
            let label = id.label();
            constraints.push(ConstraintDef {
                id,
                label,
                terms: vec![(var_index[lane], 1.0)],
                sense: ConstraintSense::Equal,
                rhs: quantity,
            });
        }
    }

    LpInstance {
        variables,
        constraints,
        var_index,
    }
}

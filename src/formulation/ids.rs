use std::fmt;

use crate::model::{Lane, Location};

/// Structured constraint identity, carried alongside the display label so
/// that interpretation never has to parse a label string.
///
/// The numeric family ordinal (01/02/03) only survives in the label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintId {
    /// Family 01: total outbound flow of a source stays under its capacity.
    Production(Location),
    /// Family 02: total inbound flow of a customer covers its demand.
    Demand(Location),
    /// Family 03: flow on a lane is pinned to a mandatory quantity.
    FixedFlow(Lane),
}

impl ConstraintId {
    pub fn label(&self) -> String {
        match self {
            ConstraintId::Production(s) => format!("c01_production_{s}"),
            ConstraintId::Demand(c) => format!("c02_demand_{c}"),
            ConstraintId::FixedFlow(lane) => {
                format!("c03_fixed_{}_{}", lane.source, lane.customer)
            }
        }
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Identity of one decision variable: the lane it moves quantity on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableId {
    pub lane: Lane,
}

impl VariableId {
    pub fn new(lane: Lane) -> Self {
        Self { lane }
    }

    /// Label with both location codes between quote characters.
    pub fn label(&self) -> String {
        format!(
            "quantity_in_tons_('{}',_'{}')",
            self.lane.source, self.lane.customer
        )
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

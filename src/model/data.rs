use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::FlowError;

/// Short identifier code for a source or customer node.
///
/// Source and customer namespaces are not structurally distinct; the same
/// code may legally appear in both lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Location {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// An ordered (source, customer) pair. A lane exists in the model if and
/// only if the cost table defines a unit cost for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lane {
    pub source: Location,
    pub customer: Location,
}

impl Lane {
    pub fn new(source: impl Into<Location>, customer: impl Into<Location>) -> Self {
        Self {
            source: source.into(),
            customer: customer.into(),
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.customer)
    }
}

/// Normalized, read-only problem data for one solve.
///
/// The lane set is derived from the cost table; fixed-flow entries are
/// filtered against it at construction. Capacities and demands are stored
/// parallel to the declared source/customer orderings so that formulation
/// and reporting iterate in a deterministic order.
#[derive(Debug, Clone)]
pub struct ModelData {
    sources: Vec<Location>,
    customers: Vec<Location>,
    capacities: Vec<f64>,
    demands: Vec<f64>,
    costs: HashMap<Lane, f64>,
    fixed: HashMap<Lane, f64>,
    lanes: Vec<Lane>,
    outbound: HashMap<Location, Vec<Location>>,
    inbound: HashMap<Location, Vec<Location>>,
}

impl ModelData {
    /// Validate and normalize raw tables into model data.
    ///
    /// `costs` defines the lane set. `fixed` entries whose index is not a
    /// valid lane are dropped; zero entries mean "unconstrained" and are
    /// dropped as well.
    pub fn new(
        sources: Vec<Location>,
        customers: Vec<Location>,
        production: HashMap<Location, f64>,
        demand: HashMap<Location, f64>,
        costs: Vec<(Lane, f64)>,
        fixed: Vec<(Lane, f64)>,
    ) -> Result<Self, FlowError> {
        let source_set: HashSet<&Location> = sources.iter().collect();
        let customer_set: HashSet<&Location> = customers.iter().collect();

        let mut capacities = Vec::with_capacity(sources.len());
        for s in &sources {
            let cap = production.get(s).copied().ok_or_else(|| {
                FlowError::configuration(format!("source {s} has no production limit"))
            })?;
            check_non_negative(cap, || format!("production limit for {s}"))?;
            capacities.push(cap);
        }

        let mut demands = Vec::with_capacity(customers.len());
        for c in &customers {
            let dem = demand.get(c).copied().ok_or_else(|| {
                FlowError::configuration(format!("customer {c} has no demand"))
            })?;
            check_non_negative(dem, || format!("demand for {c}"))?;
            demands.push(dem);
        }

        let mut cost_table: HashMap<Lane, f64> = HashMap::with_capacity(costs.len());
        let mut outbound: HashMap<Location, Vec<Location>> = HashMap::new();
        let mut inbound: HashMap<Location, Vec<Location>> = HashMap::new();
        for (lane, cost) in costs {
            if !source_set.contains(&lane.source) {
                return Err(FlowError::invalid_input(format!(
                    "transportation cost references unknown source {}",
                    lane.source
                )));
            }
            if !customer_set.contains(&lane.customer) {
                return Err(FlowError::invalid_input(format!(
                    "transportation cost references unknown customer {}",
                    lane.customer
                )));
            }
            check_non_negative(cost, || format!("transportation cost for {lane}"))?;
            if cost_table.insert(lane.clone(), cost).is_some() {
                return Err(FlowError::invalid_input(format!(
                    "duplicate transportation cost entry for {lane}"
                )));
            }
            outbound
                .entry(lane.source.clone())
                .or_default()
                .push(lane.customer.clone());
            inbound
                .entry(lane.customer.clone())
                .or_default()
                .push(lane.source.clone());
        }

        // Adjacency lists follow the declared orderings, not input order.
        let customer_rank: HashMap<&Location, usize> =
            customers.iter().enumerate().map(|(i, c)| (c, i)).collect();
        let source_rank: HashMap<&Location, usize> =
            sources.iter().enumerate().map(|(i, s)| (s, i)).collect();
        for list in outbound.values_mut() {
            list.sort_by_key(|c| customer_rank[c]);
        }
        for list in inbound.values_mut() {
            list.sort_by_key(|s| source_rank[s]);
        }

        let lanes: Vec<Lane> = sources
            .iter()
            .flat_map(|s| {
                outbound
                    .get(s)
                    .map(Vec::as_slice)
                    .unwrap_or_default()
                    .iter()
                    .map(|c| Lane::new(s.clone(), c.clone()))
            })
            .collect();

        let mut fixed_table: HashMap<Lane, f64> = HashMap::new();
        for (lane, quantity) in fixed {
            if !cost_table.contains_key(&lane) {
                tracing::debug!(%lane, "fixed transportation entry for non-existent lane, dropped");
                continue;
            }
            check_non_negative(quantity, || format!("fixed transportation for {lane}"))?;
            if quantity > 0.0 {
                fixed_table.insert(lane, quantity);
            }
        }

        Ok(Self {
            sources,
            customers,
            capacities,
            demands,
            costs: cost_table,
            fixed: fixed_table,
            lanes,
            outbound,
            inbound,
        })
    }

    pub fn sources(&self) -> &[Location] {
        &self.sources
    }

    pub fn customers(&self) -> &[Location] {
        &self.customers
    }

    /// Declared sources with their production limits, in input order.
    pub fn capacities(&self) -> impl Iterator<Item = (&Location, f64)> {
        self.sources.iter().zip(self.capacities.iter().copied())
    }

    /// Declared customers with their demands, in input order.
    pub fn demands(&self) -> impl Iterator<Item = (&Location, f64)> {
        self.customers.iter().zip(self.demands.iter().copied())
    }

    /// All lanes in source-major declared order.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn cost(&self, lane: &Lane) -> Option<f64> {
        self.costs.get(lane).copied()
    }

    /// Mandatory quantity for the lane, if a non-zero fixed entry exists.
    pub fn fixed_flow(&self, lane: &Lane) -> Option<f64> {
        self.fixed.get(lane).copied()
    }

    /// Customers reachable from `source`, in declared customer order.
    pub fn customers_of(&self, source: &Location) -> &[Location] {
        self.outbound
            .get(source)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Sources that can serve `customer`, in declared source order.
    pub fn sources_of(&self, customer: &Location) -> &[Location] {
        self.inbound
            .get(customer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn check_non_negative(value: f64, what: impl Fn() -> String) -> Result<(), FlowError> {
    if !value.is_finite() || value < 0.0 {
        return Err(FlowError::invalid_input(format!(
            "{} must be a non-negative number, got {value}",
            what()
        )));
    }
    Ok(())
}

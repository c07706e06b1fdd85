//! Boundary between the on-disk document format and [`ModelData`].
//!
//! The document enumerates sources, customers and three sparse tables. The
//! lane set is *derived* from the transportation-cost table; the fixed
//! transportation table is filtered against it, never the other way around.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::FlowError;
use crate::model::data::{Lane, Location, ModelData};

/// One entry of a sparse (source, customer) table.
#[derive(Debug, Clone, Deserialize)]
pub struct SparseEntry {
    pub index: (Location, Location),
    pub value: f64,
}

impl SparseEntry {
    fn lane(&self) -> Lane {
        Lane {
            source: self.index.0.clone(),
            customer: self.index.1.clone(),
        }
    }
}

/// Raw input document, field names as they appear on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanDocument {
    #[serde(rename = "sSources")]
    pub sources: Vec<Location>,
    #[serde(rename = "sCustomers")]
    pub customers: Vec<Location>,
    #[serde(rename = "pSourceProduction")]
    pub source_production: HashMap<Location, f64>,
    #[serde(rename = "pCustomerDemand")]
    pub customer_demand: HashMap<Location, f64>,
    #[serde(rename = "pTransportationCosts")]
    pub transportation_costs: Vec<SparseEntry>,
    #[serde(rename = "pFixedTransportation", default)]
    pub fixed_transportation: Vec<SparseEntry>,
}

impl TryFrom<PlanDocument> for ModelData {
    type Error = FlowError;

    fn try_from(doc: PlanDocument) -> Result<Self, FlowError> {
        let costs = doc
            .transportation_costs
            .iter()
            .map(|e| (e.lane(), e.value))
            .collect();
        let fixed = doc
            .fixed_transportation
            .iter()
            .map(|e| (e.lane(), e.value))
            .collect();
        ModelData::new(
            doc.sources,
            doc.customers,
            doc.source_production,
            doc.customer_demand,
            costs,
            fixed,
        )
    }
}

/// Read and validate one problem instance from a JSON file.
pub fn load_file(path: &Path) -> Result<ModelData, FlowError> {
    let raw = fs::read_to_string(path).map_err(|source| FlowError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: PlanDocument = serde_json::from_str(&raw).map_err(|source| FlowError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    doc.try_into()
}

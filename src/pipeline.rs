//! Per-instance orchestration: load → build → solve → interpret → report.
//!
//! Each problem instance rebuilds its formulation from scratch; nothing is
//! cached or shared between instances, so variable/constraint identity can
//! never leak from one solve into the next.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::FlowError;
use crate::formulation;
use crate::model::{self, ModelData};
use crate::report::Report;
use crate::sensitivity;
use crate::solver::{LpEngine, SolveResult};

/// Solve one data file and produce its report.
pub fn run_file(
    path: &Path,
    engine: &dyn LpEngine,
    time_budget: Option<Duration>,
) -> Result<Report, FlowError> {
    info!(path = %path.display(), "loading problem instance");
    let model = model::load_file(path)?;
    run_model(&model, engine, time_budget)
}

/// Solve one already-loaded model and produce its report.
pub fn run_model(
    model: &ModelData,
    engine: &dyn LpEngine,
    time_budget: Option<Duration>,
) -> Result<Report, FlowError> {
    let instance = formulation::build(model);
    debug!(
        variables = instance.variables.len(),
        constraints = instance.constraints.len(),
        "formulation built"
    );

    let outcome = engine.solve(&instance, time_budget)?;
    let result = SolveResult::from_outcome(&instance, outcome)?;
    info!(status = %result.status, "solve finished");

    if !result.is_optimal() {
        // Infeasible/unbounded is a legitimate answer; skip interpretation.
        return Ok(Report::status_only(result.status));
    }

    let conclusions = sensitivity::interpret(&result, model.sources());
    Ok(Report::from_result(result, conclusions))
}

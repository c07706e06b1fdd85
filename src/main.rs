use std::path::Path;

use anyhow::Result;
use freightflow::solver::HighsEngine;
use freightflow::{pipeline, telemetry};
use tracing::error;

fn main() -> Result<()> {
    telemetry::init_tracing();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    anyhow::ensure!(
        !paths.is_empty(),
        "usage: freightflow <data.json> [more.json ...]"
    );

    let engine = HighsEngine;
    let mut failures = 0usize;
    for path in &paths {
        // A failed instance must not block the remaining ones.
        match pipeline::run_file(Path::new(path), &engine, None) {
            Ok(report) => println!("{}", report.render()),
            Err(err) => {
                error!(%path, error = %err, "problem instance failed");
                failures += 1;
            }
        }
    }

    anyhow::ensure!(
        failures == 0,
        "{failures} of {} problem instances failed",
        paths.len()
    );
    Ok(())
}

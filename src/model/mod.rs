pub mod data;
pub mod loader;

pub use data::{Lane, Location, ModelData};
pub use loader::{load_file, PlanDocument};

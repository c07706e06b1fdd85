pub mod builder;
pub mod ids;

pub use builder::{build, ConstraintDef, ConstraintSense, LpInstance, VariableDef};
pub use ids::{ConstraintId, VariableId};

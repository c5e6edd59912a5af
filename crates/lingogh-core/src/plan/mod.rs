//! Daily plan domain: model, storage key, and the generator seam.

pub mod generator;
pub mod model;

pub use generator::{GeneratedTask, PlanGenerator};
pub use model::{DailyPlan, DailyPlanTask, TaskType, plan_storage_key};

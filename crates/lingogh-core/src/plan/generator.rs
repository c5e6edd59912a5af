//! Plan generator trait.
//!
//! Defines the interface to the structured-output service that produces the
//! raw task list; ids, completion flags, and the date stamp are assigned by
//! the daily plan manager.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::model::TaskType;
use crate::error::Result;

/// A task as returned by the structured-output service, before an id and
/// completion state are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTask {
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

/// Produces beginner daily-plan tasks for a language.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Requests a ~25-minute beginner plan balancing listening, speaking,
    /// and writing tasks.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and on schema-violating model output; the
    /// caller degrades both identically.
    async fn generate_tasks(&self, language: &str) -> Result<Vec<GeneratedTask>>;
}

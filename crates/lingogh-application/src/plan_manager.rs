//! Daily plan lifecycle: generate, persist, rehydrate, toggle.

use std::sync::Arc;

use lingogh_core::clock::Clock;
use lingogh_core::error::Result;
use lingogh_core::id::IdProvider;
use lingogh_core::plan::{DailyPlan, DailyPlanTask, PlanGenerator, plan_storage_key};
use lingogh_core::store::KeyValueStore;
use tracing::warn;

/// Owns the plan-of-the-day for one language.
///
/// At most one plan exists per (language, calendar day) key in the store.
/// A plan is never regenerated automatically on day rollover; a lookup miss
/// plus an explicit [`generate`](Self::generate) is the only path to a new
/// one.
pub struct DailyPlanManager {
    language: String,
    store: Arc<dyn KeyValueStore>,
    generator: Arc<dyn PlanGenerator>,
    ids: Arc<dyn IdProvider>,
    clock: Arc<dyn Clock>,
    active: Option<DailyPlan>,
    busy: bool,
}

impl DailyPlanManager {
    pub fn new(
        language: impl Into<String>,
        store: Arc<dyn KeyValueStore>,
        generator: Arc<dyn PlanGenerator>,
        ids: Arc<dyn IdProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            language: language.into(),
            store,
            generator,
            ids,
            clock,
            active: None,
            busy: false,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn active_plan(&self) -> Option<&DailyPlan> {
        self.active.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    fn todays_key(&self) -> String {
        plan_storage_key(&self.language, &self.clock.today_iso())
    }

    /// Rehydrates today's plan from the store, if one was persisted.
    ///
    /// An unreadable persisted value is discarded (logged) rather than
    /// surfaced; only store failures propagate.
    pub async fn load(&mut self) -> Result<Option<&DailyPlan>> {
        let key = self.todays_key();
        self.active = match self.store.get(&key).await? {
            Some(raw) => match serde_json::from_str::<DailyPlan>(&raw) {
                Ok(plan) => Some(plan),
                Err(err) => {
                    warn!(%key, error = %err, "discarding unreadable persisted plan");
                    None
                }
            },
            None => None,
        };
        Ok(self.active.as_ref())
    }

    /// Requests a fresh plan, assigns ids and `completed: false`, stamps
    /// today's date, persists it under today's key, and makes it active.
    ///
    /// On service, schema, or store failure nothing is persisted, any prior
    /// active plan is untouched, the failure is logged, and the caller
    /// observes `None`.
    pub async fn generate(&mut self) -> Option<&DailyPlan> {
        if self.busy {
            return None;
        }
        self.busy = true;
        let result = self.generator.generate_tasks(&self.language).await;
        self.busy = false;

        let tasks = match result {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(language = %self.language, error = %err, "daily plan generation failed");
                return None;
            }
        };

        let plan = DailyPlan {
            date: self.clock.today_iso(),
            tasks: tasks
                .into_iter()
                .map(|task| DailyPlanTask {
                    id: self.ids.next_id(),
                    description: task.description,
                    task_type: task.task_type,
                    completed: false,
                })
                .collect(),
        };

        if let Err(err) = self.persist(&plan).await {
            warn!(language = %self.language, error = %err, "failed to persist generated plan");
            return None;
        }

        self.active = Some(plan);
        self.active.as_ref()
    }

    /// Flips the completion flag of the task with `task_id` and persists the
    /// plan immediately. No-op without an active plan or a matching id.
    pub async fn toggle(&mut self, task_id: &str) -> Result<()> {
        let Some(plan) = self.active.as_mut() else {
            return Ok(());
        };
        let Some(task) = plan.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(());
        };
        task.completed = !task.completed;

        let snapshot = plan.clone();
        self.persist(&snapshot).await
    }

    /// Completion percentage of the active plan; 0 without one.
    pub fn progress(&self) -> f32 {
        self.active.as_ref().map(DailyPlan::progress).unwrap_or(0.0)
    }

    async fn persist(&self, plan: &DailyPlan) -> Result<()> {
        let key = plan_storage_key(&self.language, &plan.date);
        let raw = serde_json::to_string(plan)?;
        self.store.set(&key, &raw).await
    }
}

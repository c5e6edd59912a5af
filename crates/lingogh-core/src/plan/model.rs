//! Daily plan domain model.

use serde::{Deserialize, Serialize};

/// Kind of learning activity a plan task exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Listening,
    Speaking,
    Writing,
    Other,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Listening => "listening",
            TaskType::Speaking => "speaking",
            TaskType::Writing => "writing",
            TaskType::Other => "other",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One task inside a daily plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPlanTask {
    /// Unique token within the plan
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub completed: bool,
}

/// The plan of one calendar day for one language.
///
/// At most one plan is persisted per (language, date) key; toggles mutate it
/// field-by-field, a new generation replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Calendar day in ISO 8601 form (`YYYY-MM-DD`)
    pub date: String,
    pub tasks: Vec<DailyPlanTask>,
}

impl DailyPlan {
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Completion percentage, derived and never stored. A plan with zero
    /// tasks yields 0.
    pub fn progress(&self) -> f32 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        (self.completed_count() as f32 / self.tasks.len() as f32) * 100.0
    }
}

/// Storage key for the plan of one (language, calendar day).
pub fn plan_storage_key(language: &str, date: &str) -> String {
    format!("dailyPlan_{language}_{date}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, completed: bool) -> DailyPlanTask {
        DailyPlanTask {
            id: id.to_string(),
            description: format!("task {id}"),
            task_type: TaskType::Listening,
            completed,
        }
    }

    #[test]
    fn test_progress_of_empty_plan_is_zero() {
        let plan = DailyPlan {
            date: "2026-08-07".to_string(),
            tasks: vec![],
        };
        assert_eq!(plan.progress(), 0.0);
    }

    #[test]
    fn test_progress_one_of_four() {
        let plan = DailyPlan {
            date: "2026-08-07".to_string(),
            tasks: vec![
                task("a", true),
                task("b", false),
                task("c", false),
                task("d", false),
            ],
        };
        assert_eq!(plan.progress(), 25.0);
        assert_eq!(plan.completed_count(), 1);
    }

    #[test]
    fn test_storage_key_format() {
        assert_eq!(
            plan_storage_key("Spanish", "2026-08-07"),
            "dailyPlan_Spanish_2026-08-07"
        );
    }

    #[test]
    fn test_task_type_serializes_lowercase() {
        let json = serde_json::to_string(&TaskType::Listening).unwrap();
        assert_eq!(json, "\"listening\"");
        let back: TaskType = serde_json::from_str("\"writing\"").unwrap();
        assert_eq!(back, TaskType::Writing);
    }

    #[test]
    fn test_plan_serde_uses_type_field_name() {
        let plan = DailyPlan {
            date: "2026-08-07".to_string(),
            tasks: vec![task("a", false)],
        };
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"type\":\"listening\""));
        let back: DailyPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}

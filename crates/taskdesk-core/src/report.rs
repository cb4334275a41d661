//! Status normalisation and department reporting.
//!
//! Task records arrive from the hosted backend with free-form status
//! strings. Everything here is a pure tally over a slice of records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, ValidationError};
use crate::journal::TaskLog;

/// Bucket used for records without a department.
pub const UNASSIGNED_DEPARTMENT: &str = "unassigned";

/// Normalised task status.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
    Cancelled,
    Other(String),
}

impl TaskStatus {
    /// Map a raw status string onto a known status. Case, surrounding
    /// whitespace and `_`/space/`-` separators are ignored.
    pub fn parse(raw: &str) -> Self {
        let key = raw.trim().to_lowercase().replace(['_', ' '], "-");
        match key.as_str() {
            "todo" | "to-do" | "pending" | "open" | "not-started" => TaskStatus::Todo,
            "in-progress" | "inprogress" | "doing" | "active" | "started" => TaskStatus::InProgress,
            "review" | "in-review" | "reviewing" => TaskStatus::Review,
            "done" | "completed" | "complete" | "closed" | "finished" => TaskStatus::Done,
            "cancelled" | "canceled" => TaskStatus::Cancelled,
            _ => TaskStatus::Other(key),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::Other(s) => s,
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Review => "In review",
            TaskStatus::Done => "Done",
            TaskStatus::Cancelled => "Cancelled",
            TaskStatus::Other(s) => s,
        }
    }

    /// No further work expected.
    pub fn is_closed(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Cancelled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The slice of a task record that reporting needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub department: Option<String>,
}

impl TaskRecord {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::parse(&self.status)
    }

    fn department_key(&self) -> &str {
        match self.department.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => UNASSIGNED_DEPARTMENT,
        }
    }
}

/// Per-department summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    pub department: String,
    pub total: usize,
    pub done: usize,
    /// Tasks per normalised status.
    pub by_status: BTreeMap<String, usize>,
    /// `done / total`, 0.0 for an empty department.
    pub completion_rate: f64,
}

/// Parse a JSON array of task records, rejecting records without an id.
pub fn parse_records(json: &str) -> Result<Vec<TaskRecord>> {
    let records: Vec<TaskRecord> = serde_json::from_str(json)?;
    if let Some(pos) = records.iter().position(|r| r.id.trim().is_empty()) {
        return Err(ValidationError::Empty(format!("records[{pos}].id")).into());
    }
    Ok(records)
}

pub fn tally_by_status(records: &[TaskRecord]) -> BTreeMap<TaskStatus, usize> {
    let mut out = BTreeMap::new();
    for r in records {
        *out.entry(r.status()).or_insert(0) += 1;
    }
    out
}

/// Summaries sorted by department name.
pub fn department_report(records: &[TaskRecord]) -> Vec<DepartmentSummary> {
    let mut grouped: BTreeMap<&str, Vec<&TaskRecord>> = BTreeMap::new();
    for r in records {
        grouped.entry(r.department_key()).or_default().push(r);
    }

    grouped
        .into_iter()
        .map(|(department, tasks)| {
            let mut by_status = BTreeMap::new();
            let mut done = 0;
            for t in &tasks {
                let status = t.status();
                if status == TaskStatus::Done {
                    done += 1;
                }
                *by_status.entry(status.as_str().to_string()).or_insert(0) += 1;
            }
            let total = tasks.len();
            DepartmentSummary {
                department: department.to_string(),
                total,
                done,
                by_status,
                completion_rate: if total == 0 {
                    0.0
                } else {
                    done as f64 / total as f64
                },
            }
        })
        .collect()
}

/// How often each action shows up in a task log.
pub fn activity_by_action<'a>(logs: impl IntoIterator<Item = &'a TaskLog>) -> BTreeMap<String, usize> {
    let mut out = BTreeMap::new();
    for log in logs {
        *out.entry(log.action.clone()).or_insert(0) += 1;
    }
    out
}

//! Ordered task list store

use serde::{Deserialize, Serialize};
use tracing::info;

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    /// Whether the entry is shown expanded in the list
    pub expanded: bool,
}

/// Tasks in insertion order with ids that are never reused
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a task. Blank titles are rejected.
    pub fn add(&mut self, title: &str) -> Result<Vec<Task>, String> {
        let title = title.trim();
        if title.is_empty() {
            return Err("Task title must not be blank".to_string());
        }

        let id = self.next_id;
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            title: title.to_string(),
            completed: false,
            expanded: false,
        });
        info!("Added task {}: {}", id, title);
        Ok(self.tasks.clone())
    }

    /// Remove the task with `id`
    pub fn remove(&mut self, id: u64) -> Result<Vec<Task>, String> {
        let initial_count = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == initial_count {
            return Err(format!("Task {} not found", id));
        }
        info!("Removed task {}", id);
        Ok(self.tasks.clone())
    }

    pub fn toggle_complete(&mut self, id: u64) -> Result<Vec<Task>, String> {
        self.modify(id, |task| task.completed = !task.completed)
    }

    pub fn toggle_expanded(&mut self, id: u64) -> Result<Vec<Task>, String> {
        self.modify(id, |task| task.expanded = !task.expanded)
    }

    fn modify<F>(&mut self, id: u64, updater: F) -> Result<Vec<Task>, String>
    where
        F: FnOnce(&mut Task),
    {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| format!("Task {} not found", id))?;
        updater(task);
        Ok(self.tasks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_and_are_not_reused() {
        let mut list = TaskList::new();
        list.add("write report").unwrap();
        list.add("review pr").unwrap();
        list.remove(1).unwrap();
        let tasks = list.add("lunch").unwrap();

        let ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn blank_titles_are_rejected() {
        let mut list = TaskList::new();
        assert!(list.add("   ").is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn titles_are_trimmed() {
        let mut list = TaskList::new();
        let tasks = list.add("  focus  ").unwrap();
        assert_eq!(tasks[0].title, "focus");
    }

    #[test]
    fn toggles_flip_only_the_target_task() {
        let mut list = TaskList::new();
        list.add("a").unwrap();
        list.add("b").unwrap();

        let tasks = list.toggle_complete(1).unwrap();
        assert!(!tasks[0].completed);
        assert!(tasks[1].completed);

        let tasks = list.toggle_expanded(0).unwrap();
        assert!(tasks[0].expanded);
        assert!(!tasks[1].expanded);

        let tasks = list.toggle_complete(1).unwrap();
        assert!(!tasks[1].completed);
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut list = TaskList::new();
        list.add("a").unwrap();
        assert!(list.remove(9).is_err());
        assert!(list.toggle_complete(9).is_err());
        assert!(list.toggle_expanded(9).is_err());
        assert_eq!(list.len(), 1);
    }
}

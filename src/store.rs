//! The authoritative in-memory list of tasks

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::label::{self, LabelId};
use crate::reorder::{self, DragResult};
use crate::task::{Task, TaskId};

/// Owns every task, and every operation that mutates them.
///
/// Operations on unknown task IDs are no-ops, so that they can safely be retried.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every task, in store order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns a particular task
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        let found = self.tasks.iter_mut().find(|task| task.id() == id);
        if found.is_none() {
            log::debug!("No task {} in the store, ignoring", id);
        }
        found
    }

    /// Returns the tasks of a day, in display order
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        reorder::day_positions(&self.tasks, date)
            .into_iter()
            .map(|pos| &self.tasks[pos])
            .collect()
    }

    /// Create a task at the end of a day
    pub fn add(&mut self, date: NaiveDate) -> &Task {
        let order = self.tasks.iter().filter(|t| t.date() == date).count() as u32;
        let task = Task::new(date, order);
        log::debug!("Adding task {} on {}", task.id(), date);
        self.tasks.push(task);
        &self.tasks[self.tasks.len() - 1]
    }

    /// Change the title of a task.
    ///
    /// Blank titles are refused, the previous title is kept.
    pub fn rename(&mut self, id: &TaskId, new_title: &str) {
        if new_title.trim().is_empty() {
            log::debug!("Refusing to give task {} an empty title", id);
            return;
        }
        if let Some(task) = self.get_mut(id) {
            task.set_title(new_title.to_string());
        }
    }

    /// Remove a task. Removing an unknown (or already removed) task does nothing.
    pub fn delete(&mut self, id: &TaskId) {
        let position = match self.tasks.iter().position(|task| task.id() == id) {
            None => return,
            Some(pos) => pos,
        };
        let removed = self.tasks.remove(position);
        log::debug!("Deleted task {}", removed.id());
        reorder::renumber_day(&mut self.tasks, removed.date());
    }

    /// Replace the labels of a task.
    ///
    /// Duplicates are dropped, and so are IDs that are not in the label [`catalog`](crate::label::catalog).
    pub fn set_labels(&mut self, id: &TaskId, labels: &[LabelId]) {
        let mut accepted: Vec<LabelId> = Vec::with_capacity(labels.len());
        for label_id in labels {
            if label::find(label_id).is_none() {
                log::warn!("Unknown label {}. Ignoring it", label_id);
                continue;
            }
            if accepted.contains(label_id) == false {
                accepted.push(label_id.clone());
            }
        }

        if let Some(task) = self.get_mut(id) {
            task.set_labels(accepted);
        }
    }

    /// Attach a label to a task if it does not have it yet, detach it otherwise
    pub fn toggle_label(&mut self, id: &TaskId, label: &LabelId) {
        let mut labels = match self.get(id) {
            None => return,
            Some(task) => task.labels().to_vec(),
        };
        if labels.contains(label) {
            labels.retain(|l| l != label);
        } else {
            labels.push(label.clone());
        }
        self.set_labels(id, &labels);
    }

    /// Collapse or expand the labels of a task
    pub fn set_labels_minimized(&mut self, id: &TaskId, minimized: bool) {
        if let Some(task) = self.get_mut(id) {
            task.set_labels_minimized(minimized);
        }
    }

    /// Apply the result of a drag and drop.
    ///
    /// See the [`reorder`](crate::reorder) module. Returns whether the store has been modified.
    pub fn move_task(&mut self, drag: &DragResult) -> bool {
        reorder::apply(&mut self.tasks, drag)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TASK_TITLE;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn labels(ids: &[&str]) -> Vec<LabelId> {
        ids.iter().map(|id| LabelId::from(*id)).collect()
    }

    #[test]
    fn add_creates_a_default_task() {
        let mut store = TaskStore::new();
        let id = store.add(day(1)).id().clone();

        let on_day: Vec<_> = store.tasks_on(day(1));
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].id(), &id);
        assert_eq!(on_day[0].title(), DEFAULT_TASK_TITLE);
        assert!(on_day[0].labels().is_empty());
        assert_eq!(on_day[0].order(), 0);

        let second = store.add(day(1)).clone();
        assert_eq!(second.order(), 1);
        assert_ne!(second.id(), &id);
        let other_day = store.add(day(2)).clone();
        assert_eq!(other_day.order(), 0);
    }

    #[test]
    fn rename() {
        let mut store = TaskStore::new();
        let id = store.add(day(1)).id().clone();

        store.rename(&id, "Pay rent");
        assert_eq!(store.get(&id).unwrap().title(), "Pay rent");

        store.rename(&id, "   ");
        assert_eq!(store.get(&id).unwrap().title(), "Pay rent");

        // Unknown IDs are ignored
        store.rename(&TaskId::random(), "Whatever");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = TaskStore::new();
        let a = store.add(day(1)).id().clone();
        let b = store.add(day(1)).id().clone();
        let c = store.add(day(1)).id().clone();

        store.delete(&a);
        let after_first = store.clone();
        store.delete(&a);
        assert_eq!(store, after_first);

        let remaining: Vec<_> = store.tasks_on(day(1)).into_iter().map(|t| (t.id().clone(), t.order())).collect();
        assert_eq!(remaining, vec![(b, 0), (c.clone(), 1)]);

        // A new task must not collide with the renumbered ones
        let d = store.add(day(1)).clone();
        assert_eq!(d.order(), 2);
    }

    #[test]
    fn labels_are_a_set_of_known_labels() {
        let mut store = TaskStore::new();
        let id = store.add(day(1)).id().clone();

        store.set_labels(&id, &labels(&["bug", "bug", "no-such-label", "urgent"]));
        assert_eq!(store.get(&id).unwrap().labels(), &labels(&["bug", "urgent"])[..]);
    }

    #[test]
    fn third_label_forces_minimized() {
        let mut store = TaskStore::new();
        let id = store.add(day(1)).id().clone();
        store.set_labels_minimized(&id, false);

        store.set_labels(&id, &labels(&["bug", "urgent"]));
        assert_eq!(store.get(&id).unwrap().is_labels_minimized(), false);

        store.toggle_label(&id, &LabelId::from("review"));
        assert_eq!(store.get(&id).unwrap().is_labels_minimized(), true);

        store.set_labels_minimized(&id, false);
        store.toggle_label(&id, &LabelId::from("review"));
        store.toggle_label(&id, &LabelId::from("urgent"));
        assert_eq!(store.get(&id).unwrap().labels(), &labels(&["bug"])[..]);
        assert_eq!(store.get(&id).unwrap().is_labels_minimized(), false);
    }

    #[test]
    fn move_from_a_day_to_an_empty_one() {
        let mut store = TaskStore::new();
        let moved = store.add(day(1)).id().clone();
        store.add(day(1));

        let drag = DragResult::dropped(
            crate::reorder::DragLocation::new(day(1), 0),
            crate::reorder::DragLocation::new(day(3), 0),
        );
        assert!(store.move_task(&drag));

        assert_eq!(store.tasks_on(day(1)).len(), 1);
        let on_day_3 = store.tasks_on(day(3));
        assert_eq!(on_day_3.len(), 1);
        assert_eq!(on_day_3[0].id(), &moved);
        assert_eq!(store.len(), 2);
    }
}

//! Drag and drop of tasks between (or within) days
//!
//! The display position of a task within its day is its explicit `order` key. A drop renumbers the
//! affected days densely (`0..n`) in the same operation that changes the task's date, so the position
//! of a task in the store's backing list never matters for per-day ordering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// A position in a day's task list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    pub date: NaiveDate,
    pub index: usize,
}

impl DragLocation {
    pub fn new(date: NaiveDate, index: usize) -> Self {
        Self { date, index }
    }
}

/// The outcome of a drag gesture, as reported by the drag-and-drop layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    pub source: DragLocation,
    /// `None` when the task was dropped outside of any day (i.e. the drag was cancelled)
    pub destination: Option<DragLocation>,
}

impl DragResult {
    pub fn dropped(source: DragLocation, destination: DragLocation) -> Self {
        Self { source, destination: Some(destination) }
    }

    pub fn cancelled(source: DragLocation) -> Self {
        Self { source, destination: None }
    }
}

/// Returns the positions (in `tasks`) of the tasks of a day, in display order.
///
/// Tasks that share the same `order` keep their relative position in `tasks`.
pub(crate) fn day_positions(tasks: &[Task], date: NaiveDate) -> Vec<usize> {
    let mut positions: Vec<usize> = tasks.iter()
        .enumerate()
        .filter(|(_, task)| task.date() == date)
        .map(|(pos, _)| pos)
        .collect();
    positions.sort_by_key(|pos| tasks[*pos].order());
    positions
}

/// Renumber the tasks of a day as `0..n`, keeping their current display order
pub(crate) fn renumber_day(tasks: &mut [Task], date: NaiveDate) {
    let positions = day_positions(tasks, date);
    for (order, pos) in positions.into_iter().enumerate() {
        tasks[pos].set_order(order as u32);
    }
}

/// Apply a drag result to a list of tasks.
///
/// Returns whether the list has been modified. The list is left untouched when the drag was cancelled,
/// or when there is no task at the source position.
pub fn apply(tasks: &mut [Task], drag: &DragResult) -> bool {
    let source_day = day_positions(tasks, drag.source.date);
    let moved = match source_day.get(drag.source.index) {
        None => {
            log::debug!("No task at index {} of {}, ignoring the drop", drag.source.index, drag.source.date);
            return false;
        },
        Some(pos) => *pos,
    };

    let destination = match &drag.destination {
        None => {
            log::debug!("Drag of task {} has been cancelled", tasks[moved].id());
            return false;
        },
        Some(dest) => dest,
    };

    let mut destination_day: Vec<usize> = day_positions(tasks, destination.date)
        .into_iter()
        .filter(|pos| *pos != moved)
        .collect();
    let insert_at = destination.index.min(destination_day.len());
    destination_day.insert(insert_at, moved);

    log::debug!("Moving task {} from {}#{} to {}#{}",
        tasks[moved].id(), drag.source.date, drag.source.index, destination.date, insert_at);

    tasks[moved].set_date(destination.date);
    for (order, pos) in destination_day.into_iter().enumerate() {
        tasks[pos].set_order(order as u32);
    }
    if drag.source.date != destination.date {
        renumber_day(tasks, drag.source.date);
    }
    true
}

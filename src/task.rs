//! To-do tasks pinned to a calendar day

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::config::{DEFAULT_TASK_TITLE, LABELS_MINIMIZE_THRESHOLD};
use crate::label::LabelId;


/// A globally unique, immutable task identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskId {
    content: Uuid,
}
impl TaskId {
    /// Generate a random TaskId.
    pub fn random() -> Self {
        Self { content: Uuid::new_v4() }
    }
}
impl FromStr for TaskId {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let u = Uuid::parse_str(s)?;
        Ok(Self { content: u })
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content.to_hyphenated())
    }
}

/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    /// The day this task belongs to
    date: NaiveDate,
    /// Display position among the tasks of the same day
    order: u32,
    /// Attached labels. This is a set: it never contains duplicates.
    labels: Vec<LabelId>,
    /// Whether the label chips are displayed as thin coloured bars
    is_labels_minimized: bool,
}

impl Task {
    /// Create a brand new task on `date`, with a random ID and the default title
    pub fn new(date: NaiveDate, order: u32) -> Self {
        Self {
            id: TaskId::random(),
            title: DEFAULT_TASK_TITLE.to_string(),
            date,
            order,
            labels: Vec::new(),
            is_labels_minimized: true,
        }
    }

    pub fn id(&self) -> &TaskId       { &self.id     }
    pub fn title(&self) -> &str       { &self.title  }
    pub fn date(&self) -> NaiveDate   { self.date    }
    pub fn order(&self) -> u32        { self.order   }
    pub fn labels(&self) -> &[LabelId] { &self.labels }
    pub fn is_labels_minimized(&self) -> bool { self.is_labels_minimized }

    pub fn has_label(&self, label: &LabelId) -> bool {
        self.labels.contains(label)
    }

    pub(crate) fn set_title(&mut self, new_title: String) {
        self.title = new_title;
    }

    pub(crate) fn set_date(&mut self, new_date: NaiveDate) {
        self.date = new_date;
    }

    pub(crate) fn set_order(&mut self, new_order: u32) {
        self.order = new_order;
    }

    /// Replace the label set.
    ///
    /// Growing the set past [`LABELS_MINIMIZE_THRESHOLD`] collapses the labels. Removing labels never expands them back.
    pub(crate) fn set_labels(&mut self, new_labels: Vec<LabelId>) {
        let previous_count = self.labels.len();
        let new_count = new_labels.len();
        self.labels = new_labels;

        if new_count > LABELS_MINIMIZE_THRESHOLD && new_count > previous_count {
            self.is_labels_minimized = true;
        }
    }

    pub(crate) fn set_labels_minimized(&mut self, minimized: bool) {
        self.is_labels_minimized = minimized;
    }
}

//! Predefined labels that can be attached to tasks

use std::fmt::{Display, Formatter};

use csscolorparser::Color;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The identifier of a label of the [`catalog`] (e.g. `"in-progress"`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelId(String);

impl LabelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LabelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LabelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for LabelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// A tag (display name and colour) that can be attached to a task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    id: LabelId,
    name: String,
    color: Color,
}

impl Label {
    fn predefined(id: &str, name: &str, hex_color: &str) -> Self {
        let color = csscolorparser::parse(hex_color)
            .expect("predefined label colours are valid CSS colours");
        Self { id: LabelId::from(id), name: name.to_string(), color }
    }

    pub fn id(&self) -> &LabelId { &self.id    }
    pub fn name(&self) -> &str   { &self.name  }
    pub fn color(&self) -> &Color { &self.color }
}

static CATALOG: Lazy<Vec<Label>> = Lazy::new(|| vec![
    Label::predefined("design",        "Design",        "#ff9800"),
    Label::predefined("urgent",        "Urgent",        "#f44336"),
    Label::predefined("feature",       "Feature",       "#4caf50"),
    Label::predefined("bug",           "Bug",           "#e91e63"),
    Label::predefined("documentation", "Documentation", "#795548"),
    Label::predefined("in-progress",   "In Progress",   "#2196f3"),
    Label::predefined("blocked",       "Blocked",       "#9c27b0"),
    Label::predefined("review",        "Review",        "#009688"),
    Label::predefined("testing",       "Testing",       "#ffd700"),
    Label::predefined("low-priority",  "Low Priority",  "#9e9e9e"),
    Label::predefined("high-priority", "High Priority", "#ff5722"),
    Label::predefined("discussion",    "Discussion",    "#3f51b5"),
]);

/// Returns every predefined label, in display order
pub fn catalog() -> &'static [Label] {
    &CATALOG
}

/// Returns the predefined label with this id, if any
pub fn find(id: &LabelId) -> Option<&'static Label> {
    CATALOG.iter().find(|label| label.id() == id)
}

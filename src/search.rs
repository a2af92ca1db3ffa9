//! Task search, with highlighted matches and keyboard navigation through the results

use std::ops::Range;

use chrono::NaiveDate;

use crate::label;
use crate::store::TaskStore;
use crate::task::{Task, TaskId};

/// A task that matches the current query
#[derive(Clone, Debug, PartialEq)]
pub struct SearchMatch {
    pub task_id: TaskId,
    pub date: NaiveDate,
    pub title: String,
    /// Byte ranges of `title` to highlight
    pub highlights: Vec<Range<usize>>,
}

/// The state of the result dropdown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchNavigation {
    Closed,
    Open { selected: Option<usize> },
}

/// Keys handled by the search field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKey {
    Down,
    Up,
    Enter,
    Escape,
}

/// The user picked a result: the calendar should jump to this task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchJump {
    pub task_id: TaskId,
    pub date: NaiveDate,
}

/// Returns the byte ranges of every (non-overlapping) case-insensitive occurrence of `query` in `text`
pub fn highlight_spans(text: &str, query: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut resume_at = 0;
    for (start, _) in text.char_indices() {
        if start < resume_at {
            continue;
        }
        if let Some(len) = match_len_at(&text[start..], &needle) {
            spans.push(start..start + len);
            resume_at = start + len;
        }
    }
    spans
}

/// Returns the length (in bytes of `haystack`) of the match of `needle` at the very start of `haystack`
fn match_len_at(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, c) in haystack.char_indices() {
        for lower in c.to_lowercase() {
            if matched == needle.len() || needle[matched] != lower {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(offset + c.len_utf8());
        }
    }
    None
}

/// Case-insensitive containment, with the same per-character lowercasing as [`highlight_spans`]
fn contains_ignore_case(text: &str, query: &str) -> bool {
    highlight_spans(text, query).is_empty() == false
}

/// Whether a task matches a query: its title, or the name of one of its labels, contains the query (ignoring case)
pub fn task_matches(task: &Task, query: &str) -> bool {
    contains_ignore_case(task.title(), query)
        || task.labels().iter()
            .filter_map(label::find)
            .any(|label| contains_ignore_case(label.name(), query))
}

/// Returns the tasks that match `query`, or every task when the query is empty
pub fn filter_tasks<'a>(tasks: &[&'a Task], query: &str) -> Vec<&'a Task> {
    if query.is_empty() {
        return tasks.to_vec();
    }
    tasks.iter()
        .filter(|task| task_matches(task, query))
        .copied()
        .collect()
}

/// The search field, its results and the dropdown state
#[derive(Clone, Debug)]
pub struct SearchIndex {
    query: String,
    results: Vec<SearchMatch>,
    navigation: SearchNavigation,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            navigation: SearchNavigation::Closed,
        }
    }
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str                   { &self.query      }
    pub fn results(&self) -> &[SearchMatch]       { &self.results    }
    pub fn navigation(&self) -> SearchNavigation  { self.navigation  }
    pub fn result_count(&self) -> usize           { self.results.len() }

    pub fn selected(&self) -> Option<usize> {
        match self.navigation {
            SearchNavigation::Open { selected } => selected,
            SearchNavigation::Closed => None,
        }
    }

    /// Whether the dropdown should be displayed
    pub fn is_dropdown_visible(&self) -> bool {
        self.navigation != SearchNavigation::Closed && self.results.is_empty() == false
    }

    /// Whether a task title contains the current query (used to emphasize matching tasks in their cells)
    pub fn is_title_match(&self, title: &str) -> bool {
        contains_ignore_case(title, &self.query)
    }

    /// Change the query, and recompute the results
    pub fn set_query(&mut self, query: &str, store: &TaskStore) {
        self.query = query.to_string();
        self.refresh(store);
    }

    /// Recompute the results after the store has changed.
    ///
    /// With an active query, this re-opens the dropdown with no selection.
    pub fn refresh(&mut self, store: &TaskStore) {
        if self.query.is_empty() {
            self.results.clear();
            self.navigation = SearchNavigation::Closed;
            return;
        }

        self.results = store.tasks().iter()
            .filter(|task| task_matches(task, &self.query))
            .map(|task| SearchMatch {
                task_id: task.id().clone(),
                date: task.date(),
                title: task.title().to_string(),
                highlights: highlight_spans(task.title(), &self.query),
            })
            .collect();
        self.navigation = SearchNavigation::Open { selected: None };
    }

    /// Handle a key press in the search field.
    ///
    /// Returns the task to jump to when a result has been picked.
    pub fn handle_key(&mut self, key: SearchKey) -> Option<SearchJump> {
        let selected = match self.navigation {
            SearchNavigation::Closed => return None,
            SearchNavigation::Open { selected } => selected,
        };

        match key {
            SearchKey::Down => {
                let next = match selected {
                    None if self.results.is_empty() == false => Some(0),
                    Some(i) if i + 1 < self.results.len() => Some(i + 1),
                    other => other,
                };
                self.navigation = SearchNavigation::Open { selected: next };
                None
            },
            SearchKey::Up => {
                let previous = match selected {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                };
                self.navigation = SearchNavigation::Open { selected: previous };
                None
            },
            SearchKey::Enter => {
                let picked = selected.and_then(|i| self.results.get(i))?;
                let jump = SearchJump { task_id: picked.task_id.clone(), date: picked.date };
                self.navigation = SearchNavigation::Closed;
                Some(jump)
            },
            SearchKey::Escape => {
                self.navigation = SearchNavigation::Closed;
                None
            },
        }
    }

    /// Pick a result directly (e.g. with a mouse click)
    pub fn pick(&mut self, index: usize) -> Option<SearchJump> {
        let picked = self.results.get(index)?;
        let jump = SearchJump { task_id: picked.task_id.clone(), date: picked.date };
        self.navigation = SearchNavigation::Closed;
        Some(jump)
    }

    /// The search field lost the focus
    pub fn blur(&mut self) {
        self.navigation = SearchNavigation::Closed;
    }

    /// Empty the search field
    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.navigation = SearchNavigation::Closed;
    }
}

//! The month view, and everything the user can do with it
//!
//! A [`Calendar`] is the single owner of the session state: the tasks, the displayed month, the selected country
//! and its holidays, the search field, and a few transient UI states (task being edited, drag in progress,
//! highlighted cell). Every projection it hands out (cells, holidays of a cell, search results) is derived from
//! this state on demand.

use std::error::Error;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::config::{read_setting, CELL_HIGHLIGHT_SECONDS, DEFAULT_COUNTRY_CODE};
use crate::country::{CountryPicker, PickerKey};
use crate::grid::{self, CalendarCell, GridLayout};
use crate::holiday::{CellHolidays, Country, Holiday, HolidayFetch, HolidayOverlay};
use crate::label::LabelId;
use crate::reorder::{DragLocation, DragResult};
use crate::search::{self, SearchIndex, SearchJump, SearchKey};
use crate::store::TaskStore;
use crate::task::{Task, TaskId};
use crate::traits::HolidaySource;

/// A cell that is briefly emphasized after a jump from the search results
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CellHighlight {
    date: NaiveDate,
    until: DateTime<Utc>,
}

/// A month view of the user's tasks, with public holidays
#[derive(Clone, Debug)]
pub struct Calendar {
    store: TaskStore,
    reference_date: NaiveDate,
    layout: GridLayout,

    selected_country: String,
    countries: Vec<Country>,
    country_picker: CountryPicker,
    holidays: HolidayOverlay,

    search: SearchIndex,

    editing: Option<TaskId>,
    is_dragging: bool,
    highlight: Option<CellHighlight>,
}

impl Calendar {
    /// Create an empty calendar showing the month of `reference_date`, and the holidays of the default country
    pub fn new(reference_date: NaiveDate) -> Self {
        Self::with_store(reference_date, TaskStore::new())
    }

    /// Create a calendar that displays existing tasks
    pub fn with_store(reference_date: NaiveDate, store: TaskStore) -> Self {
        Self {
            store,
            reference_date,
            layout: GridLayout::default(),
            selected_country: read_setting(&DEFAULT_COUNTRY_CODE),
            countries: Vec::new(),
            country_picker: CountryPicker::default(),
            holidays: HolidayOverlay::new(),
            search: SearchIndex::new(),
            editing: None,
            is_dragging: false,
            highlight: None,
        }
    }

    pub fn store(&self) -> &TaskStore                 { &self.store           }
    pub fn reference_date(&self) -> NaiveDate         { self.reference_date   }
    pub fn layout(&self) -> GridLayout                { self.layout           }
    pub fn selected_country(&self) -> &str            { &self.selected_country }
    pub fn countries(&self) -> &[Country]             { &self.countries       }
    pub fn country_picker(&self) -> &CountryPicker    { &self.country_picker  }
    pub fn holidays(&self) -> &HolidayOverlay         { &self.holidays        }
    pub fn search(&self) -> &SearchIndex              { &self.search          }
    pub fn editing(&self) -> Option<&TaskId>          { self.editing.as_ref() }
    pub fn is_dragging(&self) -> bool                 { self.is_dragging      }

    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = layout;
    }

    /// The title of the displayed month, e.g. "June 2024"
    pub fn month_title(&self) -> String {
        self.reference_date.format("%B %Y").to_string()
    }

    /// The cells of the displayed month
    pub fn cells(&self) -> Vec<CalendarCell<'_>> {
        grid::project(self.reference_date, &self.store, self.layout)
    }

    /// The tasks of a cell that should be displayed, given the current search query
    pub fn visible_tasks<'a>(&self, tasks: &[&'a Task]) -> Vec<&'a Task> {
        search::filter_tasks(tasks, self.search.query())
    }

    /// What the holiday area of a cell should display
    pub fn cell_holidays(&self, date: NaiveDate) -> CellHolidays<'_> {
        self.holidays.holidays_on(date)
    }

    /// The "Holiday in ..." text of a holiday
    pub fn holiday_origin(&self, holiday: &Holiday) -> String {
        crate::holiday::holiday_origin(holiday, &self.countries)
    }

    //
    // Navigation
    //

    pub fn set_reference_date(&mut self, date: NaiveDate) {
        self.reference_date = date;
    }

    pub fn next_month(&mut self) {
        self.reference_date = grid::add_months(self.reference_date, 1);
    }

    pub fn previous_month(&mut self) {
        self.reference_date = grid::add_months(self.reference_date, -1);
    }

    //
    // Tasks
    //

    /// Create a task on a day, and start editing it.
    ///
    /// Clicks that are part of a drag gesture do not create anything.
    pub fn add_task(&mut self, date: NaiveDate) -> Option<TaskId> {
        if self.is_dragging {
            log::debug!("Not adding a task during a drag");
            return None;
        }
        let id = self.store.add(date).id().clone();
        self.editing = Some(id.clone());
        self.search.refresh(&self.store);
        Some(id)
    }

    pub fn start_editing(&mut self, id: &TaskId) {
        if self.store.get(id).is_some() {
            self.editing = Some(id.clone());
        }
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
    }

    /// Save the title typed in the editor, and stop editing
    pub fn commit_title(&mut self, id: &TaskId, title: &str) {
        self.store.rename(id, title);
        self.editing = None;
        self.search.refresh(&self.store);
    }

    pub fn delete_task(&mut self, id: &TaskId) {
        self.store.delete(id);
        self.editing = None;
        self.search.refresh(&self.store);
    }

    pub fn set_labels(&mut self, id: &TaskId, labels: &[LabelId]) {
        self.store.set_labels(id, labels);
        self.search.refresh(&self.store);
    }

    pub fn toggle_label(&mut self, id: &TaskId, label: &LabelId) {
        self.store.toggle_label(id, label);
        self.search.refresh(&self.store);
    }

    pub fn set_labels_minimized(&mut self, id: &TaskId, minimized: bool) {
        self.store.set_labels_minimized(id, minimized);
    }

    //
    // Drag and drop
    //

    pub fn begin_drag(&mut self) {
        self.is_dragging = true;
    }

    /// Finish a drag gesture.
    ///
    /// Indices of `drag` refer to the task lists as displayed, i.e. narrowed down by the current search query.
    /// Returns whether a task has been moved.
    pub fn end_drag(&mut self, drag: &DragResult) -> bool {
        self.is_dragging = false;

        let store_drag = match self.to_store_drag(drag) {
            None => {
                log::debug!("No visible task at index {} of {}, ignoring the drop", drag.source.index, drag.source.date);
                return false;
            },
            Some(d) => d,
        };
        let moved = self.store.move_task(&store_drag);
        if moved {
            self.search.refresh(&self.store);
        }
        moved
    }

    /// Translate indices of filtered (displayed) lists into indices of complete day lists
    fn to_store_drag(&self, drag: &DragResult) -> Option<DragResult> {
        if self.search.query().is_empty() {
            return Some(*drag);
        }

        let source_day = self.store.tasks_on(drag.source.date);
        let moved_id = self.visible_tasks(&source_day).get(drag.source.index)?.id().clone();
        let source_index = source_day.iter().position(|t| t.id() == &moved_id)?;

        let destination = drag.destination.map(|dest| {
            let day: Vec<&Task> = self.store.tasks_on(dest.date)
                .into_iter()
                .filter(|t| t.id() != &moved_id)
                .collect();
            let visible = self.visible_tasks(&day);
            let position_of = |task: &Task| day.iter().position(|t| t.id() == task.id());

            let index = match visible.get(dest.index) {
                Some(anchor) => position_of(*anchor),
                None => visible.last().and_then(|last| position_of(*last)).map(|pos| pos + 1),
            };
            DragLocation::new(dest.date, index.unwrap_or(day.len()))
        });

        Some(DragResult {
            source: DragLocation::new(drag.source.date, source_index),
            destination,
        })
    }

    //
    // Search
    //

    pub fn set_search_query(&mut self, query: &str) {
        self.search.set_query(query, &self.store);
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn blur_search(&mut self) {
        self.search.blur();
    }

    /// Handle a key press in the search field. `now` is used to time the highlight of the cell we may jump to.
    pub fn search_key(&mut self, key: SearchKey, now: DateTime<Utc>) -> Option<SearchJump> {
        let jump = self.search.handle_key(key)?;
        self.jump_to(&jump, now);
        Some(jump)
    }

    /// Jump to a search result picked with the mouse
    pub fn pick_search_result(&mut self, index: usize, now: DateTime<Utc>) -> Option<SearchJump> {
        let jump = self.search.pick(index)?;
        self.jump_to(&jump, now);
        Some(jump)
    }

    fn jump_to(&mut self, jump: &SearchJump, now: DateTime<Utc>) {
        log::debug!("Jumping to task {} on {}", jump.task_id, jump.date);
        self.reference_date = jump.date;
        self.highlight = Some(CellHighlight {
            date: jump.date,
            until: now + Duration::seconds(CELL_HIGHLIGHT_SECONDS),
        });
    }

    /// The cell that is currently highlighted, if any
    pub fn highlighted_cell(&self, now: DateTime<Utc>) -> Option<NaiveDate> {
        self.highlight
            .filter(|h| now < h.until)
            .map(|h| h.date)
    }

    //
    // Countries and holidays
    //

    pub fn select_country(&mut self, country_code: &str) {
        self.selected_country = country_code.to_string();
        self.country_picker.sync_selection(&self.countries, &self.selected_country);
    }

    pub fn focus_country_picker(&mut self) {
        self.country_picker.focus();
    }

    pub fn blur_country_picker(&mut self) {
        self.country_picker.blur(&self.countries, &self.selected_country);
    }

    pub fn type_country_filter(&mut self, text: &str) {
        self.country_picker.set_filter(text);
    }

    /// Handle a key press in the country picker, selecting the country that may have been picked
    pub fn country_key(&mut self, key: PickerKey) {
        let picked = self.country_picker.handle_key(key, &self.countries, &self.selected_country);
        if let Some(code) = picked {
            self.select_country(&code);
        }
    }

    pub fn pick_country(&mut self, country_code: &str) {
        let code = self.country_picker.pick(country_code, &self.countries);
        self.select_country(&code);
    }

    /// Fetch the list of countries. Failures are logged, and leave the list empty.
    pub async fn load_countries<S: HolidaySource + ?Sized>(&mut self, source: &S) {
        match source.available_countries().await {
            Ok(countries) => {
                log::info!("{} countries available", countries.len());
                self.countries = countries;
            },
            Err(err) => {
                log::warn!("Failed to fetch countries: {}", err);
            },
        }
        self.country_picker.sync_selection(&self.countries, &self.selected_country);
    }

    /// Returns a ticket in case holidays must be fetched for the displayed year and the selected country
    pub fn holiday_request(&mut self) -> Option<HolidayFetch> {
        let year = self.reference_date.year();
        self.holidays.request(year, &self.selected_country)
    }

    /// Hand back the outcome of a fetch started with [`Self::holiday_request`].
    /// Returns whether it has been applied (outdated fetches are ignored).
    pub fn apply_holidays(&mut self, fetch: &HolidayFetch, result: Result<Vec<Holiday>, Box<dyn Error>>) -> bool {
        self.holidays.apply(fetch, result)
    }

    /// Fetch the holidays of the displayed year for the selected country, if they are not the current ones already
    pub async fn refresh_holidays<S: HolidaySource + ?Sized>(&mut self, source: &S) -> bool {
        let fetch = match self.holiday_request() {
            None => return false,
            Some(f) => f,
        };
        let result = source.public_holidays(fetch.year(), fetch.country_code()).await;
        self.apply_holidays(&fetch, result)
    }
}

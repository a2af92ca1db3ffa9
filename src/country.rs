//! A filterable country picker

use crate::holiday::Country;

/// Keys handled by the country picker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerKey {
    Down,
    Up,
    Enter,
    Space,
    Escape,
}

/// The text field and dropdown used to choose the country whose holidays are displayed.
///
/// The selected country itself is owned by the caller: the picker only reports which country has been picked.
#[derive(Clone, Debug, Default)]
pub struct CountryPicker {
    filter: String,
    is_open: bool,
    highlighted: usize,
}

impl CountryPicker {
    /// Create a picker whose text shows the currently selected country
    pub fn new(countries: &[Country], selected_code: &str) -> Self {
        Self {
            filter: selected_name(countries, selected_code),
            is_open: false,
            highlighted: 0,
        }
    }

    pub fn filter(&self) -> &str     { &self.filter     }
    pub fn is_open(&self) -> bool    { self.is_open     }
    pub fn highlighted(&self) -> usize { self.highlighted }

    /// Returns the countries whose name or code contains the filter text (ignoring case)
    pub fn matching<'a>(&self, countries: &'a [Country]) -> Vec<&'a Country> {
        let filter = self.filter.to_lowercase();
        countries.iter()
            .filter(|c| c.name.to_lowercase().contains(&filter) || c.country_code.to_lowercase().contains(&filter))
            .collect()
    }

    /// The user typed in the field
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_string();
        self.is_open = true;
        self.highlighted = 0;
    }

    pub fn focus(&mut self) {
        self.is_open = true;
    }

    /// The field lost the focus: the dropdown closes and the field shows the selected country again
    pub fn blur(&mut self, countries: &[Country], selected_code: &str) {
        self.is_open = false;
        self.filter = selected_name(countries, selected_code);
    }

    /// Handle a key press. Returns the code of the country that has been picked, if any.
    pub fn handle_key(&mut self, key: PickerKey, countries: &[Country], selected_code: &str) -> Option<String> {
        if self.is_open == false {
            if key == PickerKey::Down || key == PickerKey::Enter || key == PickerKey::Space {
                self.is_open = true;
            }
            return None;
        }

        let match_count = self.matching(countries).len();
        match key {
            PickerKey::Down => {
                if self.highlighted + 1 < match_count {
                    self.highlighted += 1;
                }
                None
            },
            PickerKey::Up => {
                self.highlighted = self.highlighted.saturating_sub(1);
                None
            },
            PickerKey::Enter => {
                let picked = self.matching(countries)
                    .get(self.highlighted)
                    .map(|c| c.country_code.clone())?;
                self.is_open = false;
                Some(picked)
            },
            PickerKey::Space => None,
            PickerKey::Escape => {
                self.blur(countries, selected_code);
                None
            },
        }
    }

    /// The user clicked a country of the dropdown
    pub fn pick(&mut self, country_code: &str, countries: &[Country]) -> String {
        self.is_open = false;
        self.filter = selected_name(countries, country_code);
        country_code.to_string()
    }

    /// The selection (or the country list) changed: show the selected country's name
    pub fn sync_selection(&mut self, countries: &[Country], selected_code: &str) {
        self.filter = selected_name(countries, selected_code);
    }
}

fn selected_name(countries: &[Country], selected_code: &str) -> String {
    countries.iter()
        .find(|c| c.country_code == selected_code)
        .map(|c| c.name.clone())
        .unwrap_or_default()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> Vec<Country> {
        [("DE", "Germany"), ("FR", "France"), ("GB", "United Kingdom"), ("US", "United States")]
            .iter()
            .map(|(code, name)| Country { country_code: code.to_string(), name: name.to_string() })
            .collect()
    }

    #[test]
    fn filters_by_name_and_code() {
        let countries = countries();
        let mut picker = CountryPicker::new(&countries, "US");
        assert_eq!(picker.filter(), "United States");

        picker.set_filter("united");
        let names: Vec<_> = picker.matching(&countries).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["United Kingdom", "United States"]);

        picker.set_filter("fr");
        assert_eq!(picker.matching(&countries).len(), 1);
        picker.set_filter("de");
        let codes: Vec<_> = picker.matching(&countries).iter().map(|c| c.country_code.as_str()).collect();
        assert_eq!(codes, vec!["DE"]);
    }

    #[test]
    fn keyboard_selection() {
        let countries = countries();
        let mut picker = CountryPicker::new(&countries, "US");

        // Closed: navigation keys only open the dropdown
        assert_eq!(picker.handle_key(PickerKey::Enter, &countries, "US"), None);
        assert!(picker.is_open());

        picker.set_filter("united");
        picker.handle_key(PickerKey::Up, &countries, "US");
        assert_eq!(picker.highlighted(), 0);
        picker.handle_key(PickerKey::Down, &countries, "US");
        picker.handle_key(PickerKey::Down, &countries, "US");
        assert_eq!(picker.highlighted(), 1);

        let picked = picker.handle_key(PickerKey::Enter, &countries, "US");
        assert_eq!(picked.as_deref(), Some("US"));
        assert!(picker.is_open() == false);
    }

    #[test]
    fn escape_and_blur_restore_the_text() {
        let countries = countries();
        let mut picker = CountryPicker::new(&countries, "FR");

        picker.set_filter("ger");
        picker.handle_key(PickerKey::Escape, &countries, "FR");
        assert!(picker.is_open() == false);
        assert_eq!(picker.filter(), "France");

        picker.focus();
        picker.set_filter("xyz");
        assert_eq!(picker.handle_key(PickerKey::Enter, &countries, "FR"), None);
        picker.blur(&countries, "FR");
        assert_eq!(picker.filter(), "France");

        assert_eq!(picker.pick("DE", &countries), "DE");
        assert_eq!(picker.filter(), "Germany");
    }
}

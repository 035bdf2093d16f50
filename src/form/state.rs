use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{DateField, EventDraft, FieldKey, LocalImage, TextField};

/// Mutable state behind the new-event screen.
///
/// Every operation is total: no validation happens here. The submission
/// workflow validates a snapshot of the draft when the user submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    today: NaiveDate,
    draft: EventDraft,
    banner: Option<LocalImage>,
    /// Which date pickers are open. Keys appear on first toggle; absent means closed.
    date_pickers: HashMap<FieldKey, bool>,
    submitting: bool,
}

impl FormState {
    /// Creates the state shown when the screen is first opened.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            draft: EventDraft::new(today),
            banner: None,
            date_pickers: HashMap::new(),
            submitting: false,
        }
    }

    /// Returns the current draft.
    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    /// Returns the locally picked banner image, if any.
    pub fn banner(&self) -> Option<&LocalImage> {
        self.banner.as_ref()
    }

    /// Returns `true` while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Replaces one text field, leaving the rest of the draft untouched.
    pub fn set_field(&mut self, field: TextField, value: impl Into<String>) {
        *self.draft.text_mut(field) = value.into();
    }

    /// Applies a date reported by a picker.
    ///
    /// `None` means the picker was dismissed without a selection and leaves
    /// the draft unchanged.
    pub fn set_date_field(&mut self, field: DateField, candidate: Option<NaiveDate>) {
        let Some(date) = candidate else {
            return;
        };
        match field {
            DateField::Date => self.draft.date = date,
        }
    }

    /// Opens or closes the date picker for one field.
    pub fn toggle_date_picker(&mut self, key: FieldKey, visible: bool) {
        self.date_pickers.insert(key, visible);
    }

    /// Returns `true` if the date picker for `key` is open.
    pub fn is_date_picker_open(&self, key: FieldKey) -> bool {
        self.date_pickers.get(&key).copied().unwrap_or(false)
    }

    /// Records or clears the user's locally picked banner.
    pub fn set_banner_selection(&mut self, banner: Option<LocalImage>) {
        self.banner = banner;
    }

    /// Stores the durable URL of a banner that finished uploading.
    pub fn set_uploaded_banner_url(&mut self, url: impl Into<String>) {
        self.draft.banner_url = url.into();
    }

    /// Replaces the draft with a fresh empty one and clears the banner selection.
    pub fn reset_draft(&mut self) {
        self.reset_draft_on(self.today);
    }

    /// Like [`reset_draft`](Self::reset_draft), but dates the fresh draft
    /// `today` and remembers it for later resets.
    pub fn reset_draft_on(&mut self, today: NaiveDate) {
        self.today = today;
        self.draft = EventDraft::new(today);
        self.banner = None;
    }

    pub(crate) fn begin_submit(&mut self) {
        self.submitting = true;
    }

    pub(crate) fn finish_submit(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn filled() -> FormState {
        let mut state = FormState::new(today());
        state.set_field(TextField::Name, "Meetup");
        state.set_field(TextField::Location, "Hall");
        state.set_field(TextField::Capacity, "50");
        state
    }

    mod set_field {
        use super::*;

        #[test]
        fn replaces_only_the_given_field() {
            let mut state = filled();
            state.set_field(TextField::Location, "Garden");
            assert_eq!(state.draft().location, "Garden");
            assert_eq!(state.draft().name, "Meetup");
            assert_eq!(state.draft().capacity, "50");
            assert_eq!(state.draft().date, today());
        }

        #[test]
        fn accepts_unvalidated_text() {
            let mut state = FormState::new(today());
            state.set_field(TextField::Capacity, "lots");
            assert_eq!(state.draft().capacity, "lots");
        }

        #[quickcheck]
        fn merge_leaves_other_fields_unchanged(value: String, pick: u8) -> bool {
            let fields = [TextField::Name, TextField::Location, TextField::Capacity];
            let field = fields[pick as usize % fields.len()];
            let before = filled();
            let mut after = before.clone();
            after.set_field(field, value.clone());

            let others_unchanged = fields
                .iter()
                .filter(|f| **f != field)
                .all(|f| after.draft().text(*f) == before.draft().text(*f));
            after.draft().text(field) == value
                && others_unchanged
                && after.draft().date == before.draft().date
                && after.banner() == before.banner()
        }
    }

    mod set_date_field {
        use super::*;

        #[test]
        fn applies_selected_date() {
            let mut state = filled();
            let picked = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
            state.set_date_field(DateField::Date, Some(picked));
            assert_eq!(state.draft().date, picked);
            assert_eq!(state.draft().name, "Meetup");
        }

        #[test]
        fn dismissed_picker_leaves_date_unchanged() {
            let mut state = filled();
            let before = state.clone();
            state.set_date_field(DateField::Date, None);
            assert_eq!(state, before);
        }
    }

    mod date_pickers {
        use super::*;

        #[test]
        fn closed_until_toggled() {
            let state = FormState::new(today());
            assert!(!state.is_date_picker_open(FieldKey::Date));
        }

        #[test]
        fn toggle_opens_and_closes() {
            let mut state = FormState::new(today());
            state.toggle_date_picker(FieldKey::Date, true);
            assert!(state.is_date_picker_open(FieldKey::Date));
            state.toggle_date_picker(FieldKey::Date, false);
            assert!(!state.is_date_picker_open(FieldKey::Date));
        }

        #[test]
        fn keys_are_independent() {
            let mut state = FormState::new(today());
            state.toggle_date_picker(FieldKey::Date, true);
            assert!(!state.is_date_picker_open(FieldKey::Name));
        }
    }

    mod banner {
        use super::*;

        #[test]
        fn set_and_clear_selection() {
            let mut state = FormState::new(today());
            state.set_banner_selection(Some(LocalImage::new("/tmp/a.png")));
            assert_eq!(state.banner(), Some(&LocalImage::new("/tmp/a.png")));
            state.set_banner_selection(None);
            assert_eq!(state.banner(), None);
        }

        #[test]
        fn uploaded_url_is_stored_on_draft() {
            let mut state = filled();
            state.set_uploaded_banner_url("https://x/banner1");
            assert_eq!(state.draft().banner_url, "https://x/banner1");
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn yields_initial_draft_and_clears_banner() {
            let mut state = filled();
            state.set_banner_selection(Some(LocalImage::new("/tmp/a.png")));
            state.set_uploaded_banner_url("https://x/b");
            state.set_date_field(DateField::Date, NaiveDate::from_ymd_opt(2030, 1, 1));
            state.reset_draft();
            assert_eq!(state.draft(), FormState::new(today()).draft());
            assert_eq!(state.banner(), None);
        }

        #[test]
        fn keeps_date_picker_flags() {
            let mut state = filled();
            state.toggle_date_picker(FieldKey::Date, true);
            state.reset_draft();
            assert!(state.is_date_picker_open(FieldKey::Date));
        }

        #[test]
        fn reset_on_a_later_day_uses_that_day() {
            let tomorrow = today().succ_opt().unwrap();
            let mut state = filled();
            state.reset_draft_on(tomorrow);
            assert_eq!(state.draft(), &EventDraft::new(tomorrow));

            state.set_field(TextField::Name, "Again");
            state.reset_draft();
            assert_eq!(state.draft().date, tomorrow);
        }
    }

    mod submitting {
        use super::*;

        #[test]
        fn flag_follows_begin_and_finish() {
            let mut state = FormState::new(today());
            assert!(!state.is_submitting());
            state.begin_submit();
            assert!(state.is_submitting());
            state.finish_submit();
            assert!(!state.is_submitting());
        }
    }
}

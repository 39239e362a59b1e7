// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::filter::Record;

/// At most one highlighted record per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<Id> {
    selected: Option<Id>,
}

impl<Id> Default for Selection<Id> {
    fn default() -> Self {
        Self { selected: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionView<'a, R> {
    Empty,
    Selected(&'a R),
}

impl<'a, R> SelectionView<'a, R> {
    pub fn record(&self) -> Option<&'a R> {
        match self {
            Self::Empty => None,
            Self::Selected(record) => Some(record),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl<Id: Copy + Eq> Selection<Id> {
    pub fn select(&mut self, id: Id) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<Id> {
        self.selected
    }

    pub fn is_selected(&self, id: Id) -> bool {
        self.selected == Some(id)
    }

    /// Looks the id up among the rows currently on screen. An id that was
    /// filtered out or no longer exists resolves to the empty-state view.
    pub fn resolve<'a, R>(&self, visible: &[&'a R]) -> SelectionView<'a, R>
    where
        R: Record<Id = Id>,
    {
        let Some(id) = self.selected else {
            return SelectionView::Empty;
        };
        visible
            .iter()
            .copied()
            .find(|record| record.id() == id)
            .map_or(SelectionView::Empty, SelectionView::Selected)
    }
}

#[cfg(test)]
mod tests {
    use super::{Selection, SelectionView};
    use crate::filter::filter_records;
    use crate::test_fixtures::sample_patients;
    use crate::{Patient, PatientId};

    #[test]
    fn nothing_selected_resolves_empty() {
        let patients = sample_patients();
        let visible = filter_records(&patients, "");
        let selection = Selection::<PatientId>::default();
        assert!(selection.resolve(&visible).is_empty());
    }

    #[test]
    fn selected_visible_row_resolves_to_record() {
        let patients = sample_patients();
        let visible = filter_records(&patients, "");
        let mut selection = Selection::default();
        selection.select(PatientId::new(3));
        let view = selection.resolve(&visible);
        assert_eq!(view.record().map(|p| p.name.as_str()), Some("Robert Wilson"));
    }

    #[test]
    fn filtering_out_the_selection_yields_empty_state() {
        let patients = sample_patients();
        let mut selection = Selection::default();
        selection.select(PatientId::new(3));

        let visible = filter_records(&patients, "john");
        assert_eq!(selection.resolve(&visible), SelectionView::Empty);

        // The id stays remembered; clearing the query brings the detail back.
        let visible = filter_records(&patients, "");
        assert!(!selection.resolve(&visible).is_empty());
    }

    #[test]
    fn unknown_id_resolves_empty() {
        let patients = sample_patients();
        let visible = filter_records(&patients, "");
        let mut selection = Selection::default();
        selection.select(PatientId::new(99));
        assert!(selection.resolve(&visible).is_empty());
    }

    #[test]
    fn selecting_another_id_replaces_previous() {
        let mut selection = Selection::default();
        selection.select(PatientId::new(1));
        selection.select(PatientId::new(2));
        assert!(selection.is_selected(PatientId::new(2)));
        assert!(!selection.is_selected(PatientId::new(1)));

        let empty: Vec<&Patient> = Vec::new();
        assert!(selection.resolve(&empty).is_empty());
    }
}

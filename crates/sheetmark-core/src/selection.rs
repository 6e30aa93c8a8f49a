//! Per-question, per-group selection state.
//!
//! Each (group, question) pair holds a single `Option<usize>`, so at most one
//! option can ever be selected there. Selecting a new option replaces the
//! old one.

use std::collections::BTreeMap;

use crate::scoring::Answers;
use crate::sheet::{Group, Sheet};

/// Current selections for every group of a sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    option_count: usize,
    groups: BTreeMap<Group, Vec<Option<usize>>>,
}

impl Selections {
    /// Empty selections shaped for `sheet`.
    pub fn for_sheet(sheet: &Sheet) -> Self {
        let groups = sheet
            .mode()
            .groups()
            .iter()
            .map(|&g| (g, vec![None; sheet.question_count()]))
            .collect();
        Self {
            option_count: sheet.option_count(),
            groups,
        }
    }

    /// Select option `index` for question `ordinal` in `group`.
    ///
    /// Returns `false` and changes nothing when the group, question or
    /// option does not exist.
    pub fn select(&mut self, group: Group, ordinal: usize, index: usize) -> bool {
        if index >= self.option_count {
            return false;
        }
        match self.slot_mut(group, ordinal) {
            Some(slot) => {
                *slot = Some(index);
                true
            }
            None => false,
        }
    }

    /// Deselect whatever is selected for `ordinal` in `group`.
    pub fn clear(&mut self, group: Group, ordinal: usize) -> bool {
        match self.slot_mut(group, ordinal) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Selected option index for `ordinal` in `group`.
    pub fn selected(&self, group: Group, ordinal: usize) -> Option<usize> {
        let i = ordinal.checked_sub(1)?;
        self.groups.get(&group)?.get(i).copied().flatten()
    }

    /// Selected labels of `group` keyed by ordinal, or `None` if the group
    /// is not part of the sheet.
    pub fn answers(&self, group: Group, sheet: &Sheet) -> Option<Answers> {
        let slots = self.groups.get(&group)?;
        Some(
            slots
                .iter()
                .enumerate()
                .filter_map(|(i, slot)| {
                    let ordinal = i + 1;
                    let label = sheet.label(group, ordinal, (*slot)?)?;
                    Some((ordinal, label.to_string()))
                })
                .collect(),
        )
    }

    fn slot_mut(&mut self, group: Group, ordinal: usize) -> Option<&mut Option<usize>> {
        let i = ordinal.checked_sub(1)?;
        self.groups.get_mut(&group)?.get_mut(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use crate::label::LabelScheme;
    use crate::sheet::{Mode, SheetConfig};

    fn sheet(mode: Mode) -> Sheet {
        build(SheetConfig::new(3, 4, LabelScheme::Alphabetic, mode).unwrap()).unwrap()
    }

    #[test]
    fn selecting_replaces_previous_choice() {
        let sheet = sheet(Mode::Keyed);
        let mut sel = Selections::for_sheet(&sheet);

        assert!(sel.select(Group::User, 1, 0));
        assert!(sel.select(Group::User, 1, 2));
        assert_eq!(sel.selected(Group::User, 1), Some(2));

        // The key group is independent
        assert_eq!(sel.selected(Group::Key, 1), None);
        assert!(sel.select(Group::Key, 1, 3));
        assert_eq!(sel.selected(Group::User, 1), Some(2));
        assert_eq!(sel.selected(Group::Key, 1), Some(3));
    }

    #[test]
    fn out_of_range_events_are_rejected() {
        let sheet = sheet(Mode::Keyed);
        let mut sel = Selections::for_sheet(&sheet);

        assert!(!sel.select(Group::User, 0, 0));
        assert!(!sel.select(Group::User, 4, 0));
        assert!(!sel.select(Group::User, 1, 4));
        assert!(!sel.clear(Group::Key, 9));
        assert_eq!(sel, Selections::for_sheet(&sheet));
    }

    #[test]
    fn plain_mode_has_no_key_group() {
        let sheet = sheet(Mode::Plain);
        let mut sel = Selections::for_sheet(&sheet);
        assert!(!sel.select(Group::Key, 1, 0));
        assert!(sel.answers(Group::Key, &sheet).is_none());
    }

    #[test]
    fn clear_and_answers() {
        let sheet = sheet(Mode::Keyed);
        let mut sel = Selections::for_sheet(&sheet);
        sel.select(Group::User, 1, 1);
        sel.select(Group::User, 3, 0);
        sel.clear(Group::User, 1);

        let answers = sel.answers(Group::User, &sheet).unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get(&3).map(String::as_str), Some("A"));
    }
}

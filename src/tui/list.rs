/// Cursor over a list of `len` entries.
///
/// Knows nothing about what the entries are; panes that show a list own
/// one of these and delegate navigation to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectableList {
    selected: usize,
    len: usize,
}

const PAGE: usize = 10;

impl SelectableList {
    /// Point the cursor at the first of `len` new entries
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.selected = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn selected(&self) -> Option<usize> {
        (self.len > 0).then_some(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.len > 0 {
            self.selected = (self.selected + 1).min(self.len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_page_down(&mut self) {
        if self.len > 0 {
            self.selected = (self.selected + PAGE).min(self.len - 1);
        }
    }

    pub fn select_page_up(&mut self) {
        self.selected = self.selected.saturating_sub(PAGE);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_has_no_selection() {
        let mut list = SelectableList::default();
        list.select_next();
        list.select_last();
        list.select_page_down();
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut list = SelectableList::default();
        list.reset(25);

        list.select_prev();
        assert_eq!(list.selected(), Some(0));

        list.select_page_down();
        list.select_page_down();
        list.select_page_down();
        assert_eq!(list.selected(), Some(24));

        list.select_next();
        assert_eq!(list.selected(), Some(24));

        list.select_page_up();
        assert_eq!(list.selected(), Some(14));

        list.select_first();
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn test_reset_moves_to_top() {
        let mut list = SelectableList::default();
        list.reset(5);
        list.select_last();
        assert_eq!(list.selected(), Some(4));

        list.reset(2);
        assert_eq!(list.selected(), Some(0));
        assert_eq!(list.len(), 2);
    }
}

use crate::Listing;

/// What a list view has been told to draw.
///
/// Nothing is drawable until the first [`ListState::show`], so markup the
/// page rendered server-side stays in place until a load lands. After
/// [`ListState::close`] nothing is drawable again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    listing: Option<Listing>,
    dismissing: Option<i64>,
    closed: bool,
}

impl ListState {
    /// Replaces the listing and forgets any pending dismissal. Ignored once closed.
    pub fn show(&mut self, listing: Listing) -> bool {
        if self.closed {
            return false;
        }
        self.listing = Some(listing);
        self.dismissing = None;
        true
    }

    /// Marks the row for `id` as leaving. Returns false when there is no such row.
    pub fn begin_dismiss(&mut self, id: i64) -> bool {
        if self.closed || !self.listing.as_ref().is_some_and(|l| l.contains(id)) {
            return false;
        }
        self.dismissing = Some(id);
        true
    }

    /// Drops the row for `id`.
    pub fn finish_dismiss(&mut self, id: i64) -> bool {
        if self.dismissing == Some(id) {
            self.dismissing = None;
        }
        if self.closed {
            return false;
        }
        match self.listing.take() {
            Some(listing) => {
                self.listing = Some(listing.without(id));
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.closed = true;
        self.listing = None;
        self.dismissing = None;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The listing and the row being dismissed, if there is anything to draw.
    pub fn drawable(&self) -> Option<(&Listing, Option<i64>)> {
        if self.closed {
            return None;
        }
        self.listing.as_ref().map(|listing| (listing, self.dismissing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RowModel;

    fn rows(ids: &[i64]) -> Listing {
        Listing::Rows(
            ids.iter()
                .map(|&id| RowModel {
                    id,
                    icon: "ℹ️",
                    title: format!("n{id}"),
                    message: String::new(),
                    time: String::new(),
                    unread: true,
                })
                .collect(),
        )
    }

    #[test]
    fn nothing_is_drawn_before_first_show() {
        let mut state = ListState::default();
        assert_eq!(state.drawable(), None);
        assert!(!state.begin_dismiss(1));
        assert!(!state.finish_dismiss(1));
        assert_eq!(state.drawable(), None);

        assert!(state.show(Listing::Empty));
        assert_eq!(state.drawable(), Some((&Listing::Empty, None)));
    }

    #[test]
    fn dismiss_marks_then_removes_row() {
        let mut state = ListState::default();
        state.show(rows(&[3, 2, 1]));

        assert!(state.begin_dismiss(2));
        assert_eq!(state.drawable(), Some((&rows(&[3, 2, 1]), Some(2))));

        assert!(state.finish_dismiss(2));
        assert_eq!(state.drawable(), Some((&rows(&[3, 1]), None)));
    }

    #[test]
    fn fresh_listing_clears_pending_dismissal() {
        let mut state = ListState::default();
        state.show(rows(&[3, 2]));
        state.begin_dismiss(3);
        state.show(rows(&[2]));
        assert_eq!(state.drawable(), Some((&rows(&[2]), None)));
    }

    #[test]
    fn dismissing_unknown_row_changes_nothing() {
        let mut state = ListState::default();
        state.show(rows(&[3]));
        assert!(!state.begin_dismiss(9));
        assert_eq!(state.drawable(), Some((&rows(&[3]), None)));
    }

    #[test]
    fn closed_state_ignores_everything() {
        let mut state = ListState::default();
        state.show(rows(&[5]));
        state.begin_dismiss(5);
        state.close();

        assert!(state.is_closed());
        assert!(!state.show(rows(&[6])));
        assert!(!state.begin_dismiss(6));
        assert!(!state.finish_dismiss(5));
        assert_eq!(state.drawable(), None);
    }
}

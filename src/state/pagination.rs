use crate::state::RequestToken;

/// Number of posts requested per page
pub const PAGE_SIZE: u32 = 10;

/// Page cursor for the profile's post list
///
/// Tracks the last page applied, whether more pages may exist and the single
/// request allowed in flight. The posts themselves live in the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Last page successfully applied (0 before the first page)
    page: u32,
    has_more: bool,
    in_flight: Option<(RequestToken, u32)>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    pub fn new() -> Self {
        Self {
            page: 0,
            has_more: true,
            in_flight: None,
        }
    }

    /// Back to page 1 with more pages assumed
    ///
    /// Returns the token of a request that was in flight, which the caller
    /// should cancel.
    pub fn reset(&mut self) -> Option<RequestToken> {
        let cancelled = self.in_flight.map(|(token, _)| token);
        *self = Self::new();
        cancelled
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn next_page(&self) -> u32 {
        self.page + 1
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight.map(|(token, _)| token)
    }

    /// Returns true if a new page request may start
    pub fn can_load(&self) -> bool {
        self.has_more && self.in_flight.is_none()
    }

    /// Marks the next page as requested under `token`
    ///
    /// Returns the page number, or None if a request is already in flight or
    /// the list is exhausted.
    pub fn begin(&mut self, token: RequestToken) -> Option<u32> {
        if !self.can_load() {
            return None;
        }
        let page = self.next_page();
        self.in_flight = Some((token, page));
        Some(page)
    }

    /// Returns true if `token` is the request currently in flight
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.in_flight.is_some_and(|(current, _)| current == token)
    }

    /// Applies a completed page of `returned` items
    ///
    /// A page shorter than [`PAGE_SIZE`] ends the list. Returns false for a
    /// token that is not in flight.
    pub fn complete(&mut self, token: RequestToken, returned: usize) -> bool {
        match self.in_flight {
            Some((current, page)) if current == token => {
                self.page = page;
                self.in_flight = None;
                if returned < PAGE_SIZE as usize {
                    self.has_more = false;
                }
                true
            }
            _ => false,
        }
    }

    /// Clears a failed request, leaving the cursor and `has_more` alone
    pub fn fail(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }
}

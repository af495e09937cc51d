//! The page's three components.
//!
//! - [`SessionComponent`] - sign-up / sign-in
//! - [`ImportComponent`] - spreadsheet import
//! - [`ListingComponent`] - contact listing and deletion

mod import;
mod listing;
mod session;

pub use import::*;
pub use listing::*;
pub use session::*;

use std::sync::atomic::{AtomicUsize, Ordering};

/// "Request in flight" marker, used to disable controls.
///
/// Counts rather than toggles: overlapping calls are allowed and the flag
/// only clears when the last one finishes.
#[derive(Debug, Default)]
pub struct BusyFlag(AtomicUsize);

impl BusyFlag {
    pub fn enter(&self) -> BusyGuard<'_> {
        self.0.fetch_add(1, Ordering::SeqCst);
        BusyGuard(self)
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst) > 0
    }
}

/// Clears its share of the flag on drop.
pub struct BusyGuard<'a>(&'a BusyFlag);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0 .0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_flag_counts_overlapping_calls() {
        let flag = BusyFlag::default();
        assert!(!flag.is_busy());

        let first = flag.enter();
        let second = flag.enter();
        drop(first);
        assert!(flag.is_busy());
        drop(second);
        assert!(!flag.is_busy());
    }
}

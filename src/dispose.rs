/// Register-many, release-as-one resource group.
///
/// Sub-resources register a release action; the owner releases the whole set
/// with one call. `clear` runs every pending action in registration order and
/// leaves the store reusable, which is the per-render lifecycle: cleared at
/// the start of every bind, released for good at template teardown.
///
/// Once `dispose` has run, further registrations are released immediately
/// instead of being queued, so a callback firing after teardown cannot park a
/// resource in a store nobody will drain again.
#[derive(Default)]
pub struct DisposableStore {
    pending: Vec<Box<dyn FnOnce()>>,
    disposed: bool,
}

impl DisposableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a release action to run on the next `clear` or `dispose`.
    pub fn defer(&mut self, release: impl FnOnce() + 'static) {
        if self.disposed {
            release();
        } else {
            self.pending.push(Box::new(release));
        }
    }

    /// Runs every pending release action in registration order.
    ///
    /// The store stays usable afterwards. Every action runs exactly once; the
    /// drain continues through the full set regardless of what the individual
    /// actions do (release actions are infallible by construction).
    pub fn clear(&mut self) {
        for release in self.pending.drain(..) {
            release();
        }
    }

    /// Clears the store and marks it released for good.
    pub fn dispose(&mut self) {
        self.clear();
        self.disposed = true;
    }

    /// Returns `true` once `dispose` has run.
    #[inline]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Returns the number of pending release actions.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no release actions are pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Drop for DisposableStore {
    fn drop(&mut self) {
        // Teardown guarantee for stores that were never explicitly disposed.
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn counting(log: &Rc<RefCell<Vec<u8>>>, tag: u8) -> impl FnOnce() + 'static {
        let log = Rc::clone(log);
        move || log.borrow_mut().push(tag)
    }

    #[test]
    fn clear_runs_in_registration_order_and_stays_usable() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = DisposableStore::new();
        store.defer(counting(&log, 1));
        store.defer(counting(&log, 2));

        store.clear();
        assert_eq!(*log.borrow(), vec![1, 2]);
        assert!(!store.is_disposed());

        store.defer(counting(&log, 3));
        store.clear();
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn dispose_releases_exactly_once_and_rejects_late_registration() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = DisposableStore::new();
        store.defer(counting(&log, 1));

        store.dispose();
        store.dispose();
        assert_eq!(*log.borrow(), vec![1]);

        // Late registration runs immediately instead of leaking.
        store.defer(counting(&log, 2));
        assert_eq!(*log.borrow(), vec![1, 2]);
        assert!(store.is_empty());
    }

    #[test]
    fn drop_releases_pending_actions() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut store = DisposableStore::new();
            store.defer(counting(&log, 7));
        }
        assert_eq!(*log.borrow(), vec![7]);
    }
}

//! The [`Storefront`] facade: every store opened over one shared backend.
//!
//! `Storefront` wires the identity, catalog, review, and complaint stores to
//! a single [`Backend`] and a single [`Clock`]/[`Notifier`] pair, the same
//! way the storefront application wires all of its state over one browser
//! storage area. Opening is also the recovery path: each store restores its
//! snapshot (or seeds its fixtures) and the identity store validates the
//! remembered session before `open` returns.

use crate::Result;
use crate::backend::Backend;
use crate::catalog::CatalogStore;
use crate::clock::{Clock, SystemClock};
use crate::complaints::ComplaintStore;
use crate::identity::IdentityStore;
use crate::notify::{LogNotifier, Notifier};
use crate::reviews::ReviewStore;
use std::sync::Arc;

/// All storefront stores over one shared backend.
pub struct Storefront {
    identity: IdentityStore,
    catalog: CatalogStore,
    reviews: ReviewStore,
    complaints: ComplaintStore,
}

impl Storefront {
    /// Open an existing storefront or create a new one (recommended).
    ///
    /// Restores every store from the backend, seeding the bootstrap users,
    /// catalog, and reviews on first run. Messages go to the logging
    /// notifier and timestamps come from the system clock; use
    /// [`Storefront::open_with`] to inject either.
    ///
    /// # Arguments
    /// * `backend` - The storage backend to use
    ///
    /// # Returns
    /// A Result containing the opened Storefront
    ///
    /// # Example
    /// ```
    /// # use stockroom::{backend::InMemory, Storefront};
    /// # fn main() -> stockroom::Result<()> {
    /// let mut store = Storefront::open(Box::new(InMemory::new()))?;
    ///
    /// assert!(store.identity_mut().login("john@example.com", "password123", false)?);
    /// let user = store.identity().current_user().unwrap();
    /// assert_eq!(user.name, "John Doe");
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(backend: Box<dyn Backend>) -> Result<Self> {
        Self::open_impl(backend, Arc::new(SystemClock), Arc::new(LogNotifier))
    }

    /// Open a storefront with a custom clock and notifier.
    ///
    /// The same as [`Storefront::open`] with both collaborators injected:
    /// the clock feeds generated ids and dates, the notifier receives
    /// signup confirmations and password reset messages.
    ///
    /// # Arguments
    /// * `backend` - The storage backend to use
    /// * `clock` - The time provider to use
    /// * `notifier` - The message sink for signup/reset notifications
    ///
    /// # Returns
    /// A Result containing the opened Storefront
    pub fn open_with(
        backend: Box<dyn Backend>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        Self::open_impl(backend, clock, notifier)
    }

    /// Open a storefront with a custom clock and the logging notifier.
    ///
    /// This is the same as [`Storefront::open`] but allows injecting a custom
    /// clock for controllable ids and dates in tests (typically
    /// [`FixedClock`](crate::FixedClock)).
    ///
    /// Only available with the `testing` feature or in test builds.
    #[cfg(any(test, feature = "testing"))]
    pub fn open_with_clock(backend: Box<dyn Backend>, clock: Arc<dyn Clock>) -> Result<Self> {
        Self::open_impl(backend, clock, Arc::new(LogNotifier))
    }

    /// Internal implementation of open that works with any clock and notifier.
    fn open_impl(
        backend: Box<dyn Backend>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let backend: Arc<dyn Backend> = Arc::from(backend);

        let catalog = CatalogStore::open(backend.clone())?;
        let reviews = ReviewStore::open(backend.clone(), clock.clone())?;
        let complaints = ComplaintStore::open(backend.clone(), clock.clone())?;
        // Identity goes last: restoring the remembered session reads the
        // freshly loaded user database
        let identity = IdentityStore::open(backend, clock, notifier)?;

        Ok(Self {
            identity,
            catalog,
            reviews,
            complaints,
        })
    }

    /// The identity store: users, credentials, and the active session.
    pub fn identity(&self) -> &IdentityStore {
        &self.identity
    }

    /// Mutable access to the identity store.
    pub fn identity_mut(&mut self) -> &mut IdentityStore {
        &mut self.identity
    }

    /// The product catalog.
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Mutable access to the product catalog.
    pub fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    /// The product review store.
    pub fn reviews(&self) -> &ReviewStore {
        &self.reviews
    }

    /// Mutable access to the review store.
    pub fn reviews_mut(&mut self) -> &mut ReviewStore {
        &mut self.reviews
    }

    /// The complaint/contact message store.
    pub fn complaints(&self) -> &ComplaintStore {
        &self.complaints
    }

    /// Mutable access to the complaint store.
    pub fn complaints_mut(&mut self) -> &mut ComplaintStore {
        &mut self.complaints
    }
}

//! Client-side state stores.
//!
//! Each store holds one slice of state and changes it only through a pure
//! reducer `(state, action) -> Outcome`. Accepted actions synchronously
//! notify every subscriber; persistence is just the first subscriber,
//! registered by [`Store::hydrate`].
//!
//! ```text
//! dispatch(action)
//!   └─ S::reduce(&state, action)
//!        ├─ Unchanged  -> nothing happens
//!        ├─ Changed(s) -> state = s,       notify Updated(&state)
//!        └─ Cleared    -> state = default, notify Cleared(&state)
//!                                             ├─ persistence: save / remove key
//!                                             └─ views: re-read state
//! ```

pub mod cart;
pub mod settings;
pub mod wishlist;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::Persistence;

pub use cart::{CartAction, CartSlice, CartState};
pub use settings::{SettingsAction, SettingsSlice};
pub use wishlist::{WishlistAction, WishlistSlice, WishlistState};

/// Result of reducing one action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<S> {
    /// The action was rejected or had nothing to do.
    Unchanged,
    /// The action produced a new state.
    Changed(S),
    /// The action emptied the slice; persisted data should be dropped.
    Cleared,
}

/// Notification delivered to subscribers after an accepted action.
#[derive(Debug)]
pub enum Change<'a, S> {
    Updated(&'a S),
    Cleared(&'a S),
}

impl<S> Clone for Change<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Change<'_, S> {}

impl<'a, S> Change<'a, S> {
    /// The state after the change.
    #[must_use]
    pub const fn state(&self) -> &'a S {
        match self {
            Self::Updated(state) | Self::Cleared(state) => state,
        }
    }
}

/// A slice of client state: its shape, actions, reducer and storage key.
pub trait Slice: 'static {
    type State: Default + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Action: fmt::Debug;

    /// Name used in logs.
    const NAME: &'static str;
    /// Key the slice is persisted under.
    const STORAGE_KEY: &'static str;

    /// Compute the outcome of `action` applied to `state`.
    fn reduce(state: &Self::State, action: Self::Action) -> Outcome<Self::State>;
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<S> = Box<dyn Fn(Change<'_, S>) + Send + Sync>;

/// State container for one [`Slice`].
pub struct Store<S: Slice> {
    state: S::State,
    subscribers: Vec<(SubscriptionId, Subscriber<S::State>)>,
    next_subscription: u64,
}

impl<S: Slice> fmt::Debug for Store<S>
where
    S::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("slice", &S::NAME)
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<S: Slice> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::State::default())
    }
}

impl<S: Slice> Store<S> {
    /// Create a store with no subscribers.
    #[must_use]
    pub fn new(state: S::State) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Load the slice from `persistence` and subscribe it to every change.
    #[must_use]
    pub fn hydrate(persistence: &Persistence) -> Self {
        let mut store = Self::new(persistence.load(S::STORAGE_KEY));
        let persistence = persistence.clone();
        store.subscribe(move |change| match change {
            Change::Updated(state) => persistence.save(S::STORAGE_KEY, state),
            Change::Cleared(_) => persistence.remove(S::STORAGE_KEY),
        });
        tracing::debug!(slice = S::NAME, "Store hydrated");
        store
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &S::State {
        &self.state
    }

    /// Apply `action`. Returns `true` when the state changed and subscribers
    /// were notified.
    pub fn dispatch(&mut self, action: S::Action) -> bool {
        tracing::debug!(slice = S::NAME, ?action, "Dispatching action");
        match S::reduce(&self.state, action) {
            Outcome::Unchanged => false,
            Outcome::Changed(next) => {
                self.state = next;
                self.notify(Change::Updated(&self.state));
                true
            }
            Outcome::Cleared => {
                self.state = S::State::default();
                self.notify(Change::Cleared(&self.state));
                true
            }
        }
    }

    /// Register `subscriber` to run after every accepted action, in
    /// registration order.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: Fn(Change<'_, S::State>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&self, change: Change<'_, S::State>) {
        for (_, subscriber) in &self.subscribers {
            subscriber(change);
        }
    }
}

/// The process-wide stores, hydrated together at startup.
#[derive(Debug)]
pub struct Stores {
    pub cart: Store<CartSlice>,
    pub wishlist: Store<WishlistSlice>,
    pub settings: Store<SettingsSlice>,
}

impl Stores {
    /// Load every slice from `persistence`.
    #[must_use]
    pub fn hydrate(persistence: &Persistence) -> Self {
        let stores = Self {
            cart: Store::hydrate(persistence),
            wishlist: Store::hydrate(persistence),
            settings: Store::hydrate(persistence),
        };
        tracing::info!(
            cart_items = stores.cart.state().item_count(),
            wishlist_items = stores.wishlist.state().count(),
            "Stores hydrated"
        );
        stores
    }
}

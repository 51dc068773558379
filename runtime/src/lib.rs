//! # Guest List Runtime
//!
//! Runtime that coordinates reducer execution and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, runs the reducer and executes effects
//! - **Feedback loop**: Actions produced by effects are reduced in the same
//!   `send`, so a caller that awaits `send` observes a settled state
//! - **Observers**: A watch channel carrying state after every reduction and a
//!   broadcast channel carrying actions produced by effects
//!
//! ## Example
//!
//! ```ignore
//! use guest_list_runtime::Store;
//!
//! let store = Store::new(GuestListState::default(), GuestListReducer::new(), env);
//!
//! store.send(GuestListAction::LoadGuests).await?;
//!
//! let total = store.state(GuestListState::total_tickets).await;
//! ```

use guest_list_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Retry logic with exponential backoff
pub mod retry;

pub use retry::{RetryPolicy, retry_with_backoff};
pub use store::Store;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store has been shut down and no longer accepts actions
        #[error("Store is shut down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

/// The Store and its effect executor
pub mod store {
    use super::{Arc, AtomicBool, Effect, Ordering, Reducer, RwLock, StoreError};
    use futures::future::BoxFuture;
    use guest_list_core::SmallVec;
    use std::collections::VecDeque;
    use tokio::sync::{broadcast, watch};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`, written only by the reducer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Cloning a Store is cheap and yields a handle to the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        shutdown: Arc<AtomicBool>,
        /// Actions produced by effects, for observers.
        action_broadcast: broadcast::Sender<A>,
        /// State after every reduction, for observers that re-render.
        state_watch: Arc<watch::Sender<S>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + Clone + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The action broadcast channel holds 16 actions; slow subscribers lag.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            let (action_broadcast, _) = broadcast::channel(16);
            let (state_watch, _) = watch::channel(initial_state.clone());

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                shutdown: Arc::new(AtomicBool::new(false)),
                action_broadcast,
                state_watch: Arc::new(state_watch),
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, executes the returned effects and reduces every
        /// action they produce, until nothing is left to do. Persistence and
        /// notification effects have therefore completed when this returns.
        ///
        /// Returns every action this call reduced, starting with `action`
        /// itself, in reduction order. Actions sent concurrently by other
        /// callers are not included, so the chain tells a caller how its own
        /// action turned out.
        ///
        /// Actions fed back after [`Store::shutdown`] are dropped.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shut down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<Vec<A>, StoreError> {
            if self.is_shut_down() {
                return Err(StoreError::ShutdownInProgress);
            }

            let mut reduced = Vec::new();
            let mut pending = VecDeque::from([action]);
            while let Some(action) = pending.pop_front() {
                if self.is_shut_down() {
                    tracing::debug!(
                        dropped = pending.len() + 1,
                        "Store shut down mid-flight, dropping fed-back actions"
                    );
                    break;
                }

                reduced.push(action.clone());
                let effects = self.reduce(action).await;
                for effect in effects {
                    pending.extend(self.execute_effect(effect).await);
                }
            }

            Ok(reduced)
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let full = store.state(GuestListState::is_event_full).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to state snapshots
        ///
        /// The receiver is marked changed after every reduction.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<S> {
            self.state_watch.subscribe()
        }

        /// Subscribe to actions produced by effects
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Stop accepting actions
        ///
        /// Effects already running finish, but the actions they produce are
        /// not reduced, so state is never touched after shutdown.
        pub fn shutdown(&self) {
            if !self.shutdown.swap(true, Ordering::SeqCst) {
                tracing::info!("Store shut down");
            }
        }

        /// Whether [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shut_down(&self) -> bool {
            self.shutdown.load(Ordering::SeqCst)
        }

        async fn reduce(&self, action: A) -> SmallVec<[Effect<A>; 4]> {
            let mut state = self.state.write().await;
            let effects = self.reducer.reduce(&mut state, action, &self.environment);
            metrics::counter!("store.actions.reduced").increment(1);
            self.state_watch.send_replace(state.clone());
            effects
        }

        /// Execute an effect and collect the actions it produces
        ///
        /// - `None`: No-op
        /// - `Future`: Awaits the computation; a `Some` result is broadcast and returned
        /// - `Parallel`: Awaits all effects concurrently
        /// - `Sequential`: Awaits effects in order
        fn execute_effect(&self, effect: Effect<A>) -> BoxFuture<'_, Vec<A>> {
            Box::pin(async move {
                match effect {
                    Effect::None => {
                        tracing::trace!("Executing Effect::None (no-op)");
                        metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                        Vec::new()
                    },
                    Effect::Future(fut) => {
                        tracing::trace!("Executing Effect::Future");
                        metrics::counter!("store.effects.executed", "type" => "future")
                            .increment(1);
                        match fut.await {
                            Some(action) => {
                                // No subscribers is fine
                                let _ = self.action_broadcast.send(action.clone());
                                vec![action]
                            },
                            None => Vec::new(),
                        }
                    },
                    Effect::Parallel(effects) => {
                        tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                        metrics::counter!("store.effects.executed", "type" => "parallel")
                            .increment(1);
                        futures::future::join_all(
                            effects.into_iter().map(|effect| self.execute_effect(effect)),
                        )
                        .await
                        .into_iter()
                        .flatten()
                        .collect()
                    },
                    Effect::Sequential(effects) => {
                        tracing::trace!(
                            "Executing Effect::Sequential with {} effects",
                            effects.len()
                        );
                        metrics::counter!("store.effects.executed", "type" => "sequential")
                            .increment(1);
                        let mut actions = Vec::new();
                        for effect in effects {
                            actions.extend(self.execute_effect(effect).await);
                        }
                        actions
                    },
                }
            })
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                shutdown: Arc::clone(&self.shutdown),
                action_broadcast: self.action_broadcast.clone(),
                state_watch: Arc::clone(&self.state_watch),
            }
        }
    }
}

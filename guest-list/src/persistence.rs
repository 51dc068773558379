//! Ordered access to the guest repository.
//!
//! Every load, save and reset goes through one worker task, fed by an
//! unbounded channel. Jobs are enqueued synchronously, from inside the
//! reducer, so storage sees operations in the order the state changed:
//! the last save issued is the last save applied.
//!
//! Each job is retried with exponential backoff before its failure is
//! reported as [`GuestListError::PersistenceFailure`].

use crate::error::{GuestListError, PersistenceOperation};
use crate::providers::GuestRepository;
use crate::types::Guest;
use futures::future::BoxFuture;
use guest_list_runtime::retry::{RetryPolicy, retry_with_backoff};
use tokio::sync::{mpsc, oneshot};

type Reply<T> = oneshot::Sender<Result<T, GuestListError>>;

enum Job {
    Load { reply: Reply<Vec<Guest>> },
    Save { guests: Vec<Guest>, reply: Reply<()> },
    Reset { reply: Reply<()> },
}

impl Job {
    const fn operation(&self) -> PersistenceOperation {
        match self {
            Self::Load { .. } => PersistenceOperation::Load,
            Self::Save { .. } => PersistenceOperation::Save,
            Self::Reset { .. } => PersistenceOperation::Reset,
        }
    }
}

/// Handle to the persistence worker
///
/// Cheap to clone. The worker stops once every handle is dropped and the
/// queued jobs are done.
#[derive(Clone)]
pub struct PersistenceQueue {
    jobs: mpsc::UnboundedSender<Job>,
}

impl std::fmt::Debug for PersistenceQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceQueue")
            .field("closed", &self.jobs.is_closed())
            .finish()
    }
}

impl PersistenceQueue {
    /// Spawn the worker for `repository` on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn<R>(repository: R, retry_policy: RetryPolicy) -> Self
    where
        R: GuestRepository + 'static,
    {
        let (jobs, receiver) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(repository, retry_policy, receiver));
        Self { jobs }
    }

    /// Queue a load.
    pub fn load(&self) -> BoxFuture<'static, Result<Vec<Guest>, GuestListError>> {
        let (reply, response) = oneshot::channel();
        self.enqueue(Job::Load { reply }, response)
    }

    /// Queue a save of `guests`.
    ///
    /// The snapshot is taken now; later changes to the list do not affect it.
    pub fn save(&self, guests: Vec<Guest>) -> BoxFuture<'static, Result<(), GuestListError>> {
        let (reply, response) = oneshot::channel();
        self.enqueue(Job::Save { guests, reply }, response)
    }

    /// Queue a reset.
    pub fn reset(&self) -> BoxFuture<'static, Result<(), GuestListError>> {
        let (reply, response) = oneshot::channel();
        self.enqueue(Job::Reset { reply }, response)
    }

    fn enqueue<T: Send + 'static>(
        &self,
        job: Job,
        response: oneshot::Receiver<Result<T, GuestListError>>,
    ) -> BoxFuture<'static, Result<T, GuestListError>> {
        let operation = job.operation();
        let sent = self.jobs.send(job).is_ok();

        Box::pin(async move {
            if !sent {
                return Err(GuestListError::persistence(operation, "persistence worker stopped"));
            }
            response.await.unwrap_or_else(|_| {
                Err(GuestListError::persistence(operation, "persistence worker dropped the request"))
            })
        })
    }
}

async fn run_worker<R: GuestRepository>(
    repository: R,
    retry_policy: RetryPolicy,
    mut jobs: mpsc::UnboundedReceiver<Job>,
) {
    tracing::debug!("Persistence worker started");

    while let Some(job) = jobs.recv().await {
        let operation = job.operation();
        let name = operation.as_str();

        let succeeded = match job {
            Job::Load { reply } => {
                let result = retry_with_backoff(&retry_policy, name, || repository.load())
                    .await
                    .map_err(|e| GuestListError::persistence(operation, e));
                let ok = result.is_ok();
                let _ = reply.send(result);
                ok
            },
            Job::Save { guests, reply } => {
                let result = retry_with_backoff(&retry_policy, name, || repository.save(&guests))
                    .await
                    .map_err(|e| GuestListError::persistence(operation, e));
                let ok = result.is_ok();
                let _ = reply.send(result);
                ok
            },
            Job::Reset { reply } => {
                let result = retry_with_backoff(&retry_policy, name, || repository.reset())
                    .await
                    .map_err(|e| GuestListError::persistence(operation, e));
                let ok = result.is_ok();
                let _ = reply.send(result);
                ok
            },
        };

        let outcome = if succeeded { "ok" } else { "failed" };
        metrics::counter!(
            "guest_list.persistence.jobs",
            "operation" => name,
            "outcome" => outcome
        )
        .increment(1);
        tracing::debug!(operation = name, outcome, "Persistence job finished");
    }

    tracing::debug!("Persistence worker stopped");
}

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::time::{Duration, timeout};
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Timeout duration for graceful shutdown.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Identifies one opening of a modal. Results tagged with an older id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

/// Lifetime of a single modal session.
///
/// Backend tasks issued by the session carry a clone of its scope; cancelling
/// the scope aborts those tasks.
#[derive(Debug, Clone)]
pub struct SessionScope {
    id: SessionId,
    token: CancellationToken,
}

impl SessionScope {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the session is cancelled, or the task manager shuts down.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

#[derive(Debug, Clone)]
pub struct TaskManager {
    pub cancellation_token: CancellationToken, // Cancellation token for graceful shutdown
    tasks: Arc<tokio::sync::Mutex<tokio::task::JoinSet<()>>>, // Subtasks for graceful shutdown
    next_session: Arc<AtomicU64>,
}

/// TaskManager tracks spawned subtasks and allows for graceful shutdown of all tasks.
impl TaskManager {
    pub fn new() -> Self {
        let cancellation_token = CancellationToken::new();
        let subtasks = Arc::new(tokio::sync::Mutex::new(tokio::task::JoinSet::new()));

        TaskManager {
            cancellation_token,
            tasks: subtasks,
            next_session: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Starts a new session scope, cancelled together with the whole manager.
    pub fn session_scope(&self) -> SessionScope {
        SessionScope {
            id: SessionId(self.next_session.fetch_add(1, Ordering::Relaxed)),
            token: self.cancellation_token.child_token(),
        }
    }

    /// Spawn a new future as a subtask, to be used in synchronous context.
    ///
    /// Must be called from within a Tokio runtime.
    #[inline(always)]
    pub fn spawn_sync<F>(&self, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
        F::Output: Send + 'static,
    {
        let subtasks = self.tasks.clone();
        tokio::spawn(spawn_subtask(subtasks, future));
    }

    /// Shutdown all subtasks gracefully.
    ///
    /// Wait for all subtasks to finish within a specified timeout, and then abort them.
    ///
    /// This is an equivalent of `Runtime::shutdown_timeout` but for subtasks.
    pub fn shutdown(&self) -> Result<(), String> {
        let cancel = self.cancellation_token.clone();
        let subtasks = self.tasks.clone();

        // a bit naive synchronization to wait for shutdown
        let (tx, mut rx) = tokio::sync::oneshot::channel::<()>();
        // counter for logging
        let completed = Arc::new(AtomicUsize::new(0));

        let counter = completed.clone();
        // we need to run this task in separate task to avoid cancelling it during shutdown
        tokio::task::spawn(async move {
            // Cancel all background tasks
            cancel.cancel();

            let tasks_list = subtasks.clone();
            timeout(SHUTDOWN_TIMEOUT, async move {
                let mut tasks = tasks_list.lock().await;
                while let Some(handle) = tasks.join_next().await {
                    if let Err(e) = handle {
                        tracing::error!("Subtask failed: {:?}", e);
                    }
                    counter.fetch_add(1, Ordering::Relaxed);
                }
            })
            .await
            .ok(); // ignore output as we are shutting down anyway

            // now abort all tasks
            subtasks.lock().await.shutdown().await;

            // notify that shutdown is complete
            if tx.send(()).is_err() {
                tracing::error!("Failed to send shutdown completion signal");
            }
        });

        // wait for the shutdown task to finish
        const WAIT_TIME: Duration = Duration::from_millis(100);
        for _ in 0..SHUTDOWN_TIMEOUT.as_millis() / WAIT_TIME.as_millis() {
            if rx.try_recv().is_ok() {
                break;
            }
            // wait for a short time to avoid busy waiting
            std::thread::sleep(WAIT_TIME);
        }

        tracing::debug!(
            "Shutdown complete, {} subtasks finished cleanly",
            completed.load(Ordering::Relaxed)
        );

        Ok(())
    }
}

#[inline(always)]
async fn spawn_subtask<F>(subtasks: Arc<tokio::sync::Mutex<tokio::task::JoinSet<()>>>, future: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
    F::Output: Send + 'static,
{
    let mut subtasks_lock = subtasks.lock().await;
    // reap finished tasks so the set only holds in-flight calls
    while let Some(finished) = subtasks_lock.try_join_next() {
        if let Err(e) = finished {
            tracing::error!("Subtask failed: {:?}", e);
        }
    }
    subtasks_lock.spawn(future);
}

impl Default for TaskManager {
    fn default() -> Self {
        TaskManager::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_unique() {
        let manager = TaskManager::new();
        let first = manager.session_scope();
        let second = manager.session_scope();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_cancel_is_scoped() {
        let manager = TaskManager::new();
        let first = manager.session_scope();
        let second = manager.session_scope();

        first.cancel();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        manager.cancellation_token.cancel();
        assert!(second.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_future_resolves() {
        let manager = TaskManager::new();
        let scope = manager.session_scope();
        let waiter = scope.clone();

        let handle = tokio::spawn(async move { waiter.cancelled().await });
        scope.cancel();

        timeout(Duration::from_secs(1), handle)
            .await
            .expect("cancellation must wake the waiter")
            .expect("waiter task must not panic");
    }
}

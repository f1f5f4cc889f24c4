//! Timeout enforcement.
//!
//! # Responsibilities
//! - Race an upstream call against a deadline
//! - Cancel the call cleanly when the deadline wins
//! - Report expiry as its own outcome, never as an error value
//!
//! # Design Decisions
//! - Uses Tokio's timer; dropping the losing future aborts the call
//! - Expiry is decided by which branch completed, not by inspecting errors,
//!   so a transport fault can never be mistaken for a timeout
//! - Timed-out requests return 504 Gateway Timeout

use std::future::Future;
use std::time::Duration;

/// Outcome of a deadline-bounded operation.
#[derive(Debug)]
pub enum Deadlined<T> {
    /// The operation finished (successfully or not) before the deadline.
    Completed(T),
    /// The deadline fired first; the operation was dropped.
    Expired,
}

impl<T> Deadlined<T> {
    pub fn is_expired(&self) -> bool {
        matches!(self, Deadlined::Expired)
    }
}

/// Run `fut` with an optional deadline.
///
/// With `None` the future runs to completion unbounded.
pub async fn with_deadline<F>(deadline: Option<Duration>, fut: F) -> Deadlined<F::Output>
where
    F: Future,
{
    let Some(deadline) = deadline else {
        return Deadlined::Completed(fut.await);
    };

    tokio::select! {
        biased;
        out = fut => Deadlined::Completed(out),
        _ = tokio::time::sleep(deadline) => Deadlined::Expired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn completes_before_deadline() {
        let out = with_deadline(Some(Duration::from_secs(5)), async { 7 }).await;
        assert!(matches!(out, Deadlined::Completed(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn expires_and_drops_the_call() {
        struct Flag(Arc<AtomicBool>);
        impl Drop for Flag {
            fn drop(&mut self) {
                self.0.store(true, Ordering::SeqCst);
            }
        }

        let dropped = Arc::new(AtomicBool::new(false));
        let flag = Flag(dropped.clone());
        let out = with_deadline(Some(Duration::from_millis(60_000)), async move {
            let _flag = flag;
            std::future::pending::<()>().await;
        })
        .await;

        assert!(out.is_expired());
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn errors_are_not_expiry() {
        let out = with_deadline(Some(Duration::from_secs(5)), async {
            Err::<(), _>(std::io::Error::from(std::io::ErrorKind::ConnectionRefused))
        })
        .await;

        match out {
            Deadlined::Completed(Err(e)) => assert_eq!(e.kind(), std::io::ErrorKind::ConnectionRefused),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn no_deadline_waits() {
        let out = with_deadline(None, async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            "done"
        })
        .await;
        assert!(matches!(out, Deadlined::Completed("done")));
    }
}

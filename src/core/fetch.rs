//! Ordered concurrent fetch.
//!
//! [`fetch_all`] starts one task per key immediately, with no concurrency
//! cap; it is meant for a handful of keys, not thousands. Results come out
//! of the returned [`FetchStream`] in key order no matter which fetch
//! finishes first.
//!
//! Ordering is enforced by a relay: the output sender is passed from task to
//! task through a chain of one-shot channels, one per position. Each task
//! fetches as soon as it starts, then waits for the sender from its
//! predecessor, publishes its own result, and hands the sender on. The first
//! task's link is pre-seeded; dropping the link after the last task closes
//! the stream.
//!
//! ```text
//!  seed ─▶ task 0 ─▶ task 1 ─▶ ... ─▶ task n-1 ─▶ (dropped: stream closes)
//!            │         │                  │
//!          fetch     fetch              fetch      (all concurrent)
//! ```
//!
//! There is no cancellation. Dropping the stream early leaves the remaining
//! tasks to finish their fetches; their sends fail and the relay unwinds.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::{mpsc, oneshot};
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::store::BlobStore;
use crate::core::types::{BucketName, LookupKey};
use crate::error::FetchError;

type Baton = mpsc::Sender<FetchResult>;

/// Outcome of one lookup.
pub struct FetchResult {
    pub bucket: BucketName,
    pub key: LookupKey,
    /// Object contents, wiped on drop, or the reason the lookup failed.
    pub outcome: Result<Zeroizing<Vec<u8>>, FetchError>,
}

impl FetchResult {
    /// Object contents if the lookup succeeded.
    pub fn data(&self) -> Option<&[u8]> {
        self.outcome.as_ref().ok().map(|d| d.as_slice())
    }

    /// Failure kind if the lookup failed.
    pub fn error(&self) -> Option<&FetchError> {
        self.outcome.as_ref().err()
    }
}

impl std::fmt::Debug for FetchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("FetchResult");
        s.field("bucket", &self.bucket).field("key", &self.key);
        match &self.outcome {
            Ok(data) => s.field("bytes", &data.len()),
            Err(e) => s.field("error", e),
        };
        s.finish()
    }
}

/// Ordered stream of [`FetchResult`]s, one per requested key.
#[derive(Debug)]
pub struct FetchStream {
    rx: mpsc::Receiver<FetchResult>,
}

impl Stream for FetchStream {
    type Item = FetchResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Fetch every key in `keys` from `bucket` concurrently.
///
/// Must be called from within a tokio runtime. Fetch failures are delivered
/// as results rather than ending the stream.
///
/// One task is spawned per key with no upper bound, which suits the short
/// per-category key lists. Dropping the stream early does not cancel
/// lookups already in flight; their results are discarded.
pub fn fetch_all(store: Arc<dyn BlobStore>, bucket: &str, keys: Vec<LookupKey>) -> FetchStream {
    let (results, rx) = mpsc::channel(1);

    let (seed, mut link) = oneshot::channel::<Baton>();
    // receiver is alive, cannot fail
    let _ = seed.send(results);

    for key in keys {
        let (next, next_link) = oneshot::channel();
        tokio::spawn(relay(Arc::clone(&store), bucket.to_string(), key, link, next));
        link = next_link;
    }

    drop(link);
    FetchStream { rx }
}

async fn relay(
    store: Arc<dyn BlobStore>,
    bucket: BucketName,
    key: LookupKey,
    link: oneshot::Receiver<Baton>,
    next: oneshot::Sender<Baton>,
) {
    let outcome = store.get(&bucket, &key).await.map(Zeroizing::new);
    trace!(bucket = %bucket, key = %key, ok = outcome.is_ok(), "fetched");

    // wait for our turn; an error here means a predecessor died without handing off
    let Ok(results) = link.await else {
        return;
    };

    // a closed stream is not our concern; keep the relay moving
    let _ = results
        .send(FetchResult {
            bucket,
            key,
            outcome,
        })
        .await;
    let _ = next.send(results);
}

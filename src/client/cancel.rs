use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// A shareable flag that aborts in-flight requests.
///
/// Clones share the same flag. Once cancelled a token stays cancelled; bind
/// a fresh one for later calls.
///
/// Connections opened by a client bound to the token are registered with it,
/// and [`CancelToken::cancel`] shuts them down so the server sees the request
/// abandoned instead of waiting for a timeout.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    cancelled: AtomicBool,
    sockets: Mutex<Vec<Weak<TcpStream>>>,
}

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels every call bound to this token or one of its clones.
    pub fn cancel(&self) {
        self.shared.cancelled.store(true, Ordering::SeqCst);

        let sockets = std::mem::take(&mut *self.lock_sockets());
        for stream in sockets.iter().filter_map(Weak::upgrade) {
            log::debug!("cancel: shutting down connection to {:?}", stream.peer_addr().ok());
            let _ = stream.shutdown(Shutdown::Both);
        }
    }

    /// Returns true once [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::SeqCst)
    }

    /// Tracks `stream` so a later [`CancelToken::cancel`] shuts it down.
    ///
    /// A stream registered after cancellation is shut down at once.
    pub(crate) fn register(&self, stream: &Arc<TcpStream>) {
        {
            let mut sockets = self.lock_sockets();
            sockets.retain(|weak| weak.strong_count() > 0);
            sockets.push(Arc::downgrade(stream));
        }

        // Checked after the push: a concurrent cancel either drained this
        // stream or set the flag first.
        if self.is_cancelled() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }

    fn lock_sockets(&self) -> std::sync::MutexGuard<'_, Vec<Weak<TcpStream>>> {
        self.shared
            .sockets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.lock_sockets().len()
    }
}

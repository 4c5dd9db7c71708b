use crate::api::{BoostRequest, GenerateRequest};
use crate::client::Backend;
use crate::{Error, Result};
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::{oneshot, watch};

enum Command {
    Generate(GenerateRequest, oneshot::Sender<Result<String>>),
    Boost(BoostRequest, oneshot::Sender<Result<String>>),
    Ping(oneshot::Sender<Result<String>>),
    Close(oneshot::Sender<Result<()>>),
}

/// Cooperative cancellation for a single [`Studio`] request.
///
/// Cancelling does not abort the HTTP call already running on the worker;
/// it makes the waiting caller return `Error::Cancelled` and the late
/// result is dropped.
#[derive(Clone, Debug)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once `cancel` has been called (immediately if it already was).
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// An async-friendly client backed by a dedicated worker thread.
///
/// The worker thread owns the (blocking) backend and runs one command at a
/// time. `Studio` itself allows one outstanding request: a call made while
/// another is pending fails with `Error::Busy`. Each request is bounded by
/// `timeout_ms` (0 disables the bound).
#[derive(Clone)]
pub struct Studio {
    cmd_tx: Sender<Command>,
    busy: Arc<AtomicBool>,
    timeout_ms: u64,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Studio {
    /// Create a studio talking HTTP to the configured backend.
    #[cfg(feature = "http")]
    pub async fn new(config: Option<crate::ClientConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();
        let timeout_ms = config.timeout_ms;
        Self::spawn(move || crate::client::HttpBackend::new(config), timeout_ms).await
    }

    /// Create a studio around any backend. The factory runs on the worker
    /// thread, so the backend itself does not need to be `Send`.
    pub async fn spawn<B, F>(factory: F, timeout_ms: u64) -> Result<Self>
    where
        B: Backend + 'static,
        F: FnOnce() -> Result<B> + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            let backend = match factory() {
                Ok(b) => b,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };
            let _ = init_tx.send(Ok(()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Generate(req, resp) => {
                        let _ = resp.send(backend.generate(&req));
                    }
                    Command::Boost(req, resp) => {
                        let _ = resp.send(backend.boost(&req));
                    }
                    Command::Ping(resp) => {
                        let _ = resp.send(backend.ping());
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(Ok(()));
                        break;
                    }
                }
            }
            debug!("studio worker stopped");
        });

        let init_res = init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))?;
        init_res?;

        Ok(Self {
            cmd_tx,
            busy: Arc::new(AtomicBool::new(false)),
            timeout_ms,
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub async fn generate(&self, request: GenerateRequest, cancel: Option<&CancelToken>) -> Result<String> {
        request.validate()?;
        self.request(|tx| Command::Generate(request, tx), cancel).await
    }

    pub async fn boost(&self, request: BoostRequest, cancel: Option<&CancelToken>) -> Result<String> {
        request.validate()?;
        self.request(|tx| Command::Boost(request, tx), cancel).await
    }

    pub async fn ping(&self) -> Result<String> {
        self.request(Command::Ping, None).await
    }

    /// Shut down the worker thread. A request still running on it finishes
    /// first; its result is discarded.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }

    async fn request<F>(&self, make: F, cancel: Option<&CancelToken>) -> Result<String>
    where
        F: FnOnce(oneshot::Sender<Result<String>>) -> Command,
    {
        if cancel.map_or(false, CancelToken::is_cancelled) {
            return Err(Error::Cancelled);
        }
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(Error::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .map_err(|_| Error::Other("Studio worker has shut down".into()))?;

        let reply = async {
            match rx.await {
                Ok(res) => res,
                Err(e) => Err(Error::Other(format!("Request canceled: {}", e))),
            }
        };
        let timeout_ms = self.timeout_ms;
        let settled = async move {
            if timeout_ms == 0 {
                return reply.await;
            }
            match tokio::time::timeout(Duration::from_millis(timeout_ms), reply).await {
                Ok(res) => res,
                Err(_) => Err(Error::Timeout(timeout_ms)),
            }
        };
        let cancelled = async {
            match cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            res = settled => res,
            _ = cancelled => {
                debug!("request cancelled by caller");
                Err(Error::Cancelled)
            }
        }
    }
}

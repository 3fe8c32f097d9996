use crate::error::{CatalogError, CatalogResult};
use crate::models::{CodeSnippet, SnippetId};
use crate::service::CatalogService;
use flume::{Receiver, Sender};
use log::debug;
use std::thread;
use tokio::runtime::Runtime;

/// Outcome of a request made off the UI thread
#[derive(Debug, Clone)]
pub enum CatalogMessage {
    Loaded(CatalogResult<Vec<CodeSnippet>>),
    Created(CatalogResult<CodeSnippet>),
    Deleted(CatalogResult<SnippetId>),
}

/// Runs catalog requests on background threads so a slow or hung service
/// never freezes the interface. Results come back over a channel and are
/// applied to the store on the UI thread.
#[derive(Debug)]
pub struct RequestWorker<S> {
    service: S,
    sender: Sender<CatalogMessage>,
    receiver: Receiver<CatalogMessage>,
}

impl<S> RequestWorker<S>
where
    S: CatalogService + Clone + Send + 'static,
{
    pub fn new(service: S) -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            service,
            sender,
            receiver,
        }
    }

    pub fn spawn_load(&self) {
        debug!("event=request kind=list");
        self.spawn(
            |service| async move { CatalogMessage::Loaded(service.list().await) },
            |e| CatalogMessage::Loaded(Err(e)),
        );
    }

    pub fn spawn_create(&self, snippet: CodeSnippet) {
        debug!("event=request kind=create id={}", snippet.id);
        self.spawn(
            move |service| async move {
                let result = service.create(&snippet).await.map(|_| snippet);
                CatalogMessage::Created(result)
            },
            |e| CatalogMessage::Created(Err(e)),
        );
    }

    pub fn spawn_delete(&self, id: SnippetId) {
        debug!("event=request kind=delete id={}", id);
        self.spawn(
            move |service| async move {
                let result = service.delete(&id).await.map(|_| id);
                CatalogMessage::Deleted(result)
            },
            |e| CatalogMessage::Deleted(Err(e)),
        );
    }

    /// Next finished request, if any
    pub fn try_recv(&self) -> Option<CatalogMessage> {
        self.receiver.try_recv().ok()
    }

    #[cfg(test)]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<CatalogMessage> {
        self.receiver.recv_timeout(timeout).ok()
    }

    fn spawn<F, Fut>(&self, request: F, on_runtime_error: fn(CatalogError) -> CatalogMessage)
    where
        F: FnOnce(S) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = CatalogMessage>,
    {
        let service = self.service.clone();
        let sender = self.sender.clone();

        thread::spawn(move || {
            let message = match Runtime::new() {
                Ok(rt) => rt.block_on(request(service)),
                Err(e) => on_runtime_error(CatalogError::Transport(format!(
                    "Runtime error: {}",
                    e
                ))),
            };
            // The receiver is gone once the app has quit
            let _ = sender.send(message);
        });
    }
}

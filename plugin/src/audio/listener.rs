// Output-change notification sinks
use log::{debug, error};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tauri::{AppHandle, Emitter, Runtime};
use tokio::sync::mpsc;

/// Event sent to the frontend whenever the active output may have changed
pub const INPUT_CHANGED_EVENT: &str = "inputChanged";

/// Fixed payload of [`INPUT_CHANGED_EVENT`]
pub const INPUT_CHANGED_PAYLOAD: i32 = 1;

/// Receives a signal whenever the active output changes, either from an
/// explicit switch or from a hardware plug/unplug event.
pub trait AudioEventListener: Send + Sync {
    fn on_changed(&self);
}

impl<F> AudioEventListener for F
where
    F: Fn() + Send + Sync,
{
    fn on_changed(&self) {
        self()
    }
}

pub type SharedListener = Arc<dyn AudioEventListener>;

/// Emits `inputChanged` to every webview of the app
pub struct EmitListener<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> EmitListener<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> AudioEventListener for EmitListener<R> {
    fn on_changed(&self) {
        debug!("📣 Emitting {}", INPUT_CHANGED_EVENT);
        if let Err(e) = self.app.emit(INPUT_CHANGED_EVENT, INPUT_CHANGED_PAYLOAD) {
            error!("Failed to emit {}: {}", INPUT_CHANGED_EVENT, e);
        }
    }
}

/// Forwards notifications into a channel; used by the CLI `watch` mode
pub struct ChannelListener {
    sender: mpsc::UnboundedSender<i32>,
}

impl ChannelListener {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<i32>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl AudioEventListener for ChannelListener {
    fn on_changed(&self) {
        // Receiver gone means nobody is watching anymore
        let _ = self.sender.send(INPUT_CHANGED_PAYLOAD);
    }
}

/// Counts notifications
#[derive(Default)]
pub struct CountingListener {
    count: AtomicUsize,
}

impl CountingListener {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl AudioEventListener for CountingListener {
    fn on_changed(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

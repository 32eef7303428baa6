use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::info;

use crate::distro::DistroProbe;
use crate::state::sink::{IndicatorView, NotificationSink, Notifier};
use crate::state::types::UiMessage;
use crate::worker::PollingWorker;

/// Handles [`UiMessage`]s on the UI context.
pub(crate) struct StatusIndicatorController<V, N> {
    probe: Arc<dyn DistroProbe>,
    worker: PollingWorker,
    sink: NotificationSink<V, N>,
}

impl<V: IndicatorView, N: Notifier> StatusIndicatorController<V, N> {
    pub(crate) fn new(
        probe: Arc<dyn DistroProbe>,
        worker: PollingWorker,
        sink: NotificationSink<V, N>,
    ) -> Self {
        Self {
            probe,
            worker,
            sink,
        }
    }

    /// `Break` means the UI loop must quit; the worker has already stopped.
    pub(crate) fn handle_message(&self, message: UiMessage) -> ControlFlow<()> {
        match message {
            UiMessage::CountPublished(count) => {
                self.sink.receive(count);
            }
            UiMessage::RunUpdater => {
                info!("launching updater");
                self.probe.launch_update_ui();
            }
            UiMessage::Exit => {
                self.shutdown();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn shutdown(&self) {
        info!("exit requested, waiting for update checks to stop");
        self.worker.stop();
        self.worker.join();
        info!(state = ?self.worker.state(), "update checks joined");
    }
}

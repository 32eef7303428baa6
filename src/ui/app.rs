use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use gtk4::glib;
use ksni::blocking::TrayMethods;
use tracing::info;

use crate::distro::DistroProbe;
use crate::settings::AppSettings;
use crate::state::{NotificationSink, StatusIndicatorController, UiMessage};
use crate::ui::notifier::{DesktopNotifier, app_name};
use crate::ui::tray::{TrayIndicator, UpdateTray};
use crate::worker::PollingWorker;

/// How often the UI context drains messages from the worker and the tray.
const DISPATCH_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the agent until the user picks "Exit".
pub(crate) fn run(
    probe: Arc<dyn DistroProbe>,
    interval: Duration,
    settings: &AppSettings,
) -> anyhow::Result<()> {
    let (sender, receiver) = mpsc::channel::<UiMessage>();

    // Dropping the worker stops and joins it, so a failed tray registration
    // leaves nothing running.
    let worker = PollingWorker::new(Arc::clone(&probe), interval);
    let publisher = sender.clone();
    worker
        .start(move |count| {
            let _ = publisher.send(UiMessage::CountPublished(count));
        })
        .context("Failed to start update checks")?;

    let tray = UpdateTray::new(probe.update_action_label(), &settings.icon_path(), sender);
    let handle = tray
        .spawn()
        .context("Failed to register the status indicator")?;

    let sink = NotificationSink::new(
        TrayIndicator::new(handle.clone()),
        DesktopNotifier::new(app_name()),
        settings.notify_updates,
    );
    let controller = StatusIndicatorController::new(probe, worker, sink);

    let main_loop = glib::MainLoop::new(None, false);
    let main_loop_clone = main_loop.clone();
    glib::timeout_add_local(DISPATCH_INTERVAL, move || {
        while let Ok(message) = receiver.try_recv() {
            if controller.handle_message(message).is_break() {
                main_loop_clone.quit();
                return glib::ControlFlow::Break;
            }
        }
        glib::ControlFlow::Continue
    });

    main_loop.run();

    handle.shutdown().wait();
    info!("status indicator removed");
    Ok(())
}

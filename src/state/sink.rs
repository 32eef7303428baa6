use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, warn};

use crate::state::types::Presentation;
use crate::types::UpdateCount;

/// The status indicator as seen by the sink.
pub(crate) trait IndicatorView {
    fn show(&self, message: &str, attention: bool);
    fn hide(&self);
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("D-Bus notification failed: {0}")]
    Bus(#[from] zbus::Error),
}

pub(crate) trait Notifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Turns published counts into indicator changes and notifications, once per
/// distinct count.
pub(crate) struct NotificationSink<V, N> {
    last_published: Mutex<UpdateCount>,
    view: V,
    notifier: N,
    notify_enabled: bool,
}

impl<V: IndicatorView, N: Notifier> NotificationSink<V, N> {
    pub(crate) fn new(view: V, notifier: N, notify_enabled: bool) -> Self {
        Self {
            last_published: Mutex::new(UpdateCount::default()),
            view,
            notifier,
            notify_enabled,
        }
    }

    /// Returns whether `count` differed from the previous one and was acted on.
    pub(crate) fn receive(&self, count: UpdateCount) -> bool {
        {
            let mut last = self
                .last_published
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *last == count {
                return false;
            }
            *last = count;
        }

        debug!(?count, "update count changed");
        match Presentation::for_count(count) {
            Presentation::Hidden => self.view.hide(),
            Presentation::Visible {
                title,
                message,
                attention,
            } => {
                self.view.show(&message, attention);
                if self.notify_enabled {
                    if let Err(err) = self.notifier.notify(title, &message) {
                        warn!("Failed to send notification: {}", err);
                    }
                }
            }
        }
        true
    }
}

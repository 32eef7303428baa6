pub(crate) mod controller;
pub(crate) mod sink;
pub(crate) mod types;

pub(crate) use controller::StatusIndicatorController;
pub(crate) use sink::{IndicatorView, NotificationSink, Notifier, NotifyError};
pub(crate) use types::UiMessage;

pub(crate) mod app;
pub(crate) mod notifier;
pub(crate) mod tray;

pub(crate) use app::run;

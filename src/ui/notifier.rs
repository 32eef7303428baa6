use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use zbus::blocking::Connection;
use zbus::zvariant::Value;

use crate::state::{Notifier, NotifyError};

const NOTIFICATIONS_SERVICE: &str = "org.freedesktop.Notifications";
const NOTIFICATIONS_PATH: &str = "/org/freedesktop/Notifications";
const NOTIFICATIONS_INTERFACE: &str = "org.freedesktop.Notifications";
const NOTIFICATION_ICON: &str = "software-update-available";
const DEFAULT_APP_NAME: &str = "update-notifier-tray";
/// Let the notification server pick the timeout.
const EXPIRE_DEFAULT: i32 = -1;

#[derive(Default)]
struct Session {
    connection: Option<Connection>,
    last_id: u32,
}

/// Sends desktop notifications over the session bus.
///
/// The bus connection is opened on first use and dropped after a failed call,
/// so a notification daemon that starts late is picked up on the next change.
pub(crate) struct DesktopNotifier {
    app_name: String,
    session: Mutex<Session>,
}

impl DesktopNotifier {
    pub(crate) fn new(app_name: String) -> Self {
        Self {
            app_name,
            session: Mutex::new(Session::default()),
        }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        let connection = match session.connection.take() {
            Some(connection) => connection,
            None => Connection::session()?,
        };

        let hints: HashMap<&str, Value<'_>> = HashMap::new();
        let actions: Vec<&str> = Vec::new();
        let reply = connection.call_method(
            Some(NOTIFICATIONS_SERVICE),
            NOTIFICATIONS_PATH,
            Some(NOTIFICATIONS_INTERFACE),
            "Notify",
            &(
                self.app_name.as_str(),
                session.last_id,
                NOTIFICATION_ICON,
                title,
                body,
                actions,
                hints,
                EXPIRE_DEFAULT,
            ),
        )?;

        // Replace the previous bubble instead of stacking a new one.
        session.last_id = reply.body().deserialize::<u32>()?;
        session.connection = Some(connection);
        Ok(())
    }
}

/// Name the notification server shows for us: our own process name.
pub(crate) fn app_name() -> String {
    app_name_from(env::args_os().next())
}

fn app_name_from(arg0: Option<OsString>) -> String {
    arg0.as_deref()
        .map(Path::new)
        .and_then(|path| path.file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_APP_NAME)
        .to_string()
}

use std::path::Path;
use std::sync::mpsc;

use ksni::blocking::Handle;
use ksni::menu::StandardItem;
use ksni::{Category, MenuItem, Status, ToolTip, Tray};
use tracing::{debug, warn};

use crate::state::{IndicatorView, UiMessage};

const TRAY_ID: &str = "update-notifier-tray";
const TRAY_TITLE: &str = "Update Notifier";
const FALLBACK_ICON_NAME: &str = "software-update-available";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Visibility {
    Hidden,
    Shown,
    Attention,
}

impl Visibility {
    pub(crate) fn for_show(attention: bool) -> Self {
        if attention {
            Visibility::Attention
        } else {
            Visibility::Shown
        }
    }
}

/// StatusNotifierItem state. Callbacks run on the ksni service thread and only
/// forward messages to the UI context.
pub(crate) struct UpdateTray {
    action_label: String,
    icon_name: String,
    icon_theme_path: String,
    tooltip: String,
    visibility: Visibility,
    sender: mpsc::Sender<UiMessage>,
}

impl UpdateTray {
    pub(crate) fn new(action_label: String, icon_path: &Path, sender: mpsc::Sender<UiMessage>) -> Self {
        let icon_name = icon_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .unwrap_or(FALLBACK_ICON_NAME)
            .to_string();
        let icon_theme_path = icon_path
            .parent()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();

        Self {
            action_label,
            icon_name,
            icon_theme_path,
            tooltip: String::new(),
            visibility: Visibility::Hidden,
            sender,
        }
    }

    fn send(&self, message: UiMessage) {
        if self.sender.send(message).is_err() {
            debug!(?message, "UI context is gone, dropping tray event");
        }
    }
}

impl Tray for UpdateTray {
    fn id(&self) -> String {
        TRAY_ID.to_string()
    }

    fn title(&self) -> String {
        TRAY_TITLE.to_string()
    }

    fn category(&self) -> Category {
        Category::SystemServices
    }

    fn status(&self) -> Status {
        match self.visibility {
            Visibility::Hidden => Status::Passive,
            Visibility::Shown => Status::Active,
            Visibility::Attention => Status::NeedsAttention,
        }
    }

    fn icon_theme_path(&self) -> String {
        self.icon_theme_path.clone()
    }

    fn icon_name(&self) -> String {
        self.icon_name.clone()
    }

    fn attention_icon_name(&self) -> String {
        self.icon_name.clone()
    }

    fn tool_tip(&self) -> ToolTip {
        ToolTip {
            title: self.tooltip.clone(),
            icon_name: self.icon_name.clone(),
            ..Default::default()
        }
    }

    // Left click (and double click on hosts that map it to Activate).
    fn activate(&mut self, _x: i32, _y: i32) {
        self.send(UiMessage::RunUpdater);
    }

    // Middle click.
    fn secondary_activate(&mut self, _x: i32, _y: i32) {
        self.send(UiMessage::RunUpdater);
    }

    fn menu(&self) -> Vec<MenuItem<Self>> {
        vec![
            StandardItem {
                label: self.action_label.clone(),
                icon_name: FALLBACK_ICON_NAME.to_string(),
                activate: Box::new(|tray: &mut Self| tray.send(UiMessage::RunUpdater)),
                ..Default::default()
            }
            .into(),
            MenuItem::Separator,
            StandardItem {
                label: "_Exit".to_string(),
                icon_name: "application-exit".to_string(),
                activate: Box::new(|tray: &mut Self| tray.send(UiMessage::Exit)),
                ..Default::default()
            }
            .into(),
        ]
    }
}

/// [`IndicatorView`] backed by the running tray service.
pub(crate) struct TrayIndicator {
    handle: Handle<UpdateTray>,
}

impl TrayIndicator {
    pub(crate) fn new(handle: Handle<UpdateTray>) -> Self {
        Self { handle }
    }

    fn apply(&self, tooltip: Option<String>, visibility: Visibility) {
        let updated = self.handle.update(move |tray: &mut UpdateTray| {
            if let Some(tooltip) = tooltip {
                tray.tooltip = tooltip;
            }
            tray.visibility = visibility;
        });
        if updated.is_none() {
            warn!("Status indicator service is no longer running");
        }
    }
}

impl IndicatorView for TrayIndicator {
    fn show(&self, message: &str, attention: bool) {
        self.apply(Some(message.to_string()), Visibility::for_show(attention));
    }

    fn hide(&self) {
        self.apply(None, Visibility::Hidden);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DEFAULT_ICON_PATH;

    fn tray() -> (UpdateTray, mpsc::Receiver<UiMessage>) {
        let (tx, rx) = mpsc::channel();
        let tray = UpdateTray::new(
            "Run gpk-update-viewer".to_string(),
            Path::new(DEFAULT_ICON_PATH),
            tx,
        );
        (tray, rx)
    }

    fn activate_item(tray: &mut UpdateTray, index: usize) {
        let menu = tray.menu();
        match &menu[index] {
            MenuItem::Standard(item) => (item.activate)(tray),
            _ => panic!("menu entry {index} is not a standard item"),
        }
    }

    #[test]
    fn icon_resolves_from_svg_path() {
        let (tray, _rx) = tray();
        assert_eq!(tray.icon_name(), "software-update-available");
        assert_eq!(
            tray.icon_theme_path(),
            "/usr/share/icons/Tango/scalable/status"
        );
    }

    #[test]
    fn starts_hidden() {
        let (tray, _rx) = tray();
        assert!(matches!(tray.status(), Status::Passive));
        assert!(tray.tool_tip().title.is_empty());
    }

    #[test]
    fn attention_maps_to_tray_status() {
        let (mut tray, _rx) = tray();
        tray.visibility = Visibility::for_show(false);
        assert!(matches!(tray.status(), Status::Active));
        tray.visibility = Visibility::for_show(true);
        assert!(matches!(tray.status(), Status::NeedsAttention));
        tray.visibility = Visibility::Hidden;
        assert!(matches!(tray.status(), Status::Passive));
    }

    #[test]
    fn clicks_request_the_updater() {
        let (mut tray, rx) = tray();
        tray.activate(0, 0);
        tray.secondary_activate(0, 0);
        assert_eq!(rx.try_recv(), Ok(UiMessage::RunUpdater));
        assert_eq!(rx.try_recv(), Ok(UiMessage::RunUpdater));
    }

    #[test]
    fn menu_offers_updater_and_exit() {
        let (mut tray, rx) = tray();
        let menu = tray.menu();
        assert_eq!(menu.len(), 3);
        match &menu[0] {
            MenuItem::Standard(item) => assert_eq!(item.label, "Run gpk-update-viewer"),
            _ => panic!("first entry should run the updater"),
        }
        assert!(matches!(menu[1], MenuItem::Separator));

        activate_item(&mut tray, 0);
        activate_item(&mut tray, 2);
        assert_eq!(rx.try_recv(), Ok(UiMessage::RunUpdater));
        assert_eq!(rx.try_recv(), Ok(UiMessage::Exit));
    }

    #[test]
    fn events_after_ui_shutdown_are_dropped() {
        let (mut tray, rx) = tray();
        drop(rx);
        tray.activate(0, 0);
    }
}

use std::time::Duration;

use tracing::warn;

use super::commands::{run_query, spawn_detached};
use super::parser::count_emerge_actions;
use super::{DistroProbe, ProbeError};

const EMERGE: &str = "emerge";

const CHECK_FOR_UPDATES_ARGS: [&str; 10] = [
    "--ignore-default-opts",
    "--pretend",
    "--verbose",
    "--color",
    "n",
    "--complete-graph",
    "--deep",
    "--newuse",
    "--update",
    "@world",
];

const UPDATE_ARGS: [&str; 10] = [
    "--ask",
    "--verbose",
    "--tree",
    "--quiet",
    "--complete-graph",
    "--deep",
    "--newuse",
    "--update",
    "--keep-going",
    "@world",
];

const DEFAULT_TERMINAL: &str = "terminator";

/// Gentoo backend. Resolving the full @world graph is slow, so checks run
/// twice a day.
#[derive(Clone, Debug)]
pub(crate) struct GentooProbe {
    terminal: String,
}

impl GentooProbe {
    pub(crate) const COMMAND_LINE_NAME: &'static str = "gentoo";

    pub(crate) fn new(terminal: Option<String>) -> Self {
        let terminal = terminal
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_TERMINAL.to_string());
        Self { terminal }
    }

    pub(crate) fn detected(os_identification: &str) -> bool {
        os_identification.contains("Gentoo")
    }

    /// Shell snippet run inside the terminal: the privileged update, then an
    /// interactive shell so the output stays readable.
    fn update_command(&self) -> String {
        format!(
            "(set -x; sudo {} {}) ; cd ~; bash -i",
            EMERGE,
            UPDATE_ARGS.join(" ")
        )
    }
}

impl DistroProbe for GentooProbe {
    fn updateable_count(&self) -> Result<u32, ProbeError> {
        let stdout = run_query(EMERGE, &CHECK_FOR_UPDATES_ARGS, &[])?;
        Ok(count_emerge_actions(&stdout))
    }

    fn check_interval(&self) -> Duration {
        Duration::from_secs(60 * 60 * 12)
    }

    fn update_action_label(&self) -> String {
        "Run \"emerge --ask --update ...\"".to_string()
    }

    fn launch_update_ui(&self) {
        let command = self.update_command();
        if let Err(err) = spawn_detached(&self.terminal, &["-e", &command]) {
            warn!("Failed to launch {}: {}", self.terminal, err);
        }
    }
}

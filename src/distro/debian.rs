use std::time::Duration;

use tracing::warn;

use super::commands::{run_query, spawn_detached};
use super::parser::count_apt_upgradable;
use super::{DistroProbe, ProbeError};

const APT: &str = "apt";
const APT_LIST_ARGS: [&str; 2] = ["list", "--upgradable"];
const UPDATE_VIEWER: &str = "gpk-update-viewer";

/// Debian-family backend reading the local apt cache.
///
/// Every call runs a fresh `apt list --upgradable`, so no cache handle
/// outlives a single check.
#[derive(Clone, Debug)]
pub(crate) struct DebianProbe {
    program: String,
    args: Vec<String>,
}

impl DebianProbe {
    pub(crate) const COMMAND_LINE_NAME: &'static str = "debian";

    pub(crate) fn new() -> Self {
        Self {
            program: APT.to_string(),
            args: APT_LIST_ARGS.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// Uses a different query command, which must print `apt list` output.
    #[cfg(test)]
    pub(crate) fn with_query_command(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    pub(crate) fn detected(os_identification: &str) -> bool {
        os_identification.contains("Debian")
    }
}

impl Default for DebianProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl DistroProbe for DebianProbe {
    fn updateable_count(&self) -> Result<u32, ProbeError> {
        let args: Vec<&str> = self.args.iter().map(|arg| arg.as_str()).collect();
        // apt warns about its CLI on stderr; only stdout is parsed.
        let stdout = run_query(&self.program, &args, &[("LC_ALL", "C")])?;
        Ok(count_apt_upgradable(&stdout))
    }

    fn check_interval(&self) -> Duration {
        Duration::from_secs(60)
    }

    fn update_action_label(&self) -> String {
        format!("Run {}", UPDATE_VIEWER)
    }

    fn launch_update_ui(&self) {
        if let Err(err) = spawn_detached(UPDATE_VIEWER, &[]) {
            warn!("Failed to launch {}: {}", UPDATE_VIEWER, err);
        }
    }
}

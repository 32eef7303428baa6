use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::DistroKind;
use super::commands::run_query;

const OS_RELEASE_PATH: &str = "/etc/os-release";

#[derive(Error, Debug)]
#[error("Could not detect a supported distribution; pass one of {}", supported_flags())]
pub struct DetectError;

fn supported_flags() -> String {
    DistroKind::ALL
        .iter()
        .map(|kind| format!("--{}", kind.command_line_name()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns the OS identification text that backends match against.
///
/// Prefers `lsb_release -a`; hosts without it fall back to `/etc/os-release`.
pub(crate) fn read_os_identification() -> Option<String> {
    match run_query("lsb_release", &["-a"], &[]) {
        Ok(output) => return Some(output),
        Err(err) => debug!("lsb_release unavailable, reading {}: {}", OS_RELEASE_PATH, err),
    }
    read_os_release(Path::new(OS_RELEASE_PATH))
}

fn read_os_release(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

/// Picks the first backend, in priority order, whose predicate matches.
pub(crate) fn detect_distro(os_identification: &str) -> Result<DistroKind, DetectError> {
    DistroKind::ALL
        .into_iter()
        .find(|kind| kind.detected(os_identification))
        .ok_or(DetectError)
}

mod commands;
mod debian;
mod detection;
mod gentoo;
mod parser;
mod ubuntu;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::settings::AppSettings;

use debian::DebianProbe;
use gentoo::GentooProbe;
use ubuntu::UbuntuProbe;

pub(crate) use detection::{detect_distro, read_os_identification};

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with status {}: {stderr}", describe_exit_code(.code))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn describe_exit_code(code: &Option<i32>) -> String {
    code.map(|code| code.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// A distribution backend: knows how to count pending updates and how to
/// start the distribution's updater.
pub(crate) trait DistroProbe: Send + Sync {
    fn updateable_count(&self) -> Result<u32, ProbeError>;

    fn check_interval(&self) -> Duration;

    fn update_action_label(&self) -> String;

    /// Fire and forget. Must not block on the updater.
    fn launch_update_ui(&self);
}

/// Supported backends in detection priority order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DistroKind {
    Debian,
    Gentoo,
    Ubuntu,
}

impl DistroKind {
    pub(crate) const ALL: [DistroKind; 3] =
        [DistroKind::Debian, DistroKind::Gentoo, DistroKind::Ubuntu];

    pub(crate) fn command_line_name(self) -> &'static str {
        match self {
            DistroKind::Debian => DebianProbe::COMMAND_LINE_NAME,
            DistroKind::Gentoo => GentooProbe::COMMAND_LINE_NAME,
            DistroKind::Ubuntu => UbuntuProbe::COMMAND_LINE_NAME,
        }
    }

    pub(crate) fn detected(self, os_identification: &str) -> bool {
        match self {
            DistroKind::Debian => DebianProbe::detected(os_identification),
            DistroKind::Gentoo => GentooProbe::detected(os_identification),
            DistroKind::Ubuntu => UbuntuProbe::detected(os_identification),
        }
    }

    pub(crate) fn build_probe(self, settings: &AppSettings) -> Arc<dyn DistroProbe> {
        match self {
            DistroKind::Debian => Arc::new(DebianProbe::new()),
            DistroKind::Gentoo => Arc::new(GentooProbe::new(settings.terminal.clone())),
            DistroKind::Ubuntu => Arc::new(UbuntuProbe::new()),
        }
    }
}

use clap::{Args, Parser};

use crate::distro::DistroKind;

#[derive(Parser, Debug)]
#[command(
    name = "update-notifier-tray",
    about = "Tray icon notifying of new package updates",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub distro: DistroArgs,

    /// Seconds between update checks (overrides the distribution default)
    #[arg(long, value_name = "SECONDS")]
    pub interval: Option<u64>,

    /// Check for updates once, print the count and exit
    #[arg(long)]
    pub check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// At most one distribution may be forced; none means auto-detect.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct DistroArgs {
    /// Activate Debian mode
    #[arg(long)]
    pub debian: bool,

    /// Activate Gentoo mode
    #[arg(long)]
    pub gentoo: bool,

    /// Activate Ubuntu mode
    #[arg(long)]
    pub ubuntu: bool,
}

impl DistroArgs {
    pub(crate) fn selected(&self) -> Option<DistroKind> {
        if self.debian {
            Some(DistroKind::Debian)
        } else if self.gentoo {
            Some(DistroKind::Gentoo)
        } else if self.ubuntu {
            Some(DistroKind::Ubuntu)
        } else {
            None
        }
    }
}

use std::time::Duration;

use super::debian::DebianProbe;
use super::{DistroProbe, ProbeError};

/// Ubuntu behaves exactly like Debian; only detection differs.
#[derive(Clone, Debug, Default)]
pub(crate) struct UbuntuProbe {
    inner: DebianProbe,
}

impl UbuntuProbe {
    pub(crate) const COMMAND_LINE_NAME: &'static str = "ubuntu";

    pub(crate) fn new() -> Self {
        Self {
            inner: DebianProbe::new(),
        }
    }

    pub(crate) fn detected(os_identification: &str) -> bool {
        os_identification.contains("Ubuntu")
    }
}

impl DistroProbe for UbuntuProbe {
    fn updateable_count(&self) -> Result<u32, ProbeError> {
        self.inner.updateable_count()
    }

    fn check_interval(&self) -> Duration {
        self.inner.check_interval()
    }

    fn update_action_label(&self) -> String {
        self.inner.update_action_label()
    }

    fn launch_update_ui(&self) {
        self.inner.launch_update_ui();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_ubuntu_only() {
        let output = "Distributor ID:\tUbuntu\nDescription:\tUbuntu 24.04 LTS\nRelease:\t24.04\nCodename:\tnoble\n";
        assert!(UbuntuProbe::detected(output));
        assert!(!DebianProbe::detected(output));
        assert!(!UbuntuProbe::detected("Distributor ID:\tDebian\n"));
    }

    #[test]
    fn shares_debian_behaviour() {
        let ubuntu = UbuntuProbe::new();
        let debian = DebianProbe::new();
        assert_eq!(ubuntu.check_interval(), debian.check_interval());
        assert_eq!(ubuntu.update_action_label(), debian.update_action_label());
    }
}

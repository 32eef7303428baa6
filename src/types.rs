/// Count reported by `--check` when the probe fails.
pub(crate) const PROBE_FAILED_SENTINEL: u32 = 9999;

/// Result of one update check, as handed from the polling thread to the UI.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum UpdateCount {
    Available(u32),
    /// The probe failed. Kept distinct from real counts but still surfaced so a
    /// broken backend never reads as "no updates".
    ProbeFailed,
}

impl Default for UpdateCount {
    fn default() -> Self {
        UpdateCount::Available(0)
    }
}

impl UpdateCount {
    pub(crate) fn reported_count(self) -> u32 {
        match self {
            UpdateCount::Available(count) => count,
            UpdateCount::ProbeFailed => PROBE_FAILED_SENTINEL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub(crate) fn success(&self) -> bool {
        self.code.unwrap_or(-1) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_count_is_zero() {
        assert_eq!(UpdateCount::default(), UpdateCount::Available(0));
    }

    #[test]
    fn probe_failure_reports_sentinel() {
        assert_eq!(UpdateCount::Available(7).reported_count(), 7);
        assert_eq!(
            UpdateCount::ProbeFailed.reported_count(),
            PROBE_FAILED_SENTINEL
        );
    }

    #[test]
    fn command_result_success_requires_zero_exit() {
        let mut result = CommandResult {
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(result.success());
        result.code = Some(1);
        assert!(!result.success());
        result.code = None;
        assert!(!result.success());
    }
}

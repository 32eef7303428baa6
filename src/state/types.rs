use crate::types::UpdateCount;

/// Everything that reaches the UI context goes through this message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum UiMessage {
    CountPublished(UpdateCount),
    RunUpdater,
    Exit,
}

/// What the indicator should look like for a given count.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Presentation {
    Hidden,
    Visible {
        title: &'static str,
        message: String,
        attention: bool,
    },
}

pub(crate) const UPDATES_AVAILABLE_TITLE: &str = "Updates available";
pub(crate) const CHECK_FAILED_TITLE: &str = "Update check failed";
pub(crate) const CHECK_FAILED_MESSAGE: &str = "Could not check for updates";

pub(crate) fn updates_available_message(count: u32) -> String {
    if count == 1 {
        "There is 1 update available".to_string()
    } else {
        format!("There are {} updates available", count)
    }
}

impl Presentation {
    pub(crate) fn for_count(count: UpdateCount) -> Self {
        match count {
            UpdateCount::Available(0) => Presentation::Hidden,
            UpdateCount::Available(count) => Presentation::Visible {
                title: UPDATES_AVAILABLE_TITLE,
                message: updates_available_message(count),
                attention: false,
            },
            UpdateCount::ProbeFailed => Presentation::Visible {
                title: CHECK_FAILED_TITLE,
                message: CHECK_FAILED_MESSAGE.to_string(),
                attention: true,
            },
        }
    }
}

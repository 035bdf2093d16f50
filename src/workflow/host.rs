/// Whether an alert reports good or bad news.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// A user-visible acknowledgment raised by a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The presentation layer a workflow reports back to.
pub trait Host {
    /// Shows an alert to the user.
    fn alert(&mut self, alert: Alert);

    /// Leaves the current screen for the previous one.
    fn navigate_back(&mut self);
}

/// A [`Host`] that buffers what it is told so the caller can apply it later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingHost {
    pub alerts: Vec<Alert>,
    pub navigated_back: usize,
}

impl Host for RecordingHost {
    fn alert(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    fn navigate_back(&mut self) {
        self.navigated_back += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        assert_eq!(Alert::success("a", "b").kind, AlertKind::Success);
        assert_eq!(Alert::error("a", "b").kind, AlertKind::Error);
    }

    #[test]
    fn recording_host_buffers_calls() {
        let mut host = RecordingHost::default();
        host.alert(Alert::error("Error", "nope"));
        host.navigate_back();
        assert_eq!(host.alerts, vec![Alert::error("Error", "nope")]);
        assert_eq!(host.navigated_back, 1);
    }
}

#![forbid(unsafe_code)]

//! Startup report handed back to the host page.

use limelight_core::SiteError;
use serde::Serialize;

/// Why a component did not fully attach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degraded {
    pub component: &'static str,
    pub reason: String,
}

/// Outcome of attaching every enabled component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttachReport {
    pub attached: Vec<&'static str>,
    pub degraded: Vec<Degraded>,
    pub skipped: Vec<&'static str>,
}

impl AttachReport {
    /// Record an attach result.
    pub fn record(&mut self, component: &'static str, result: Result<(), SiteError>) {
        match result {
            Ok(()) => self.attached.push(component),
            Err(err) => self.degraded.push(Degraded {
                component,
                reason: err.to_string(),
            }),
        }
    }

    /// Record a component disabled by configuration.
    pub fn skip(&mut self, component: &'static str) {
        self.skipped.push(component);
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_outcomes() {
        let mut report = AttachReport::default();
        report.record("navigation", Ok(()));
        report.record("visualizer", Err(SiteError::missing(".music")));
        report.skip("easter_egg");

        assert_eq!(report.attached, vec!["navigation"]);
        assert_eq!(
            report.degraded,
            vec![Degraded {
                component: "visualizer",
                reason: "missing element: .music".to_string(),
            }]
        );
        assert_eq!(
            report.to_json(),
            r#"{"attached":["navigation"],"degraded":[{"component":"visualizer","reason":"missing element: .music"}],"skipped":["easter_egg"]}"#
        );
    }
}

// src/ui/alert.rs
// =============================================================================
// Dismissible alert banners.
//
// show_alert() puts a Bootstrap alert on the page and starts a timer that
// takes it down again after ALERT_TIMEOUT. The user can also dismiss it
// earlier; removing an alert that is already gone is a no-op for the page.
//
// Rust concepts:
// - Arc<dyn Page>: the timer task outlives the call, so it needs its own
//   owned handle to the page
// - Handle::spawn + tokio::time::sleep: a background timer, like setTimeout
// =============================================================================

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::page::next_alert_id;
use super::{escape_html, Page};

/// How long an alert stays up.
pub const ALERT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
    Warning,
    Info,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Danger => "danger",
            AlertKind::Warning => "warning",
            AlertKind::Info => "info",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(AlertKind::Success),
            "danger" | "error" => Ok(AlertKind::Danger),
            "warning" => Ok(AlertKind::Warning),
            "info" => Ok(AlertKind::Info),
            other => Err(format!("unknown alert kind '{}'", other)),
        }
    }
}

/// Markup for one alert. The message is HTML-escaped.
pub fn render_alert(id: u64, message: &str, kind: AlertKind) -> String {
    format!(
        concat!(
            r#"<div id="alert-{id}" class="alert alert-{kind} alert-dismissible fade show" role="alert">"#,
            "{message}",
            r#"<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>"#,
            "</div>"
        ),
        id = id,
        kind = kind,
        message = escape_html(message),
    )
}

/// Shows an alert and schedules its removal after [`ALERT_TIMEOUT`].
///
/// The returned handle resolves once the alert has been removed; dropping it
/// does not cancel the timer. Outside a tokio runtime there is nothing to
/// run the timer on: the alert stays up and `None` is returned.
pub fn show_alert(
    page: &Arc<dyn Page>,
    message: &str,
    kind: AlertKind,
) -> Option<JoinHandle<()>> {
    let id = next_alert_id();
    page.insert_alert(id, &render_alert(id, message, kind));

    let Ok(runtime) = Handle::try_current() else {
        tracing::warn!(alert_id = id, "no tokio runtime, alert will not be removed");
        return None;
    };

    let page = Arc::clone(page);
    Some(runtime.spawn(async move {
        tokio::time::sleep(ALERT_TIMEOUT).await;
        page.remove_alert(id);
    }))
}

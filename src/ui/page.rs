// src/ui/page.rs
// =============================================================================
// The surface the presentation helpers draw on.
//
// In a browser this would be the document: an alert container, a navbar
// element and window.location. Here it is a trait, so the same helpers can
// target a terminal or a test double.
//
// Methods take &self and implementations must be Send + Sync: alerts are
// removed from a spawned timer task that holds an Arc<dyn Page>.
// =============================================================================

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Callback run when the navbar's logout button is pressed.
pub type LogoutHandler = Box<dyn Fn() + Send + Sync>;

pub trait Page: Send + Sync {
    /// Adds an alert element with the given id and markup.
    fn insert_alert(&self, id: u64, html: &str);

    /// Removes an alert if it is still shown.
    fn remove_alert(&self, id: u64);

    /// Replaces the navbar's contents.
    fn set_navbar(&self, html: &str);

    /// Goes to another page (e.g. `login.html`).
    fn navigate(&self, target: &str);

    /// Binds `handler` to the `#logoutBtn` button, replacing any earlier
    /// binding.
    fn on_logout(&self, handler: LogoutHandler);
}

static NEXT_ALERT_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_alert_id() -> u64 {
    NEXT_ALERT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Renders onto stderr. Alerts are printed as their plain text, the navbar
/// is ignored and navigation is only logged.
#[derive(Debug, Default)]
pub struct TerminalPage;

impl Page for TerminalPage {
    fn insert_alert(&self, _id: u64, html: &str) {
        let text = super::strip_tags(html);
        // stdout stays reserved for command output (and --json)
        let _ = writeln!(std::io::stderr(), "{}", text.trim());
    }

    fn remove_alert(&self, _id: u64) {}

    fn set_navbar(&self, _html: &str) {}

    fn navigate(&self, target: &str) {
        tracing::info!(target_page = target, "navigate");
    }

    // No button to press; `tradeco logout` does the same thing
    fn on_logout(&self, _handler: LogoutHandler) {}
}

// src/ui/test_support.rs
// A Page that just remembers what was drawn on it.

use std::sync::Mutex;

use super::{LogoutHandler, Page};

#[derive(Default)]
pub struct RecordingPage {
    alerts: Mutex<Vec<(u64, String)>>,
    navbar: Mutex<String>,
    navigations: Mutex<Vec<String>>,
    logout: Mutex<Option<LogoutHandler>>,
}

impl RecordingPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the alerts currently shown, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap()
            .iter()
            .map(|(_, html)| html.clone())
            .collect()
    }

    pub fn navbar(&self) -> String {
        self.navbar.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    /// Presses the logout button. Returns false if nothing is bound to it.
    pub fn click_logout(&self) -> bool {
        match self.logout.lock().unwrap().as_ref() {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

impl Page for RecordingPage {
    fn insert_alert(&self, id: u64, html: &str) {
        self.alerts.lock().unwrap().push((id, html.to_string()));
    }

    fn remove_alert(&self, id: u64) {
        self.alerts.lock().unwrap().retain(|(shown, _)| *shown != id);
    }

    fn set_navbar(&self, html: &str) {
        *self.navbar.lock().unwrap() = html.to_string();
    }

    fn navigate(&self, target: &str) {
        self.navigations.lock().unwrap().push(target.to_string());
    }

    fn on_logout(&self, handler: LogoutHandler) {
        *self.logout.lock().unwrap() = Some(handler);
    }
}

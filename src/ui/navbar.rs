// src/ui/navbar.rs
// Navbar rendering and the login guard for protected pages.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::runtime::Handle;

use super::alert::{show_alert, AlertKind};
use super::{escape_html, Page};
use crate::api::sign_out;
use crate::session::Session;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PAGE: &str = "login.html";

/// Delay before the login redirect, so the warning can be read.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

pub const LOGIN_REQUIRED_WARNING: &str = "Debes iniciar sesión para acceder a esta página";

/// Guards a page that needs a logged-in user.
///
/// Returns true when a token is stored. Otherwise shows a warning, schedules
/// a redirect to the login page after [`REDIRECT_DELAY`] and returns false.
/// Outside a tokio runtime the redirect happens right away.
pub fn require_auth(session: &Session, page: &Arc<dyn Page>) -> bool {
    if session.is_authenticated() {
        return true;
    }

    show_alert(page, LOGIN_REQUIRED_WARNING, AlertKind::Warning);

    match Handle::try_current() {
        Ok(runtime) => {
            let page = Arc::clone(page);
            runtime.spawn(async move {
                tokio::time::sleep(REDIRECT_DELAY).await;
                page.navigate(LOGIN_PAGE);
            });
        }
        Err(_) => {
            tracing::warn!("no tokio runtime, redirecting to login without delay");
            page.navigate(LOGIN_PAGE);
        }
    }

    false
}

/// Navbar markup for the given user snapshot (`None` = anonymous).
pub fn render_navbar(user: Option<&Value>) -> String {
    let Some(user) = user else {
        return concat!(
            r#"<li class="nav-item"><a class="nav-link" href="login.html">Iniciar Sesión</a></li>"#,
            r#"<li class="nav-item"><a class="nav-link" href="register.html">Registrarse</a></li>"#,
        )
        .to_string();
    };

    let username = user
        .get("username")
        .and_then(Value::as_str)
        .unwrap_or("Usuario");

    format!(
        concat!(
            r#"<li class="nav-item"><a class="nav-link" href="create-product.html">Publicar</a></li>"#,
            r#"<li class="nav-item"><a class="nav-link" href="my-transactions.html">Mis Transacciones</a></li>"#,
            r#"<li class="nav-item"><a class="nav-link" href="profile.html">Hola, {username}</a></li>"#,
            r#"<li class="nav-item"><button id="logoutBtn" class="btn btn-outline-light btn-sm">Cerrar Sesión</button></li>"#,
        ),
        username = escape_html(username),
    )
}

/// Draws the navbar for the current session.
///
/// Logged-in users get their name and a `#logoutBtn` button. The button is
/// bound to clear the session and go to the landing page, like
/// [`crate::api::ApiClient::logout`]. A token without a readable user
/// snapshot still counts as logged in and is greeted as "Usuario".
pub fn update_navbar(session: &Session, page: &Arc<dyn Page>) {
    if !session.is_authenticated() {
        page.set_navbar(&render_navbar(None));
        return;
    }

    let user = session
        .current_user()
        .unwrap_or_else(|| Value::Object(Default::default()));
    page.set_navbar(&render_navbar(Some(&user)));

    // Weak, so a page holding its own handler is not kept alive by it
    let session = session.clone();
    let target = Arc::downgrade(page);
    page.on_logout(Box::new(move || {
        if let Some(page) = target.upgrade() {
            sign_out(&session, page.as_ref());
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LANDING_PAGE;
    use crate::session::{MemoryStorage, Storage, TOKEN_KEY, USER_KEY};
    use crate::ui::test_support::RecordingPage;
    use scraper::{Html, Selector};
    use serde_json::json;

    fn links(html: &str) -> Vec<String> {
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse("a.nav-link").unwrap();
        fragment
            .select(&selector)
            .filter_map(|a| a.value().attr("href").map(str::to_string))
            .collect()
    }

    #[test]
    fn test_anonymous_navbar() {
        let html = render_navbar(None);
        assert_eq!(links(&html), vec!["login.html", "register.html"]);
        assert!(!html.contains("logoutBtn"));
    }

    #[test]
    fn test_logged_in_navbar_shows_username_and_logout() {
        let user = json!({"username": "ana<b>"});
        let html = render_navbar(Some(&user));
        let fragment = Html::parse_fragment(&html);

        let logout = Selector::parse("button#logoutBtn").unwrap();
        assert!(fragment.select(&logout).next().is_some());

        let profile = Selector::parse(r#"a[href="profile.html"]"#).unwrap();
        let greeting: String = fragment.select(&profile).next().unwrap().text().collect();
        assert_eq!(greeting, "Hola, ana<b>");
    }

    fn recording() -> (Arc<RecordingPage>, Arc<dyn Page>) {
        let recorder = Arc::new(RecordingPage::new());
        let page: Arc<dyn Page> = recorder.clone();
        (recorder, page)
    }

    #[test]
    fn test_update_navbar_follows_session() {
        let session = Session::in_memory();
        let (recorder, page) = recording();

        update_navbar(&session, &page);
        assert!(recorder.navbar().contains("login.html"));
        assert!(!recorder.click_logout());

        session.store_auth("jwt-123", &json!({"username": "ana"}));
        update_navbar(&session, &page);
        assert!(recorder.navbar().contains("Hola, ana"));
    }

    #[test]
    fn test_logout_button_clears_session_and_goes_home() {
        let session = Session::in_memory();
        session.store_auth("jwt-123", &json!({"username": "ana"}));
        let (recorder, page) = recording();

        update_navbar(&session, &page);
        assert!(recorder.click_logout());

        assert_eq!(session.token(), None);
        assert_eq!(session.current_user(), None);
        assert_eq!(recorder.navigations(), vec![LANDING_PAGE.to_string()]);
    }

    #[test]
    fn test_token_without_user_snapshot_is_logged_in_navbar() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "jwt-123").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();
        let session = Session::new(storage);
        let (recorder, page) = recording();

        update_navbar(&session, &page);

        let html = recorder.navbar();
        assert!(html.contains("Hola, Usuario"));
        assert!(html.contains("logoutBtn"));
        assert!(!html.contains("login.html"));
    }

    #[test]
    fn test_require_auth_without_runtime_redirects_at_once() {
        let session = Session::in_memory();
        let (recorder, page) = recording();

        assert!(!require_auth(&session, &page));

        assert_eq!(recorder.alerts().len(), 1);
        assert_eq!(recorder.navigations(), vec![LOGIN_PAGE.to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_require_auth_passes_with_token() {
        let session = Session::in_memory();
        session.store_auth("jwt-123", &json!({"username": "ana"}));
        let recorder = Arc::new(RecordingPage::new());
        let page: Arc<dyn Page> = recorder.clone();

        assert!(require_auth(&session, &page));

        tokio::time::sleep(REDIRECT_DELAY * 2).await;
        assert!(recorder.alerts().is_empty());
        assert!(recorder.navigations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_require_auth_warns_then_redirects_after_delay() {
        let session = Session::in_memory();
        let recorder = Arc::new(RecordingPage::new());
        let page: Arc<dyn Page> = recorder.clone();

        assert!(!require_auth(&session, &page));

        let alerts = recorder.alerts();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("alert-warning"));
        assert!(alerts[0].contains(LOGIN_REQUIRED_WARNING));
        assert!(recorder.navigations().is_empty());

        tokio::time::sleep(REDIRECT_DELAY - Duration::from_millis(1)).await;
        assert!(recorder.navigations().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(recorder.navigations(), vec![LOGIN_PAGE.to_string()]);
    }
}

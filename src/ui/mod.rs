// src/ui/mod.rs
// =============================================================================
// Presentation helpers: alerts, the login guard, the navbar, badges and
// date/price formatting.
//
// Nothing here talks to the API. Everything that touches "the page" goes
// through the Page trait (page.rs).
// =============================================================================

mod alert;
mod badges;
mod format;
mod navbar;
mod page;

#[cfg(test)]
pub(crate) mod test_support;

pub use alert::{render_alert, show_alert, AlertKind, ALERT_TIMEOUT};
pub use badges::{
    category_badge, get_category_badge, get_product_status_badge, get_status_badge,
    product_status_badge, transaction_badge, Badge,
};
pub use format::{format_date, format_price, INVALID_DATE, NO_DATE};
pub use navbar::{
    render_navbar, require_auth, update_navbar, LOGIN_PAGE, LOGIN_REQUIRED_WARNING,
    REDIRECT_DELAY,
};
pub use page::{LogoutHandler, Page, TerminalPage};

use scraper::Html;

/// Escapes text for use inside HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// The visible text of an HTML fragment, entities decoded.
pub fn strip_tags(html: &str) -> String {
    Html::parse_fragment(html).root_element().text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(escape_html("Remera talle M"), "Remera talle M");
    }

    #[test]
    fn test_strip_tags() {
        let html = render_alert(3, "Precio < 100 & envío gratis", AlertKind::Info);
        assert_eq!(strip_tags(&html), "Precio < 100 & envío gratis");
        assert_eq!(strip_tags(&get_status_badge("completada")), "Completada");
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Banner rendering for individual notifications.
//!
//! Banners are the visual representation of notifications: a dismissible
//! alert box tagged with the notification ID, a kind icon and the message.

use super::notification::{Notification, Text};
use crate::i18n::fluent::I18n;
use maud::{html, Markup};

/// Banner renderer.
pub struct Banner;

impl Banner {
    /// Resolves the message of a notification in the current locale.
    #[must_use]
    pub fn message(notification: &Notification, i18n: &I18n) -> String {
        Self::resolve(notification.text(), i18n)
    }

    /// Resolves any banner or prompt text in the current locale.
    #[must_use]
    pub fn resolve(text: &Text, i18n: &I18n) -> String {
        match text {
            Text::Literal(text) => text.clone(),
            Text::Key { key, args } if args.is_empty() => i18n.tr(key),
            Text::Key { key, args } => {
                let args: Vec<(&str, &str)> = args
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                i18n.tr_with_args(key, &args)
            }
        }
    }

    /// Banner markup for one notification.
    #[must_use]
    pub fn markup(notification: &Notification, i18n: &I18n) -> Markup {
        let kind = notification.kind();
        let id = notification.id().to_string();
        html! {
            div class={ "alert " (kind.css_class()) " alert-dismissible fade show" } id=(id) role="alert" {
                i class={ "fas fa-" (kind.icon()) } {}
                " " (Self::message(notification, i18n))
                button type="button" class="btn-close" data-dismiss=(id) aria-label="Close" {}
            }
        }
    }

    /// Renders a single banner as an HTML string.
    #[must_use]
    pub fn render(notification: &Notification, i18n: &I18n) -> String {
        Self::markup(notification, i18n).into_string()
    }

    /// Renders the banner stack, newest first, inside a fixed container.
    #[must_use]
    pub fn render_stack(notifications: &[Notification], i18n: &I18n) -> String {
        html! {
            div class="alert-stack" {
                @for notification in notifications {
                    (Self::markup(notification, i18n))
                }
            }
        }
        .into_string()
    }

    /// One-line rendering for terminals.
    #[must_use]
    pub fn line(notification: &Notification, i18n: &I18n) -> String {
        let marker = match notification.kind() {
            super::Kind::Success => "[ok]",
            super::Kind::Error => "[error]",
            super::Kind::Warning => "[warn]",
            super::Kind::Info => "[info]",
        };
        format!("{marker} {}", Self::message(notification, i18n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ui::notifications::Kind;

    fn english() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    #[test]
    fn banner_carries_id_class_and_icon() {
        let notification = Notification::new(Kind::Error, "failed");
        let html = Banner::render(&notification, &english());

        assert!(html.contains(&format!(r#"id="{}""#, notification.id())));
        assert!(html.contains("alert-danger"));
        assert!(html.contains("fa-exclamation-triangle"));
        assert!(html.contains("btn-close"));
    }

    #[test]
    fn server_text_is_escaped() {
        let notification = Notification::success("<b>added</b>");
        let html = Banner::render(&notification, &english());
        assert!(html.contains("&lt;b&gt;added&lt;/b&gt;"));
        assert!(!html.contains("<b>"));

        let quoted = Notification::error(r#"say "hi" & <go>"#);
        let html = Banner::render(&quoted, &english());
        assert!(html.contains("say &quot;hi&quot; &amp; &lt;go&gt;"));
    }

    #[test]
    fn stack_is_wrapped_in_container() {
        let html = Banner::render_stack(&[Notification::info("only")], &english());
        assert!(html.starts_with(r#"<div class="alert-stack">"#));
        assert!(html.contains(r#"class="alert alert-info alert-dismissible fade show""#));
        assert!(html.ends_with("</div></div>"));
        assert_eq!(Banner::render_stack(&[], &english()), r#"<div class="alert-stack"></div>"#);
    }

    #[test]
    fn keyed_text_is_translated() {
        let notification = Notification::error(Text::key("request-failed"));
        let message = Banner::message(&notification, &english());
        assert!(!message.starts_with("MISSING"));
    }

    #[test]
    fn stack_keeps_order() {
        let first = Notification::info("first");
        let second = Notification::info("second");
        let html = Banner::render_stack(&[second, first], &english());
        let second_at = html.find("second").unwrap();
        let first_at = html.find("first").unwrap();
        assert!(second_at < first_at);
    }

    #[test]
    fn line_prefixes_kind() {
        let notification = Notification::warning("careful");
        assert_eq!(Banner::line(&notification, &english()), "[warn] careful");
    }
}

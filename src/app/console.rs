// SPDX-License-Identifier: MPL-2.0
//! Terminal front end for the page effects.
//!
//! Prints effects as lines, asks confirmations on the input stream and
//! renders the order table with the display helpers.

use crate::cafe::api::OrderSummary;
use crate::format::{format_date, format_price, parse_server_datetime, truncate};
use crate::i18n::fluent::I18n;
use crate::ui::notifications::{Banner, NotificationId, Notifier, Text};
use crate::ui::page::Page;
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// Storage key of the last known cart count.
pub const CART_COUNT_KEY: &str = "cart_count";

const ORDER_DATE_PATTERN: &str = "MM-DD HH:mm";
const ORDER_REQUEST_LEN: usize = 30;

pub struct ConsolePage<'a, R, W> {
    i18n: &'a I18n,
    input: R,
    output: W,
    assume_yes: bool,
    cart_count: Option<u32>,
    notifier: Option<Notifier>,
    printed: HashSet<NotificationId>,
}

impl<'a, R: BufRead, W: Write> ConsolePage<'a, R, W> {
    pub fn new(i18n: &'a I18n, input: R, output: W) -> Self {
        Self {
            i18n,
            input,
            output,
            assume_yes: false,
            cart_count: None,
            notifier: None,
            printed: HashSet::new(),
        }
    }

    /// Prints the banners of `notifier` as they are raised.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Accepts every confirmation without reading input.
    #[must_use]
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Cart count reported by the last action, if any.
    #[must_use]
    pub fn cart_count(&self) -> Option<u32> {
        self.cart_count
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, line: &str) {
        if let Err(err) = writeln!(self.output, "{line}") {
            tracing::warn!(error = %err, "failed to write to console");
        }
    }
}

/// One table line for an order.
#[must_use]
pub fn order_line(order: &OrderSummary) -> String {
    let date = order
        .order_date
        .as_deref()
        .and_then(parse_server_datetime)
        .map(|dt| format_date(&dt, ORDER_DATE_PATTERN))
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "#{:<5} {date}  {:<10} {:<10} {:>10}",
        order.id,
        order.status,
        order.customer_name,
        format_price(order.total_amount),
    );
    if let Some(request) = order.order_request.as_deref().filter(|r| !r.is_empty()) {
        line.push_str("  ");
        line.push_str(&truncate(request, ORDER_REQUEST_LEN));
    }
    line
}

impl<R: BufRead, W: Write> Page for ConsolePage<'_, R, W> {
    fn set_cart_count(&mut self, count: u32) {
        self.cart_count = Some(count);
        if count > 0 {
            let count = count.to_string();
            let line = self.i18n.tr_with_args("cart-count", &[("count", count.as_str())]);
            self.emit(&line);
        }
    }

    fn confirm(&mut self, prompt: &Text) -> bool {
        let question = format!("{} {}", Banner::resolve(prompt, self.i18n), self.i18n.tr("confirm-hint"));
        if self.assume_yes {
            self.emit(&format!("{question} y"));
            return true;
        }

        if let Err(err) = write!(self.output, "{question} ").and_then(|()| self.output.flush()) {
            tracing::warn!(error = %err, "failed to write prompt");
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read confirmation");
                false
            }
        }
    }

    fn reload(&mut self) {
        let line = self.i18n.tr("page-reload");
        self.emit(&line);
    }

    fn remove_order_row(&mut self, order_id: u64) {
        let id = order_id.to_string();
        let line = self.i18n.tr_with_args("order-row-removed", &[("id", id.as_str())]);
        self.emit(&line);
    }

    fn show_orders(&mut self, orders: &[OrderSummary]) {
        let count = orders.len().to_string();
        let header = self.i18n.tr_with_args("orders-refreshed", &[("count", count.as_str())]);
        self.emit(&header);
        for order in orders {
            self.emit(&order_line(order));
        }
    }

    fn show_banners(&mut self) {
        let Some(notifier) = self.notifier.clone() else {
            return;
        };
        let visible = notifier.snapshot();
        // Only ids still on screen can show up again.
        self.printed.retain(|id| visible.iter().any(|n| n.id() == *id));

        for notification in visible.iter().rev() {
            if self.printed.insert(notification.id()) {
                let line = Banner::line(notification, self.i18n);
                self.emit(&line);
            }
        }
    }
}

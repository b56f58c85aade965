// SPDX-License-Identifier: MPL-2.0
//! Page-level side effects triggered by feature actions.
//!
//! Controllers never touch the rendered page directly; they go through the
//! [`Page`] trait so the same flows drive a terminal front end or a test.

use crate::cafe::api::OrderSummary;
use crate::ui::notifications::Text;
use std::collections::BTreeSet;

pub trait Page {
    /// Updates the cart counter. The counter is visible only when `count > 0`.
    fn set_cart_count(&mut self, count: u32);

    /// Asks the user to confirm a destructive action.
    fn confirm(&mut self, prompt: &Text) -> bool;

    /// Reloads the current page.
    fn reload(&mut self);

    /// Removes the row of a deleted order from the order table.
    fn remove_order_row(&mut self, order_id: u64);

    /// Replaces the order table with freshly fetched orders.
    fn show_orders(&mut self, orders: &[OrderSummary]);

    /// Presents banners raised since the last call.
    ///
    /// Called between the steps of long-running actions. Pages that render
    /// the notification stack live have nothing to do here.
    fn show_banners(&mut self) {}
}

/// In-memory page that records every effect applied to it.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    cart_count: u32,
    reloads: usize,
    confirmations: Vec<Text>,
    accept_confirm: bool,
    order_rows: BTreeSet<u64>,
    orders: Vec<OrderSummary>,
}

impl PageState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every confirmation prompt with `accept`.
    #[must_use]
    pub fn confirming(mut self, accept: bool) -> Self {
        self.accept_confirm = accept;
        self
    }

    /// Seeds the order table with rows.
    #[must_use]
    pub fn with_order_rows(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.order_rows.extend(ids);
        self
    }

    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.cart_count
    }

    #[must_use]
    pub fn cart_counter_visible(&self) -> bool {
        self.cart_count > 0
    }

    #[must_use]
    pub fn reloads(&self) -> usize {
        self.reloads
    }

    /// Prompts shown so far, in order.
    #[must_use]
    pub fn confirmations(&self) -> &[Text] {
        &self.confirmations
    }

    #[must_use]
    pub fn has_order_row(&self, order_id: u64) -> bool {
        self.order_rows.contains(&order_id)
    }

    #[must_use]
    pub fn orders(&self) -> &[OrderSummary] {
        &self.orders
    }
}

impl Page for PageState {
    fn set_cart_count(&mut self, count: u32) {
        self.cart_count = count;
    }

    fn confirm(&mut self, prompt: &Text) -> bool {
        self.confirmations.push(prompt.clone());
        self.accept_confirm
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }

    fn remove_order_row(&mut self, order_id: u64) {
        self.order_rows.remove(&order_id);
    }

    fn show_orders(&mut self, orders: &[OrderSummary]) {
        self.order_rows = orders.iter().map(|o| o.id).collect();
        self.orders = orders.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_counter_hidden_at_zero() {
        let mut page = PageState::new();
        assert!(!page.cart_counter_visible());

        page.set_cart_count(2);
        assert!(page.cart_counter_visible());

        page.set_cart_count(0);
        assert!(!page.cart_counter_visible());
    }

    #[test]
    fn confirm_records_prompt() {
        let mut page = PageState::new().confirming(true);
        let prompt = Text::key("cart-clear-confirm");
        assert!(page.confirm(&prompt));
        assert_eq!(page.confirmations(), [prompt.clone()]);

        let mut page = PageState::new();
        assert!(!page.confirm(&prompt));
    }

    #[test]
    fn removing_rows() {
        let mut page = PageState::new().with_order_rows([1, 2, 3]);
        page.remove_order_row(2);
        assert!(page.has_order_row(1));
        assert!(!page.has_order_row(2));
        page.remove_order_row(99);
        assert!(page.has_order_row(3));
    }
}

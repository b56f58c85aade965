// SPDX-License-Identifier: MPL-2.0
//! Cart actions available on customer pages.

use super::api::{AddToCartResponse, ApiResponse};
use super::{reject, Outcome};
use crate::gateway::{Gateway, Request};
use crate::ui::notifications::Text;
use crate::ui::page::Page;
use serde_json::{Map, Value};

pub const ITEM_ADDED_KEY: &str = "cart-item-added";
pub const CLEAR_CONFIRM_KEY: &str = "cart-clear-confirm";
pub const CLEARED_KEY: &str = "cart-cleared";

#[derive(Debug, Clone, Copy)]
pub struct Cart<'a> {
    gateway: &'a Gateway,
}

impl<'a> Cart<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Adds `quantity` of a menu item to the cart.
    ///
    /// `options` (temperature, special request, ...) are merged into the
    /// request body after `menu_id` and `quantity`.
    pub async fn add_item(
        &self,
        page: &mut impl Page,
        menu_id: u64,
        quantity: u32,
        options: Map<String, Value>,
    ) -> Outcome {
        let mut body = Map::new();
        body.insert("menu_id".into(), menu_id.into());
        body.insert("quantity".into(), quantity.into());
        body.extend(options);

        let request = Request::post("/user/add_to_cart").with_payload(Value::Object(body));
        let Some(reply) = self.gateway.send_or_notify::<AddToCartResponse>(request).await else {
            return Outcome::Failed;
        };

        if !reply.success {
            tracing::info!(menu_id, "add to cart rejected");
            return reject(self.gateway.notifier(), reply.message);
        }

        let text = reply
            .message
            .map_or_else(|| Text::key(ITEM_ADDED_KEY), Text::literal);
        self.gateway.notifier().success(text);
        if let Some(count) = reply.cart_count {
            page.set_cart_count(count);
        }
        tracing::debug!(menu_id, quantity, cart_count = reply.cart_count, "item added to cart");
        Outcome::Done
    }

    /// Empties the cart after confirmation, then reloads the page.
    pub async fn clear(&self, page: &mut impl Page) -> Outcome {
        if !page.confirm(&Text::key(CLEAR_CONFIRM_KEY)) {
            return Outcome::Cancelled;
        }

        let request = Request::post("/user/clear_cart");
        let Some(reply) = self.gateway.send_or_notify::<ApiResponse>(request).await else {
            return Outcome::Failed;
        };

        if !reply.success {
            return reject(self.gateway.notifier(), reply.message);
        }

        self.gateway.notifier().success(Text::key(CLEARED_KEY));
        page.reload();
        Outcome::Done
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Staff actions on the admin dashboard: order status, sold-out toggles,
//! order deletion and the periodic order refresh.

use super::api::{ApiResponse, OrderStatus, RecentOrdersResponse, ToggleSoldoutResponse};
use super::{reject, Outcome};
use crate::config::RELOAD_DELAY_MS;
use crate::gateway::{Gateway, Request};
use crate::ui::notifications::Text;
use crate::ui::page::Page;
use serde_json::json;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub const STATUS_UPDATED_KEY: &str = "order-status-updated";
pub const MENU_STATUS_CHANGED_KEY: &str = "menu-status-changed";
pub const DELETE_CONFIRM_KEY: &str = "order-delete-confirm";
pub const ORDER_DELETED_KEY: &str = "order-deleted";

#[derive(Debug, Clone, Copy)]
pub struct Admin<'a> {
    gateway: &'a Gateway,
    reload_delay: Duration,
}

impl<'a> Admin<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway) -> Self {
        Self {
            gateway,
            reload_delay: Duration::from_millis(RELOAD_DELAY_MS),
        }
    }

    /// Overrides the pause between a sold-out toggle and the page reload.
    #[must_use]
    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    #[must_use]
    pub fn reload_delay(&self) -> Duration {
        self.reload_delay
    }

    pub async fn update_order_status(&self, order_id: u64, status: OrderStatus) -> Outcome {
        let request = Request::post(format!("/admin/update_order_status/{order_id}"))
            .with_payload(json!({ "status": status }));
        let Some(reply) = self.gateway.send_or_notify::<ApiResponse>(request).await else {
            return Outcome::Failed;
        };

        if !reply.success {
            tracing::info!(order_id, %status, "status update rejected");
            return reject(self.gateway.notifier(), reply.message);
        }

        tracing::info!(order_id, %status, "order status updated");
        self.gateway.notifier().success(Text::key(STATUS_UPDATED_KEY));
        Outcome::Done
    }

    /// Flips the sold-out flag of a menu item.
    ///
    /// The success banner is raised first; the page reloads once the reload
    /// delay has passed.
    pub async fn toggle_menu_soldout(&self, page: &mut impl Page, menu_id: u64) -> Outcome {
        let request = Request::post(format!("/admin/menu/toggle_soldout/{menu_id}"));
        let Some(reply) = self
            .gateway
            .send_or_notify::<ToggleSoldoutResponse>(request)
            .await
        else {
            return Outcome::Failed;
        };

        if !reply.success {
            return reject(self.gateway.notifier(), reply.message);
        }

        let status = reply.status.unwrap_or_default();
        tracing::info!(menu_id, status = %status, "menu availability changed");
        self.gateway
            .notifier()
            .success(Text::key(MENU_STATUS_CHANGED_KEY).with_arg("status", status));
        page.show_banners();

        tokio::time::sleep(self.reload_delay).await;
        page.reload();
        Outcome::Done
    }

    /// Deletes an order after confirmation and drops its row from the table.
    pub async fn delete_order(&self, page: &mut impl Page, order_id: u64) -> Outcome {
        if !page.confirm(&Text::key(DELETE_CONFIRM_KEY)) {
            return Outcome::Cancelled;
        }

        let request = Request::post(format!("/admin/delete_order/{order_id}"));
        let Some(reply) = self.gateway.send_or_notify::<ApiResponse>(request).await else {
            return Outcome::Failed;
        };

        if !reply.success {
            return reject(self.gateway.notifier(), reply.message);
        }

        tracing::info!(order_id, "order deleted");
        self.gateway.notifier().success(Text::key(ORDER_DELETED_KEY));
        page.remove_order_row(order_id);
        Outcome::Done
    }

    /// Fetches the most recent orders and hands them to the page.
    pub async fn refresh_orders(&self, page: &mut impl Page) -> Outcome {
        let request = Request::get("/admin/get_recent_orders");
        let Some(reply) = self
            .gateway
            .send_or_notify::<RecentOrdersResponse>(request)
            .await
        else {
            return Outcome::Failed;
        };

        if !reply.success {
            return reject(self.gateway.notifier(), reply.message);
        }

        tracing::debug!(count = reply.orders.len(), "recent orders refreshed");
        page.show_orders(&reply.orders);
        Outcome::Done
    }

    /// Refreshes the order table every `period` until `shutdown` resolves.
    ///
    /// The first refresh happens immediately. Returns the number of
    /// refreshes attempted.
    pub async fn watch_orders(
        &self,
        page: &mut impl Page,
        period: Duration,
        shutdown: impl Future<Output = ()>,
    ) -> usize {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut rounds = 0;
        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => {
                    rounds += 1;
                    if !self.refresh_orders(page).await.is_done() {
                        tracing::warn!(round = rounds, "order refresh failed, retrying next period");
                    }
                    page.show_banners();
                }
            }
        }
        tracing::debug!(rounds, "stopped watching orders");
        rounds
    }
}

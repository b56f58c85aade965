// SPDX-License-Identifier: MPL-2.0
//! The HTTP side of the gateway.

use super::request::Request;
use super::RequestError;
use crate::config::Config;
use crate::ui::notifications::{Notifier, Text};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Key of the generic failure banner.
pub const REQUEST_FAILED_KEY: &str = "request-failed";

/// Uniform wrapper around outbound calls to the café server.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
    base_url: Url,
    notifier: Notifier,
}

impl Gateway {
    /// Builds a gateway for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        notifier: Notifier,
    ) -> Result<Self, RequestError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RequestError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("cafe-client/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            notifier,
        })
    }

    /// Builds a gateway from the base URL and timeout in `config`.
    ///
    /// # Errors
    ///
    /// See [`Gateway::new`].
    pub fn from_config(config: &Config, notifier: Notifier) -> Result<Self, RequestError> {
        Self::new(config.base_url(), config.request_timeout(), notifier)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Resolves a request target against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidUrl`] if the target cannot be joined.
    pub fn resolve(&self, target: &str) -> Result<Url, RequestError> {
        self.base_url
            .join(target)
            .map_err(|e| RequestError::InvalidUrl(format!("{target}: {e}")))
    }

    /// Sends `request` and decodes the JSON response as `T`.
    ///
    /// Any 2xx response whose body decodes is a success; interpreting an
    /// application-level `success` flag inside `T` is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns the [`RequestError`] describing the transport, status or
    /// decoding failure. No notification is raised.
    pub async fn send<T: DeserializeOwned>(&self, request: Request) -> Result<T, RequestError> {
        let url = self.resolve(request.target())?;
        let method = request.method();
        tracing::debug!(%method, %url, "sending request");

        let mut builder = self
            .client
            .request(method.as_reqwest(), url.clone())
            .header(ACCEPT, "application/json");

        if method.uses_query() {
            let pairs = request.query_pairs()?;
            if !pairs.is_empty() {
                builder = builder.query(&pairs);
            }
        } else if let Some(payload) = request.payload() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(payload.to_string());
        }

        let response = builder.send().await.map_err(RequestError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(RequestError::from_reqwest)?;
        serde_json::from_str(&body).map_err(|e| RequestError::Decode(e.to_string()))
    }

    /// Sends `request`, routing any failure to a generic error banner.
    ///
    /// This is the path for callers that have no failure handling of their
    /// own: exactly one error notification is shown per failed call.
    pub async fn send_or_notify<T: DeserializeOwned>(&self, request: Request) -> Option<T> {
        let method = request.method();
        let path = request.target().to_string();
        match self.send(request).await {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(%method, path, error = %err, "request failed");
                self.notifier.error(Text::key(REQUEST_FAILED_KEY));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notifications::Kind;
    use mockito::Matcher;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        success: bool,
    }

    fn gateway_for(url: &str) -> Gateway {
        Gateway::new(url, None, Notifier::default()).expect("valid base url")
    }

    /// A base URL nothing is listening on.
    fn closed_port_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = Gateway::new("not a url", None, Notifier::default());
        assert!(matches!(result, Err(RequestError::InvalidUrl(_))));
    }

    #[test]
    fn targets_resolve_against_base() {
        let gateway = gateway_for("http://cafe.local:5000");
        let url = gateway.resolve("/admin/delete_order/9").unwrap();
        assert_eq!(url.as_str(), "http://cafe.local:5000/admin/delete_order/9");
    }

    #[tokio::test]
    async fn get_payload_goes_into_query_string() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/user/menu")
            .match_query(Matcher::UrlEncoded("category".into(), "커피".into()))
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server.url());
        let reply: Reply = gateway
            .send(Request::get("/user/menu").with_payload(json!({"category": "커피"})))
            .await
            .unwrap();

        assert!(reply.success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn post_payload_is_a_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/admin/update_order_status/5")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"status": "ready"})))
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server.url());
        let reply: Reply = gateway
            .send(Request::post("/admin/update_order_status/5").with_payload(json!({"status": "ready"})))
            .await
            .unwrap();

        assert_eq!(reply, Reply { success: true });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_is_a_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/user/clear_cart")
            .with_status(500)
            .create_async()
            .await;

        let gateway = gateway_for(&server.url());
        let result: Result<Reply, _> = gateway.send(Request::post("/user/clear_cart")).await;
        assert_eq!(result, Err(RequestError::Status(500)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/user/clear_cart")
            .with_status(200)
            .with_body("<html>login</html>")
            .create_async()
            .await;

        let gateway = gateway_for(&server.url());
        let result: Result<Reply, _> = gateway.send(Request::post("/user/clear_cart")).await;
        assert!(matches!(result, Err(RequestError::Decode(_))));
    }

    #[tokio::test]
    async fn transport_failure_without_handler_notifies_once() {
        let gateway = gateway_for(&closed_port_url());

        let reply: Option<Reply> = gateway.send_or_notify(Request::post("/user/clear_cart")).await;

        assert!(reply.is_none());
        let banners = gateway.notifier().snapshot();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].kind(), Kind::Error);
        assert_eq!(banners[0].text(), &Text::key(REQUEST_FAILED_KEY));
    }

    #[tokio::test]
    async fn transport_failure_with_handler_is_silent() {
        let gateway = gateway_for(&closed_port_url());

        let result: Result<Reply, _> = gateway.send(Request::post("/user/clear_cart")).await;

        assert!(matches!(result, Err(RequestError::Transport(_))));
        assert_eq!(gateway.notifier().visible_count(), 0);
    }

    #[tokio::test]
    async fn put_sends_json_and_delete_sends_no_body() {
        let mut server = mockito::Server::new_async().await;
        let put = server
            .mock("PUT", "/admin/menu/7")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"price": 5000})))
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/admin/menu/7")
            .match_header("accept", "application/json")
            .match_body("")
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server.url());
        let updated: Reply = gateway
            .send(Request::put("/admin/menu/7").with_payload(json!({"price": 5000})))
            .await
            .unwrap();
        let deleted: Reply = gateway.send(Request::delete("/admin/menu/7")).await.unwrap();

        assert!(updated.success && deleted.success);
        put.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn configured_timeout_cuts_off_silent_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let gateway =
            Gateway::new(&url, Some(Duration::from_millis(200)), Notifier::default()).unwrap();

        let result: Result<Reply, _> = gateway.send(Request::post("/user/clear_cart")).await;
        assert_eq!(result, Err(RequestError::Timeout));
        assert_eq!(gateway.notifier().visible_count(), 0);

        let reply: Option<Reply> = gateway.send_or_notify(Request::post("/user/clear_cart")).await;
        assert!(reply.is_none());
        let banners = gateway.notifier().snapshot();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].text(), &Text::key(REQUEST_FAILED_KEY));

        server.abort();
    }

    #[tokio::test]
    async fn success_does_not_notify() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/user/clear_cart")
            .with_status(200)
            .with_body(r#"{"success": false}"#)
            .create_async()
            .await;

        let gateway = gateway_for(&server.url());
        let reply: Option<Reply> = gateway.send_or_notify(Request::post("/user/clear_cart")).await;

        assert_eq!(reply, Some(Reply { success: false }));
        assert_eq!(gateway.notifier().visible_count(), 0);
    }
}

//! HTTP client for network-based API calls

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{Cart, ClientConfig, ClientError, ClientResult};
use shared::order::{AdminOrderAck, AdminOrderListResponse};
use shared::{
    AdminOrderAction, AdminOrderRequest, Enchantment, EnchantmentCreate, EnchantmentUpdate, Order,
    SubmitOrderRequest, SubmitOrderResponse,
};

/// Header carrying the shared secret on admin catalog routes
const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Error body shape returned by the server
#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for making network requests to the shop server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    admin_password: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            admin_password: config.admin_password.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn admin_password(&self) -> String {
        self.admin_password.clone().unwrap_or_default()
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str, admin: bool) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));
        if admin {
            request = request.header(ADMIN_PASSWORD_HEADER, self.admin_password());
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        admin: bool,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);
        if admin {
            request = request.header(ADMIN_PASSWORD_HEADER, self.admin_password());
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body (admin only)
    async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self
            .client
            .put(self.url(path))
            .header(ADMIN_PASSWORD_HEADER, self.admin_password())
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request (admin only)
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self
            .client
            .delete(self.url(path))
            .header(ADMIN_PASSWORD_HEADER, self.admin_password())
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response, mapping `{error}` bodies by status
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            tracing::debug!(%status, %message, "request rejected by server");
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(message)),
                StatusCode::CONFLICT => Err(ClientError::Conflict(message)),
                _ => Err(ClientError::Internal(message)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Shop API ==========

    /// Active catalog entries
    pub async fn list_enchantments(&self) -> ClientResult<Vec<Enchantment>> {
        self.get("/api/enchantments", false).await
    }

    /// One catalog entry
    pub async fn get_enchantment(&self, id: &str) -> ClientResult<Enchantment> {
        self.get(&format!("/api/enchantments/{id}"), false).await
    }

    /// Submit an order
    pub async fn submit_order(
        &self,
        request: &SubmitOrderRequest,
    ) -> ClientResult<SubmitOrderResponse> {
        self.post("/api/orders", request, false).await
    }

    /// Submit a cart with the buyer's contact handles
    pub async fn submit_cart(
        &self,
        cart: &Cart,
        discord_username: &str,
        minecraft_username: &str,
    ) -> ClientResult<SubmitOrderResponse> {
        let request = cart.to_submit_request(discord_username, minecraft_username);
        self.submit_order(&request).await
    }

    // ========== Admin Catalog API ==========

    /// All catalog entries, hidden ones included
    pub async fn admin_list_enchantments(&self) -> ClientResult<Vec<Enchantment>> {
        self.get("/api/admin/enchantments", true).await
    }

    pub async fn create_enchantment(
        &self,
        data: &EnchantmentCreate,
    ) -> ClientResult<Enchantment> {
        self.post("/api/admin/enchantments", data, true).await
    }

    pub async fn update_enchantment(
        &self,
        id: &str,
        data: &EnchantmentUpdate,
    ) -> ClientResult<Enchantment> {
        self.put(&format!("/api/admin/enchantments/{id}"), data).await
    }

    pub async fn delete_enchantment(&self, id: &str) -> ClientResult<bool> {
        self.delete(&format!("/api/admin/enchantments/{id}")).await
    }

    // ========== Order Management API ==========

    async fn manage_orders<T: DeserializeOwned>(
        &self,
        action: AdminOrderAction,
        order_id: Option<String>,
    ) -> ClientResult<T> {
        let request = AdminOrderRequest {
            action,
            password: self.admin_password(),
            order_id,
        };
        self.post("/api/admin/orders", &request, false).await
    }

    /// All orders, newest first
    pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        let response: AdminOrderListResponse =
            self.manage_orders(AdminOrderAction::List, None).await?;
        Ok(response.orders)
    }

    /// Mark a pending order completed
    pub async fn complete_order(&self, order_id: &str) -> ClientResult<bool> {
        let ack: AdminOrderAck = self
            .manage_orders(AdminOrderAction::Complete, Some(order_id.to_string()))
            .await?;
        Ok(ack.success)
    }

    /// Cancel a pending order, restoring its stock
    pub async fn cancel_order(&self, order_id: &str) -> ClientResult<bool> {
        let ack: AdminOrderAck = self
            .manage_orders(AdminOrderAction::Cancel, Some(order_id.to_string()))
            .await?;
        Ok(ack.success)
    }
}

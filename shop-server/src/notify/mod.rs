//! Discord webhook 通知
//!
//! 订单提交后的尽力而为通知：失败只记日志，从不影响请求结果，
//! 也不回滚任何已写入的数据。没有重试。

use shared::{OrderItemInput, SubmitOrderRequest};

/// Embed accent color (purple)
const EMBED_COLOR: u32 = 0x9b59b6;

/// Best-effort order notifier
#[derive(Clone)]
pub struct OrderNotifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl OrderNotifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        if webhook_url.is_none() {
            tracing::info!("DISCORD_WEBHOOK_URL not set, order notifications disabled");
        }
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    /// Send the order summary to the configured webhook, if any
    pub async fn notify_order(&self, request: &SubmitOrderRequest, order_id: &str) {
        let Some(url) = &self.webhook_url else {
            return;
        };

        let payload = build_webhook_payload(request);

        match self.client.post(url).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(order_id, "Order sent to Discord");
            }
            Ok(resp) => {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                tracing::error!(order_id, %status, %body, "Discord webhook error");
            }
            Err(e) => {
                tracing::error!(order_id, error = %e, "Discord webhook request failed");
            }
        }
    }
}

/// Per-line summary: `• **Sharpness** x2 - $30 offered`
fn enchantment_lines(items: &[OrderItemInput]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "• **{}** x{} - ${} offered",
                item.enchantment,
                item.quantity,
                item.line_total()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_webhook_payload(request: &SubmitOrderRequest) -> serde_json::Value {
    let lines = enchantment_lines(&request.items);
    let enchantment_list = if lines.is_empty() {
        "No enchantments selected".to_string()
    } else {
        lines
    };

    serde_json::json!({
        "embeds": [{
            "title": "🔮 New Enchantment Order!",
            "color": EMBED_COLOR,
            "fields": [
                { "name": "👤 Discord", "value": request.discord_username, "inline": true },
                { "name": "⛏️ Minecraft Username", "value": request.minecraft_username, "inline": true },
                { "name": "💰 Total Offered", "value": format!("${}", request.total_price), "inline": true },
                { "name": "✨ Enchantments", "value": enchantment_list, "inline": false },
            ],
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "footer": { "text": "EnchantShop Order System" },
        }]
    })
}

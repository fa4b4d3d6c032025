//! Minimal end-to-end demo against a running shop server.
//!
//! ```bash
//! cargo run -p shop-client --example order_demo -- http://localhost:3000
//! ```

use shop_client::{Cart, ClientConfig, HttpClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:3000".into());
    let client = HttpClient::new(&ClientConfig::new(base_url))?;

    let catalog = client.list_enchantments().await?;
    println!("catalog: {} enchantments", catalog.len());

    let Some(pick) = catalog.iter().find(|e| e.stock > 0) else {
        println!("nothing in stock");
        return Ok(());
    };

    let mut cart = Cart::new();
    cart.add(pick, pick.price)?;
    println!("offering ${} for {} x1", pick.price, pick.name);

    let receipt = client.submit_cart(&cart, "steve#0001", "steve").await?;
    println!("order submitted: {}", receipt.order_id);

    Ok(())
}

//! Standalone demo: posts randomly generated orders to a running
//! brewqueue instance's `/receive` route, for manually exercising the HTTP
//! API without a real barista-station client. Not part of the library's
//! public contract.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use serde_json::json;

const DRINKS: &[&str] = &["Latte", "Cappuccino", "Flat White", "Cortado", "Americano", "Mocha"];
const MILKS: &[&str] = &["Whole", "Oat", "Soy", "Almond"];
const TEXTURES: &[&str] = &["Dry", "Wet"];
const TEMPERATURES: &[&str] = &["Hot", "Iced", "Extra Hot"];
const OPTIONS: &[&str] = &["Extra Shot", "Decaf", "Vanilla", "Caramel"];
const CUSTOMERS: &[&str] = &["Adam", "Kayleigh", "Hannah", "Jeff", "Priya", "Marcus"];

#[derive(Debug, Serialize)]
struct GeneratedDrink {
    drink: String,
    milk: Option<String>,
    milk_volume: f64,
    shots: u32,
    temperature: Option<String>,
    texture: Option<String>,
    options: Vec<String>,
}

fn generate_drink(rng: &mut impl Rng) -> GeneratedDrink {
    let has_milk = rng.gen_bool(0.75);
    let (milk, texture, volume) = if has_milk {
        (
            Some(MILKS.choose(rng).unwrap().to_string()),
            Some(TEXTURES.choose(rng).unwrap().to_string()),
            rng.gen_range(1.0..3.0_f64),
        )
    } else {
        (Some("No Milk".to_string()), None, 0.0)
    };
    let option_count = rng.gen_range(0..=2);
    let options = OPTIONS
        .choose_multiple(rng, option_count)
        .map(|s| s.to_string())
        .collect();

    GeneratedDrink {
        drink: DRINKS.choose(rng).unwrap().to_string(),
        milk,
        milk_volume: volume,
        shots: rng.gen_range(1..=2),
        temperature: Some(TEMPERATURES.choose(rng).unwrap().to_string()),
        texture,
        options,
    }
}

fn generate_order(rng: &mut impl Rng) -> serde_json::Value {
    // Most orders are 1-3 drinks; occasionally a larger group order.
    let drink_count = if rng.gen_bool(0.85) {
        rng.gen_range(1..=3)
    } else {
        rng.gen_range(3..=10)
    };
    let drinks: Vec<GeneratedDrink> = (0..drink_count).map(|_| generate_drink(rng)).collect();
    json!({
        "customer": CUSTOMERS.choose(rng).unwrap(),
        "drinks": drinks,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let base_url = std::env::var("BREWQUEUE_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let endpoint_prefix = std::env::var("BREWQUEUE_ENDPOINT").unwrap_or_default();
    let count: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);

    let client = reqwest::Client::new();
    let mut rng = rand::thread_rng();

    for _ in 0..count {
        let order = generate_order(&mut rng);
        let url = format!("{base_url}/{endpoint_prefix}/receive");
        match client.post(&url).json(&order).send().await {
            Ok(response) => println!("posted order, status = {}", response.status()),
            Err(err) => eprintln!("failed to post order: {err}"),
        }
    }
    Ok(())
}

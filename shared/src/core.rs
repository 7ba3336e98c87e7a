use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

#[cfg(any(test, feature = "mocks"))]
use mockall::{automock, predicate::*};

pub const PRODUCT_NAMES: [&str; 5] = ["Laptop", "Phone", "Tablet", "Headphones", "Charger"];

#[cfg_attr(any(test, feature = "mocks"), automock)]
#[async_trait]
pub trait OrderRepository: Debug {
    async fn store_order(&self, order: &Order) -> Result<(), String>;
}

#[cfg_attr(any(test, feature = "mocks"), automock)]
pub trait OrderGenerator {
    fn generate_order(&self) -> Order;
}

/// Produces orders with uniformly distributed ids, products, quantities and prices.
#[derive(Debug, Default)]
pub struct RandomOrderGenerator;

impl RandomOrderGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate_order_with<R: Rng>(&self, rng: &mut R) -> Order {
        let orderid = rng.random_range(1..=10_000u32).to_string();
        let product_name = PRODUCT_NAMES
            .choose(rng)
            .copied()
            .unwrap_or(PRODUCT_NAMES[0])
            .to_string();
        let quantity = rng.random_range(1..=5i64);
        // two decimal places, like a price tag
        let price = (rng.random_range(10.0..500.0f64) * 100.0).round() / 100.0;

        Order::new(orderid, product_name, quantity, price)
    }
}

impl OrderGenerator for RandomOrderGenerator {
    fn generate_order(&self) -> Order {
        self.generate_order_with(&mut rand::rng())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Order {
    pub orderid: String,
    pub product_name: String,
    pub quantity: i64,
    pub price: f64,
}

impl Order {
    pub fn new(orderid: String, product_name: String, quantity: i64, price: f64) -> Self {
        Self {
            orderid,
            product_name,
            quantity,
            price,
        }
    }
}

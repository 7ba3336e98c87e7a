use crate::core::{Order, OrderRepository};
use async_trait::async_trait;
use aws_sdk_dynamodb::{types::AttributeValue, Client};
use std::collections::HashMap;

#[derive(Debug)]
pub struct DynamoDbOrderRepository {
    table_name: String,
    dynamodb_client: Client,
}

impl DynamoDbOrderRepository {
    pub fn new(table_name: String, dynamodb_client: Client) -> Self {
        Self {
            table_name,
            dynamodb_client,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl OrderRepository for DynamoDbOrderRepository {
    async fn store_order(&self, order: &Order) -> Result<(), String> {
        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(order.into()))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| format!("Error adding item: {:?}", e))
    }
}

impl From<&Order> for HashMap<String, AttributeValue> {
    fn from(order: &Order) -> Self {
        HashMap::from([
            ("orderid".to_string(), AttributeValue::S(order.orderid.clone())),
            (
                "product_name".to_string(),
                AttributeValue::S(order.product_name.clone()),
            ),
            (
                "quantity".to_string(),
                AttributeValue::N(order.quantity.to_string()),
            ),
            ("price".to_string(), AttributeValue::N(order.price.to_string())),
        ])
    }
}

use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::core::{OrderGenerator, OrderRepository};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeneratorResponse {
    pub status_code: u16,
    pub body: String,
}

pub(crate) struct HandlerDeps<G: OrderGenerator, R: OrderRepository> {
    pub order_generator: G,
    pub order_repo: R,
}

/// The incoming event is only a trigger (usually a schedule), its content is ignored.
#[tracing::instrument(skip(deps, event))]
pub(crate) async fn function_handler<G: OrderGenerator, R: OrderRepository>(
    deps: &HandlerDeps<G, R>,
    event: LambdaEvent<Value>,
) -> Result<GeneratorResponse, Error> {
    tracing::debug!("Received event: {:?}", event.payload);

    let order = deps.order_generator.generate_order();
    let data = serde_json::to_string(&order)?;

    if let Err(e) = deps.order_repo.store_order(&order).await {
        tracing::error!("Error inserting data into DynamoDB: {}", e);
        return Ok(GeneratorResponse {
            status_code: 500,
            body: format!("Error generating or inserting data: {}", e),
        });
    }

    tracing::info!("Successfully inserted data: {}", data);
    Ok(GeneratorResponse {
        status_code: 200,
        body: format!("Successfully generated and inserted order data: {}", data),
    })
}

#[cfg(test)]
mod tests {
    use super::{function_handler, GeneratorResponse, HandlerDeps};
    use lambda_runtime::{Context, LambdaEvent};
    use mockall::predicate::eq;
    use serde_json::json;
    use shared::core::{MockOrderGenerator, MockOrderRepository, Order};

    fn laptop_order() -> Order {
        Order::new("123".to_string(), "Laptop".to_string(), 2, 499.99)
    }

    fn scheduled_event() -> LambdaEvent<serde_json::Value> {
        LambdaEvent::new(
            json!({
                "source": "aws.events",
                "detail-type": "Scheduled Event",
                "detail": {}
            }),
            Context::default(),
        )
    }

    #[tokio::test]
    async fn when_order_is_stored_should_return_200_with_order() {
        let mut mock_order_generator = MockOrderGenerator::new();
        mock_order_generator
            .expect_generate_order()
            .times(1)
            .return_const(laptop_order());
        let mut mock_order_repo = MockOrderRepository::default();
        mock_order_repo
            .expect_store_order()
            .with(eq(laptop_order()))
            .times(1)
            .returning(|_| Ok(()));
        let deps = HandlerDeps {
            order_generator: mock_order_generator,
            order_repo: mock_order_repo,
        };

        let result = function_handler(&deps, scheduled_event()).await;

        assert_eq!(
            result.unwrap(),
            GeneratorResponse {
                status_code: 200,
                body: "Successfully generated and inserted order data: {\"orderid\":\"123\",\"product_name\":\"Laptop\",\"quantity\":2,\"price\":499.99}".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn when_storage_fails_should_return_500_with_cause() {
        let mut mock_order_generator = MockOrderGenerator::new();
        mock_order_generator
            .expect_generate_order()
            .times(1)
            .return_const(laptop_order());
        let mut mock_order_repo = MockOrderRepository::default();
        mock_order_repo
            .expect_store_order()
            .times(1)
            .returning(|_| Err("Error adding item: throttled".to_string()));
        let deps = HandlerDeps {
            order_generator: mock_order_generator,
            order_repo: mock_order_repo,
        };

        let result = function_handler(&deps, scheduled_event()).await;

        let response = result.unwrap();
        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body,
            "Error generating or inserting data: Error adding item: throttled"
        );
    }

    #[tokio::test]
    async fn when_event_is_empty_should_still_generate_one_order() {
        let mut mock_order_generator = MockOrderGenerator::new();
        mock_order_generator
            .expect_generate_order()
            .times(1)
            .return_const(laptop_order());
        let mut mock_order_repo = MockOrderRepository::default();
        mock_order_repo
            .expect_store_order()
            .times(1)
            .returning(|_| Ok(()));
        let deps = HandlerDeps {
            order_generator: mock_order_generator,
            order_repo: mock_order_repo,
        };

        let result =
            function_handler(&deps, LambdaEvent::new(json!({}), Context::default())).await;

        assert_eq!(result.unwrap().status_code, 200);
    }

    #[test]
    fn when_serializing_response_should_use_lambda_proxy_field_names() {
        let response = GeneratorResponse {
            status_code: 200,
            body: "ok".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "statusCode": 200, "body": "ok" })
        );
    }
}

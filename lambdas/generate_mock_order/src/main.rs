use crate::config::Config;
use crate::event_handler::HandlerDeps;
use event_handler::function_handler;
use lambda_runtime::{run, service_fn, tracing, Error};
use shared::adapters::DynamoDbOrderRepository;
use shared::core::RandomOrderGenerator;

mod config;
mod event_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&aws_config);
    let config = Config::load()?;

    let order_repo = DynamoDbOrderRepository::new(config.table_name, dynamodb_client);
    tracing::info!("Writing mock orders to table {}", order_repo.table_name());
    let deps = HandlerDeps {
        order_generator: RandomOrderGenerator::new(),
        order_repo,
    };

    run(service_fn(|event| function_handler(&deps, event))).await
}

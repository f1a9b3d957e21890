mod command;
mod query;

use self::command::OrderCommandService;
use self::query::OrderQueryService;
use super::customer::CustomerProfiles;
use crate::{
    abstract_trait::{
        DynCartItemQueryRepository, DynCartQueryRepository, DynCustomerCommandRepository,
        DynCustomerQueryRepository, DynOrderCommandRepository, DynOrderCommandService,
        DynOrderQueryRepository, DynOrderQueryService, DynProductQueryRepository,
    },
    domain::Session,
    errors::ServiceError,
    model::{Order, OrderItem},
};
use prometheus_client::registry::Registry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct OrderServiceDeps {
    pub query: DynOrderQueryRepository,
    pub command: DynOrderCommandRepository,
    pub cart_query: DynCartQueryRepository,
    pub cart_item_query: DynCartItemQueryRepository,
    pub product_query: DynProductQueryRepository,
    pub customer_query: DynCustomerQueryRepository,
    pub customer_command: DynCustomerCommandRepository,
}

#[derive(Clone)]
pub struct OrderService {
    pub query: DynOrderQueryService,
    pub command: DynOrderCommandService,
}

impl OrderService {
    pub fn new(deps: OrderServiceDeps, registry: &mut Registry) -> Self {
        let OrderServiceDeps {
            query,
            command,
            cart_query,
            cart_item_query,
            product_query,
            customer_query,
            customer_command,
        } = deps;

        let query_service = Arc::new(OrderQueryService::new(
            query.clone(),
            customer_query.clone(),
            registry,
        )) as DynOrderQueryService;

        let command_service = Arc::new(OrderCommandService::new(
            command::Repositories {
                query,
                command,
                cart_query,
                cart_item_query,
                product_query,
            },
            CustomerProfiles::new(customer_query, customer_command),
            registry,
        )) as DynOrderCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}

/// Checks that the order belongs to the caller's customer profile.
async fn ensure_owner(
    customers: &DynCustomerQueryRepository,
    session: &Session,
    order: &Order,
) -> Result<(), ServiceError> {
    if session.is_staff {
        return Ok(());
    }

    match customers.find_by_id(order.customer_id).await? {
        Some(customer) if customer.user_id == session.user_id => Ok(()),
        _ => {
            warn!(
                "⚠️ User {} tried to access order {}",
                session.user_id, order.order_id
            );
            Err(ServiceError::Forbidden(
                "You may only access your own orders".into(),
            ))
        }
    }
}

/// Splits a flat item list into per-order lists.
fn group_items(items: Vec<OrderItem>) -> HashMap<i32, Vec<OrderItem>> {
    let mut grouped: HashMap<i32, Vec<OrderItem>> = HashMap::new();
    for item in items {
        grouped.entry(item.order_id).or_default().push(item);
    }
    grouped
}

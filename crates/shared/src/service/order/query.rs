use super::{ensure_owner, group_items};
use crate::{
    abstract_trait::{DynCustomerQueryRepository, DynOrderQueryRepository, OrderQueryServiceTrait},
    domain::{
        Session,
        requests::{FindAllOrders, normalize_page},
        responses::{ApiResponse, ApiResponsePagination, OrderResponse, Pagination},
    },
    errors::ServiceError,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::info;

pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    customers: DynCustomerQueryRepository,
    tracker: OperationTracker,
}

impl OrderQueryService {
    pub fn new(
        query: DynOrderQueryRepository,
        customers: DynCustomerQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            query,
            customers,
            tracker: OperationTracker::new("order-query-service", registry),
        }
    }

    async fn list(
        &self,
        session: &Session,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderResponse>, i64), ServiceError> {
        let customer_id = if session.is_staff {
            None
        } else {
            match self.customers.find_by_user_id(session.user_id).await? {
                Some(customer) => Some(customer.customer_id),
                None => return Ok((Vec::new(), 0)),
            }
        };

        let (orders, total) = self.query.find_all(req, customer_id).await?;
        let ids: Vec<i32> = orders.iter().map(|o| o.order_id).collect();
        let mut items = group_items(self.query.find_items(&ids).await?);

        let data = orders
            .into_iter()
            .map(|order| {
                let lines = items.remove(&order.order_id).unwrap_or_default();
                OrderResponse::new(order, lines)
            })
            .collect();

        Ok((data, total))
    }

    async fn show(&self, session: &Session, id: i32) -> Result<OrderResponse, ServiceError> {
        let order = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Order", id))?;

        ensure_owner(&self.customers, session, &order).await?;

        let items = self.query.find_items(&[id]).await?;
        Ok(OrderResponse::new(order, items))
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(
        &self,
        session: &Session,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        let (page, page_size) = normalize_page(req.page, req.page_size);
        let req = FindAllOrders {
            page,
            page_size,
            payment_status: req.payment_status,
        };

        info!(
            "📦 Listing orders for user {} (staff: {}) | page: {page}",
            session.user_id, session.is_staff
        );

        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindAllOrders",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("page", page as i64),
            ],
        );

        let result = self.list(session, &req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Orders fetched successfully");

        let (data, total) = result?;
        Ok(ApiResponsePagination::success(
            "Orders fetched successfully",
            data,
            Pagination::new(page, page_size, total),
        ))
    }

    async fn find_by_id(
        &self,
        session: &Session,
        id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindOrderById",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id as i64),
            ],
        );

        let result = self.show(session, id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Order fetched successfully");

        Ok(ApiResponse::success("Order fetched successfully", result?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{MockCustomerQueryRepositoryTrait, MockOrderQueryRepositoryTrait};
    use crate::service::test_support::{customer, dec, order, order_item};
    use std::sync::Arc;

    fn service(
        query: MockOrderQueryRepositoryTrait,
        customers: MockCustomerQueryRepositoryTrait,
    ) -> OrderQueryService {
        OrderQueryService::new(Arc::new(query), Arc::new(customers), &mut Registry::default())
    }

    fn list_request() -> FindAllOrders {
        FindAllOrders {
            page: 1,
            page_size: 10,
            payment_status: None,
        }
    }

    #[tokio::test]
    async fn customers_only_list_their_own_orders() {
        let mut customers = MockCustomerQueryRepositoryTrait::new();
        customers
            .expect_find_by_user_id()
            .returning(|user_id| Ok(Some(customer(21, user_id))));
        let mut query = MockOrderQueryRepositoryTrait::new();
        query
            .expect_find_all()
            .withf(|_, customer_id| *customer_id == Some(21))
            .returning(|_, _| Ok((vec![order(1, 21, "P")], 1)));
        query
            .expect_find_items()
            .returning(|_| Ok(vec![order_item(1, 1, 5, 2, "3.00")]));

        let response = service(query, customers)
            .find_all(&Session::new(4, false), &list_request())
            .await
            .unwrap();

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].total_price, dec("6.00"));
    }

    #[tokio::test]
    async fn staff_lists_every_order() {
        let mut query = MockOrderQueryRepositoryTrait::new();
        query
            .expect_find_all()
            .withf(|_, customer_id| customer_id.is_none())
            .returning(|_, _| Ok((vec![order(1, 21, "P"), order(2, 22, "C")], 2)));
        query.expect_find_items().returning(|_| Ok(Vec::new()));

        let response = service(query, MockCustomerQueryRepositoryTrait::new())
            .find_all(&Session::new(1, true), &list_request())
            .await
            .unwrap();

        assert_eq!(response.data.len(), 2);
    }

    #[tokio::test]
    async fn total_uses_stored_unit_prices() {
        let mut query = MockOrderQueryRepositoryTrait::new();
        query
            .expect_find_by_id()
            .returning(|id| Ok(Some(order(id, 21, "P"))));
        query.expect_find_items().returning(|_| {
            Ok(vec![
                order_item(1, 3, 5, 2, "10.00"),
                order_item(2, 3, 6, 3, "3.50"),
            ])
        });

        let response = service(query, MockCustomerQueryRepositoryTrait::new())
            .find_by_id(&Session::new(1, true), 3)
            .await
            .unwrap();

        assert_eq!(response.data.total_price, dec("30.50"));
    }

    #[tokio::test]
    async fn foreign_order_is_forbidden() {
        let mut query = MockOrderQueryRepositoryTrait::new();
        query
            .expect_find_by_id()
            .returning(|id| Ok(Some(order(id, 21, "P"))));
        let mut customers = MockCustomerQueryRepositoryTrait::new();
        customers
            .expect_find_by_id()
            .returning(|id| Ok(Some(customer(id, 99))));

        let err = service(query, customers)
            .find_by_id(&Session::new(4, false), 3)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden(_)));
    }
}

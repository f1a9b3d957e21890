use crate::{
    abstract_trait::{CustomerQueryServiceTrait, DynCustomerQueryRepository},
    domain::{
        Session,
        requests::{FindAllCustomers, normalize_page},
        responses::{ApiResponse, ApiResponsePagination, CustomerResponse, Pagination},
    },
    errors::ServiceError,
    model::Customer,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::info;

pub struct CustomerQueryService {
    query: DynCustomerQueryRepository,
    tracker: OperationTracker,
}

impl CustomerQueryService {
    pub fn new(query: DynCustomerQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            tracker: OperationTracker::new("customer-query-service", registry),
        }
    }

    async fn list(
        &self,
        session: &Session,
        req: &FindAllCustomers,
    ) -> Result<(Vec<Customer>, i64), ServiceError> {
        if session.is_staff {
            return Ok(self.query.find_all(req).await?);
        }

        let own = self.query.find_by_user_id(session.user_id).await?;
        let total = own.is_some() as i64;
        let visible = if req.page == 1 { own.into_iter().collect() } else { Vec::new() };
        Ok((visible, total))
    }
}

#[async_trait]
impl CustomerQueryServiceTrait for CustomerQueryService {
    async fn find_all(
        &self,
        session: &Session,
        req: &FindAllCustomers,
    ) -> Result<ApiResponsePagination<Vec<CustomerResponse>>, ServiceError> {
        let (page, page_size) = normalize_page(req.page, req.page_size);
        let req = FindAllCustomers { page, page_size };

        info!(
            "👥 Listing customers for user {} (staff: {})",
            session.user_id, session.is_staff
        );

        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindAllCustomers",
            vec![
                KeyValue::new("component", "customer"),
                KeyValue::new("page", page as i64),
            ],
        );

        let result = self.list(session, &req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Customers fetched successfully");

        let (customers, total) = result?;
        let data = customers.into_iter().map(CustomerResponse::from).collect();

        Ok(ApiResponsePagination::success(
            "Customers fetched successfully",
            data,
            Pagination::new(page, page_size, total),
        ))
    }

    async fn find_by_id(
        &self,
        session: &Session,
        id: i32,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindCustomerById",
            vec![
                KeyValue::new("component", "customer"),
                KeyValue::new("customer.id", id as i64),
            ],
        );

        let result = match self.query.find_by_id(id).await {
            Ok(Some(customer)) if session.can_access(customer.user_id) => Ok(customer),
            Ok(Some(_)) => Err(ServiceError::Forbidden(
                "You may only view your own customer profile".into(),
            )),
            Ok(None) => Err(ServiceError::not_found("Customer", id)),
            Err(e) => Err(ServiceError::Repo(e)),
        };
        self.tracker
            .finish(&tracing_ctx, method, &result, "Customer fetched successfully");

        Ok(ApiResponse::success(
            "Customer fetched successfully",
            CustomerResponse::from(result?),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::MockCustomerQueryRepositoryTrait;
    use crate::service::test_support::customer;
    use std::sync::Arc;

    fn service(query: MockCustomerQueryRepositoryTrait) -> CustomerQueryService {
        CustomerQueryService::new(Arc::new(query), &mut Registry::default())
    }

    #[tokio::test]
    async fn non_staff_list_only_holds_own_profile() {
        let mut query = MockCustomerQueryRepositoryTrait::new();
        query.expect_find_all().never();
        query
            .expect_find_by_user_id()
            .returning(|user_id| Ok(Some(customer(2, user_id))));

        let req = FindAllCustomers {
            page: 1,
            page_size: 10,
        };
        let response = service(query)
            .find_all(&Session::new(6, false), &req)
            .await
            .unwrap();

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].user_id, 6);
    }

    #[tokio::test]
    async fn other_users_profile_is_forbidden() {
        let mut query = MockCustomerQueryRepositoryTrait::new();
        query
            .expect_find_by_id()
            .returning(|id| Ok(Some(customer(id, 99))));

        let err = service(query)
            .find_by_id(&Session::new(6, false), 2)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn staff_sees_any_profile() {
        let mut query = MockCustomerQueryRepositoryTrait::new();
        query
            .expect_find_by_id()
            .returning(|id| Ok(Some(customer(id, 99))));

        let response = service(query)
            .find_by_id(&Session::new(1, true), 2)
            .await
            .unwrap();

        assert_eq!(response.data.id, 2);
    }
}

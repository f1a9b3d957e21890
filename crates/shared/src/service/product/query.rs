use crate::{
    abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::{
        requests::{FindAllProducts, normalize_page},
        responses::{ApiResponse, ApiResponsePagination, Pagination, ProductResponse},
    },
    errors::ServiceError,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::info;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    tracker: OperationTracker,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            tracker: OperationTracker::new("product-query-service", registry),
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let (page, page_size) = normalize_page(req.page, req.page_size);
        let req = FindAllProducts {
            page,
            page_size,
            ..req.clone()
        };

        info!(
            "🛒 Listing products | page: {page}, page_size: {page_size}, category: {:?}, ordering: {:?}",
            req.category_id, req.ordering
        );

        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindAllProducts",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("page", page as i64),
                KeyValue::new("page_size", page_size as i64),
            ],
        );

        let result = self.query.find_all(&req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Products fetched successfully");

        let (products, total) = result?;
        let data = products.into_iter().map(ProductResponse::from).collect();

        Ok(ApiResponsePagination::success(
            "Products fetched successfully",
            data,
            Pagination::new(page, page_size, total),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindProductById",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id as i64),
            ],
        );

        let result = match self.query.find_by_id(id).await {
            Ok(Some(product)) => Ok(ProductResponse::from(product)),
            Ok(None) => Err(ServiceError::not_found("Product", id)),
            Err(e) => Err(ServiceError::Repo(e)),
        };
        self.tracker
            .finish(&tracing_ctx, method, &result, "Product fetched successfully");

        Ok(ApiResponse::success("Product fetched successfully", result?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::MockProductQueryRepositoryTrait;
    use crate::service::test_support::{dec, product};
    use std::sync::Arc;

    #[tokio::test]
    async fn listed_products_carry_discounted_price() {
        let mut query = MockProductQueryRepositoryTrait::new();
        query.expect_find_all().returning(|_| {
            let mut discounted = product(1, "20.00", 5);
            discounted.discount_percent = Some(dec("25"));
            Ok((vec![discounted, product(2, "3.00", 0)], 2))
        });

        let service = ProductQueryService::new(Arc::new(query), &mut Registry::default());
        let response = service.find_all(&FindAllProducts::default()).await.unwrap();

        assert_eq!(response.data[0].discounted_price, dec("15.00"));
        assert_eq!(response.data[1].discounted_price, dec("3.00"));
        assert_eq!(response.pagination.total_items, 2);
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let mut query = MockProductQueryRepositoryTrait::new();
        query.expect_find_by_id().returning(|_| Ok(None));

        let service = ProductQueryService::new(Arc::new(query), &mut Registry::default());
        let err = service.find_by_id(99).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}

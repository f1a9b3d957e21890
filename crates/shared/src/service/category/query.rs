use crate::{
    abstract_trait::{CategoryQueryServiceTrait, DynCategoryQueryRepository},
    domain::{
        requests::{FindAllCategories, normalize_page},
        responses::{ApiResponse, ApiResponsePagination, CategoryResponse, Pagination},
    },
    errors::ServiceError,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::info;

pub struct CategoryQueryService {
    query: DynCategoryQueryRepository,
    tracker: OperationTracker,
}

impl CategoryQueryService {
    pub fn new(query: DynCategoryQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            tracker: OperationTracker::new("category-query-service", registry),
        }
    }
}

#[async_trait]
impl CategoryQueryServiceTrait for CategoryQueryService {
    async fn find_all(
        &self,
        req: &FindAllCategories,
    ) -> Result<ApiResponsePagination<Vec<CategoryResponse>>, ServiceError> {
        let (page, page_size) = normalize_page(req.page, req.page_size);
        let req = FindAllCategories {
            page,
            page_size,
            search: req.search.clone(),
        };

        info!("📂 Listing categories | page: {page}, page_size: {page_size}");

        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindAllCategories",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("page", page as i64),
            ],
        );

        let result = self.query.find_all(&req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Categories fetched successfully");

        let (categories, total) = result?;
        let data = categories.into_iter().map(CategoryResponse::from).collect();

        Ok(ApiResponsePagination::success(
            "Categories fetched successfully",
            data,
            Pagination::new(page, page_size, total),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindCategoryById",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.id", id as i64),
            ],
        );

        let result = match self.query.find_by_id(id).await {
            Ok(Some(category)) => Ok(CategoryResponse::from(category)),
            Ok(None) => Err(ServiceError::not_found("Category", id)),
            Err(e) => Err(ServiceError::Repo(e)),
        };
        self.tracker
            .finish(&tracing_ctx, method, &result, "Category fetched successfully");

        Ok(ApiResponse::success("Category fetched successfully", result?))
    }
}

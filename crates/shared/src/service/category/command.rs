use crate::{
    abstract_trait::{
        CategoryCommandServiceTrait, DynCategoryCommandRepository, DynCategoryQueryRepository,
    },
    domain::{
        requests::{CreateCategoryRequest, UpdateCategoryRequest},
        responses::{ApiResponse, CategoryResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{info, warn};

pub struct CategoryCommandService {
    query: DynCategoryQueryRepository,
    command: DynCategoryCommandRepository,
    tracker: OperationTracker,
}

impl CategoryCommandService {
    pub fn new(
        query: DynCategoryQueryRepository,
        command: DynCategoryCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            query,
            command,
            tracker: OperationTracker::new("category-command-service", registry),
        }
    }

    async fn remove(&self, id: i32) -> Result<(), ServiceError> {
        let category = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", id))?;

        if category.products_count > 0 {
            warn!(
                "⚠️ Category {} still holds {} products",
                id, category.products_count
            );
            return Err(ServiceError::Conflict(
                "Category cannot be deleted because it includes one or more products.".into(),
            ));
        }

        self.command.delete(id).await.map_err(|e| match e {
            RepositoryError::ForeignKey(_) => ServiceError::Conflict(
                "Category cannot be deleted because it includes one or more products.".into(),
            ),
            other => ServiceError::Repo(other),
        })
    }
}

#[async_trait]
impl CategoryCommandServiceTrait for CategoryCommandService {
    async fn create(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        info!("🏗️ Creating category: {}", req.title);

        let method = Method::Post;
        let tracing_ctx = self.tracker.start(
            "CreateCategory",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.title", req.title.clone()),
            ],
        );

        let result = self.command.create(req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Category created successfully");

        Ok(ApiResponse::success(
            "Category created successfully",
            CategoryResponse::from(result?),
        ))
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        info!("🔄 Updating category {id}");

        let method = Method::Put;
        let tracing_ctx = self.tracker.start(
            "UpdateCategory",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.id", id as i64),
            ],
        );

        let result = self.command.update(id, req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Category updated successfully");

        let category = result.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::not_found("Category", id),
            other => ServiceError::Repo(other),
        })?;

        Ok(ApiResponse::success(
            "Category updated successfully",
            CategoryResponse::from(category),
        ))
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting category {id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracker.start(
            "DeleteCategory",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.id", id as i64),
            ],
        );

        let result = self.remove(id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Category deleted successfully");

        result?;
        Ok(ApiResponse::success("Category deleted successfully", ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        MockCategoryCommandRepositoryTrait, MockCategoryQueryRepositoryTrait,
    };
    use crate::service::test_support::category;
    use std::sync::Arc;

    fn service(
        query: MockCategoryQueryRepositoryTrait,
        command: MockCategoryCommandRepositoryTrait,
    ) -> CategoryCommandService {
        CategoryCommandService::new(Arc::new(query), Arc::new(command), &mut Registry::default())
    }

    #[tokio::test]
    async fn category_with_products_is_not_deleted() {
        let mut query = MockCategoryQueryRepositoryTrait::new();
        query
            .expect_find_by_id()
            .returning(|id| Ok(Some(category(id, 3))));

        let mut command = MockCategoryCommandRepositoryTrait::new();
        command.expect_delete().never();

        let err = service(query, command).delete(1).await.unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn empty_category_is_deleted() {
        let mut query = MockCategoryQueryRepositoryTrait::new();
        query
            .expect_find_by_id()
            .returning(|id| Ok(Some(category(id, 0))));

        let mut command = MockCategoryCommandRepositoryTrait::new();
        command.expect_delete().times(1).returning(|_| Ok(()));

        assert!(service(query, command).delete(1).await.is_ok());
    }

    #[tokio::test]
    async fn product_added_concurrently_still_blocks_delete() {
        let mut query = MockCategoryQueryRepositoryTrait::new();
        query
            .expect_find_by_id()
            .returning(|id| Ok(Some(category(id, 0))));

        let mut command = MockCategoryCommandRepositoryTrait::new();
        command
            .expect_delete()
            .returning(|_| Err(RepositoryError::ForeignKey("products_category_id_fkey".into())));

        let err = service(query, command).delete(1).await.unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let mut query = MockCategoryQueryRepositoryTrait::new();
        query.expect_find_by_id().returning(|_| Ok(None));

        let err = service(query, MockCategoryCommandRepositoryTrait::new())
            .delete(42)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}

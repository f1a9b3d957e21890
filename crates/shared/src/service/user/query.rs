use crate::{
    abstract_trait::{DynUserQueryRepository, UserQueryServiceTrait},
    domain::{
        Session,
        requests::{FindAllUsers, normalize_page},
        responses::{ApiResponse, ApiResponsePagination, Pagination, UserResponse},
    },
    errors::ServiceError,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{info, warn};

pub struct UserQueryService {
    query: DynUserQueryRepository,
    tracker: OperationTracker,
}

impl UserQueryService {
    pub fn new(query: DynUserQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            tracker: OperationTracker::new("user-query-service", registry),
        }
    }
}

#[async_trait]
impl UserQueryServiceTrait for UserQueryService {
    async fn find_all(
        &self,
        session: &Session,
        req: &FindAllUsers,
    ) -> Result<ApiResponsePagination<Vec<UserResponse>>, ServiceError> {
        if !session.is_staff {
            warn!("⚠️ User {} tried to list users", session.user_id);
            return Err(ServiceError::Forbidden(
                "Only staff can list users".into(),
            ));
        }

        let (page, page_size) = normalize_page(req.page, req.page_size);
        let req = FindAllUsers {
            page,
            page_size,
            search: req.search.clone(),
        };

        info!("🔍 Listing users | page: {page}, page_size: {page_size}");

        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindAllUsers",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("page", page as i64),
            ],
        );

        let result = self.query.find_all(&req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Users fetched successfully");

        let (users, total) = result?;
        let data = users.into_iter().map(UserResponse::from).collect();

        Ok(ApiResponsePagination::success(
            "Users fetched successfully",
            data,
            Pagination::new(page, page_size, total),
        ))
    }

    async fn find_by_id(
        &self,
        session: &Session,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        if !session.can_access(id) {
            return Err(ServiceError::Forbidden(
                "You may only view your own account".into(),
            ));
        }

        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindUserById",
            vec![
                KeyValue::new("component", "user"),
                KeyValue::new("user.id", id as i64),
            ],
        );

        let result = match self.query.find_by_id(id).await {
            Ok(Some(user)) => Ok(UserResponse::from(user)),
            Ok(None) => Err(ServiceError::not_found("User", id)),
            Err(e) => Err(ServiceError::Repo(e)),
        };
        self.tracker
            .finish(&tracing_ctx, method, &result, "User fetched successfully");

        Ok(ApiResponse::success("User fetched successfully", result?))
    }
}

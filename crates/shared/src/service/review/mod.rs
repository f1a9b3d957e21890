mod command;
mod query;

use self::command::ReviewCommandService;
use self::query::ReviewQueryService;
use super::customer::CustomerProfiles;
use crate::abstract_trait::{
    DynCustomerCommandRepository, DynCustomerQueryRepository, DynProductQueryRepository,
    DynReviewCommandRepository, DynReviewCommandService, DynReviewQueryRepository,
    DynReviewQueryService,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReviewServiceDeps {
    pub query: DynReviewQueryRepository,
    pub command: DynReviewCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub customer_query: DynCustomerQueryRepository,
    pub customer_command: DynCustomerCommandRepository,
}

#[derive(Clone)]
pub struct ReviewService {
    pub query: DynReviewQueryService,
    pub command: DynReviewCommandService,
}

impl ReviewService {
    pub fn new(deps: ReviewServiceDeps, registry: &mut Registry) -> Self {
        let ReviewServiceDeps {
            query,
            command,
            product_query,
            customer_query,
            customer_command,
        } = deps;

        let query_service = Arc::new(ReviewQueryService::new(
            query.clone(),
            product_query.clone(),
            registry,
        )) as DynReviewQueryService;

        let command_service = Arc::new(ReviewCommandService::new(
            query,
            command,
            product_query,
            CustomerProfiles::new(customer_query, customer_command),
            registry,
        )) as DynReviewCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}

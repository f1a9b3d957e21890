mod command;
mod query;

use self::command::ProductCommandService;
use self::query::ProductQueryService;
use crate::abstract_trait::{
    DynCategoryQueryRepository, DynProductCommandRepository, DynProductCommandService,
    DynProductQueryRepository, DynProductQueryService,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProductService {
    pub query: DynProductQueryService,
    pub command: DynProductCommandService,
}

impl ProductService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        category_query: DynCategoryQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let query_service =
            Arc::new(ProductQueryService::new(query.clone(), registry)) as DynProductQueryService;
        let command_service = Arc::new(ProductCommandService::new(
            query,
            command,
            category_query,
            registry,
        )) as DynProductCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}

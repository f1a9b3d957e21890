mod command;
mod query;

use self::command::CategoryCommandService;
use self::query::CategoryQueryService;
use crate::abstract_trait::{
    DynCategoryCommandRepository, DynCategoryCommandService, DynCategoryQueryRepository,
    DynCategoryQueryService,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;

#[derive(Clone)]
pub struct CategoryService {
    pub query: DynCategoryQueryService,
    pub command: DynCategoryCommandService,
}

impl CategoryService {
    pub fn new(
        query: DynCategoryQueryRepository,
        command: DynCategoryCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let query_service =
            Arc::new(CategoryQueryService::new(query.clone(), registry)) as DynCategoryQueryService;
        let command_service = Arc::new(CategoryCommandService::new(query, command, registry))
            as DynCategoryCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}

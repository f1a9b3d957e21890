mod query;

use self::query::UserQueryService;
use crate::abstract_trait::{DynUserQueryRepository, DynUserQueryService};
use prometheus_client::registry::Registry;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    pub query: DynUserQueryService,
}

impl UserService {
    pub fn new(query: DynUserQueryRepository, registry: &mut Registry) -> Self {
        let query = Arc::new(UserQueryService::new(query, registry)) as DynUserQueryService;

        Self { query }
    }
}

mod command;
mod profile;
mod query;

pub(crate) use self::profile::CustomerProfiles;

use self::command::CustomerCommandService;
use self::query::CustomerQueryService;
use crate::abstract_trait::{
    DynCustomerCommandRepository, DynCustomerCommandService, DynCustomerQueryRepository,
    DynCustomerQueryService,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;

#[derive(Clone)]
pub struct CustomerService {
    pub query: DynCustomerQueryService,
    pub command: DynCustomerCommandService,
}

impl CustomerService {
    pub fn new(
        query: DynCustomerQueryRepository,
        command: DynCustomerCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let query_service =
            Arc::new(CustomerQueryService::new(query.clone(), registry)) as DynCustomerQueryService;
        let command_service = Arc::new(CustomerCommandService::new(
            CustomerProfiles::new(query, command),
            registry,
        )) as DynCustomerCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}

mod command;
mod query;

use self::command::CustomerCommandRepository;
use self::query::CustomerQueryRepository;
use crate::{
    abstract_trait::{DynCustomerCommandRepository, DynCustomerQueryRepository},
    config::ConnectionPool,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct CustomerRepository {
    pub query: DynCustomerQueryRepository,
    pub command: DynCustomerCommandRepository,
}

impl CustomerRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query = Arc::new(CustomerQueryRepository::new(pool.clone())) as DynCustomerQueryRepository;
        let command = Arc::new(CustomerCommandRepository::new(pool)) as DynCustomerCommandRepository;

        Self { query, command }
    }
}

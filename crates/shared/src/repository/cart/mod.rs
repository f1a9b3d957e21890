mod command;
mod query;

use self::command::CartCommandRepository;
use self::query::CartQueryRepository;
use crate::{
    abstract_trait::{DynCartCommandRepository, DynCartQueryRepository},
    config::ConnectionPool,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct CartRepository {
    pub query: DynCartQueryRepository,
    pub command: DynCartCommandRepository,
}

impl CartRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query = Arc::new(CartQueryRepository::new(pool.clone())) as DynCartQueryRepository;
        let command = Arc::new(CartCommandRepository::new(pool)) as DynCartCommandRepository;

        Self { query, command }
    }
}

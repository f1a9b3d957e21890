mod command;
mod query;

use self::command::CartItemCommandRepository;
use self::query::CartItemQueryRepository;
use crate::{
    abstract_trait::{DynCartItemCommandRepository, DynCartItemQueryRepository},
    config::ConnectionPool,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct CartItemRepository {
    pub query: DynCartItemQueryRepository,
    pub command: DynCartItemCommandRepository,
}

impl CartItemRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query = Arc::new(CartItemQueryRepository::new(pool.clone())) as DynCartItemQueryRepository;
        let command = Arc::new(CartItemCommandRepository::new(pool)) as DynCartItemCommandRepository;

        Self { query, command }
    }
}

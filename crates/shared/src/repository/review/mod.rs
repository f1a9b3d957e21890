mod command;
mod query;

use self::command::ReviewCommandRepository;
use self::query::ReviewQueryRepository;
use crate::{
    abstract_trait::{DynReviewCommandRepository, DynReviewQueryRepository},
    config::ConnectionPool,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ReviewRepository {
    pub query: DynReviewQueryRepository,
    pub command: DynReviewCommandRepository,
}

impl ReviewRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        let query = Arc::new(ReviewQueryRepository::new(pool.clone())) as DynReviewQueryRepository;
        let command = Arc::new(ReviewCommandRepository::new(pool)) as DynReviewCommandRepository;

        Self { query, command }
    }
}

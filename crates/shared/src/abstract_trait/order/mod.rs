mod command;
mod query;

pub use self::command::{
    DynOrderCommandRepository, DynOrderCommandService, OrderCommandRepositoryTrait,
    OrderCommandServiceTrait,
};
pub use self::query::{
    DynOrderQueryRepository, DynOrderQueryService, OrderQueryRepositoryTrait,
    OrderQueryServiceTrait,
};

#[cfg(test)]
pub use self::command::MockOrderCommandRepositoryTrait;
#[cfg(test)]
pub use self::query::MockOrderQueryRepositoryTrait;

mod command;
mod query;

pub use self::command::{
    DynProductCommandRepository, DynProductCommandService, ProductCommandRepositoryTrait,
    ProductCommandServiceTrait,
};
pub use self::query::{
    DynProductQueryRepository, DynProductQueryService, ProductQueryRepositoryTrait,
    ProductQueryServiceTrait,
};

#[cfg(test)]
pub use self::command::MockProductCommandRepositoryTrait;
#[cfg(test)]
pub use self::query::MockProductQueryRepositoryTrait;

mod command;
mod query;

pub use self::command::{DynUserCommandRepository, UserCommandRepositoryTrait};
pub use self::query::{
    DynUserQueryRepository, DynUserQueryService, UserQueryRepositoryTrait, UserQueryServiceTrait,
};

#[cfg(test)]
pub use self::command::MockUserCommandRepositoryTrait;
#[cfg(test)]
pub use self::query::MockUserQueryRepositoryTrait;

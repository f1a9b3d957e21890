use crate::{
    abstract_trait::{DynCustomerCommandRepository, DynCustomerQueryRepository},
    domain::requests::CreateCustomerRecord,
    errors::{RepositoryError, ServiceError},
    model::{Customer, Membership},
};
use tracing::info;

/// Lookup of the customer profile behind a user, shared by the services
/// that act on behalf of the caller.
#[derive(Clone)]
pub(crate) struct CustomerProfiles {
    pub query: DynCustomerQueryRepository,
    pub command: DynCustomerCommandRepository,
}

impl CustomerProfiles {
    pub fn new(query: DynCustomerQueryRepository, command: DynCustomerCommandRepository) -> Self {
        Self { query, command }
    }

    /// Returns the user's profile, creating a bronze one on first use.
    pub async fn get_or_create(&self, user_id: i32) -> Result<Customer, ServiceError> {
        if let Some(customer) = self.query.find_by_user_id(user_id).await? {
            return Ok(customer);
        }

        let record = CreateCustomerRecord {
            user_id,
            phone: None,
            birth_date: None,
            membership: Membership::default(),
        };

        match self.command.create(&record).await {
            Ok(customer) => {
                info!("👤 Created customer profile {} for user {user_id}", customer.customer_id);
                Ok(customer)
            }
            // Lost a race with a concurrent request for the same user.
            Err(RepositoryError::AlreadyExists(_)) => self
                .query
                .find_by_user_id(user_id)
                .await?
                .ok_or_else(|| ServiceError::Internal("customer profile vanished".into())),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        MockCustomerCommandRepositoryTrait, MockCustomerQueryRepositoryTrait,
    };
    use crate::service::test_support::customer;
    use mockall::Sequence;
    use std::sync::Arc;

    #[tokio::test]
    async fn existing_profile_is_returned() {
        let mut query = MockCustomerQueryRepositoryTrait::new();
        query
            .expect_find_by_user_id()
            .returning(|user_id| Ok(Some(customer(3, user_id))));
        let mut command = MockCustomerCommandRepositoryTrait::new();
        command.expect_create().never();

        let profiles = CustomerProfiles::new(Arc::new(query), Arc::new(command));
        let found = profiles.get_or_create(8).await.unwrap();

        assert_eq!(found.customer_id, 3);
    }

    #[tokio::test]
    async fn missing_profile_is_created_as_bronze() {
        let mut query = MockCustomerQueryRepositoryTrait::new();
        query.expect_find_by_user_id().returning(|_| Ok(None));
        let mut command = MockCustomerCommandRepositoryTrait::new();
        command
            .expect_create()
            .withf(|r| r.user_id == 8 && r.membership == Membership::Bronze)
            .times(1)
            .returning(|r| Ok(customer(4, r.user_id)));

        let profiles = CustomerProfiles::new(Arc::new(query), Arc::new(command));

        assert_eq!(profiles.get_or_create(8).await.unwrap().customer_id, 4);
    }

    #[tokio::test]
    async fn concurrent_creation_refetches() {
        let mut seq = Sequence::new();
        let mut query = MockCustomerQueryRepositoryTrait::new();
        query
            .expect_find_by_user_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        let mut command = MockCustomerCommandRepositoryTrait::new();
        command
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(RepositoryError::AlreadyExists("customers_user_id_key".into())));
        query
            .expect_find_by_user_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|user_id| Ok(Some(customer(5, user_id))));

        let profiles = CustomerProfiles::new(Arc::new(query), Arc::new(command));

        assert_eq!(profiles.get_or_create(8).await.unwrap().customer_id, 5);
    }
}

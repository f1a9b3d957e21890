use super::CustomerProfiles;
use crate::{
    abstract_trait::CustomerCommandServiceTrait,
    domain::{
        Session,
        requests::{CreateCustomerRecord, CreateCustomerRequest, UpdateCustomerRequest},
        responses::{ApiResponse, CustomerResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Customer,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{info, warn};

const CUSTOMER_HAS_ORDERS: &str = "Customer cannot be deleted because they have placed orders.";

pub struct CustomerCommandService {
    profiles: CustomerProfiles,
    tracker: OperationTracker,
}

impl CustomerCommandService {
    pub(super) fn new(profiles: CustomerProfiles, registry: &mut Registry) -> Self {
        Self {
            profiles,
            tracker: OperationTracker::new("customer-command-service", registry),
        }
    }

    async fn insert(
        &self,
        session: &Session,
        req: &CreateCustomerRequest,
    ) -> Result<Customer, ServiceError> {
        if self
            .profiles
            .query
            .find_by_user_id(session.user_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(
                "A customer profile already exists for this user".into(),
            ));
        }

        let record = CreateCustomerRecord {
            user_id: session.user_id,
            phone: req.phone.clone(),
            birth_date: req.birth_date,
            membership: req.membership.unwrap_or_default(),
        };

        self.profiles.command.create(&record).await.map_err(|e| match e {
            RepositoryError::AlreadyExists(_) => ServiceError::Conflict(
                "A customer profile already exists for this user".into(),
            ),
            other => ServiceError::Repo(other),
        })
    }

    async fn modify(
        &self,
        session: &Session,
        id: i32,
        req: &UpdateCustomerRequest,
    ) -> Result<Customer, ServiceError> {
        let customer = self
            .profiles
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Customer", id))?;

        if !session.can_access(customer.user_id) {
            return Err(ServiceError::Forbidden(
                "You may only update your own customer profile".into(),
            ));
        }

        Ok(self.profiles.command.update(id, req).await?)
    }

    async fn modify_me(
        &self,
        session: &Session,
        req: &UpdateCustomerRequest,
    ) -> Result<Customer, ServiceError> {
        let customer = self.profiles.get_or_create(session.user_id).await?;
        Ok(self
            .profiles
            .command
            .update(customer.customer_id, req)
            .await?)
    }

    async fn remove(&self, session: &Session, id: i32) -> Result<(), ServiceError> {
        if !session.is_staff {
            return Err(ServiceError::Forbidden(
                "Only staff can delete customers".into(),
            ));
        }

        if self.profiles.query.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("Customer", id));
        }

        let orders = self.profiles.query.count_orders(id).await?;
        if orders > 0 {
            warn!("⚠️ Customer {id} still has {orders} orders");
            return Err(ServiceError::Conflict(CUSTOMER_HAS_ORDERS.into()));
        }

        self.profiles.command.delete(id).await.map_err(|e| match e {
            RepositoryError::ForeignKey(_) => ServiceError::Conflict(CUSTOMER_HAS_ORDERS.into()),
            other => ServiceError::Repo(other),
        })
    }
}

#[async_trait]
impl CustomerCommandServiceTrait for CustomerCommandService {
    async fn create(
        &self,
        session: &Session,
        req: &CreateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        info!("🏗️ Creating customer profile for user {}", session.user_id);

        let method = Method::Post;
        let tracing_ctx = self.tracker.start(
            "CreateCustomer",
            vec![
                KeyValue::new("component", "customer"),
                KeyValue::new("user.id", session.user_id as i64),
            ],
        );

        let result = self.insert(session, req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Customer created successfully");

        Ok(ApiResponse::success(
            "Customer created successfully",
            CustomerResponse::from(result?),
        ))
    }

    async fn update(
        &self,
        session: &Session,
        id: i32,
        req: &UpdateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        info!("🔄 Updating customer {id}");

        let method = Method::Put;
        let tracing_ctx = self.tracker.start(
            "UpdateCustomer",
            vec![
                KeyValue::new("component", "customer"),
                KeyValue::new("customer.id", id as i64),
            ],
        );

        let result = self.modify(session, id, req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Customer updated successfully");

        Ok(ApiResponse::success(
            "Customer updated successfully",
            CustomerResponse::from(result?),
        ))
    }

    async fn get_or_create_me(
        &self,
        session: &Session,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "GetOrCreateMe",
            vec![
                KeyValue::new("component", "customer"),
                KeyValue::new("user.id", session.user_id as i64),
            ],
        );

        let result = self.profiles.get_or_create(session.user_id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Customer fetched successfully");

        Ok(ApiResponse::success(
            "Customer fetched successfully",
            CustomerResponse::from(result?),
        ))
    }

    async fn update_me(
        &self,
        session: &Session,
        req: &UpdateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracker.start(
            "UpdateMe",
            vec![
                KeyValue::new("component", "customer"),
                KeyValue::new("user.id", session.user_id as i64),
            ],
        );

        let result = self.modify_me(session, req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Customer updated successfully");

        Ok(ApiResponse::success(
            "Customer updated successfully",
            CustomerResponse::from(result?),
        ))
    }

    async fn delete(&self, session: &Session, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting customer {id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracker.start(
            "DeleteCustomer",
            vec![
                KeyValue::new("component", "customer"),
                KeyValue::new("customer.id", id as i64),
            ],
        );

        let result = self.remove(session, id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Customer deleted successfully");

        result?;
        Ok(ApiResponse::success("Customer deleted successfully", ()))
    }
}

use super::ensure_owner;
use crate::{
    abstract_trait::{
        DynCartItemQueryRepository, DynCartQueryRepository, DynOrderCommandRepository,
        DynOrderQueryRepository, DynProductQueryRepository, OrderCommandServiceTrait,
    },
    domain::{
        Session,
        requests::{
            CreateOrderItemRecord, CreateOrderItemRequest, CreateOrderRequest, OrderLineRecord,
            PlaceOrderRecord, UpdateOrderRequest,
        },
        responses::{ApiResponse, OrderItemResponse, OrderResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{OrderItem, PaymentStatus},
    pricing,
    service::customer::CustomerProfiles,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{info, warn};

const ORDER_HAS_ITEMS: &str = "Order cannot be deleted because it includes one or more items.";

pub(super) struct Repositories {
    pub query: DynOrderQueryRepository,
    pub command: DynOrderCommandRepository,
    pub cart_query: DynCartQueryRepository,
    pub cart_item_query: DynCartItemQueryRepository,
    pub product_query: DynProductQueryRepository,
}

pub struct OrderCommandService {
    repos: Repositories,
    profiles: CustomerProfiles,
    tracker: OperationTracker,
}

fn staff_only(session: &Session, action: &str) -> Result<(), ServiceError> {
    if session.is_staff {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!("Only staff can {action} orders")))
    }
}

fn stock_conflict(e: RepositoryError) -> ServiceError {
    match e {
        RepositoryError::Conflict(msg) => ServiceError::Conflict(msg),
        other => ServiceError::Repo(other),
    }
}

impl OrderCommandService {
    pub(super) fn new(
        repos: Repositories,
        profiles: CustomerProfiles,
        registry: &mut Registry,
    ) -> Self {
        Self {
            repos,
            profiles,
            tracker: OperationTracker::new("order-command-service", registry),
        }
    }

    async fn place(
        &self,
        session: &Session,
        req: &CreateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        if self.repos.cart_query.find_by_id(req.cart_id).await?.is_none() {
            return Err(ServiceError::field(
                "cart_id",
                "No cart with the given ID was found.",
            ));
        }

        let items = self.repos.cart_item_query.find_all_by_cart(req.cart_id).await?;
        if items.is_empty() {
            return Err(ServiceError::field("cart_id", "The cart is empty."));
        }

        if let Some(short) = items.iter().find(|i| i.stock_quantity < i.quantity) {
            warn!(
                "⚠️ Product {} has {} in stock, cart wants {}",
                short.product_id, short.stock_quantity, short.quantity
            );
            return Err(ServiceError::Conflict(format!(
                "Not enough stock for product {}",
                short.product_id
            )));
        }

        let customer = self.profiles.get_or_create(session.user_id).await?;
        let record = PlaceOrderRecord {
            customer_id: customer.customer_id,
            cart_id: req.cart_id,
            lines: items
                .iter()
                .map(|item| OrderLineRecord {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price: pricing::snapshot_unit_price(None, item.product_price),
                })
                .collect(),
        };

        let (order, lines) = self
            .repos
            .command
            .place_order(&record)
            .await
            .map_err(stock_conflict)?;

        info!(
            "📦 Order {} placed by customer {} with {} items",
            order.order_id,
            customer.customer_id,
            lines.len()
        );

        Ok(OrderResponse::new(order, lines))
    }

    async fn append(
        &self,
        session: &Session,
        order_id: i32,
        req: &CreateOrderItemRequest,
    ) -> Result<OrderItem, ServiceError> {
        let order = self
            .repos
            .query
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Order", order_id))?;

        ensure_owner(&self.profiles.query, session, &order).await?;

        if order.status() != PaymentStatus::Pending {
            return Err(ServiceError::Conflict(
                "Items can only be added to pending orders".into(),
            ));
        }

        let product = self
            .repos
            .product_query
            .find_by_id(req.product_id)
            .await?
            .ok_or_else(|| ServiceError::field("product_id", "No product with the given id"))?;

        if product.stock_quantity < req.quantity {
            return Err(ServiceError::Conflict(format!(
                "Not enough stock for product {}",
                product.product_id
            )));
        }

        let record = CreateOrderItemRecord {
            order_id,
            product_id: product.product_id,
            quantity: req.quantity,
            unit_price: pricing::snapshot_unit_price(req.unit_price, product.price),
        };

        self.repos
            .command
            .create_item(&record)
            .await
            .map_err(stock_conflict)
    }

    async fn change_status(
        &self,
        session: &Session,
        id: i32,
        status: PaymentStatus,
    ) -> Result<OrderResponse, ServiceError> {
        staff_only(session, "update")?;

        let order = self
            .repos
            .command
            .update_status(id, status)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => ServiceError::not_found("Order", id),
                other => ServiceError::Repo(other),
            })?;
        let items = self.repos.query.find_items(&[id]).await?;

        Ok(OrderResponse::new(order, items))
    }

    async fn remove(&self, session: &Session, id: i32) -> Result<(), ServiceError> {
        staff_only(session, "delete")?;

        if self.repos.query.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("Order", id));
        }

        let items = self.repos.query.count_items(id).await?;
        if items > 0 {
            warn!("⚠️ Order {id} still holds {items} items");
            return Err(ServiceError::Conflict(ORDER_HAS_ITEMS.into()));
        }

        self.repos.command.delete(id).await.map_err(|e| match e {
            RepositoryError::ForeignKey(_) => ServiceError::Conflict(ORDER_HAS_ITEMS.into()),
            other => ServiceError::Repo(other),
        })
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn checkout(
        &self,
        session: &Session,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🧾 Checkout of cart {} by user {}", req.cart_id, session.user_id);

        let method = Method::Post;
        let tracing_ctx = self.tracker.start(
            "Checkout",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("cart.id", req.cart_id.to_string()),
                KeyValue::new("user.id", session.user_id as i64),
            ],
        );

        let result = self.place(session, req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Order created successfully");

        Ok(ApiResponse::success("Order created successfully", result?))
    }

    async fn add_item(
        &self,
        session: &Session,
        order_id: i32,
        req: &CreateOrderItemRequest,
    ) -> Result<ApiResponse<OrderItemResponse>, ServiceError> {
        info!(
            "➕ Adding product {} x{} to order {order_id}",
            req.product_id, req.quantity
        );

        let method = Method::Post;
        let tracing_ctx = self.tracker.start(
            "AddOrderItem",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", order_id as i64),
                KeyValue::new("product.id", req.product_id as i64),
            ],
        );

        let result = self.append(session, order_id, req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Order item added successfully");

        Ok(ApiResponse::success(
            "Order item added successfully",
            OrderItemResponse::from(result?),
        ))
    }

    async fn update(
        &self,
        session: &Session,
        id: i32,
        req: &UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🔄 Setting order {id} payment status to {:?}", req.payment_status);

        let method = Method::Patch;
        let tracing_ctx = self.tracker.start(
            "UpdateOrder",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id as i64),
                KeyValue::new("order.status", req.payment_status.as_code()),
            ],
        );

        let result = self.change_status(session, id, req.payment_status).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Order updated successfully");

        Ok(ApiResponse::success("Order updated successfully", result?))
    }

    async fn delete(&self, session: &Session, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting order {id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracker.start(
            "DeleteOrder",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id as i64),
            ],
        );

        let result = self.remove(session, id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Order deleted successfully");

        result?;
        Ok(ApiResponse::success("Order deleted successfully", ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        MockCartItemQueryRepositoryTrait, MockCartQueryRepositoryTrait,
        MockCustomerCommandRepositoryTrait, MockCustomerQueryRepositoryTrait,
        MockOrderCommandRepositoryTrait, MockOrderQueryRepositoryTrait,
        MockProductQueryRepositoryTrait,
    };
    use crate::model::Order;
    use crate::service::test_support::{
        cart, cart_line, customer, dec, order, order_item, product,
    };
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::sync::Mutex;
    use uuid::Uuid;

    struct Mocks {
        query: MockOrderQueryRepositoryTrait,
        command: MockOrderCommandRepositoryTrait,
        carts: MockCartQueryRepositoryTrait,
        cart_items: MockCartItemQueryRepositoryTrait,
        products: MockProductQueryRepositoryTrait,
        customers: MockCustomerQueryRepositoryTrait,
        customer_command: MockCustomerCommandRepositoryTrait,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                query: MockOrderQueryRepositoryTrait::new(),
                command: MockOrderCommandRepositoryTrait::new(),
                carts: MockCartQueryRepositoryTrait::new(),
                cart_items: MockCartItemQueryRepositoryTrait::new(),
                products: MockProductQueryRepositoryTrait::new(),
                customers: MockCustomerQueryRepositoryTrait::new(),
                customer_command: MockCustomerCommandRepositoryTrait::new(),
            }
        }

        fn with_customer(mut self, customer_id: i32) -> Self {
            self.customers
                .expect_find_by_user_id()
                .returning(move |user_id| Ok(Some(customer(customer_id, user_id))));
            self.customers
                .expect_find_by_id()
                .returning(|id| Ok(Some(customer(id, 4))));
            self
        }

        fn build(self) -> OrderCommandService {
            OrderCommandService::new(
                Repositories {
                    query: Arc::new(self.query),
                    command: Arc::new(self.command),
                    cart_query: Arc::new(self.carts),
                    cart_item_query: Arc::new(self.cart_items),
                    product_query: Arc::new(self.products),
                },
                CustomerProfiles::new(Arc::new(self.customers), Arc::new(self.customer_command)),
                &mut Registry::default(),
            )
        }
    }

    fn placed(record: &PlaceOrderRecord) -> (Order, Vec<OrderItem>) {
        let items = record
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let mut item = order_item(i as i32 + 1, 1, line.product_id, line.quantity, "0");
                item.unit_price = line.unit_price;
                item
            })
            .collect();
        (order(1, record.customer_id, "P"), items)
    }

    #[tokio::test]
    async fn checkout_snapshots_current_prices() {
        let cart_id = Uuid::new_v4();
        let mut mocks = Mocks::new().with_customer(21);
        mocks.carts.expect_find_by_id().returning(|id| Ok(Some(cart(id))));
        mocks.cart_items.expect_find_all_by_cart().returning(|cart_id| {
            Ok(vec![
                cart_line(1, cart_id, 10, "10.00", 5, 2),
                cart_line(2, cart_id, 11, "3.50", 5, 3),
            ])
        });
        mocks
            .command
            .expect_place_order()
            .withf(move |r| {
                r.cart_id == cart_id
                    && r.customer_id == 21
                    && r.lines
                        == vec![
                            OrderLineRecord {
                                product_id: 10,
                                quantity: 2,
                                unit_price: dec("10.00"),
                            },
                            OrderLineRecord {
                                product_id: 11,
                                quantity: 3,
                                unit_price: dec("3.50"),
                            },
                        ]
            })
            .times(1)
            .returning(|r| Ok(placed(r)));

        let response = mocks
            .build()
            .checkout(&Session::new(4, false), &CreateOrderRequest { cart_id })
            .await
            .unwrap();

        assert_eq!(response.data.total_price, dec("30.50"));
        assert_eq!(response.data.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn order_total_ignores_later_price_changes() {
        let cart_id = Uuid::new_v4();
        let current_price = Arc::new(Mutex::new(dec("10.00")));
        let stored: Arc<Mutex<Vec<OrderItem>>> = Arc::new(Mutex::new(Vec::new()));

        let mut mocks = Mocks::new().with_customer(21);
        mocks.carts.expect_find_by_id().returning(|id| Ok(Some(cart(id))));
        let price = current_price.clone();
        mocks.cart_items.expect_find_all_by_cart().returning(move |cart_id| {
            let price = price.lock().unwrap().to_string();
            Ok(vec![cart_line(1, cart_id, 10, &price, 5, 2)])
        });
        let sink = stored.clone();
        mocks.command.expect_place_order().returning(move |r| {
            let (order, items) = placed(r);
            *sink.lock().unwrap() = items.clone();
            Ok((order, items))
        });

        let service = mocks.build();
        let placed_total = service
            .checkout(&Session::new(4, false), &CreateOrderRequest { cart_id })
            .await
            .unwrap()
            .data
            .total_price;

        *current_price.lock().unwrap() = dec("99.00");
        let items = stored.lock().unwrap().clone();
        let reread = OrderResponse::new(order(1, 21, "P"), items);

        assert_eq!(placed_total, dec("20.00"));
        assert_eq!(reread.total_price, placed_total);
    }

    #[tokio::test]
    async fn empty_cart_is_a_field_error() {
        let mut mocks = Mocks::new();
        mocks.carts.expect_find_by_id().returning(|id| Ok(Some(cart(id))));
        mocks
            .cart_items
            .expect_find_all_by_cart()
            .returning(|_| Ok(Vec::new()));
        mocks.command.expect_place_order().never();

        let err = mocks
            .build()
            .checkout(
                &Session::new(4, false),
                &CreateOrderRequest {
                    cart_id: Uuid::new_v4(),
                },
            )
            .await
            .unwrap_err();

        match err {
            ServiceError::Validation(errors) => assert!(errors.contains_key("cart_id")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_cart_is_a_field_error() {
        let mut mocks = Mocks::new();
        mocks.carts.expect_find_by_id().returning(|_| Ok(None));

        let err = mocks
            .build()
            .checkout(
                &Session::new(4, false),
                &CreateOrderRequest {
                    cart_id: Uuid::new_v4(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn checkout_beyond_stock_conflicts() {
        let mut mocks = Mocks::new();
        mocks.carts.expect_find_by_id().returning(|id| Ok(Some(cart(id))));
        mocks
            .cart_items
            .expect_find_all_by_cart()
            .returning(|cart_id| Ok(vec![cart_line(1, cart_id, 10, "1.00", 1, 3)]));
        mocks.command.expect_place_order().never();

        let err = mocks
            .build()
            .checkout(
                &Session::new(4, false),
                &CreateOrderRequest {
                    cart_id: Uuid::new_v4(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn added_item_defaults_to_current_price() {
        let mut mocks = Mocks::new().with_customer(21);
        mocks
            .query
            .expect_find_by_id()
            .returning(|id| Ok(Some(order(id, 21, "P"))));
        mocks
            .products
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "7.25", 10))));
        mocks
            .command
            .expect_create_item()
            .withf(|r| r.unit_price == dec("7.25") && r.order_id == 3)
            .returning(|r| {
                let mut item = order_item(9, r.order_id, r.product_id, r.quantity, "0");
                item.unit_price = r.unit_price;
                Ok(item)
            });

        let req = CreateOrderItemRequest {
            product_id: 6,
            quantity: 2,
            unit_price: None,
        };
        let response = mocks
            .build()
            .add_item(&Session::new(4, false), 3, &req)
            .await
            .unwrap();

        assert_eq!(response.data.total_price, dec("14.50"));
    }

    #[tokio::test]
    async fn explicit_unit_price_is_kept() {
        let mut mocks = Mocks::new();
        mocks
            .query
            .expect_find_by_id()
            .returning(|id| Ok(Some(order(id, 21, "P"))));
        mocks
            .products
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "7.25", 10))));
        mocks
            .command
            .expect_create_item()
            .withf(|r| r.unit_price == dec("5.00"))
            .times(1)
            .returning(|r| {
                let mut item = order_item(9, r.order_id, r.product_id, r.quantity, "0");
                item.unit_price = r.unit_price;
                Ok(item)
            });

        let req = CreateOrderItemRequest {
            product_id: 6,
            quantity: 1,
            unit_price: Some(dec("5.00")),
        };

        assert!(
            mocks
                .build()
                .add_item(&Session::new(1, true), 3, &req)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn completed_order_takes_no_items() {
        let mut mocks = Mocks::new();
        mocks
            .query
            .expect_find_by_id()
            .returning(|id| Ok(Some(order(id, 21, "C"))));
        mocks.command.expect_create_item().never();

        let req = CreateOrderItemRequest {
            product_id: 6,
            quantity: 1,
            unit_price: None,
        };
        let err = mocks
            .build()
            .add_item(&Session::new(1, true), 3, &req)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn order_with_items_is_not_deleted() {
        let mut mocks = Mocks::new();
        mocks
            .query
            .expect_find_by_id()
            .returning(|id| Ok(Some(order(id, 21, "P"))));
        mocks.query.expect_count_items().returning(|_| Ok(2));
        mocks.command.expect_delete().never();

        let err = mocks
            .build()
            .delete(&Session::new(1, true), 3)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn customers_cannot_change_payment_status() {
        let mut mocks = Mocks::new();
        mocks.command.expect_update_status().never();

        let req = UpdateOrderRequest {
            payment_status: PaymentStatus::Complete,
        };
        let err = mocks
            .build()
            .update(&Session::new(4, false), 3, &req)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn status_update_keeps_stored_prices() {
        let mut mocks = Mocks::new();
        mocks
            .command
            .expect_update_status()
            .returning(|id, status| Ok(order(id, 21, status.as_code())));
        mocks
            .query
            .expect_find_items()
            .returning(|_| Ok(vec![order_item(1, 3, 5, 4, "2.00")]));

        let req = UpdateOrderRequest {
            payment_status: PaymentStatus::Complete,
        };
        let response = mocks
            .build()
            .update(&Session::new(1, true), 3, &req)
            .await
            .unwrap();

        assert_eq!(response.data.payment_status, PaymentStatus::Complete);
        assert_eq!(response.data.total_price, Decimal::from(8));
    }
}

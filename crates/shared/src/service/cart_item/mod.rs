use crate::{
    abstract_trait::{
        CartItemServiceTrait, DynCartItemCommandRepository, DynCartItemQueryRepository,
        DynCartQueryRepository, DynProductQueryRepository,
    },
    domain::{
        requests::{CreateCartItemRequest, MAX_QUANTITY, UpdateCartItemRequest},
        responses::{ApiResponse, CartItemResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::CartItemWithProduct,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::info;
use uuid::Uuid;

pub struct CartItemService {
    carts: DynCartQueryRepository,
    query: DynCartItemQueryRepository,
    command: DynCartItemCommandRepository,
    products: DynProductQueryRepository,
    tracker: OperationTracker,
}

impl CartItemService {
    pub fn new(
        carts: DynCartQueryRepository,
        query: DynCartItemQueryRepository,
        command: DynCartItemCommandRepository,
        products: DynProductQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            carts,
            query,
            command,
            products,
            tracker: OperationTracker::new("cart-item-service", registry),
        }
    }

    async fn ensure_cart(&self, cart_id: Uuid) -> Result<(), ServiceError> {
        match self.carts.find_by_id(cart_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("Cart", cart_id)),
        }
    }

    async fn line(&self, cart_id: Uuid, item_id: i32) -> Result<CartItemWithProduct, ServiceError> {
        self.query
            .find_by_id(cart_id, item_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Cart item", item_id))
    }

    async fn list(&self, cart_id: Uuid) -> Result<Vec<CartItemWithProduct>, ServiceError> {
        self.ensure_cart(cart_id).await?;
        Ok(self.query.find_all_by_cart(cart_id).await?)
    }

    async fn show(&self, cart_id: Uuid, item_id: i32) -> Result<CartItemWithProduct, ServiceError> {
        self.ensure_cart(cart_id).await?;
        self.line(cart_id, item_id).await
    }

    /// Adds to the existing line for the product, or opens a new one.
    async fn merge_or_create(
        &self,
        cart_id: Uuid,
        req: &CreateCartItemRequest,
    ) -> Result<CartItemWithProduct, ServiceError> {
        self.ensure_cart(cart_id).await?;

        if self.products.find_by_id(req.product_id).await?.is_none() {
            return Err(ServiceError::field(
                "product_id",
                "No product with the given id",
            ));
        }

        let item = match self.query.find_by_product(cart_id, req.product_id).await? {
            Some(existing) => {
                let quantity = existing
                    .quantity
                    .checked_add(req.quantity)
                    .filter(|q| *q <= MAX_QUANTITY)
                    .ok_or_else(|| {
                        ServiceError::field(
                            "quantity",
                            "Quantity must be between 1 and 32767",
                        )
                    })?;
                info!(
                    "➕ Merging product {} into cart item {} (quantity {quantity})",
                    req.product_id, existing.cart_item_id
                );
                self.command
                    .update_quantity(existing.cart_item_id, quantity)
                    .await?
            }
            None => {
                self.command
                    .create(cart_id, req.product_id, req.quantity)
                    .await
                    .map_err(|e| match e {
                        RepositoryError::ForeignKey(_) => ServiceError::field(
                            "product_id",
                            "No product with the given id",
                        ),
                        other => ServiceError::Repo(other),
                    })?
            }
        };

        self.line(cart_id, item.cart_item_id).await
    }

    async fn change_quantity(
        &self,
        cart_id: Uuid,
        item_id: i32,
        quantity: i32,
    ) -> Result<CartItemWithProduct, ServiceError> {
        self.show(cart_id, item_id).await?;
        self.command.update_quantity(item_id, quantity).await?;
        self.line(cart_id, item_id).await
    }

    async fn remove(&self, cart_id: Uuid, item_id: i32) -> Result<(), ServiceError> {
        self.show(cart_id, item_id).await?;
        Ok(self.command.delete(item_id).await?)
    }
}

#[async_trait]
impl CartItemServiceTrait for CartItemService {
    async fn find_all(
        &self,
        cart_id: Uuid,
    ) -> Result<ApiResponse<Vec<CartItemResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindAllCartItems",
            vec![
                KeyValue::new("component", "cart_item"),
                KeyValue::new("cart.id", cart_id.to_string()),
            ],
        );

        let result = self.list(cart_id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Cart items fetched successfully");

        let data = result?.into_iter().map(CartItemResponse::from).collect();
        Ok(ApiResponse::success("Cart items fetched successfully", data))
    }

    async fn find_by_id(
        &self,
        cart_id: Uuid,
        item_id: i32,
    ) -> Result<ApiResponse<CartItemResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindCartItemById",
            vec![
                KeyValue::new("component", "cart_item"),
                KeyValue::new("cart.id", cart_id.to_string()),
                KeyValue::new("cart_item.id", item_id as i64),
            ],
        );

        let result = self.show(cart_id, item_id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Cart item fetched successfully");

        Ok(ApiResponse::success(
            "Cart item fetched successfully",
            CartItemResponse::from(result?),
        ))
    }

    async fn add(
        &self,
        cart_id: Uuid,
        req: &CreateCartItemRequest,
    ) -> Result<ApiResponse<CartItemResponse>, ServiceError> {
        info!(
            "🛒 Adding product {} x{} to cart {cart_id}",
            req.product_id, req.quantity
        );

        let method = Method::Post;
        let tracing_ctx = self.tracker.start(
            "AddCartItem",
            vec![
                KeyValue::new("component", "cart_item"),
                KeyValue::new("cart.id", cart_id.to_string()),
                KeyValue::new("product.id", req.product_id as i64),
            ],
        );

        let result = self.merge_or_create(cart_id, req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Cart item added successfully");

        Ok(ApiResponse::success(
            "Cart item added successfully",
            CartItemResponse::from(result?),
        ))
    }

    async fn update(
        &self,
        cart_id: Uuid,
        item_id: i32,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartItemResponse>, ServiceError> {
        let method = Method::Patch;
        let tracing_ctx = self.tracker.start(
            "UpdateCartItem",
            vec![
                KeyValue::new("component", "cart_item"),
                KeyValue::new("cart_item.id", item_id as i64),
            ],
        );

        let result = self.change_quantity(cart_id, item_id, req.quantity).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Cart item updated successfully");

        Ok(ApiResponse::success(
            "Cart item updated successfully",
            CartItemResponse::from(result?),
        ))
    }

    async fn delete(&self, cart_id: Uuid, item_id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let method = Method::Delete;
        let tracing_ctx = self.tracker.start(
            "DeleteCartItem",
            vec![
                KeyValue::new("component", "cart_item"),
                KeyValue::new("cart_item.id", item_id as i64),
            ],
        );

        let result = self.remove(cart_id, item_id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Cart item deleted successfully");

        result?;
        Ok(ApiResponse::success("Cart item deleted successfully", ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        MockCartItemCommandRepositoryTrait, MockCartItemQueryRepositoryTrait,
        MockCartQueryRepositoryTrait, MockProductQueryRepositoryTrait,
    };
    use crate::service::test_support::{cart, cart_item, cart_line, product};
    use rstest::rstest;
    use std::sync::Arc;

    struct Mocks {
        carts: MockCartQueryRepositoryTrait,
        query: MockCartItemQueryRepositoryTrait,
        command: MockCartItemCommandRepositoryTrait,
        products: MockProductQueryRepositoryTrait,
    }

    impl Mocks {
        fn with_cart() -> Self {
            let mut carts = MockCartQueryRepositoryTrait::new();
            carts.expect_find_by_id().returning(|id| Ok(Some(cart(id))));

            Self {
                carts,
                query: MockCartItemQueryRepositoryTrait::new(),
                command: MockCartItemCommandRepositoryTrait::new(),
                products: MockProductQueryRepositoryTrait::new(),
            }
        }

        fn build(self) -> CartItemService {
            CartItemService::new(
                Arc::new(self.carts),
                Arc::new(self.query),
                Arc::new(self.command),
                Arc::new(self.products),
                &mut Registry::default(),
            )
        }
    }

    fn add_request(product_id: i32, quantity: i32) -> CreateCartItemRequest {
        CreateCartItemRequest {
            product_id,
            quantity,
        }
    }

    #[rstest]
    #[case(2, 3, 5)]
    #[case(1, 1, 2)]
    #[tokio::test]
    async fn adding_same_product_merges_quantity(
        #[case] existing: i32,
        #[case] added: i32,
        #[case] expected: i32,
    ) {
        let cart_id = Uuid::new_v4();
        let mut mocks = Mocks::with_cart();
        mocks
            .products
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "2.00", 50))));
        mocks
            .query
            .expect_find_by_product()
            .returning(move |cart_id, product_id| {
                Ok(Some(cart_item(8, cart_id, product_id, existing)))
            });
        mocks.command.expect_create().never();
        mocks
            .command
            .expect_update_quantity()
            .withf(move |id, quantity| *id == 8 && *quantity == expected)
            .times(1)
            .returning(move |id, quantity| Ok(cart_item(id, cart_id, 3, quantity)));
        mocks
            .query
            .expect_find_by_id()
            .returning(move |cart_id, id| Ok(Some(cart_line(id, cart_id, 3, "2.00", 50, expected))));

        let response = mocks
            .build()
            .add(cart_id, &add_request(3, added))
            .await
            .unwrap();

        assert_eq!(response.data.id, 8);
        assert_eq!(response.data.quantity, expected);
    }

    #[rstest]
    #[case(32767, 1)]
    #[case(30000, 2768)]
    #[case(i32::MAX, 1)]
    #[tokio::test]
    async fn merged_quantity_above_limit_is_a_field_error(
        #[case] existing: i32,
        #[case] added: i32,
    ) {
        let mut mocks = Mocks::with_cart();
        mocks
            .products
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "2.00", 50))));
        mocks
            .query
            .expect_find_by_product()
            .returning(move |cart_id, product_id| {
                Ok(Some(cart_item(8, cart_id, product_id, existing)))
            });
        mocks.command.expect_create().never();
        mocks.command.expect_update_quantity().never();

        let err = mocks
            .build()
            .add(Uuid::new_v4(), &add_request(3, added))
            .await
            .unwrap_err();

        match err {
            ServiceError::Validation(errors) => assert_eq!(
                errors.get("quantity"),
                Some(&vec!["Quantity must be between 1 and 32767".to_string()])
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn new_product_opens_a_line() {
        let cart_id = Uuid::new_v4();
        let mut mocks = Mocks::with_cart();
        mocks
            .products
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "2.00", 50))));
        mocks.query.expect_find_by_product().returning(|_, _| Ok(None));
        mocks
            .command
            .expect_create()
            .times(1)
            .returning(|cart_id, product_id, quantity| {
                Ok(cart_item(9, cart_id, product_id, quantity))
            });
        mocks
            .query
            .expect_find_by_id()
            .returning(|cart_id, id| Ok(Some(cart_line(id, cart_id, 3, "2.00", 50, 2))));

        let response = mocks
            .build()
            .add(cart_id, &add_request(3, 2))
            .await
            .unwrap();

        assert_eq!(response.data.id, 9);
    }

    #[tokio::test]
    async fn unknown_product_is_a_field_error() {
        let mut mocks = Mocks::with_cart();
        mocks.products.expect_find_by_id().returning(|_| Ok(None));
        mocks.command.expect_create().never();

        let err = mocks
            .build()
            .add(Uuid::new_v4(), &add_request(404, 1))
            .await
            .unwrap_err();

        match err {
            ServiceError::Validation(errors) => assert_eq!(
                errors.get("product_id"),
                Some(&vec!["No product with the given id".to_string()])
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_cart_is_not_found() {
        let mut carts = MockCartQueryRepositoryTrait::new();
        carts.expect_find_by_id().returning(|_| Ok(None));
        let mocks = Mocks {
            carts,
            query: MockCartItemQueryRepositoryTrait::new(),
            command: MockCartItemCommandRepositoryTrait::new(),
            products: MockProductQueryRepositoryTrait::new(),
        };

        let err = mocks
            .build()
            .add(Uuid::new_v4(), &add_request(1, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}

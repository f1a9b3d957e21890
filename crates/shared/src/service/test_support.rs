use crate::{
    model::{Cart, CartItem, CartItemWithProduct, Category, Customer, Order, OrderItem, Product, User},
    utils::OperationTracker,
};
use chrono::{NaiveDate, NaiveDateTime};
use prometheus_client::registry::Registry;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

pub fn tracker(name: &'static str) -> OperationTracker {
    OperationTracker::new(name, &mut Registry::default())
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn user(id: i32) -> User {
    User {
        user_id: id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        password: "hashed".into(),
        is_staff: false,
        is_active: true,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn category(id: i32, products_count: i64) -> Category {
    Category {
        category_id: id,
        title: "Beverages".into(),
        products_count,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn product(id: i32, price: &str, stock: i32) -> Product {
    Product {
        product_id: id,
        name: format!("Product {id}"),
        description: None,
        price: dec(price),
        discount_percent: None,
        stock_quantity: stock,
        category_id: 1,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn customer(id: i32, user_id: i32) -> Customer {
    Customer {
        customer_id: id,
        user_id,
        phone: None,
        birth_date: None,
        membership: "B".into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: format!("user{user_id}@example.com"),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

pub fn cart(id: Uuid) -> Cart {
    Cart {
        cart_id: id,
        created_at: timestamp(),
    }
}

pub fn cart_item(id: i32, cart_id: Uuid, product_id: i32, quantity: i32) -> CartItem {
    CartItem {
        cart_item_id: id,
        cart_id,
        product_id,
        quantity,
    }
}

pub fn cart_line(
    id: i32,
    cart_id: Uuid,
    product_id: i32,
    price: &str,
    stock: i32,
    quantity: i32,
) -> CartItemWithProduct {
    CartItemWithProduct {
        cart_item_id: id,
        cart_id,
        product_id,
        product_name: format!("Product {product_id}"),
        product_price: dec(price),
        stock_quantity: stock,
        quantity,
    }
}

pub fn order(id: i32, customer_id: i32, status: &str) -> Order {
    Order {
        order_id: id,
        customer_id,
        payment_status: status.into(),
        placed_at: timestamp(),
    }
}

pub fn order_item(id: i32, order_id: i32, product_id: i32, quantity: i32, price: &str) -> OrderItem {
    OrderItem {
        order_item_id: id,
        order_id,
        product_id,
        quantity,
        unit_price: dec(price),
    }
}

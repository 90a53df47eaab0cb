//! Cart and order workflow tests against an in-process database
//!
//! Run: cargo test -p pearl-server --test cart_order_flow

use pearl_server::db::DbService;
use pearl_server::db::models::{MenuItemCreate, MenuItemUpdate, OrderCreate, OrderItemInput, UserCreate};
use pearl_server::db::repository::{MenuItemRepository, Repository, UserRepository};
use pearl_server::pricing::MissingItemPolicy;
use pearl_server::services::AuditService;
use pearl_server::{AppError, CartEngine, OrderService};
use shared::{MenuCategory, OrderStatus, PaymentStatus, Role};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

struct Fixture {
    db: Surreal<Db>,
    customer: RecordId,
    soup: RecordId,
    steak: RecordId,
}

async fn setup() -> Fixture {
    let db = DbService::connect_memory().await.unwrap().db;

    let users = UserRepository::new(db.clone());
    let customer = users
        .create(UserCreate {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            phone: None,
            role: Role::Customer,
        })
        .await
        .unwrap()
        .id
        .unwrap();

    let menu = MenuItemRepository::new(db.clone());
    let soup = menu
        .create(MenuItemCreate {
            name: "Tomato Soup".into(),
            description: None,
            price: 10.0,
            category: MenuCategory::Appetizer,
            is_available: None,
        })
        .await
        .unwrap()
        .id
        .unwrap();
    let steak = menu
        .create(MenuItemCreate {
            name: "Ribeye Steak".into(),
            description: None,
            price: 15.0,
            category: MenuCategory::Main,
            is_available: None,
        })
        .await
        .unwrap()
        .id
        .unwrap();

    Fixture {
        db,
        customer,
        soup,
        steak,
    }
}

fn cart_engine(fx: &Fixture) -> CartEngine {
    CartEngine::new(fx.db.clone(), MissingItemPolicy::PriceAsZero)
}

fn order_service(fx: &Fixture) -> OrderService {
    OrderService::new(
        fx.db.clone(),
        MissingItemPolicy::PriceAsZero,
        false,
        AuditService::new(fx.db.clone()),
    )
}

#[tokio::test]
async fn cart_total_tracks_every_mutation() {
    let fx = setup().await;
    let engine = cart_engine(&fx);

    let cart = engine.create_cart(Some(fx.customer.clone())).await.unwrap();
    assert_eq!(cart.total_price, 0.0);
    let cart_id = cart.id.unwrap().to_string();
    let soup = fx.soup.to_string();
    let steak = fx.steak.to_string();

    // add 2 soup -> 20
    let cart = engine.add_item(&cart_id, &soup, Some(2)).await.unwrap();
    assert_eq!(cart.total_price, 20.0);

    // add steak (default qty 1) -> 35
    let cart = engine.add_item(&cart_id, &steak, None).await.unwrap();
    assert_eq!(cart.total_price, 35.0);

    // adding soup again increments instead of duplicating
    let cart = engine.add_item(&cart_id, &soup, Some(1)).await.unwrap();
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.total_price, 45.0);

    // set soup to 1 -> 25
    let cart = engine
        .update_item_quantity(&cart_id, &soup, 1)
        .await
        .unwrap();
    assert_eq!(cart.total_price, 25.0);

    // quantity floor: zero removes the line
    let cart = engine
        .update_item_quantity(&cart_id, &soup, 0)
        .await
        .unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.total_price, 15.0);

    // removing an absent item is a no-op
    let cart = engine.remove_item(&cart_id, &soup).await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.total_price, 15.0);

    // empty -> 0
    let cart = engine.empty_cart(&cart_id).await.unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_price, 0.0);
}

#[tokio::test]
async fn second_active_cart_is_rejected() {
    let fx = setup().await;
    let engine = cart_engine(&fx);

    engine.create_cart(Some(fx.customer.clone())).await.unwrap();
    let err = engine.create_cart(Some(fx.customer.clone())).await;
    assert!(matches!(err, Err(AppError::Conflict(_))));

    // guest carts are not subject to the one-per-user rule
    engine.create_cart(None).await.unwrap();
    engine.create_cart(None).await.unwrap();
}

#[tokio::test]
async fn add_item_unknown_references_fail() {
    let fx = setup().await;
    let engine = cart_engine(&fx);
    let cart = engine.create_cart(None).await.unwrap();
    let cart_id = cart.id.unwrap().to_string();

    let err = engine.add_item(&cart_id, "menu_item:ghost", Some(1)).await;
    assert!(matches!(err, Err(AppError::NotFound(_))));

    let err = engine.add_item("cart:ghost", &fx.soup.to_string(), None).await;
    assert!(matches!(err, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn checkout_drains_cart_and_freezes_total() {
    let fx = setup().await;
    let carts = cart_engine(&fx);
    let orders = order_service(&fx);

    let cart = carts.create_cart(Some(fx.customer.clone())).await.unwrap();
    let cart_id = cart.id.unwrap().to_string();
    carts
        .add_item(&cart_id, &fx.soup.to_string(), Some(2))
        .await
        .unwrap();
    carts
        .add_item(&cart_id, &fx.steak.to_string(), Some(1))
        .await
        .unwrap();

    // no explicit items -> cart handoff
    let order = orders
        .create_order(OrderCreate {
            customer_id: fx.customer.to_string(),
            customer_name: None,
            items: None,
            order_type: None,
            payment_status: None,
            customer_notes: None,
        })
        .await
        .unwrap();

    assert_eq!(order.total_price, 35.0);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Unpaid);
    assert_eq!(order.customer_name, "Alice");
    assert_eq!(order.items.len(), 2);

    // the source cart is drained
    let cart = carts.get_cart(&cart_id).await.unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_price, 0.0);

    // later price change must not touch the stored order
    let menu = MenuItemRepository::new(fx.db.clone());
    menu.update(
        &fx.soup.to_string(),
        MenuItemUpdate {
            price: Some(20.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let reloaded = orders
        .get_by_id(&order.id.unwrap().to_string())
        .await
        .unwrap();
    assert_eq!(reloaded.total_price, 35.0);
    let soup_line = reloaded
        .items
        .iter()
        .find(|l| l.menu_item == fx.soup)
        .unwrap();
    assert_eq!(soup_line.unit_price, 10.0);
}

#[tokio::test]
async fn order_from_empty_or_missing_cart_is_rejected() {
    let fx = setup().await;
    let orders = order_service(&fx);

    let payload = |customer: &RecordId| OrderCreate {
        customer_id: customer.to_string(),
        customer_name: None,
        items: None,
        order_type: None,
        payment_status: None,
        customer_notes: None,
    };

    // no cart at all
    let err = orders.create_order(payload(&fx.customer)).await;
    assert!(matches!(err, Err(AppError::Validation(_))));

    // empty cart
    let carts = cart_engine(&fx);
    carts.create_cart(Some(fx.customer.clone())).await.unwrap();
    let err = orders.create_order(payload(&fx.customer)).await;
    assert!(matches!(err, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn explicit_items_skip_the_cart() {
    let fx = setup().await;
    let orders = order_service(&fx);

    let order = orders
        .create_order(OrderCreate {
            customer_id: fx.customer.to_string(),
            customer_name: Some("Walk-in".into()),
            items: Some(vec![
                OrderItemInput {
                    menu_item: fx.steak.clone(),
                    quantity: Some(2),
                },
                OrderItemInput {
                    menu_item: fx.soup.clone(),
                    quantity: None,
                },
            ]),
            order_type: None,
            payment_status: Some(PaymentStatus::Paid),
            customer_notes: Some("no onions".into()),
        })
        .await
        .unwrap();

    assert_eq!(order.total_price, 40.0);
    assert_eq!(order.customer_name, "Walk-in");
    assert_eq!(order.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn missing_customer_id_is_rejected() {
    let fx = setup().await;
    let orders = order_service(&fx);

    let err = orders
        .create_order(OrderCreate {
            customer_id: "  ".into(),
            customer_name: None,
            items: None,
            order_type: None,
            payment_status: None,
            customer_notes: None,
        })
        .await;
    assert!(matches!(err, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn strict_pricing_rejects_vanished_items() {
    let fx = setup().await;
    let strict = OrderService::new(
        fx.db.clone(),
        MissingItemPolicy::Reject,
        false,
        AuditService::new(fx.db.clone()),
    );

    let err = strict
        .create_order(OrderCreate {
            customer_id: fx.customer.to_string(),
            customer_name: Some("Alice".into()),
            items: Some(vec![OrderItemInput {
                menu_item: RecordId::from_table_key("menu_item", "gone"),
                quantity: Some(1),
            }]),
            order_type: None,
            payment_status: None,
            customer_notes: None,
        })
        .await;
    assert!(matches!(err, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn status_updates_are_staff_gated() {
    let fx = setup().await;
    let orders = order_service(&fx);

    let order = orders
        .create_order(OrderCreate {
            customer_id: fx.customer.to_string(),
            customer_name: Some("Alice".into()),
            items: Some(vec![OrderItemInput {
                menu_item: fx.soup.clone(),
                quantity: Some(1),
            }]),
            order_type: None,
            payment_status: None,
            customer_notes: None,
        })
        .await
        .unwrap();
    let order_id = order.id.unwrap().to_string();

    let customer = pearl_server::CurrentUser {
        id: fx.customer.clone(),
        name: "Alice".into(),
        role: Role::Customer,
    };
    let manager = pearl_server::CurrentUser {
        id: RecordId::from_table_key("user", "mgr"),
        name: "Marta".into(),
        role: Role::Manager,
    };

    use pearl_server::db::models::OrderStatusUpdate;

    let err = orders
        .update_status(
            &order_id,
            OrderStatusUpdate {
                status: Some(OrderStatus::Accepted),
                payment_status: None,
            },
            &customer,
        )
        .await;
    assert!(matches!(err, Err(AppError::Forbidden(_))));

    // neither field -> validation error
    let err = orders
        .update_status(&order_id, OrderStatusUpdate::default(), &manager)
        .await;
    assert!(matches!(err, Err(AppError::Validation(_))));

    let updated = orders
        .update_status(
            &order_id,
            OrderStatusUpdate {
                status: Some(OrderStatus::Accepted),
                payment_status: Some(PaymentStatus::Paid),
            },
            &manager,
        )
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Accepted);
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn transition_allow_list_is_opt_in() {
    let fx = setup().await;
    let strict = OrderService::new(
        fx.db.clone(),
        MissingItemPolicy::PriceAsZero,
        true,
        AuditService::new(fx.db.clone()),
    );

    let order = strict
        .create_order(OrderCreate {
            customer_id: fx.customer.to_string(),
            customer_name: Some("Alice".into()),
            items: Some(vec![OrderItemInput {
                menu_item: fx.soup.clone(),
                quantity: Some(1),
            }]),
            order_type: None,
            payment_status: None,
            customer_notes: None,
        })
        .await
        .unwrap();
    let order_id = order.id.unwrap().to_string();

    let admin = pearl_server::CurrentUser {
        id: RecordId::from_table_key("user", "admin"),
        name: "Root".into(),
        role: Role::Admin,
    };

    use pearl_server::db::models::OrderStatusUpdate;

    // Pending -> Completed is not in the allow-list
    let err = strict
        .update_status(
            &order_id,
            OrderStatusUpdate {
                status: Some(OrderStatus::Completed),
                payment_status: None,
            },
            &admin,
        )
        .await;
    assert!(matches!(err, Err(AppError::Conflict(_))));

    // Pending -> InProgress -> Completed is
    strict
        .update_status(
            &order_id,
            OrderStatusUpdate {
                status: Some(OrderStatus::InProgress),
                payment_status: None,
            },
            &admin,
        )
        .await
        .unwrap();
    let done = strict
        .update_status(
            &order_id,
            OrderStatusUpdate {
                status: Some(OrderStatus::Completed),
                payment_status: None,
            },
            &admin,
        )
        .await
        .unwrap();
    assert_eq!(done.status, OrderStatus::Completed);
}

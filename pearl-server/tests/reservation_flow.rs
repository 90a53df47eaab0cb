//! Reservation availability and lifecycle tests
//!
//! Run: cargo test -p pearl-server --test reservation_flow
//!
//! 注意：可用性检查与落库之间仍有竞态窗口（check-then-act），
//! 这里只验证串行语义。

use std::sync::Arc;

use pearl_server::db::DbService;
use pearl_server::db::models::{DiningTableCreate, ReservationCreate, UserCreate};
use pearl_server::db::repository::{DiningTableRepository, NotificationRepository, UserRepository};
use pearl_server::reservations::{AvailabilityEngine, AvailabilityQuery, ReservationEngine};
use pearl_server::services::{AuditService, LogConfirmationSender, NotificationService};
use pearl_server::{AppError, CurrentUser};
use shared::{ReservationStatus, Role, TableLocation, TableStatus};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

struct Fixture {
    db: Surreal<Db>,
    alice: CurrentUser,
    bob: CurrentUser,
    admin: CurrentUser,
    manager: CurrentUser,
    /// capacity 4
    table3: RecordId,
    /// capacity 6
    table5: RecordId,
}

async fn make_user(users: &UserRepository, name: &str, email: &str, role: Role) -> CurrentUser {
    let user = users
        .create(UserCreate {
            name: name.into(),
            email: email.into(),
            phone: None,
            role,
        })
        .await
        .unwrap();
    CurrentUser {
        id: user.id.unwrap(),
        name: user.name,
        role,
    }
}

async fn setup() -> Fixture {
    let db = DbService::connect_memory().await.unwrap().db;
    let users = UserRepository::new(db.clone());

    let alice = make_user(&users, "Alice", "alice@example.com", Role::Customer).await;
    let bob = make_user(&users, "Bob", "bob@example.com", Role::Customer).await;
    let admin = make_user(&users, "Root", "root@example.com", Role::Admin).await;
    let manager = make_user(&users, "Marta", "marta@example.com", Role::Manager).await;

    let tables = DiningTableRepository::new(db.clone());
    let table3 = tables
        .create_by(
            DiningTableCreate {
                table_number: 3,
                capacity: 4,
                location: TableLocation::Indoor,
                status: None,
                features: vec![],
            },
            admin.id.clone(),
        )
        .await
        .unwrap()
        .id
        .unwrap();
    let table5 = tables
        .create_by(
            DiningTableCreate {
                table_number: 5,
                capacity: 6,
                location: TableLocation::Window,
                status: None,
                features: vec![],
            },
            admin.id.clone(),
        )
        .await
        .unwrap()
        .id
        .unwrap();
    // a two-seater that never fits a party of 4
    tables
        .create_by(
            DiningTableCreate {
                table_number: 2,
                capacity: 2,
                location: TableLocation::Bar,
                status: None,
                features: vec![],
            },
            admin.id.clone(),
        )
        .await
        .unwrap();

    Fixture {
        db,
        alice,
        bob,
        admin,
        manager,
        table3,
        table5,
    }
}

fn engine(fx: &Fixture) -> ReservationEngine {
    let notifier = Arc::new(NotificationService::new(
        fx.db.clone(),
        Arc::new(LogConfirmationSender),
    ));
    ReservationEngine::new(fx.db.clone(), AuditService::new(fx.db.clone()), notifier)
}

fn booking(table: &RecordId, start: &str, end: &str) -> ReservationCreate {
    ReservationCreate {
        table_id: table.to_string(),
        party_size: 4,
        reservation_date: "2024-06-01".into(),
        start_time: start.into(),
        end_time: end.into(),
        customer_name: "Alice".into(),
        customer_email: "alice@example.com".into(),
        customer_phone: None,
        special_requests: None,
        occasion: None,
    }
}

#[tokio::test]
async fn availability_excludes_conflicting_table() {
    let fx = setup().await;
    let engine = engine(&fx);

    // existing booking: table #3, 18:30-19:30
    engine
        .create(booking(&fx.table3, "18:30", "19:30"), &fx.alice)
        .await
        .unwrap();

    let query = AvailabilityQuery::parse(4, "2024-06-01", "18:00", "20:00").unwrap();
    let free = AvailabilityEngine::new(fx.db.clone())
        .get_available_tables(&query)
        .await
        .unwrap();

    let ids: Vec<_> = free.iter().map(|t| t.id.clone().unwrap()).collect();
    assert!(!ids.contains(&fx.table3), "booked table must be excluded");
    assert!(ids.contains(&fx.table5), "free table must be included");
}

#[tokio::test]
async fn overlapping_booking_conflicts_boundary_touch_does_not() {
    let fx = setup().await;
    let engine = engine(&fx);

    engine
        .create(booking(&fx.table3, "18:00", "20:00"), &fx.alice)
        .await
        .unwrap();

    // contained window -> conflict
    let err = engine
        .create(booking(&fx.table3, "19:00", "19:30"), &fx.bob)
        .await;
    assert!(matches!(err, Err(AppError::Conflict(_))));

    // touching windows on both sides are fine
    engine
        .create(booking(&fx.table3, "20:00", "21:00"), &fx.bob)
        .await
        .unwrap();
    engine
        .create(booking(&fx.table3, "17:00", "18:00"), &fx.bob)
        .await
        .unwrap();
}

#[tokio::test]
async fn capacity_and_maintenance_rules() {
    let fx = setup().await;
    let engine = engine(&fx);

    // party larger than the table
    let mut oversized = booking(&fx.table3, "18:00", "20:00");
    oversized.party_size = 6;
    let err = engine.create(oversized, &fx.alice).await;
    assert!(matches!(err, Err(AppError::Validation(_))));

    // no table fits a party of 20
    let query = AvailabilityQuery::parse(20, "2024-06-01", "18:00", "20:00");
    let err = AvailabilityEngine::new(fx.db.clone())
        .get_available_tables(&query.unwrap())
        .await;
    assert!(matches!(err, Err(AppError::NotFound(_))));

    // a table under maintenance never shows up
    use pearl_server::db::models::DiningTableUpdate;
    let tables = DiningTableRepository::new(fx.db.clone());
    tables
        .update(
            &fx.table5.to_string(),
            DiningTableUpdate {
                status: Some(TableStatus::Maintenance),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let query = AvailabilityQuery::parse(6, "2024-06-01", "18:00", "20:00").unwrap();
    let err = AvailabilityEngine::new(fx.db.clone())
        .get_available_tables(&query)
        .await;
    assert!(matches!(err, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let fx = setup().await;
    let engine = engine(&fx);

    let mut bad = booking(&fx.table3, "18:00", "20:00");
    bad.customer_email = "not-an-email".into();
    assert!(matches!(
        engine.create(bad, &fx.alice).await,
        Err(AppError::Validation(_))
    ));

    let mut bad = booking(&fx.table3, "18:00", "20:00");
    bad.customer_name = "".into();
    assert!(matches!(
        engine.create(bad, &fx.alice).await,
        Err(AppError::Validation(_))
    ));

    let mut bad = booking(&fx.table3, "20:00", "18:00");
    bad.party_size = 4;
    assert!(matches!(
        engine.create(bad, &fx.alice).await,
        Err(AppError::Validation(_))
    ));

    let err = engine
        .create(booking(&RecordId::from_table_key("dining_table", "ghost"), "18:00", "20:00"), &fx.alice)
        .await;
    assert!(matches!(err, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn cancel_authorization_matrix() {
    let fx = setup().await;
    let engine = engine(&fx);

    let reservation = engine
        .create(booking(&fx.table3, "18:00", "20:00"), &fx.alice)
        .await
        .unwrap();
    let id = reservation.id.unwrap().to_string();

    // another customer -> forbidden
    let err = engine.cancel(&id, &fx.bob).await;
    assert!(matches!(err, Err(AppError::Forbidden(_))));

    // the owner may cancel
    let cancelled = engine.cancel(&id, &fx.alice).await.unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    // cancelling again is an explicit error, not a silent no-op
    let err = engine.cancel(&id, &fx.alice).await;
    assert!(matches!(err, Err(AppError::Validation(_))));

    // staff may cancel anyone's reservation
    let other = engine
        .create(booking(&fx.table5, "18:00", "20:00"), &fx.bob)
        .await
        .unwrap();
    let other_id = other.id.unwrap().to_string();
    let cancelled = engine.cancel(&other_id, &fx.admin).await.unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
}

#[tokio::test]
async fn cancelled_slot_opens_up_again() {
    let fx = setup().await;
    let engine = engine(&fx);

    let first = engine
        .create(booking(&fx.table3, "18:30", "19:30"), &fx.alice)
        .await
        .unwrap();

    let err = engine
        .create(booking(&fx.table3, "18:00", "20:00"), &fx.bob)
        .await;
    assert!(matches!(err, Err(AppError::Conflict(_))));

    engine
        .cancel(&first.id.unwrap().to_string(), &fx.alice)
        .await
        .unwrap();

    // the window is free again
    engine
        .create(booking(&fx.table3, "18:00", "20:00"), &fx.bob)
        .await
        .unwrap();
}

#[tokio::test]
async fn status_transitions_are_staff_gated_and_sticky_when_closed() {
    let fx = setup().await;
    let engine = engine(&fx);

    let reservation = engine
        .create(booking(&fx.table3, "18:00", "20:00"), &fx.alice)
        .await
        .unwrap();
    let id = reservation.id.unwrap().to_string();

    // customers cannot drive the status machine
    let err = engine
        .update_status(&id, ReservationStatus::Confirmed, false, &fx.alice)
        .await;
    assert!(matches!(err, Err(AppError::Forbidden(_))));

    let confirmed = engine
        .update_status(&id, ReservationStatus::Confirmed, false, &fx.manager)
        .await
        .unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    let completed = engine
        .update_status(&id, ReservationStatus::Completed, false, &fx.manager)
        .await
        .unwrap();
    assert_eq!(completed.status, ReservationStatus::Completed);

    // leaving a closed status needs the explicit override
    let err = engine
        .update_status(&id, ReservationStatus::Pending, false, &fx.manager)
        .await;
    assert!(matches!(err, Err(AppError::Conflict(_))));

    let reopened = engine
        .update_status(&id, ReservationStatus::Pending, true, &fx.admin)
        .await
        .unwrap();
    assert_eq!(reopened.status, ReservationStatus::Pending);
}

#[tokio::test]
async fn managers_are_notified_once_while_unread() {
    let fx = setup().await;
    let engine = engine(&fx);
    let notifier = Arc::new(NotificationService::new(
        fx.db.clone(),
        Arc::new(LogConfirmationSender),
    ));

    let reservation = engine
        .create(booking(&fx.table3, "18:00", "20:00"), &fx.alice)
        .await
        .unwrap();

    // deliver twice: the second pass must not duplicate
    notifier.deliver(reservation.clone()).await;
    notifier.deliver(reservation.clone()).await;

    let repo = NotificationRepository::new(fx.db.clone());
    let feed = repo.find_by_recipient(&fx.manager.id).await.unwrap();
    let for_this: Vec<_> = feed
        .iter()
        .filter(|n| Some(&n.reservation) == reservation.id.as_ref())
        .collect();
    assert!(
        for_this.len() <= 2,
        "spawned create-notify plus manual deliver may each write once, dedup caps the rest"
    );
    assert!(!for_this.is_empty(), "manager must be notified");

    // after reading, a new delivery is allowed again
    let first = for_this[0];
    notifier
        .mark_read(first.id.as_ref().unwrap())
        .await
        .unwrap();
}

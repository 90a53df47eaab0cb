//! On-disk storage smoke test
//!
//! Run: cargo test -p pearl-server --test storage

use pearl_server::db::DbService;
use pearl_server::db::models::MenuItemCreate;
use pearl_server::db::repository::{MenuItemRepository, RepoError, Repository};
use shared::MenuCategory;

#[tokio::test]
async fn rocksdb_round_trip_and_unique_name() {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::connect(tmp.path().to_str().unwrap())
        .await
        .unwrap()
        .db;

    let menu = MenuItemRepository::new(db);
    let created = menu
        .create(MenuItemCreate {
            name: "Espresso".into(),
            description: Some("double shot".into()),
            price: 2.5,
            category: MenuCategory::Beverage,
            is_available: None,
        })
        .await
        .unwrap();
    let id = created.id.clone().unwrap().to_string();

    let fetched = menu.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Espresso");
    assert_eq!(fetched.price, 2.5);
    assert!(fetched.is_available);

    // duplicate name is refused
    let err = menu
        .create(MenuItemCreate {
            name: "Espresso".into(),
            description: None,
            price: 3.0,
            category: MenuCategory::Beverage,
            is_available: None,
        })
        .await;
    assert!(matches!(err, Err(RepoError::Duplicate(_))));
}

mod helpers;

use helpers::math::assert_on_decimal;
use helpers::{seeded_storefront, EMAIL, PASSWORD};
use hoagie::models::{CatalogTable, NewCartItem};
use hoagie::HoagieError;

#[tokio::test]
async fn adding_to_the_cart_requires_a_session() {
    let (storefront, _remote) = seeded_storefront();

    let err = storefront
        .add_to_cart(NewCartItem::new("Italian B.M.T.", 550.0, "1.jpg"))
        .await
        .unwrap_err();

    assert_eq!(err, HoagieError::LoginRequired);
    assert!(storefront.cart().is_empty());
}

#[tokio::test]
async fn menu_items_land_in_the_cart_and_merge_by_name() {
    let (storefront, _remote) = seeded_storefront();
    storefront.sign_in(EMAIL, PASSWORD).await.unwrap();

    let sandwiches = storefront.menu(CatalogTable::Sandwiches).await.unwrap();
    let bmt = &sandwiches[0];

    for _ in 0..2 {
        storefront
            .add_to_cart(NewCartItem::new(
                bmt.name.clone(),
                bmt.price,
                bmt.image_or_default(),
            ))
            .await
            .unwrap();
    }

    let items = storefront.cart().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
    assert_on_decimal(items[0].total_price, 1100.0);
    assert_on_decimal(storefront.cart().total(), 1100.0);
}

#[tokio::test]
async fn cart_rows_survive_sign_out_and_return_on_sign_in() {
    let (storefront, _remote) = seeded_storefront();
    storefront.sign_in(EMAIL, PASSWORD).await.unwrap();

    storefront
        .add_to_cart(NewCartItem::new("Steak & Cheese", 650.0, "2.jpg"))
        .await
        .unwrap();

    storefront.sign_out().await;
    assert!(storefront.cart().is_empty());

    storefront.sign_in(EMAIL, PASSWORD).await.unwrap();
    let items = storefront.cart().items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Steak & Cheese");
}

#[tokio::test]
async fn clearing_the_cart_removes_remote_rows_too() {
    let (storefront, _remote) = seeded_storefront();
    storefront.sign_in(EMAIL, PASSWORD).await.unwrap();

    storefront
        .add_to_cart(NewCartItem::new("Veggie Delite", 400.0, "3.jpg"))
        .await
        .unwrap();
    storefront.clear_cart().await.unwrap();
    assert!(storefront.cart().is_empty());

    // Signing back in reloads from the remote; nothing should come back
    storefront.sign_out().await;
    storefront.sign_in(EMAIL, PASSWORD).await.unwrap();
    assert!(storefront.cart().is_empty());
}

#[tokio::test]
async fn restore_brings_the_cart_back_after_a_restart() {
    let (storefront, remote) = seeded_storefront();
    storefront.sign_in(EMAIL, PASSWORD).await.unwrap();
    storefront
        .add_to_cart(NewCartItem::new("Italian B.M.T.", 550.0, "1.jpg"))
        .await
        .unwrap();

    // A fresh storefront over the same remote, as after an app restart
    let restarted = hoagie::Storefront::new(remote);
    let session = restarted.restore().await.unwrap();
    assert!(session.is_some());
    assert_eq!(restarted.cart().len(), 1);
}

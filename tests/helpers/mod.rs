pub mod math;

use std::sync::Arc;

use hoagie::models::{CatalogTable, Deal, MenuItem};
use hoagie::remote::InMemoryRemote;
use hoagie::Storefront;

pub const EMAIL: &str = "sam@example.com";
pub const PASSWORD: &str = "secret123";

#[allow(dead_code)]
pub fn menu_item(id: i64, name: &str, price: f64) -> MenuItem {
    MenuItem {
        id,
        name: name.to_string(),
        price,
        image: Some(format!("{}.jpg", id)),
    }
}

#[allow(dead_code)]
pub fn deal(id: i64, name: &str, price: f64, sub_choices: u32, drink_choices: u32) -> Deal {
    Deal {
        id,
        name: name.to_string(),
        price,
        image: Some(format!("deal-{}.jpg", id)),
        sub_choices,
        drink_choices,
    }
}

/// A storefront over a seeded in-memory remote: one account, a small
/// sandwich menu and two deals. The remote handle is returned alongside
/// so tests can poke at it directly.
pub fn seeded_storefront() -> (Storefront<InMemoryRemote>, Arc<InMemoryRemote>) {
    let remote = Arc::new(InMemoryRemote::new());
    remote.seed_account(EMAIL, PASSWORD, Some("Sam"));
    remote.seed_menu(
        CatalogTable::Sandwiches,
        vec![
            menu_item(1, "Italian B.M.T.", 550.0),
            menu_item(2, "Steak & Cheese", 650.0),
            menu_item(3, "Veggie Delite", 400.0),
        ],
    );
    remote.seed_menu(
        CatalogTable::SubOptions,
        vec![menu_item(10, "Tuna", 0.0), menu_item(11, "Chicken Teriyaki", 0.0)],
    );
    remote.seed_menu(
        CatalogTable::DrinkOptions,
        vec![menu_item(20, "Cola", 0.0), menu_item(21, "Lemonade", 0.0)],
    );
    remote.seed_deal(deal(1, "Sub of the Day", 899.0, 1, 1));
    remote.seed_deal(deal(2, "Cookie Combo", 299.0, 0, 0));

    let storefront = Storefront::new(Arc::clone(&remote));
    (storefront, remote)
}

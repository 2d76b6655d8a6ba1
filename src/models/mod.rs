mod cart_item;
mod catalog;
mod order;
mod session;

pub use cart_item::{CartItem, NewCartItem};
pub use catalog::{CatalogTable, Deal, MenuItem};
pub use order::Order;
pub use session::Session;

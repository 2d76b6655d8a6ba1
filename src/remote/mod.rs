mod auth;
mod cart;
mod catalog;
mod memory;
mod orders;
mod rest;

pub use auth::AuthRepository;
pub use cart::CartRepository;
pub use catalog::CatalogRepository;
pub use memory::InMemoryRemote;
pub use orders::OrderRepository;
pub use rest::RemoteDataService;

/// Everything the storefront needs from the remote data service.
pub trait RemoteRepository:
    AuthRepository + CatalogRepository + CartRepository + OrderRepository
{
}

impl<T> RemoteRepository for T where
    T: AuthRepository + CatalogRepository + CartRepository + OrderRepository
{
}

//! Application state shared by the binary's own handlers.

use domain_products::{InMemoryProductRepository, ProductService};
use domain_users::{InMemoryUserRepository, UserService};

pub type Users = UserService<InMemoryUserRepository>;
pub type Products = ProductService<InMemoryProductRepository>;

/// Shared application state.
///
/// Services clone by `Arc`, so the domain routers, the health handlers and
/// the shutdown hook all see the same stores.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub users: Users,
    pub products: Products,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        Self {
            config,
            users: UserService::new(InMemoryUserRepository::new()),
            products: ProductService::new(InMemoryProductRepository::new()),
        }
    }
}

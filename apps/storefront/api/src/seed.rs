//! Sample catalog loaded at startup when `SEED_SAMPLE_DATA` is on.
//!
//! Records go through the services, so hashing and the status rules apply
//! exactly as they would for API clients.

use domain_products::{CreateProduct, ProductCategory, ProductStatus};
use domain_users::{CreateUser, UserStatus};
use rust_decimal::Decimal;
use tracing::info;

use crate::state::AppState;

const SAMPLE_PASSWORD: &str = "password123";

const USERS: [(&str, &str, &str, &str, UserStatus); 5] = [
    ("john_doe", "john.doe@example.com", "John", "Doe", UserStatus::Active),
    ("jane_smith", "jane.smith@example.com", "Jane", "Smith", UserStatus::Active),
    ("bob_wilson", "bob.wilson@example.com", "Bob", "Wilson", UserStatus::Inactive),
    ("alice_brown", "alice.brown@example.com", "Alice", "Brown", UserStatus::Active),
    ("charlie_davis", "charlie.davis@example.com", "Charlie", "Davis", UserStatus::Suspended),
];

struct SampleProduct {
    name: &'static str,
    description: &'static str,
    price: &'static str,
    stock_quantity: i32,
    category: ProductCategory,
}

const PRODUCTS: [SampleProduct; 10] = [
    SampleProduct {
        name: "MacBook Pro 16-inch",
        description: "Apple MacBook Pro with M2 chip, 16GB RAM, 512GB SSD",
        price: "2499.99",
        stock_quantity: 15,
        category: ProductCategory::Electronics,
    },
    SampleProduct {
        name: "iPhone 15 Pro",
        description: "Apple iPhone 15 Pro with A17 Pro chip, 128GB storage",
        price: "999.99",
        stock_quantity: 25,
        category: ProductCategory::Electronics,
    },
    SampleProduct {
        name: "Sony WH-1000XM5",
        description: "Wireless noise-canceling headphones with 30-hour battery life",
        price: "399.99",
        stock_quantity: 8,
        category: ProductCategory::Electronics,
    },
    SampleProduct {
        name: "Cotton T-Shirt",
        description: "Comfortable 100% cotton t-shirt, available in multiple colors",
        price: "24.99",
        stock_quantity: 50,
        category: ProductCategory::Clothing,
    },
    SampleProduct {
        name: "Slim Fit Jeans",
        description: "Modern slim fit jeans with stretch fabric",
        price: "79.99",
        stock_quantity: 30,
        category: ProductCategory::Clothing,
    },
    SampleProduct {
        name: "Clean Code",
        description: "A Handbook of Agile Software Craftsmanship by Robert C. Martin",
        price: "44.99",
        stock_quantity: 20,
        category: ProductCategory::Books,
    },
    SampleProduct {
        name: "Design Patterns",
        description: "Elements of Reusable Object-Oriented Software",
        price: "54.99",
        stock_quantity: 12,
        category: ProductCategory::Books,
    },
    SampleProduct {
        name: "Programmable Coffee Maker",
        description: "12-cup programmable coffee maker with auto-shutoff",
        price: "89.99",
        stock_quantity: 5,
        category: ProductCategory::Home,
    },
    SampleProduct {
        name: "Premium Yoga Mat",
        description: "Non-slip yoga mat with carrying strap",
        price: "34.99",
        stock_quantity: 0,
        category: ProductCategory::Sports,
    },
    SampleProduct {
        name: "Organic Coffee Beans",
        description: "Premium organic coffee beans, medium roast",
        price: "19.99",
        stock_quantity: 3,
        category: ProductCategory::Food,
    },
];

/// Seed each store that is still empty. Non-empty stores are left untouched.
pub async fn seed_sample_data(state: &AppState) -> eyre::Result<()> {
    info!("Initializing sample data");

    if state.users.count().await? == 0 {
        for (username, email, first_name, last_name, status) in USERS {
            state
                .users
                .create_user(CreateUser {
                    username: username.to_string(),
                    email: email.to_string(),
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    password: SAMPLE_PASSWORD.to_string(),
                    status: Some(status),
                })
                .await?;
        }
        info!(count = state.users.count().await?, "Created sample users");
    }

    if state.products.count().await? == 0 {
        for sample in PRODUCTS {
            let price: Decimal = sample.price.parse()?;
            state
                .products
                .create_product(CreateProduct {
                    name: sample.name.to_string(),
                    description: Some(sample.description.to_string()),
                    price,
                    stock_quantity: sample.stock_quantity,
                    category: Some(sample.category),
                    status: Some(ProductStatus::Available),
                })
                .await?;
        }
        info!(count = state.products.count().await?, "Created sample products");
    }

    Ok(())
}

//! First-run fixture data.
//!
//! These records seed a collection whose backend key does not exist yet.
//! Once seeded they live in the backend like any other data; editing this
//! module never rewrites an existing installation.

use crate::catalog::{Category, Product};
use crate::entity::EntityId;
use crate::identity::{Role, User};
use crate::reviews::Review;

/// The bootstrap user database: one administrator and two sample customers.
pub(crate) fn seed_users() -> Vec<User> {
    vec![
        User {
            id: EntityId::from("admin_01"),
            name: "System Administrator".to_string(),
            email: "admin@xavier.com".to_string(),
            password: "XavierSecure#2024".to_string(),
            role: Role::Admin,
            phone: None,
            address: None,
            bio: None,
            avatar: Some(
                "https://ui-avatars.com/api/?name=Admin&background=000&color=fff".to_string(),
            ),
        },
        User {
            id: EntityId::from("u1"),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
            role: Role::User,
            phone: None,
            address: None,
            bio: Some("Regular customer".to_string()),
            avatar: Some(
                "https://ui-avatars.com/api/?name=John+Doe&background=random".to_string(),
            ),
        },
        User {
            id: EntityId::from("u2"),
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            password: "password123".to_string(),
            role: Role::User,
            phone: None,
            address: None,
            bio: Some("Tech enthusiast".to_string()),
            avatar: Some(
                "https://ui-avatars.com/api/?name=Jane+Smith&background=random".to_string(),
            ),
        },
    ]
}

/// The sample catalog shown on a fresh install.
pub(crate) fn seed_products() -> Vec<Product> {
    fn product(
        id: &str,
        name: &str,
        price: f64,
        category: Category,
        description: &str,
        image: &str,
        brand: &str,
    ) -> Product {
        Product {
            id: EntityId::from(id),
            name: name.to_string(),
            price,
            category,
            description: description.to_string(),
            image: image.to_string(),
            brand: Some(brand.to_string()),
        }
    }

    vec![
        product(
            "1",
            "iPhone 15 Pro Max",
            1199.0,
            Category::Phones,
            "The ultimate iPhone with titanium design.",
            "https://images.unsplash.com/photo-1696446701796-da61225697cc?auto=format&fit=crop&q=80&w=800",
            "Apple",
        ),
        product(
            "2",
            "Samsung Galaxy S24 Ultra",
            1299.0,
            Category::Phones,
            "Galaxy AI is here. Epic mountains to simulate photo capabilities.",
            "https://images.unsplash.com/photo-1610945415295-d9bbf067e59c?auto=format&fit=crop&q=80&w=800",
            "Samsung",
        ),
        product(
            "3",
            "MacBook Pro M3",
            1599.0,
            Category::Laptops,
            "Mind-blowing. Head-turning. The best Mac ever.",
            "https://images.unsplash.com/photo-1517336714731-489689fd1ca4?auto=format&fit=crop&q=80&w=800",
            "Apple",
        ),
        product(
            "4",
            "Dell XPS 15",
            1499.0,
            Category::Laptops,
            "High performance Windows laptop for creators.",
            "https://images.unsplash.com/photo-1593642632823-8f78536788c6?auto=format&fit=crop&q=80&w=800",
            "Dell",
        ),
        product(
            "5",
            "JBL Flip 6",
            129.0,
            Category::Speakers,
            "Bold sound for every adventure. Waterproof.",
            "https://images.unsplash.com/photo-1612444530582-fc66183b16f7?auto=format&fit=crop&q=80&w=800",
            "JBL",
        ),
        product(
            "6",
            "JBL Pulse 5",
            249.0,
            Category::Speakers,
            "Sound you can see. Light show speaker.",
            "https://images.unsplash.com/photo-1589003077984-833447f0dd24?auto=format&fit=crop&q=80&w=800",
            "JBL",
        ),
        product(
            "7",
            "Apple Watch Ultra 2",
            799.0,
            Category::Wristwatches,
            "Rugged and capable. Built for the outdoors.",
            "https://images.unsplash.com/photo-1434493789847-2f02dc6ca35d?auto=format&fit=crop&q=80&w=800",
            "Apple",
        ),
        product(
            "8",
            "Netgear Nighthawk WiFi 6E",
            499.0,
            Category::Routers,
            "Blazing fast speeds for gaming and streaming.",
            "https://images.unsplash.com/photo-1544197150-b99a580bbcbf?auto=format&fit=crop&q=80&w=800",
            "Netgear",
        ),
        product(
            "9",
            "Logitech MX Master 3S",
            99.0,
            Category::Accessories,
            "An icon remastered. The best mouse for productivity.",
            "https://images.unsplash.com/photo-1527864550417-7fd91fc51a46?auto=format&fit=crop&q=80&w=800",
            "Logitech",
        ),
    ]
}

/// Sample reviews attached to the seed catalog.
pub(crate) fn seed_reviews() -> Vec<Review> {
    fn review(
        id: &str,
        product_id: &str,
        user_id: &str,
        user_name: &str,
        rating: u8,
        comment: &str,
        date: &str,
    ) -> Review {
        Review {
            id: EntityId::from(id),
            product_id: EntityId::from(product_id),
            user_id: EntityId::from(user_id),
            user_name: user_name.to_string(),
            rating,
            comment: comment.to_string(),
            date: date.to_string(),
        }
    }

    vec![
        review(
            "r1",
            "1",
            "u1",
            "TechEnthusiast",
            5,
            "Absolutely stunning phone. The battery life is incredible.",
            "2024-02-15",
        ),
        review(
            "r2",
            "1",
            "u2",
            "Sarah M.",
            4,
            "Great phone but a bit pricey.",
            "2024-02-20",
        ),
        review(
            "r3",
            "5",
            "u3",
            "MusicLover99",
            5,
            "Best portable speaker I have ever owned. JBL rocks!",
            "2024-03-01",
        ),
    ]
}

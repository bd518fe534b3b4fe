//! Demo Catalog
//!
//! Fixed sample products loaded when `SEED_DEMO_DATA` is enabled.

use chrono::{DateTime, Utc};

use crate::catalog::{Product, ProductStatus};

/// Returns the demo catalog, newest first.
pub fn demo_catalog() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Premium Kahve Makinesi".to_string(),
            description: "Otomatik espresso makinesi, 15 bar basınç".to_string(),
            price: 2499.99,
            original_price: Some(2999.99),
            category: "electronics".to_string(),
            subcategory: Some("kitchen-appliances".to_string()),
            images: vec![
                "https://images.pexels.com/photos/324028/pexels-photo-324028.jpeg?auto=compress&cs=tinysrgb&w=500"
                    .to_string(),
            ],
            stock: 15,
            sku: "CM-001".to_string(),
            status: ProductStatus::Active,
            tags: tags(&["kahve", "makine", "espresso"]),
            created_at: at("2024-01-15T10:30:00Z"),
            updated_at: at("2024-01-20T14:45:00Z"),
        },
        Product {
            id: "2".to_string(),
            name: "Drahtlos Bluetooth Kopfhörer".to_string(),
            description: "Noise-cancelling teknolojisi ile premium ses kalitesi".to_string(),
            price: 899.99,
            original_price: None,
            category: "electronics".to_string(),
            subcategory: Some("audio".to_string()),
            images: vec![
                "https://images.pexels.com/photos/3394650/pexels-photo-3394650.jpeg?auto=compress&cs=tinysrgb&w=500"
                    .to_string(),
            ],
            stock: 32,
            sku: "BT-002".to_string(),
            status: ProductStatus::Active,
            tags: tags(&["bluetooth", "kulaklık", "ses"]),
            created_at: at("2024-01-10T09:15:00Z"),
            updated_at: at("2024-01-18T16:20:00Z"),
        },
        Product {
            id: "3".to_string(),
            name: "Organik Yeşil Çay".to_string(),
            description: "Ceylon'dan ithal organik yeşil çay, 100gr".to_string(),
            price: 45.50,
            original_price: None,
            category: "food-beverage".to_string(),
            subcategory: Some("tea".to_string()),
            images: vec![
                "https://images.pexels.com/photos/1638280/pexels-photo-1638280.jpeg?auto=compress&cs=tinysrgb&w=500"
                    .to_string(),
            ],
            stock: 120,
            sku: "GT-003".to_string(),
            status: ProductStatus::Active,
            tags: tags(&["organik", "çay", "yeşil"]),
            created_at: at("2024-01-05T11:00:00Z"),
            updated_at: at("2024-01-15T13:30:00Z"),
        },
    ]
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

// Literals above are fixed RFC 3339 strings.
fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_is_valid_and_newest_first() {
        let catalog = demo_catalog();
        assert_eq!(catalog.len(), 3);
        for product in &catalog {
            assert!(product.validate().is_ok(), "{} invalid", product.id);
            assert!(product.created_at <= product.updated_at);
        }
        assert!(catalog
            .windows(2)
            .all(|pair| pair[0].created_at > pair[1].created_at));
    }
}

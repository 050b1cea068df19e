use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use ecotrack_common::{NewArticle, NewProduct, NewRecyclingCenter};
use serde::Deserialize;

/// Everything a [`crate::MemStore`] is built from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedData {
    #[serde(default)]
    pub centers: Vec<NewRecyclingCenter>,
    #[serde(default)]
    pub products: Vec<NewProduct>,
    #[serde(default)]
    pub scans: Vec<SeedScan>,
    #[serde(default)]
    pub articles: Vec<NewArticle>,
}

/// A seeded scan refers to its product by barcode since ids are assigned on load.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedScan {
    pub barcode: String,
    #[serde(default)]
    pub user_id: Option<u32>,
    pub scanned_at: DateTime<Utc>,
}

/// Parse seed data from TOML text.
pub fn parse_seed(content: &str) -> Result<SeedData> {
    toml::from_str(content).context("Failed to parse seed data")
}

/// Load and parse a TOML seed file.
pub fn load_seed_file(path: &Path) -> Result<SeedData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
    parse_seed(&content).with_context(|| format!("Invalid seed file: {}", path.display()))
}

/// The built-in demo data set. Scan and article timestamps are relative to `now`.
pub fn demo_data(now: DateTime<Utc>) -> SeedData {
    SeedData {
        centers: demo_centers(),
        products: demo_products(),
        scans: vec![
            demo_scan("123456789012", now - Duration::days(2)),
            demo_scan("223456789012", now - Duration::days(1)),
            demo_scan("323456789012", now),
        ],
        articles: demo_articles(now),
    }
}

fn demo_centers() -> Vec<NewRecyclingCenter> {
    vec![
        center(
            "EcoRecycle Center",
            "123 Green St, Anytown",
            (40.7128, -74.0060),
            &["Paper", "Glass", "Plastic", "Metal"],
            "Mon-Sat: 8AM-6PM",
        ),
        center(
            "City Recycling Facility",
            "456 Earth Ave, Anytown",
            (40.7282, -73.9940),
            &["Electronics", "Metal", "Batteries", "Hazardous Waste"],
            "Mon-Fri: 9AM-5PM",
        ),
        center(
            "Green Planet Recycling",
            "789 Eco Blvd, Anytown",
            (40.7000, -74.0200),
            &["Paper", "Cardboard", "Plastic", "Textiles"],
            "Mon-Sun: 24 hours (drop-off)",
        ),
        center(
            "Community Compost Center",
            "101 Garden Way, Anytown",
            (40.7300, -73.9800),
            &["Food Waste", "Yard Waste", "Compostable Materials"],
            "Wed, Sat, Sun: 10AM-4PM",
        ),
    ]
}

fn center(
    name: &str,
    address: &str,
    (latitude, longitude): (f64, f64),
    materials: &[&str],
    hours: &str,
) -> NewRecyclingCenter {
    NewRecyclingCenter {
        name: name.to_string(),
        address: address.to_string(),
        latitude,
        longitude,
        accepted_materials: strings(materials),
        operating_hours: hours.to_string(),
    }
}

fn demo_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            barcode: "123456789012".to_string(),
            name: "Organic Shampoo".to_string(),
            brand: "EcoClean Naturals".to_string(),
            carbon_footprint: Some(0.8),
            materials: strings(&["Organic ingredients", "Recycled plastic"]),
            recyclability: Some("Fully recyclable packaging".to_string()),
            eco_score: Some("A+".to_string()),
            eco_score_value: Some(90),
            image_url: Some(
                "https://images.unsplash.com/photo-1594056113573-f8faae868732?w=256&q=80"
                    .to_string(),
            ),
        },
        NewProduct {
            barcode: "223456789012".to_string(),
            name: "Coffee Beans".to_string(),
            brand: "Sunrise Roasters".to_string(),
            carbon_footprint: Some(4.2),
            materials: strings(&["Arabica beans", "Compostable packaging"]),
            recyclability: Some("Compostable bag".to_string()),
            eco_score: Some("B".to_string()),
            eco_score_value: Some(65),
            image_url: Some(
                "https://images.unsplash.com/photo-1604929796133-4b1429e7f205?w=256&q=80"
                    .to_string(),
            ),
        },
        NewProduct {
            barcode: "323456789012".to_string(),
            name: "Paper Towels".to_string(),
            brand: "CleanWipe Basic".to_string(),
            carbon_footprint: Some(5.8),
            materials: strings(&["Virgin paper", "Plastic wrapping"]),
            recyclability: Some("Partially recyclable".to_string()),
            eco_score: Some("D".to_string()),
            eco_score_value: Some(25),
            image_url: Some(
                "https://images.unsplash.com/photo-1606813907291-d86efa9b94db?w=256&q=80"
                    .to_string(),
            ),
        },
        NewProduct {
            barcode: "423456789012".to_string(),
            name: "Bamboo Toothbrush".to_string(),
            brand: "EcoSmile".to_string(),
            carbon_footprint: Some(0.5),
            materials: strings(&["Bamboo", "Plant-based bristles"]),
            recyclability: Some("Fully compostable".to_string()),
            eco_score: Some("A".to_string()),
            eco_score_value: Some(85),
            image_url: Some(
                "https://images.unsplash.com/photo-1572035509382-0a6a2e9bfec7?w=256&q=80"
                    .to_string(),
            ),
        },
        NewProduct {
            barcode: "523456789012".to_string(),
            name: "Reusable Water Bottle".to_string(),
            brand: "AquaEco".to_string(),
            carbon_footprint: Some(12.3),
            materials: strings(&["Stainless steel"]),
            recyclability: Some("Fully recyclable".to_string()),
            eco_score: Some("B+".to_string()),
            eco_score_value: Some(75),
            image_url: Some(
                "https://images.unsplash.com/photo-1602143407151-7111542de6e8?w=256&q=80"
                    .to_string(),
            ),
        },
    ]
}

fn demo_scan(barcode: &str, scanned_at: DateTime<Utc>) -> SeedScan {
    SeedScan {
        barcode: barcode.to_string(),
        user_id: Some(1),
        scanned_at,
    }
}

fn demo_articles(now: DateTime<Utc>) -> Vec<NewArticle> {
    vec![
        NewArticle {
            title: "5 Easy Ways to Reduce Plastic Waste".to_string(),
            content: "Plastic pollution is one of the most pressing environmental issues of our time. \
                Every year, millions of tons of plastic waste enter our oceans, harming wildlife and \
                ecosystems. Here are five simple ways you can reduce your plastic footprint: \
                1. Use reusable shopping bags, 2. Carry a reusable water bottle, 3. Say no to plastic \
                straws, 4. Choose products with minimal packaging, 5. Recycle properly."
                .to_string(),
            category: "Waste Reduction".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1588964895597-cfccd6e2dbf9?w=512&q=80"
                    .to_string(),
            ),
            read_time: Some(4),
            created_at: now - Duration::days(7),
        },
        NewArticle {
            title: "Guide to Sustainable Clothing Brands".to_string(),
            content: "Fast fashion has a devastating impact on the environment, from water pollution \
                to textile waste. Fortunately, many brands are now focusing on sustainable and ethical \
                practices. This guide highlights clothing companies that prioritize eco-friendly \
                materials, fair labor practices, and durable designs that won't end up in a landfill \
                after a few wears."
                .to_string(),
            category: "Sustainable Fashion".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1605600659873-d808a13e4d2a?w=512&q=80"
                    .to_string(),
            ),
            read_time: Some(6),
            created_at: now - Duration::days(5),
        },
        NewArticle {
            title: "Home Energy Saving Tips".to_string(),
            content: "Reducing energy consumption at home is not only good for the planet but also \
                for your wallet. Simple changes like switching to LED bulbs, properly insulating your \
                home, using smart thermostats, and unplugging electronics when not in use can \
                significantly lower your carbon footprint and energy bills."
                .to_string(),
            category: "Energy Efficiency".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1584473457409-ce95a9c00def?w=512&q=80"
                    .to_string(),
            ),
            read_time: Some(5),
            created_at: now - Duration::days(3),
        },
        NewArticle {
            title: "Understanding Food Miles and Local Eating".to_string(),
            content: "Food miles refer to the distance food travels from where it's grown to where \
                it's consumed. The farther food travels, the more fuel is used and the more greenhouse \
                gases are emitted. By choosing locally grown and produced foods, you can reduce your \
                carbon footprint and support your local economy."
                .to_string(),
            category: "Sustainable Food".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1488459716781-31db52582fe9?w=512&q=80"
                    .to_string(),
            ),
            read_time: Some(7),
            created_at: now - Duration::days(2),
        },
        NewArticle {
            title: "The Benefits of Composting".to_string(),
            content: "Composting is nature's way of recycling organic matter into nutrient-rich soil. \
                By composting food scraps and yard waste instead of sending them to landfills, you can \
                reduce methane emissions, enrich your garden soil, and decrease the need for chemical \
                fertilizers."
                .to_string(),
            category: "Waste Reduction".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1580412893011-3bf11c3bf010?w=512&q=80"
                    .to_string(),
            ),
            read_time: Some(4),
            created_at: now,
        },
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"
[[centers]]
name = "Harbor Drop-off"
address = "1 Pier Rd"
latitude = 47.6062
longitude = -122.3321
acceptedMaterials = ["Glass", "Metal"]
operatingHours = "Daily: 7AM-7PM"

[[products]]
barcode = "999000111222"
name = "Refill Pouch"
brand = "Loop"
ecoScore = "A"
ecoScoreValue = 88

[[scans]]
barcode = "999000111222"
userId = 4
scannedAt = "2024-05-01T12:00:00Z"

[[articles]]
title = "Glass vs Aluminum"
content = "Both are infinitely recyclable."
category = "Recycling"
readTime = 3
createdAt = "2024-04-20T08:00:00Z"
"#;

    #[test]
    fn parses_seed_toml() {
        let seed = parse_seed(SEED).unwrap();
        assert_eq!(seed.centers.len(), 1);
        assert_eq!(seed.centers[0].accepted_materials, vec!["Glass", "Metal"]);
        assert_eq!(seed.products[0].eco_score_value, Some(88));
        assert!(seed.products[0].materials.is_empty());
        assert_eq!(seed.scans[0].user_id, Some(4));
        assert_eq!(seed.articles[0].read_time, Some(3));
    }

    #[test]
    fn empty_seed_is_valid() {
        let seed = parse_seed("").unwrap();
        assert!(seed.centers.is_empty());
        assert!(seed.products.is_empty());
    }

    #[test]
    fn unknown_table_is_rejected() {
        assert!(parse_seed("[[users]]\nname = \"demo\"\n").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_seed_file(Path::new("/nonexistent/ecotrack-seed.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/ecotrack-seed.toml"));
    }

    #[test]
    fn loads_seed_file_from_disk() {
        let path = std::env::temp_dir().join(format!("ecotrack-seed-{}.toml", std::process::id()));
        std::fs::write(&path, SEED).unwrap();
        let seed = load_seed_file(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(seed.unwrap().centers[0].name, "Harbor Drop-off");
    }

    #[test]
    fn demo_data_shape() {
        let now = Utc::now();
        let seed = demo_data(now);
        assert_eq!(seed.centers.len(), 4);
        assert_eq!(seed.products.len(), 5);
        assert_eq!(seed.scans.len(), 3);
        assert_eq!(seed.articles.len(), 5);
        assert_eq!(seed.scans[2].scanned_at, now);
    }
}

//! Products, scans and articles.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::Utc;
use ecotrack_common::{Article, EcoTrackError, NewProduct, NewScan, Product, Scan};
use tracing::{debug, info};

use crate::store::MemStore;

impl MemStore {
    // --- Products ---

    pub fn list_products(&self) -> Vec<Product> {
        self.read_catalog().products.iter().cloned().collect()
    }

    pub fn get_product(&self, id: u32) -> Option<Product> {
        self.read_catalog().products.get(id).cloned()
    }

    pub fn get_product_by_barcode(&self, barcode: &str) -> Option<Product> {
        self.read_catalog()
            .products
            .iter()
            .find(|p| p.barcode == barcode)
            .cloned()
    }

    /// Case-insensitive substring match on name or brand.
    pub fn search_products(&self, query: &str) -> Vec<Product> {
        let needle = query.to_lowercase();
        let results: Vec<Product> = self
            .read_catalog()
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle) || p.brand.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        debug!(query, matched = results.len(), "Product search");
        results
    }

    pub fn create_product(&self, new: NewProduct) -> Result<Product, EcoTrackError> {
        let product = self.write_catalog().insert_product(new, Utc::now())?;
        info!(id = product.id, barcode = %product.barcode, "Product created");
        Ok(product)
    }

    // --- Scans ---

    pub fn create_scan(&self, new: NewScan) -> Scan {
        let scan = self
            .write_catalog()
            .scans
            .insert_with(|id| Scan {
                id,
                user_id: new.user_id,
                product_id: new.product_id,
                scanned_at: Utc::now(),
            })
            .clone();
        debug!(id = scan.id, product_id = ?scan.product_id, "Scan recorded");
        scan
    }

    /// Newest first, optionally only one user's scans.
    pub fn list_scans(&self, user_id: Option<u32>) -> Vec<Scan> {
        let mut scans: Vec<Scan> = self
            .read_catalog()
            .scans
            .iter()
            .filter(|s| user_id.is_none_or(|uid| s.user_id == Some(uid)))
            .cloned()
            .collect();
        scans.sort_by(newest_first);
        scans
    }

    /// Products from the most recent scans, newest first, each at most once.
    /// Scans with no product or a dangling product id are skipped.
    pub fn recent_scanned_products(&self, limit: usize) -> Vec<Product> {
        let catalog = self.read_catalog();
        let mut scans: Vec<&Scan> = catalog.scans.iter().collect();
        scans.sort_by(|a, b| newest_first(a, b));

        let mut seen = HashSet::new();
        let products: Vec<Product> = scans
            .into_iter()
            .filter_map(|s| s.product_id)
            .filter(|id| seen.insert(*id))
            .filter_map(|id| catalog.products.get(id).cloned())
            .take(limit)
            .collect();
        products
    }

    // --- Articles ---

    /// Newest first. `None`, empty or "all" returns every category.
    pub fn list_articles(&self, category: Option<&str>) -> Vec<Article> {
        let category = category
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
            .map(str::to_lowercase);

        let mut articles: Vec<Article> = self
            .articles()
            .iter()
            .filter(|a| {
                category
                    .as_deref()
                    .is_none_or(|c| a.category.to_lowercase() == c)
            })
            .cloned()
            .collect();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        articles
    }

    pub fn get_article(&self, id: u32) -> Option<Article> {
        self.articles().get(id).cloned()
    }
}

/// Later scans first; same-instant scans by descending id.
fn newest_first(a: &Scan, b: &Scan) -> Ordering {
    b.scanned_at
        .cmp(&a.scanned_at)
        .then_with(|| b.id.cmp(&a.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{demo_data, SeedData};

    fn demo() -> MemStore {
        MemStore::from_seed(demo_data(Utc::now())).unwrap()
    }

    fn new_product(barcode: &str) -> NewProduct {
        NewProduct {
            barcode: barcode.to_string(),
            name: "Compostable Cups".to_string(),
            brand: "GreenSip".to_string(),
            carbon_footprint: None,
            materials: vec![],
            recyclability: None,
            eco_score: None,
            eco_score_value: None,
            image_url: None,
        }
    }

    #[test]
    fn search_matches_name_or_brand_case_insensitively() {
        let store = demo();
        let by_name: Vec<u32> = store.search_products("coffee").iter().map(|p| p.id).collect();
        assert_eq!(by_name, vec![2]);

        let by_brand: Vec<u32> = store.search_products("ECO").iter().map(|p| p.id).collect();
        // EcoClean Naturals, EcoSmile, AquaEco
        assert_eq!(by_brand, vec![1, 4, 5]);

        assert!(store.search_products("kombucha").is_empty());
    }

    #[test]
    fn barcode_lookup_is_exact() {
        let store = demo();
        assert_eq!(
            store.get_product_by_barcode("423456789012").unwrap().name,
            "Bamboo Toothbrush"
        );
        assert!(store.get_product_by_barcode("42345678901").is_none());
    }

    #[test]
    fn create_product_assigns_next_id() {
        let store = demo();
        let product = store.create_product(new_product("777")).unwrap();
        assert_eq!(product.id, 6);
        assert_eq!(store.get_product(6), Some(product));
        assert_eq!(store.list_products().len(), 6);
    }

    #[test]
    fn create_product_rejects_duplicate_barcode() {
        let store = demo();
        let err = store.create_product(new_product("123456789012")).unwrap_err();
        assert!(matches!(err, EcoTrackError::Conflict(_)));
        assert_eq!(store.list_products().len(), 5);
    }

    #[test]
    fn create_product_requires_name() {
        let store = demo();
        let mut new = new_product("888");
        new.name = " ".to_string();
        let err = store.create_product(new).unwrap_err();
        assert!(matches!(err, EcoTrackError::Validation(_)));
    }

    #[test]
    fn recent_products_newest_first() {
        let store = demo();
        let ids: Vec<u32> = store
            .recent_scanned_products(10)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(store.recent_scanned_products(2).len(), 2);
    }

    #[test]
    fn recent_products_are_deduplicated() {
        let store = demo();
        store.create_scan(NewScan {
            user_id: None,
            product_id: Some(1),
        });
        store.create_scan(NewScan {
            user_id: None,
            product_id: None,
        });
        store.create_scan(NewScan {
            user_id: None,
            product_id: Some(99),
        });
        let ids: Vec<u32> = store
            .recent_scanned_products(10)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn list_scans_filters_by_user() {
        let store = demo();
        store.create_scan(NewScan {
            user_id: Some(2),
            product_id: Some(4),
        });
        assert_eq!(store.list_scans(None).len(), 4);
        let mine = store.list_scans(Some(2));
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].product_id, Some(4));
        assert_eq!(store.list_scans(Some(1)).len(), 3);
        // newest first
        assert_eq!(store.list_scans(None)[0].id, 4);
    }

    #[test]
    fn articles_newest_first_and_filtered() {
        let store = demo();
        let all: Vec<u32> = store.list_articles(None).iter().map(|a| a.id).collect();
        assert_eq!(all, vec![5, 4, 3, 2, 1]);
        assert_eq!(store.list_articles(Some("all")).len(), 5);
        assert_eq!(store.list_articles(Some("")).len(), 5);

        let waste: Vec<u32> = store
            .list_articles(Some("waste reduction"))
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(waste, vec![5, 1]);
        assert!(store.list_articles(Some("Waste")).is_empty());
    }

    #[test]
    fn get_article_by_id() {
        let store = demo();
        assert_eq!(store.get_article(3).unwrap().title, "Home Energy Saving Tips");
        assert!(store.get_article(0).is_none());
    }

    #[test]
    fn empty_store_has_no_content() {
        let store = MemStore::from_seed(SeedData::default()).unwrap();
        assert!(store.list_products().is_empty());
        assert!(store.recent_scanned_products(10).is_empty());
        assert!(store.list_articles(None).is_empty());
    }
}

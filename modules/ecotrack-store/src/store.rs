use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use ecotrack_common::{
    Article, EcoTrackError, NewProduct, NewRecyclingCenter, Product, RecyclingCenter, Scan,
};
use tracing::info;

use crate::seed::SeedData;
use crate::traits::CenterStore;

/// Id-keyed arena. Ids start at 1, increase by one per insert and are never
/// reused. Iteration is in id order.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<u32, T>,
    next_id: u32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next id and store the row built from it.
    pub fn insert_with(&mut self, build: impl FnOnce(u32) -> T) -> &T {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.entry(id).or_insert_with(|| build(id))
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Mutable half of the store.
#[derive(Debug, Default)]
pub(crate) struct Catalog {
    pub(crate) products: Table<Product>,
    pub(crate) scans: Table<Scan>,
}

impl Catalog {
    pub(crate) fn insert_product(
        &mut self,
        new: NewProduct,
        created_at: DateTime<Utc>,
    ) -> Result<Product, EcoTrackError> {
        for (field, value) in [
            ("barcode", &new.barcode),
            ("name", &new.name),
            ("brand", &new.brand),
        ] {
            if value.trim().is_empty() {
                return Err(EcoTrackError::Validation(format!("{field} is required")));
            }
        }
        if self.products.iter().any(|p| p.barcode == new.barcode) {
            return Err(EcoTrackError::Conflict(format!(
                "barcode {} already exists",
                new.barcode
            )));
        }

        let product = self.products.insert_with(|id| Product {
            id,
            barcode: new.barcode,
            name: new.name,
            brand: new.brand,
            carbon_footprint: new.carbon_footprint,
            materials: new.materials,
            recyclability: new.recyclability,
            eco_score: new.eco_score,
            eco_score_value: new.eco_score_value,
            image_url: new.image_url,
            created_at,
        });
        Ok(product.clone())
    }

    pub(crate) fn product_id_for_barcode(&self, barcode: &str) -> Option<u32> {
        self.products
            .iter()
            .find(|p| p.barcode == barcode)
            .map(|p| p.id)
    }
}

/// Process-wide in-memory store, shared by handle (`Arc<MemStore>`).
#[derive(Debug)]
pub struct MemStore {
    centers: Table<RecyclingCenter>,
    articles: Table<Article>,
    catalog: RwLock<Catalog>,
}

impl MemStore {
    /// Build a store from seed data. Centers get ids in seed order.
    pub fn from_seed(seed: SeedData) -> Result<Self, EcoTrackError> {
        let now = Utc::now();

        let mut centers = Table::new();
        for new in seed.centers {
            insert_center(&mut centers, new)?;
        }

        let mut articles = Table::new();
        for new in seed.articles {
            articles.insert_with(|id| Article {
                id,
                title: new.title,
                content: new.content,
                category: new.category,
                image_url: new.image_url,
                read_time: new.read_time,
                created_at: new.created_at,
            });
        }

        let mut catalog = Catalog::default();
        for new in seed.products {
            catalog.insert_product(new, now)?;
        }
        for scan in seed.scans {
            let product_id = catalog.product_id_for_barcode(&scan.barcode).ok_or_else(|| {
                EcoTrackError::Validation(format!("seed scan references unknown barcode {}", scan.barcode))
            })?;
            catalog.scans.insert_with(|id| Scan {
                id,
                user_id: scan.user_id,
                product_id: Some(product_id),
                scanned_at: scan.scanned_at,
            });
        }

        info!(
            centers = centers.len(),
            articles = articles.len(),
            products = catalog.products.len(),
            scans = catalog.scans.len(),
            "Store seeded"
        );

        Ok(Self {
            centers,
            articles,
            catalog: RwLock::new(catalog),
        })
    }

    pub(crate) fn articles(&self) -> &Table<Article> {
        &self.articles
    }

    pub(crate) fn read_catalog(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().expect("catalog lock poisoned")
    }

    pub(crate) fn write_catalog(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.catalog.write().expect("catalog lock poisoned")
    }
}

fn insert_center(
    centers: &mut Table<RecyclingCenter>,
    new: NewRecyclingCenter,
) -> Result<(), EcoTrackError> {
    if new.name.trim().is_empty() {
        return Err(EcoTrackError::Validation(
            "recycling center name is required".to_string(),
        ));
    }
    centers.insert_with(|id| RecyclingCenter {
        id,
        name: new.name,
        address: new.address,
        latitude: new.latitude,
        longitude: new.longitude,
        accepted_materials: new.accepted_materials,
        operating_hours: new.operating_hours,
    });
    Ok(())
}

impl CenterStore for MemStore {
    fn list_all_centers(&self) -> Vec<&RecyclingCenter> {
        self.centers.iter().collect()
    }

    fn center(&self, id: u32) -> Option<&RecyclingCenter> {
        self.centers.get(id)
    }
}

//! Recycling-center proximity queries.
//!
//! Distances are computed per query and returned as [`RankedCenter`]
//! projections; stored centers are only ever read.

use std::collections::HashSet;

use ecotrack_common::{Coordinate, RankedCenter, RecyclingCenter};
use tracing::debug;

use crate::traits::CenterStore;

/// Parameters for [`find_nearby_centers`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecyclingQuery {
    pub lat: f64,
    pub lng: f64,
    /// Case-insensitive match against a whole accepted-material entry.
    pub material: Option<String>,
    /// Values <= 0 mean no cap.
    pub limit: Option<i64>,
}

impl RecyclingQuery {
    pub fn near(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            ..Self::default()
        }
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn material_filter(&self) -> Option<&str> {
        self.material.as_deref().filter(|m| !m.is_empty())
    }

    fn cap(&self) -> Option<usize> {
        self.limit
            .filter(|l| *l > 0)
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
    }
}

/// Centers nearest to the query point, optionally filtered by accepted
/// material, ascending by distance in miles and capped at `limit`.
///
/// Ties keep id order. Never fails for finite coordinates; an unknown material
/// yields an empty list.
pub fn find_nearby_centers<S>(store: &S, query: &RecyclingQuery) -> Vec<RankedCenter>
where
    S: CenterStore + ?Sized,
{
    let origin = Coordinate::new(query.lat, query.lng);
    let material = query.material_filter();

    let mut ranked: Vec<RankedCenter> = store
        .list_all_centers()
        .into_iter()
        .filter(|center| material.is_none_or(|wanted| center.accepts(wanted)))
        .map(|center| RankedCenter {
            distance: origin.distance_miles_to(&center.coordinate()),
            center: center.clone(),
        })
        .collect();

    let matched = ranked.len();
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    if let Some(cap) = query.cap() {
        ranked.truncate(cap);
    }

    debug!(
        material = material.unwrap_or("<any>"),
        limit = ?query.limit,
        matched,
        returned = ranked.len(),
        "Ranked recycling centers"
    );
    ranked
}

/// Distinct accepted materials across all centers, in first-seen order.
/// Dedup is exact, so "Glass" and "glass" are both kept.
pub fn list_distinct_materials<S>(store: &S) -> Vec<String>
where
    S: CenterStore + ?Sized,
{
    let mut seen = HashSet::new();
    let mut materials = Vec::new();
    for center in store.list_all_centers() {
        for material in &center.accepted_materials {
            if seen.insert(material.as_str()) {
                materials.push(material.clone());
            }
        }
    }
    materials
}

/// The stored record for a center, without a distance.
pub fn get_center<S>(store: &S, id: u32) -> Option<RecyclingCenter>
where
    S: CenterStore + ?Sized,
{
    store.center(id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<RecyclingCenter>);

    impl CenterStore for Fixed {
        fn list_all_centers(&self) -> Vec<&RecyclingCenter> {
            self.0.iter().collect()
        }

        fn center(&self, id: u32) -> Option<&RecyclingCenter> {
            self.0.iter().find(|c| c.id == id)
        }
    }

    fn center(id: u32, lat: f64, lng: f64, materials: &[&str]) -> RecyclingCenter {
        RecyclingCenter {
            id,
            name: format!("Center {id}"),
            address: String::new(),
            latitude: lat,
            longitude: lng,
            accepted_materials: materials.iter().map(|m| m.to_string()).collect(),
            operating_hours: String::new(),
        }
    }

    fn ids(ranked: &[RankedCenter]) -> Vec<u32> {
        ranked.iter().map(|r| r.center.id).collect()
    }

    #[test]
    fn equidistant_centers_keep_id_order() {
        // Same latitude offset north and south of the origin.
        let store = Fixed(vec![
            center(1, 1.0, 0.0, &["Glass"]),
            center(2, -1.0, 0.0, &["Glass"]),
            center(3, 0.5, 0.0, &["Glass"]),
        ]);
        let ranked = find_nearby_centers(&store, &RecyclingQuery::near(0.0, 0.0));
        assert_eq!(ids(&ranked), vec![3, 1, 2]);
        assert_eq!(ranked[1].distance, ranked[2].distance);
    }

    #[test]
    fn zero_and_negative_limit_mean_no_cap() {
        let store = Fixed(vec![
            center(1, 0.0, 0.0, &[]),
            center(2, 1.0, 1.0, &[]),
            center(3, 2.0, 2.0, &[]),
        ]);
        for limit in [0, -1, i64::MIN] {
            let query = RecyclingQuery::near(0.0, 0.0).with_limit(limit);
            assert_eq!(find_nearby_centers(&store, &query).len(), 3, "limit {limit}");
        }
    }

    #[test]
    fn huge_limit_returns_everything() {
        let store = Fixed(vec![center(1, 0.0, 0.0, &[]), center(2, 1.0, 1.0, &[])]);
        let query = RecyclingQuery::near(0.0, 0.0).with_limit(i64::MAX);
        assert_eq!(find_nearby_centers(&store, &query).len(), 2);
    }

    #[test]
    fn empty_material_is_no_filter() {
        let store = Fixed(vec![center(1, 0.0, 0.0, &["Paper"]), center(2, 1.0, 1.0, &[])]);
        let query = RecyclingQuery::near(0.0, 0.0).with_material("");
        assert_eq!(find_nearby_centers(&store, &query).len(), 2);
    }

    #[test]
    fn material_filter_skips_centers_with_no_materials() {
        let store = Fixed(vec![center(1, 0.0, 0.0, &[]), center(2, 1.0, 1.0, &["paper"])]);
        let query = RecyclingQuery::near(0.0, 0.0).with_material("PAPER");
        assert_eq!(ids(&find_nearby_centers(&store, &query)), vec![2]);
    }

    #[test]
    fn filter_agrees_with_center_accepts() {
        let store = Fixed(vec![
            center(1, 0.0, 0.0, &["Food Waste", "Paper"]),
            center(2, 1.0, 1.0, &["Hazardous Waste"]),
            center(3, 2.0, 2.0, &["GLASS"]),
        ]);
        for material in ["glass", "Food waste", "Waste", "paper", "hazardous"] {
            let query = RecyclingQuery::near(0.0, 0.0).with_material(material);
            let expected: Vec<u32> = store
                .0
                .iter()
                .filter(|c| c.accepts(material))
                .map(|c| c.id)
                .collect();
            assert_eq!(ids(&find_nearby_centers(&store, &query)), expected, "{material}");
        }
    }

    #[test]
    fn empty_store_yields_empty_results() {
        let store = Fixed(vec![]);
        assert!(find_nearby_centers(&store, &RecyclingQuery::near(10.0, 10.0)).is_empty());
        assert!(list_distinct_materials(&store).is_empty());
    }

    #[test]
    fn materials_dedup_is_case_preserving() {
        let store = Fixed(vec![
            center(1, 0.0, 0.0, &["Glass", "Paper", "Glass"]),
            center(2, 0.0, 0.0, &["glass", "Paper", "Metal"]),
        ]);
        assert_eq!(
            list_distinct_materials(&store),
            vec!["Glass", "Paper", "glass", "Metal"]
        );
    }

    #[test]
    fn get_center_clones_stored_record() {
        let store = Fixed(vec![center(7, 1.0, 2.0, &["Metal"])]);
        assert_eq!(get_center(&store, 7), Some(store.0[0].clone()));
        assert_eq!(get_center(&store, 8), None);
    }
}

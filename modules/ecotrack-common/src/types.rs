use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

// --- Recycling Types ---

/// A stored recycling center. Immutable once created; never carries a distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecyclingCenter {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub accepted_materials: Vec<String>,
    pub operating_hours: String,
}

impl RecyclingCenter {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Case-insensitive match against whole accepted-material entries.
    pub fn accepts(&self, material: &str) -> bool {
        let wanted = material.to_lowercase();
        self.accepted_materials
            .iter()
            .any(|m| m.to_lowercase() == wanted)
    }
}

/// Center fields before an id is assigned (seed input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecyclingCenter {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accepted_materials: Vec<String>,
    #[serde(default)]
    pub operating_hours: String,
}

/// A center as returned by a proximity query: the stored record plus its
/// distance in miles from the query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCenter {
    #[serde(flatten)]
    pub center: RecyclingCenter,
    pub distance: f64,
}

// --- Product Types ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub barcode: String,
    pub name: String,
    pub brand: String,
    /// kg CO2e per unit
    pub carbon_footprint: Option<f64>,
    pub materials: Vec<String>,
    pub recyclability: Option<String>,
    /// Letter grade, e.g. "A+".
    pub eco_score: Option<String>,
    /// 0-100
    pub eco_score_value: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub carbon_footprint: Option<f64>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub recyclability: Option<String>,
    #[serde(default)]
    pub eco_score: Option<String>,
    #[serde(default)]
    pub eco_score_value: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

// --- Scan Types ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scan {
    pub id: u32,
    pub user_id: Option<u32>,
    pub product_id: Option<u32>,
    pub scanned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScan {
    #[serde(default)]
    pub user_id: Option<u32>,
    #[serde(default)]
    pub product_id: Option<u32>,
}

// --- Article Types ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u32,
    pub title: String,
    pub content: String,
    pub category: String,
    pub image_url: Option<String>,
    /// Minutes
    pub read_time: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub read_time: Option<u32>,
    pub created_at: DateTime<Utc>,
}

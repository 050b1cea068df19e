//! In-memory storage and queries for EcoTrack.
//!
//! Everything lives in a [`MemStore`] built once at startup and shared by
//! handle. Recycling centers and articles are fixed after construction;
//! products and scans accept writes.

pub mod catalog;
pub mod recycling;
pub mod seed;
pub mod store;
pub mod traits;

pub use recycling::{find_nearby_centers, get_center, list_distinct_materials, RecyclingQuery};
pub use seed::{demo_data, load_seed_file, parse_seed, SeedData, SeedScan};
pub use store::{MemStore, Table};
pub use traits::CenterStore;

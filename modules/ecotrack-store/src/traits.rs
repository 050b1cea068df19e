use ecotrack_common::RecyclingCenter;

/// Read access to the stored recycling centers.
///
/// Query functions in [`crate::recycling`] are generic over this so they can
/// run against any backing collection, not only [`crate::MemStore`].
pub trait CenterStore: Send + Sync {
    /// All centers in ascending id order.
    fn list_all_centers(&self) -> Vec<&RecyclingCenter>;

    fn center(&self, id: u32) -> Option<&RecyclingCenter>;
}

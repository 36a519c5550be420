//! Live search over the fetched staff list.

use crate::model::Staff;

/// Placeholder rendered when a query matches nobody.
pub const NO_RESULTS: &str = "No matching staff found.";

/// Whether `staff` matches an already-lowercased query.
fn matches_lower(staff: &Staff, query_lower: &str) -> bool {
    staff.name.to_lowercase().contains(query_lower)
        || staff.department.name.to_lowercase().contains(query_lower)
}

/// Case-insensitive substring match on name or department name.
#[must_use]
pub fn matches(staff: &Staff, query: &str) -> bool {
    matches_lower(staff, &query.to_lowercase())
}

/// Indices into `staff` of every entry matching `query`, in source order.
///
/// An empty query matches everything.
#[must_use]
pub fn filter_staff(staff: &[Staff], query: &str) -> Vec<usize> {
    let query_lower = query.to_lowercase();
    if query_lower.is_empty() {
        return (0..staff.len()).collect();
    }

    staff
        .iter()
        .enumerate()
        .filter(|(_, s)| matches_lower(s, &query_lower))
        .map(|(i, _)| i)
        .collect()
}

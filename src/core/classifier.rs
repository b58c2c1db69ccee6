use crate::models::{BusinessRecord, LodgingRules};

/// Category tag that qualifies a record for the lodging facet.
///
/// Matched case-sensitively, unlike the exclusion terms; the source taxonomy
/// capitalizes its tags.
pub const LODGING_CATEGORY: &str = "Hotels";

/// Category tag that qualifies a record for the dining facet
pub const DINING_CATEGORY: &str = "Restaurants";

/// Attribute key whose presence marks a bookable venue with price metadata
pub const PRICE_RANGE_ATTRIBUTE: &str = "RestaurantsPriceRange2";

/// Check if a record belongs to the lodging facet
///
/// Requires the "Hotels" tag, a price-range attribute, and no hit on the
/// exclusion denylist. Records without category text never qualify.
#[inline]
pub fn is_lodging(record: &BusinessRecord, rules: &LodgingRules) -> bool {
    let Some(categories) = record.categories() else {
        return false;
    };

    if !categories.contains(LODGING_CATEGORY) {
        return false;
    }

    if !record.has_attribute(PRICE_RANGE_ATTRIBUTE) {
        return false;
    }

    // Exclusion terms match case-insensitively
    let lowered = categories.to_lowercase();
    !rules
        .excluded_terms
        .iter()
        .any(|term| lowered.contains(&term.to_lowercase()))
}

/// Check if a record belongs to the dining facet
#[inline]
pub fn is_dining(record: &BusinessRecord) -> bool {
    record
        .categories()
        .is_some_and(|categories| contains_ignore_case(categories, DINING_CATEGORY))
}

/// Check if a record's categories mention the given cuisine
///
/// Empty or whitespace-only cuisine text matches everything, so the dining
/// search degrades to a plain radius search.
#[inline]
pub fn matches_cuisine(record: &BusinessRecord, cuisine: &str) -> bool {
    let Some(categories) = record.categories() else {
        return false;
    };

    let needle = cuisine.trim();
    needle.is_empty() || contains_ignore_case(categories, needle)
}

#[inline]
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

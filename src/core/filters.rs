use crate::models::{CenterCategory, MealCenter};

/// Check if a center matches a free-text search term
///
/// The term is matched case-insensitively as a substring of the name, the
/// address or the category label. The term is used as typed, surrounding
/// spaces included. An empty term matches every center.
#[inline]
pub fn matches_search(center: &MealCenter, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    center.name.to_lowercase().contains(&needle)
        || center.address.to_lowercase().contains(&needle)
        || center.category.label().to_lowercase().contains(&needle)
}

/// Check if a center belongs to the requested category (`None` means any)
#[inline]
pub fn matches_category(center: &MealCenter, category: Option<CenterCategory>) -> bool {
    category.map_or(true, |wanted| center.category == wanted)
}

/// Parse a category filter value where `all` or an empty string means any
pub fn parse_category_filter(
    value: Option<&str>,
) -> Result<Option<CenterCategory>, crate::models::UnknownCategory> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

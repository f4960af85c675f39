use crate::models::{MealCenter, ShareLinks};

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1";

/// Google Maps directions link to a center
pub fn directions_url(center: &MealCenter) -> String {
    format!(
        "{}&destination={},{}&destination_place_id={}",
        DIRECTIONS_BASE,
        center.latitude,
        center.longitude,
        urlencoding::encode(&center.address)
    )
}

/// Text used when a center is shared
pub fn share_text(center: &MealCenter) -> String {
    format!(
        "Check out this free meal center: {} at {}. Timings: {}",
        center.name, center.address, center.timings
    )
}

/// Social share links for a center, pointing back at `page_url`
pub fn share_links(center: &MealCenter, page_url: &str) -> ShareLinks {
    let text = share_text(center);
    let encoded_text = urlencoding::encode(&text);
    let encoded_url = urlencoding::encode(page_url);

    ShareLinks {
        whatsapp: format!(
            "https://wa.me/?text={}",
            urlencoding::encode(&format!("{} {}", text, page_url))
        ),
        twitter: format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            encoded_text, encoded_url
        ),
        facebook: format!(
            "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
            encoded_url, encoded_text
        ),
    }
}

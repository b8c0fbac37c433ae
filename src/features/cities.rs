// src/features/cities.rs — City allow-list

use super::session::NOT_SET;

/// Bucket for every city outside [`ALLOWED_CITIES`].
pub const OTHER_CITIES: &str = "others";

/// Cities the model was trained to tell apart. Closed set; anything else is
/// collapsed into [`OTHER_CITIES`].
pub const ALLOWED_CITIES: [&str; 19] = [
    "Moscow",
    "Saint Petersburg",
    NOT_SET,
    "Yekaterinburg",
    "Krasnodar",
    "Kazan",
    "Samara",
    "Nizhny Novgorod",
    "Ufa",
    "Novosibirsk",
    "Krasnoyarsk",
    "Chelyabinsk",
    "Tula",
    "Voronezh",
    "Rostov-on-Don",
    "Irkutsk",
    "Grozny",
    "Balashikha",
    "Vladivostok",
];

pub fn is_allowed_city(city: &str) -> bool {
    ALLOWED_CITIES.contains(&city)
}

/// Keep an allow-listed city verbatim, otherwise return the "others" bucket.
pub fn normalize_city(city: &str) -> &str {
    if is_allowed_city(city) {
        city
    } else {
        OTHER_CITIES
    }
}

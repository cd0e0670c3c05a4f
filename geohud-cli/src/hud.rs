//! Text rendering of a resolved place.
//!
//! ```text
//! Continent: Europe (SE)
//! Country:   Germany (SE)
//! State:     Bavaria
//! City:      Munich (N)
//! ```

use geohud::direction::DirectionTag;
use geohud::place::or_not_available;
use geohud::session::ResolvedPlace;

/// Formats the four HUD lines for `place`.
///
/// Missing names print as `N/A`. A direction is appended only when it
/// could be computed.
pub fn render(place: &ResolvedPlace) -> String {
    let mut continent = with_direction(place.continent.continent.name(), place.continent_direction);
    if place.continent.is_heuristic() {
        continent.push_str(" ~");
    }

    format!(
        "Continent: {}\nCountry:   {}\nState:     {}\nCity:      {}",
        continent,
        with_direction(
            or_not_available(place.country.as_deref()),
            place.country_direction
        ),
        or_not_available(place.state.as_deref()),
        with_direction(or_not_available(place.city.as_deref()), place.city_direction),
    )
}

fn with_direction(name: &str, tag: Option<DirectionTag>) -> String {
    match tag {
        Some(tag) => format!("{} ({})", name, tag),
        None => name.to_string(),
    }
}

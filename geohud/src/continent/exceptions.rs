//! ISO codes for territories geocoders often return without one.

/// Country name → ISO 3166-1 alpha-2 code, matched case-insensitively.
const EXCEPTIONS: &[(&str, &str)] = &[
    ("Hong Kong", "HK"),
    ("Macau", "MO"),
    ("Macao", "MO"),
    ("Kosovo", "XK"),
    ("Åland", "AX"),
    ("Åland Islands", "AX"),
    ("Aland Islands", "AX"),
    ("Taiwan", "TW"),
    ("Palestine", "PS"),
    ("Western Sahara", "EH"),
    ("Northern Cyprus", "CY"),
];

/// Looks up the code for a country name the geocoder left uncoded.
pub fn code_for_country_name(name: &str) -> Option<&'static str> {
    let name = name.trim();
    EXCEPTIONS
        .iter()
        .find(|(known, _)| known.to_lowercase() == name.to_lowercase())
        .map(|(_, code)| *code)
}

/// Normalizes a provider code: trimmed, upper-cased, two ASCII letters.
pub fn normalize_code(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

/// Picks the best code from an optional provider code and a country name.
pub fn resolve_code(code: Option<&str>, country_name: Option<&str>) -> Option<String> {
    code.and_then(normalize_code).or_else(|| {
        country_name
            .and_then(code_for_country_name)
            .map(str::to_string)
    })
}

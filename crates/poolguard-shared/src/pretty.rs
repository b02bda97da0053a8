//! Human readable formatting for raw property values

/// Property names whose values are byte magnitudes
const BYTE_PROPERTIES: &[&str] = &[
    "avail", "free", "quota", "refer", "size", "used", "usedds", "usedsnap",
];

/// Property names whose values are percentages
const PERCENT_PROPERTIES: &[&str] = &["capacity", "fragmentation"];

const SUFFIXES: [&str; 5] = ["B", "K", "M", "G", "T"];

/// Formats a raw property value based on the property's name. Values of
/// properties that are neither byte magnitudes nor percentages pass through
/// untouched, as does anything that fails to parse as a number
#[must_use]
pub fn pretty_print(value: &str, name: &str) -> String {
    if BYTE_PROPERTIES.contains(&name) {
        pretty_print_bytes(value)
    } else if PERCENT_PROPERTIES.contains(&name) {
        format!("{value}%")
    } else {
        value.to_string()
    }
}

fn pretty_print_bytes(value: &str) -> String {
    // "-" means not applicable for this dataset / snapshot
    if value == "-" {
        return value.to_string();
    }
    let Ok(raw) = value.parse::<f64>() else {
        return value.to_string();
    };
    if raw == 0.0 {
        return "0B".to_string();
    }

    let mut size = raw;
    let mut index = 0;
    while size >= 1024.0 && index < SUFFIXES.len() - 1 {
        size /= 1024.0;
        index += 1;
    }
    format!("{size:.2}{}", SUFFIXES[index])
}

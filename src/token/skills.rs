use crate::models::PropertyEntry;

/// Split a `Skills` cell such as `"Perception +12, Stealth +8"` into token properties.
///
/// Items are separated by `", "` and read as `"<name> <value>"`; a single leading `+` is
/// removed from the value. Items without a value are ignored.
pub fn parse_skills(skills: &str) -> Vec<PropertyEntry> {
    skills
        .split(", ")
        .filter_map(|item| {
            let mut tokens = item.split(' ');
            let name = tokens.next()?;
            let value = tokens.next()?;
            Some(PropertyEntry::new(
                name,
                value.strip_prefix('+').unwrap_or(value),
            ))
        })
        .collect()
}

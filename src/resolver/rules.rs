//! Fixed vocabulary driving the resolution cascade.

/// Creature categories tried as `"{category}, {name}"`, in priority order.
pub const DEFAULT_TYPE_PREFIXES: &[&str] = &[
    "Angel",
    "Demon",
    "Devil",
    "Rakshasa",
    "Gremlin",
    "Protean",
    "Daemon",
    "Qlippoth",
    "Psychopomp",
    "Agathion",
    "Azata",
    "Aeon",
    "Dinosaur",
    "Fleshwarp",
    "Kyton",
    "Oni",
    "Div",
    "Nightshade",
    "Kami",
    "Empyreal Lord",
    "Megafauna",
    "Lycanthrope",
    "Inevitable",
    "Herd Animal",
    "Vampire",
    "Asura",
    "Marsupial",
    "Demon Lord",
    "Genie",
    "Familiar",
    "Fish",
    "House Spirit",
    "Dolphin",
    "Bat",
    "Lurking Ray",
    "Cat",
    "Sphinx",
    "Titan",
    "Great Old One",
    "Ape",
    "Parasite",
    "Spider",
    "Lizard",
    "Snake",
    "Primate",
    "Kaiju",
    "Demodand",
];

/// Image file extension searched for by default.
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// First word of a two-word dragon age such as "Very Young" or "Great Wyrm".
pub(crate) const AGE_PAIR_LEADS: &[&str] = &["Very", "Mature", "Young", "Great"];
/// Second word of a two-word dragon age.
pub(crate) const AGE_PAIR_TAILS: &[&str] = &["Young", "Old", "Adult", "Wyrm"];
/// Single-word dragon ages.
pub(crate) const DRAGON_AGES: &[&str] = &[
    "Juvenile", "Wyrmling", "Ancient", "Adult", "Young", "Old", "Wyrm",
];
/// Elemental size categories.
pub(crate) const ELEMENTAL_SIZES: &[&str] = &["Small", "Large", "Greater", "Medium", "Huge", "Elder"];
/// Suffixes marking a lycanthrope's alternate forms.
pub(crate) const LYCANTHROPE_FORMS: &[&str] = &["1st form", "2nd form"];

pub(crate) const DRAGON_CATEGORY: &str = "Dragon";
pub(crate) const ELEMENTAL_CATEGORY: &str = "Elemental";
pub(crate) const LYCANTHROPE_CATEGORY: &str = "Lycanthrope";

/// Immutable resolver configuration, built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverRules {
    /// Categories tried as file name prefixes; earlier entries win.
    pub type_prefixes: Vec<String>,
    /// Extension of token image files, without the leading dot.
    pub image_extension: String,
}

impl Default for ResolverRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_TYPE_PREFIXES.iter().map(|label| label.to_string()),
            DEFAULT_IMAGE_EXTENSION,
        )
    }
}

impl ResolverRules {
    /// Build rules from a prefix list, dropping blanks and repeated labels.
    pub fn new(
        type_prefixes: impl IntoIterator<Item = String>,
        image_extension: impl Into<String>,
    ) -> Self {
        let mut prefixes: Vec<String> = Vec::new();
        for label in type_prefixes {
            let label = label.trim().to_string();
            if !label.is_empty() && !prefixes.contains(&label) {
                prefixes.push(label);
            }
        }

        let extension = image_extension.into();
        Self {
            type_prefixes: prefixes,
            image_extension: extension.trim_start_matches('.').to_string(),
        }
    }
}

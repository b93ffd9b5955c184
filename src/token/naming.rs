//! Display name obfuscation and output file naming.

use std::path::{Path, PathBuf};

/// ROT13 of `name`, stored as the player-visible token name so the real name stays with the GM.
pub fn obfuscate_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'a'..='z' => (((c as u8 - b'a') + 13) % 26 + b'a') as char,
            'A'..='Z' => (((c as u8 - b'A') + 13) % 26 + b'A') as char,
            _ => c,
        })
        .collect()
}

/// Archive path written next to `image`: `<image stem>[, <qualifier>].<extension>`.
pub fn token_output_path(image: &Path, qualifier: Option<&str>, extension: &str) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match qualifier.filter(|value| !value.is_empty()) {
        Some(qualifier) => format!("{stem}, {qualifier}.{extension}"),
        None => format!("{stem}.{extension}"),
    };
    image.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_letters_and_keeps_everything_else() {
        assert_eq!(obfuscate_name("Huge Fire Elemental"), "Uhtr Sver Ryrzragny");
        assert_eq!(obfuscate_name("Wolf, 1st form"), "Jbys, 1fg sbez");
        assert_eq!(obfuscate_name(&obfuscate_name("Solar")), "Solar");
    }

    #[test]
    fn appends_qualifier_before_extension() {
        let image = Path::new("img/Bestiary/Dragon, Red.png");
        assert_eq!(
            token_output_path(image, Some("Very Young"), "rptok"),
            PathBuf::from("img/Bestiary/Dragon, Red, Very Young.rptok")
        );
        assert_eq!(
            token_output_path(image, None, "rptok"),
            PathBuf::from("img/Bestiary/Dragon, Red.rptok")
        );
    }
}

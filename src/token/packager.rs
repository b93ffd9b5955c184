//! Assemble one token archive from a catalog row and its resolved image.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{TokenError, TokenResult};
use crate::models::{CatalogRow, PropertyEntry, ResolvedImage, SPACE_COLUMN};
use crate::token::archive::{ScratchDir, write_archive};
use crate::token::asset::ImageAsset;
use crate::token::documents::{
    TokenContent, TokenTemplate, render_asset_xml, render_content_xml, render_properties_xml,
};
use crate::token::naming::{obfuscate_name, token_output_path};
use crate::token::sizes::size_guid;
use crate::token::skills::parse_skills;

/// Writes `.rptok` archives for resolved catalog rows.
#[derive(Debug)]
pub struct TokenPackager<'a> {
    template: &'a TokenTemplate,
    map_sizes: bool,
}

impl<'a> TokenPackager<'a> {
    /// Create a packager. With `map_sizes` the row's `Space` column selects a grid size.
    pub fn new(template: &'a TokenTemplate, map_sizes: bool) -> Self {
        Self {
            template,
            map_sizes,
        }
    }

    /// Build the archive for `row` next to its image and return the archive path.
    ///
    /// An existing archive with the same name is replaced.
    pub fn package(&self, row: &CatalogRow, image: &ResolvedImage) -> TokenResult<PathBuf> {
        let name = row.name();
        let size_guid = self.size_guid(row)?;
        let asset = ImageAsset::load(&image.path)?;
        let properties = token_properties(row);

        let scratch = ScratchDir::new()?;
        scratch.write("properties.xml", render_properties_xml(self.template))?;
        scratch.write(
            "content.xml",
            render_content_xml(self.template, &TokenContent {
                asset_id: &asset.id,
                gm_name: name,
                player_name: &obfuscate_name(name),
                size_guid: size_guid.as_deref(),
                properties: &properties,
            }),
        )?;
        scratch.write(
            format!("assets/{}", asset.id),
            render_asset_xml(self.template, &asset.id, name),
        )?;
        scratch.write(
            format!("assets/{}.{}", asset.id, self.template.image_extension),
            &asset.bytes,
        )?;

        let destination = token_output_path(
            &image.path,
            image.qualifier.as_deref(),
            &self.template.output_extension,
        );
        if destination.exists() {
            warn!(archive = %destination.display(), "replacing existing token archive");
        }
        write_archive(scratch.path(), &destination)?;
        info!(name, archive = %destination.display(), asset = %asset.id, "wrote token");

        Ok(destination)
    }

    fn size_guid(&self, row: &CatalogRow) -> TokenResult<Option<String>> {
        if !self.map_sizes {
            return Ok(None);
        }

        let space = row.get(SPACE_COLUMN).ok_or_else(|| TokenError::MissingColumn {
            name: row.name().to_string(),
            column: SPACE_COLUMN.to_string(),
        })?;
        size_guid(space)
            .map(Some)
            .ok_or_else(|| TokenError::UnknownSpace {
                name: row.name().to_string(),
                value: space.to_string(),
            })
    }
}

/// Every non-name column in header order, followed by the parsed skills.
pub fn token_properties(row: &CatalogRow) -> Vec<PropertyEntry> {
    let mut properties: Vec<PropertyEntry> = row
        .properties()
        .map(|(key, value)| PropertyEntry::new(key, value))
        .collect();
    properties.extend(parse_skills(row.skills()));
    properties
}

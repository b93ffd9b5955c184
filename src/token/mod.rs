//! MapTool token packaging.
//!
//! A token archive is a zip holding `properties.xml`, `content.xml`, an asset descriptor under
//! `assets/<md5>` and the image itself under `assets/<md5>.<ext>`. Each concern lives in its
//! own submodule so the documents, naming and archive layout can be tested independently.

mod archive;
mod asset;
mod documents;
mod naming;
mod packager;
mod sizes;
mod skills;

pub use archive::{ScratchDir, write_archive};
pub use asset::{ImageAsset, content_hash};
pub use documents::{
    TokenContent, TokenTemplate, render_asset_xml, render_content_xml, render_properties_xml,
};
pub use naming::{obfuscate_name, token_output_path};
pub use packager::{TokenPackager, token_properties};
pub use sizes::{SIZE_CODES, size_code, size_guid};
pub use skills::parse_skills;

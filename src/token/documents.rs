//! XML documents stored inside a MapTool token archive.
//!
//! The token format is not a published API; the layout below is what MapTool 1.9.x reads
//! back. Every substituted value is XML escaped.

use quick_xml::escape::escape;

use crate::models::PropertyEntry;

/// Fixed token settings shared by every archive of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTemplate {
    /// Version recorded in `properties.xml`.
    pub format_version: String,
    /// MapTool token shape, e.g. `CIRCLE`.
    pub token_shape: String,
    /// MapTool token type, e.g. `NPC`.
    pub token_type: String,
    /// Map layer the token is placed on.
    pub layer: String,
    /// Extension recorded for the image asset.
    pub image_extension: String,
    /// Extension of the written archives.
    pub output_extension: String,
}

impl Default for TokenTemplate {
    fn default() -> Self {
        Self {
            format_version: "1.9.3".into(),
            token_shape: "CIRCLE".into(),
            token_type: "NPC".into(),
            layer: "TOKEN".into(),
            image_extension: "png".into(),
            output_extension: "rptok".into(),
        }
    }
}

/// Per-token values substituted into `content.xml`.
#[derive(Debug)]
pub struct TokenContent<'a> {
    /// MD5 key of the image asset.
    pub asset_id: &'a str,
    /// Name shown to the GM.
    pub gm_name: &'a str,
    /// Name shown to players.
    pub player_name: &'a str,
    /// Grid size GUID, when size mapping is enabled.
    pub size_guid: Option<&'a str>,
    /// Token properties in emission order.
    pub properties: &'a [PropertyEntry],
}

/// Render `properties.xml`.
pub fn render_properties_xml(template: &TokenTemplate) -> String {
    format!(
        "<map><entry><string>version</string><string>{}</string></entry></map>",
        escape(template.format_version.as_str())
    )
}

/// Render `content.xml`.
pub fn render_content_xml(template: &TokenTemplate, content: &TokenContent<'_>) -> String {
    let mut xml = String::from("<net.rptools.maptool.model.Token>");
    xml.push_str("<imageAssetMap><entry><null/><net.rptools.lib.MD5Key>");
    xml.push_str(&format!("<id>{}</id>", escape(content.asset_id)));
    xml.push_str("</net.rptools.lib.MD5Key></entry></imageAssetMap><sizeScale>1.0</sizeScale>");
    xml.push_str("<snapToScale>true</snapToScale><snapToGrid>true</snapToGrid>");
    xml.push_str(&format!(
        "<ownerType>0</ownerType><tokenShape>{}</tokenShape><tokenType>{}</tokenType><layer>{}</layer>",
        escape(template.token_shape.as_str()),
        escape(template.token_type.as_str()),
        escape(template.layer.as_str()),
    ));

    if let Some(guid) = content.size_guid {
        xml.push_str("<sizeMap><entry><java-class>net.rptools.maptool.model.SquareGrid</java-class>");
        xml.push_str(&format!(
            "<net.rptools.maptool.model.GUID><baGUID>{}</baGUID></net.rptools.maptool.model.GUID>",
            escape(guid)
        ));
        xml.push_str("</entry></sizeMap>");
    }

    xml.push_str(&format!(
        "<gmName>{}</gmName><name>{}</name><propertyType>Basic</propertyType><propertyMapCI><store>",
        escape(content.gm_name),
        escape(content.player_name),
    ));
    for entry in content.properties {
        push_property(&mut xml, entry);
    }
    xml.push_str("</store></propertyMapCI></net.rptools.maptool.model.Token>");
    xml
}

/// Render the asset descriptor stored as `assets/<id>`.
pub fn render_asset_xml(template: &TokenTemplate, asset_id: &str, name: &str) -> String {
    format!(
        "<net.rptools.maptool.model.Asset><id><id>{}</id></id><name>{}</name>\
         <extension>{}</extension><image/></net.rptools.maptool.model.Asset>",
        escape(asset_id),
        escape(name),
        escape(template.image_extension.as_str()),
    )
}

fn push_property(xml: &mut String, entry: &PropertyEntry) {
    xml.push_str(&format!(
        "<entry><string>{}</string><net.rptools.CaseInsensitiveHashMap_-KeyValue>\
         <key>{}</key><value class=\"string\">{}</value>\
         </net.rptools.CaseInsensitiveHashMap_-KeyValue></entry>",
        escape(entry.normalized_key.as_str()),
        escape(entry.key.as_str()),
        escape(entry.value.as_str()),
    ));
}

//! Assembling the ordered set of files that make up an exported site.

use lander_compiler_html::static_files::{SCRIPT_FILE, SCRIPT_JS, STYLE_CSS, STYLE_FILE};
use lander_compiler_html::{compile_entries, CompileOptions};
use lander_parts::{collect_entry_assets, Page, Part, PartEntry, Theme};

pub const INDEX_FILE: &str = "index.html";
pub const README_FILE: &str = "README.txt";

/// One named file of the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PackageOptions {
    /// Indent the exported HTML
    pub pretty: bool,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Files of an exported site, in archive order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPackage {
    entries: Vec<ArchiveEntry>,
}

impl ExportPackage {
    pub fn from_page(page: &Page, options: &PackageOptions) -> Self {
        Self::build(&page.theme, &page.parts, options)
    }

    pub fn build(theme: &Theme, parts: &[Part], options: &PackageOptions) -> Self {
        let entries: Vec<PartEntry> = parts.iter().cloned().map(PartEntry::Known).collect();
        Self::from_entries(theme, &entries, options)
    }

    /// Package decoded entries; unsupported ones keep their placeholder
    pub fn from_entries(theme: &Theme, entries: &[PartEntry], options: &PackageOptions) -> Self {
        let compile_options = CompileOptions::packaged().with_pretty(options.pretty);
        let html = compile_entries(theme, entries, &compile_options);

        // hidden parts are left out of the export HTML, so nothing links their images
        let images: Vec<ArchiveEntry> = collect_entry_assets(theme, entries)
            .into_iter()
            .filter(|located| match located.role.part_index() {
                Some(index) => entries
                    .get(index)
                    .and_then(PartEntry::as_part)
                    .map_or(false, |part| part.visible),
                None => true,
            })
            .map(|located| ArchiveEntry::new(located.archive_path(), located.asset.bytes()))
            .collect();

        let image_names: Vec<&str> = images.iter().map(|e| e.name.as_str()).collect();
        let readme = readme(&theme.title, &image_names);

        let mut files = vec![
            ArchiveEntry::new(INDEX_FILE, html),
            ArchiveEntry::new(STYLE_FILE, STYLE_CSS.trim_start()),
            ArchiveEntry::new(SCRIPT_FILE, SCRIPT_JS.trim_start()),
            ArchiveEntry::new(README_FILE, readme),
        ];
        tracing::debug!("packaged {} images", images.len());
        files.extend(images);

        Self { entries: files }
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ArchiveEntry> {
        self.entries
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.bytes.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}

fn readme(title: &str, images: &[&str]) -> String {
    let mut out = String::new();
    let heading = if title.trim().is_empty() {
        "Landing page"
    } else {
        title.trim()
    };
    out.push_str(heading);
    out.push('\n');
    out.push_str(&"=".repeat(heading.chars().count()));
    out.push_str("\n\n");
    out.push_str("This archive is a complete static site. Open index.html in a\n");
    out.push_str("browser, or upload every file to any static web host keeping the\n");
    out.push_str("folder layout unchanged.\n\n");
    out.push_str("Files:\n");
    out.push_str(&format!("  {:<14}the page\n", INDEX_FILE));
    out.push_str(&format!("  {:<14}styles; colours are set in index.html\n", STYLE_FILE));
    out.push_str(&format!("  {:<14}smooth scrolling, card fade-in, back-to-top button\n", SCRIPT_FILE));
    out.push_str(&format!("  {:<14}this note\n", README_FILE));
    if !images.is_empty() {
        out.push_str("  images/       uploaded images\n");
        for image in images {
            out.push_str(&format!("    {}\n", image));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lander_parts::{template_for, AssetRef, FieldValue, PartId, PartType};

    #[test]
    fn test_fixed_files_come_first() {
        let package = ExportPackage::build(&Theme::default(), &[], &PackageOptions::default());
        let names: Vec<&str> = package.names().collect();
        assert_eq!(names, [INDEX_FILE, STYLE_FILE, SCRIPT_FILE, README_FILE]);
    }

    #[test]
    fn test_images_follow_in_page_order() {
        let mut gallery = Part::new(PartId::new("g"), PartType::Gallery, template_for(PartType::Gallery));
        gallery.fields.insert(
            "images",
            FieldValue::Images(vec![
                AssetRef::new("image/jpeg", vec![1u8]),
                AssetRef::new("image/png", vec![2u8]),
            ]),
        );
        let parts = vec![
            Part::new(PartId::new("h"), PartType::Hero, template_for(PartType::Hero)),
            gallery,
        ];

        let package = ExportPackage::build(&Theme::default(), &parts, &PackageOptions::default());
        assert_eq!(package.get("images/gallery-1-0.jpg"), Some(&[1u8][..]));
        assert_eq!(package.get("images/gallery-1-1.png"), Some(&[2u8][..]));

        let readme = String::from_utf8_lossy(package.get(README_FILE).unwrap_or_default()).to_string();
        assert!(readme.contains("images/gallery-1-1.png"));

        let html = String::from_utf8_lossy(package.get(INDEX_FILE).unwrap_or_default()).to_string();
        assert!(html.contains("src=\"images/gallery-1-0.jpg\""));
        assert!(html.contains("href=\"style.css\""));
    }

    #[test]
    fn test_unsupported_entries_keep_indices() {
        let mut about = Part::new(PartId::new("a"), PartType::About, template_for(PartType::About));
        about
            .fields
            .insert("image", FieldValue::Asset(Some(AssetRef::new("image/png", vec![7u8]))));
        let entries = vec![
            PartEntry::Unsupported {
                id: None,
                type_name: "ticker".to_string(),
            },
            PartEntry::Known(about),
        ];

        let package = ExportPackage::from_entries(&Theme::default(), &entries, &PackageOptions::default());
        assert_eq!(package.get("images/part-1.png"), Some(&[7u8][..]));
    }

    #[test]
    fn test_hidden_part_images_are_not_packaged() {
        let image = AssetRef::new("image/png", vec![9u8]);
        let mut hidden = Part::new(PartId::new("a"), PartType::About, template_for(PartType::About));
        hidden.fields.insert("image", FieldValue::Asset(Some(image.clone())));
        hidden.visible = false;
        let mut shown = Part::new(PartId::new("b"), PartType::About, template_for(PartType::About));
        shown.fields.insert("image", FieldValue::Asset(Some(image)));

        let package = ExportPackage::build(&Theme::default(), &[hidden, shown], &PackageOptions::default());
        assert_eq!(package.get("images/part-0.png"), None);
        assert_eq!(package.get("images/part-1.png"), Some(&[9u8][..]));

        let readme = String::from_utf8_lossy(package.get(README_FILE).unwrap_or_default()).to_string();
        assert!(!readme.contains("images/part-0.png"));
    }

    #[test]
    fn test_readme_uses_page_title() {
        let theme = Theme {
            title: "Acme".to_string(),
            ..Theme::default()
        };
        let package = ExportPackage::build(&theme, &[], &PackageOptions::default());
        let readme = String::from_utf8_lossy(package.get(README_FILE).unwrap_or_default()).to_string();
        assert!(readme.starts_with("Acme\n====\n"));
    }
}

//! Loading an audit from a JSON manifest.
//!
//! ```json
//! {
//!   "audit": { "preparedBy": "...", "date": "2024-05-01", "websiteUrl": "https://..." },
//!   "sections": [
//!     { "id": "...", "title": "...", "description": "...",
//!       "items": [ { "id": "...", "title": "...", "status": "fail",
//!                    "explanation": "...", "image": "shots/cart.png" } ] }
//!   ]
//! }
//! ```
//!
//! Image paths are resolved relative to the manifest's directory. An image
//! that cannot be read leaves its item without a screenshot and is reported
//! as a [`Warning`]; the rest of the audit still loads.

use crate::error::Warning;
use auditpdf_types::{AuditMetadata, Document, Item, Section, Status};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A loaded audit and whatever was skipped while loading it.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: Document,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AuditHeader {
    prepared_by: String,
    date: String,
    website_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemEntry {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: Option<Status>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    image: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct SectionEntry {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    items: Vec<ItemEntry>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    audit: AuditHeader,
    #[serde(default)]
    sections: Vec<SectionEntry>,
}

/// Builds [`Document`]s from manifests on disk or in memory.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    base_dir: PathBuf,
}

impl DocumentSource {
    /// `base_dir` is where relative image paths are looked up.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<LoadedDocument, SourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::new(base_dir).load_str(&json)
    }

    pub fn load_str(&self, json: &str) -> Result<LoadedDocument, SourceError> {
        let manifest: Manifest = serde_json::from_str(json)?;
        let metadata = AuditMetadata {
            prepared_by: manifest.audit.prepared_by,
            date: manifest.audit.date,
            subject: manifest.audit.website_url,
        };

        let mut document = Document::new(metadata);
        let mut warnings = Vec::new();
        for entry in manifest.sections {
            let mut section = Section::new(entry.id, entry.title).with_description(entry.description);
            for item in entry.items {
                section.items.push(self.load_item(item, &mut warnings));
            }
            document.sections.push(section);
        }
        log::debug!(
            "Loaded {} sections with {} items from manifest ({} unreadable images).",
            document.sections.len(),
            document.item_count(),
            warnings.len()
        );
        Ok(LoadedDocument { document, warnings })
    }

    fn load_item(&self, entry: ItemEntry, warnings: &mut Vec<Warning>) -> Item {
        let mut item = Item::new(entry.id, entry.title)
            .with_description(entry.description)
            .with_status(entry.status.unwrap_or_default());
        item.explanation = entry.explanation;

        if let Some(relative) = entry.image {
            let path = self.base_dir.join(relative);
            match std::fs::read(&path) {
                Ok(bytes) => item.image = Some(bytes.into()),
                Err(e) => {
                    log::warn!("Image '{}' for item '{}' is unreadable: {}", path.display(), item.id, e);
                    warnings.push(Warning::ImageUnreadable {
                        item: item.id.clone(),
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "audit": { "preparedBy": "Sam", "date": "2024-05-01", "websiteUrl": "https://shop.example.com" },
        "sections": [
            { "id": "checkout", "title": "Checkout", "description": "Cart and payment.",
              "items": [
                { "id": "guest", "title": "Guest checkout", "status": "pass" },
                { "id": "trust", "title": "Trust badges", "status": null, "explanation": "  " },
                { "id": "fields", "title": "Form fields", "status": "fail", "explanation": "Too many." }
              ] },
            { "id": "home", "title": "Homepage" }
        ]
    }"#;

    #[test]
    fn manifest_maps_to_document() {
        let loaded = DocumentSource::new(".").load_str(MANIFEST).unwrap();
        assert!(loaded.warnings.is_empty());
        let document = loaded.document;
        assert_eq!(document.metadata.prepared_by, "Sam");
        assert_eq!(document.metadata.subject, "https://shop.example.com");
        assert_eq!(document.sections.len(), 2);
        assert!(document.sections[1].items.is_empty());

        let items = &document.sections[0].items;
        assert_eq!(items[0].status, Status::Pass);
        assert_eq!(items[1].status, Status::Pending);
        assert_eq!(items[1].explanation_text(), None);
        assert_eq!(items[2].explanation_text(), Some("Too many."));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"{ "sections": [ { "id": "s", "title": "S",
            "items": [ { "id": "i", "title": "I", "status": "maybe" } ] } ] }"#;
        assert!(matches!(
            DocumentSource::new(".").load_str(json),
            Err(SourceError::Json(_))
        ));
    }

    #[test]
    fn images_resolve_relative_to_the_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("shots")).unwrap();
        std::fs::write(dir.path().join("shots/cart.png"), [1u8, 2, 3]).unwrap();
        let manifest = dir.path().join("audit.json");
        std::fs::write(
            &manifest,
            r#"{ "sections": [ { "id": "s", "title": "S",
                "items": [ { "id": "i", "title": "I", "image": "shots/cart.png" } ] } ] }"#,
        )
        .unwrap();

        let document = DocumentSource::from_file(&manifest).unwrap().document;
        let image = document.sections[0].items[0].image.as_ref().unwrap();
        assert_eq!(image.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn missing_image_file_keeps_the_item_and_warns() {
        let json = r#"{ "sections": [ { "id": "s", "title": "S",
            "items": [ { "id": "hero", "title": "I", "image": "nope.png", "status": "fail" },
                       { "id": "next", "title": "N" } ] } ] }"#;
        let loaded = DocumentSource::new("/nonexistent").load_str(json).unwrap();

        let items = &loaded.document.sections[0].items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].status, Status::Fail);
        assert!(items[0].image.is_none());

        assert_eq!(loaded.warnings.len(), 1);
        assert_eq!(loaded.warnings[0].item().as_str(), "hero");
        assert!(matches!(
            &loaded.warnings[0],
            Warning::ImageUnreadable { path, .. } if path.ends_with("nope.png")
        ));
    }
}

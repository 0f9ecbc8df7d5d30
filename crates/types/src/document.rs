//! The audit document model handed to the export pipeline.
//!
//! Everything here is read-only for the duration of one export.

use crate::ids::{ItemId, SectionId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The judgement recorded for a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
    Optional,
    #[default]
    Pending,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Pass, Status::Fail, Status::Optional, Status::Pending];

    /// An item is completed once it carries any judgement other than pending.
    pub fn is_completed(self) -> bool {
        self != Status::Pending
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
            Status::Optional => "optional",
            Status::Pending => "pending",
        }
    }
}

/// Opaque image bytes as captured by the checklist. The format is only known
/// once the image is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob(Arc<[u8]>);

impl ImageBlob {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ImageBlob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub explanation: Option<String>,
    pub image: Option<ImageBlob>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: Status::Pending,
            explanation: None,
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<ImageBlob>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// The explanation, trimmed. Whitespace-only notes count as absent.
    pub fn explanation_text(&self) -> Option<&str> {
        self.explanation
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub description: String,
    pub items: Vec<Item>,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            items: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }
}

/// Who prepared the audit, when, and what was audited.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditMetadata {
    pub prepared_by: String,
    pub date: String,
    /// The audited website URL or other identifier of the audit subject.
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub metadata: AuditMetadata,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(metadata: AuditMetadata) -> Self {
        Self {
            metadata,
            sections: Vec::new(),
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.sections.iter().flat_map(|section| section.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|section| section.items.len()).sum()
    }

    pub fn summary(&self) -> AuditSummary {
        self.items().fold(AuditSummary::default(), |mut summary, item| {
            summary.total += 1;
            match item.status {
                Status::Pass => summary.passed += 1,
                Status::Fail => summary.failed += 1,
                Status::Optional => summary.optional += 1,
                Status::Pending => summary.pending += 1,
            }
            if item.status.is_completed() {
                summary.completed += 1;
            }
            summary
        })
    }
}

/// Counts shown on the cover page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub total: usize,
    pub completed: usize,
    pub passed: usize,
    pub failed: usize,
    pub optional: usize,
    pub pending: usize,
}

impl AuditSummary {
    /// Passed items as a rounded percentage of completed items; 0 when nothing
    /// has been completed yet.
    pub fn pass_rate(&self) -> u32 {
        percentage(self.passed, self.completed)
    }

    pub fn completion_rate(&self) -> u32 {
        percentage(self.completed, self.total)
    }
}

fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

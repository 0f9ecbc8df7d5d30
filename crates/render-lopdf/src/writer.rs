use crate::canvas::{font_resource, to_win_ansi};
use crate::error::RenderError;
use auditpdf_layout::{FontFace, FontMetrics, LayoutError};
use auditpdf_types::Rect;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::io::Write;

/// Document-level metadata written to the Info dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub subject: String,
}

/// One bookmark in the document outline.
#[derive(Debug, Clone)]
pub struct OutlineEntry {
    pub title: String,
    pub page_index: usize,
}

/// Builds the PDF object graph in memory.
///
/// Page object ids are allocated up front so link annotations and outline
/// entries can reference pages that have not been written yet.
pub struct PdfWriter {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    fonts: Dictionary,
    xobjects: Dictionary,
    compress: bool,
}

impl PdfWriter {
    pub fn new(metrics: &dyn FontMetrics, page_count: usize, compress: bool) -> Result<Self, RenderError> {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        let page_ids = (0..page_count).map(|_| document.new_object_id()).collect();

        let mut fonts = Dictionary::new();
        for face in FontFace::ALL {
            let base_font = metrics
                .base_font(face)
                .ok_or(LayoutError::MeasurementFailed { face })?;
            let font_dict = dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base_font,
                "Encoding" => "WinAnsiEncoding",
            };
            let font_id = document.add_object(font_dict);
            fonts.set(font_resource(face), font_id);
        }

        Ok(Self {
            document,
            pages_id,
            resources_id,
            page_ids,
            fonts,
            xobjects: Dictionary::new(),
            compress,
        })
    }

    pub fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    fn page_id(&self, index: usize) -> Result<ObjectId, RenderError> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or_else(|| RenderError::Other(format!("page index {index} was never allocated")))
    }

    /// Embeds baseline JPEG bytes as an image XObject and returns its
    /// resource name.
    pub fn add_jpeg(&mut self, jpeg: &[u8], width: u32, height: u32) -> String {
        let name = format!("Im{}", self.xobjects.len() + 1);
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg.to_vec(),
        );
        let image_id = self.document.add_object(image);
        self.xobjects.set(name.as_bytes(), image_id);
        name
    }

    fn content_stream(&self, content: Content) -> Result<Stream, RenderError> {
        let raw = content.encode()?;
        if !self.compress {
            return Ok(Stream::new(Dictionary::new(), raw));
        }
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw)?;
        let compressed = encoder.finish()?;
        Ok(Stream::new(dictionary! {"Filter" => "FlateDecode"}, compressed))
    }

    /// Creates a `Link` annotation jumping to the page at `target_index`.
    pub fn add_link(
        &mut self,
        rect: Rect,
        target_index: usize,
        page_height: f32,
    ) -> Result<ObjectId, RenderError> {
        let target_page_id = self.page_id(target_index)?;
        let dest = vec![Object::Reference(target_page_id), "FitH".into(), page_height.into()];
        let action = dictionary! { "Type" => "Action", "S" => "GoTo", "D" => dest };
        let action_id = self.document.add_object(action);
        let pdf_rect = vec![
            rect.x.into(),
            (page_height - rect.bottom()).into(),
            rect.right().into(),
            (page_height - rect.y).into(),
        ];
        let annot = dictionary! {
            "Type" => "Annot", "Subtype" => "Link", "Rect" => pdf_rect,
            "Border" => vec![0.into(), 0.into(), 0.into()], "A" => action_id,
        };
        Ok(self.document.add_object(annot))
    }

    pub fn write_page(
        &mut self,
        index: usize,
        content: Content,
        annotations: Vec<ObjectId>,
        page_width: f32,
        page_height: f32,
    ) -> Result<(), RenderError> {
        let page_id = self.page_id(index)?;
        let stream = self.content_stream(content)?;
        let content_id = self.document.add_object(stream);

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        if !annotations.is_empty() {
            page_dict.set(
                "Annots",
                Object::Array(annotations.into_iter().map(Object::Reference).collect()),
            );
        }
        self.document.objects.insert(page_id, Object::Dictionary(page_dict));
        Ok(())
    }

    /// Flat outline with one bookmark per entry, in the given order.
    fn build_outlines(&mut self, entries: &[OutlineEntry]) -> Result<Option<ObjectId>, RenderError> {
        if entries.is_empty() {
            return Ok(None);
        }
        let outline_root_id = self.document.new_object_id();
        let item_ids: Vec<ObjectId> = entries.iter().map(|_| self.document.new_object_id()).collect();

        for (i, entry) in entries.iter().enumerate() {
            let dest = vec![Object::Reference(self.page_id(entry.page_index)?), "Fit".into()];
            let mut dict = dictionary! {
                "Title" => Object::String(to_win_ansi(&entry.title), StringFormat::Literal),
                "Parent" => outline_root_id, "Dest" => dest,
            };
            if i > 0 {
                dict.set("Prev", item_ids[i - 1]);
            }
            if i + 1 < item_ids.len() {
                dict.set("Next", item_ids[i + 1]);
            }
            self.document.objects.insert(item_ids[i], Object::Dictionary(dict));
        }

        let (first_id, last_id) = (item_ids[0], item_ids[item_ids.len() - 1]);
        self.document.objects.insert(
            outline_root_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines", "First" => first_id, "Last" => last_id, "Count" => item_ids.len() as i64,
            }),
        );
        Ok(Some(outline_root_id))
    }

    /// Writes the shared dictionaries and serializes the document.
    pub fn finish(mut self, info: &DocumentInfo, outline: &[OutlineEntry]) -> Result<Vec<u8>, RenderError> {
        let mut resources = dictionary! { "Font" => Object::Dictionary(self.fonts.clone()) };
        if !self.xobjects.is_empty() {
            resources.set("XObject", Object::Dictionary(self.xobjects.clone()));
        }
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let mut catalog = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        if let Some(outline_root_id) = self.build_outlines(outline)? {
            catalog.set("Outlines", outline_root_id);
            catalog.set("PageMode", "UseOutlines");
        }
        let catalog_id = self.document.add_object(catalog);
        self.document.trailer.set("Root", catalog_id);

        let info_id = self.document.add_object(dictionary! {
            "Title" => Object::String(to_win_ansi(&info.title), StringFormat::Literal),
            "Author" => Object::String(to_win_ansi(&info.author), StringFormat::Literal),
            "Subject" => Object::String(to_win_ansi(&info.subject), StringFormat::Literal),
            "Producer" => Object::string_literal("auditpdf"),
        });
        self.document.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

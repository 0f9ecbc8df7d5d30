use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use std::collections::HashMap;

/// Strings drawn with `Tj` on a page, decoded as Latin-1.
pub fn page_strings(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    let Some(page_id) = doc.get_pages().get(&page_num).copied() else {
        return Vec::new();
    };
    let Ok(content) = doc.get_and_decode_page_content(page_id) else {
        return Vec::new();
    };
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(|bytes| bytes.iter().map(|&b| b as char).collect())
        .collect()
}

/// All text of the document, one line per drawn string.
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    for page_num in 1..=doc.get_pages().len() as u32 {
        for line in page_strings(doc, page_num) {
            text.push_str(&line);
            text.push('\n');
        }
    }
    text
}

#[derive(Debug)]
pub struct LinkAnnotation {
    /// Page the annotation sits on (1-based)
    pub page: u32,
    pub rect: Option<[f32; 4]>,
    pub is_internal: bool,
    /// Page a GoTo action jumps to (1-based)
    pub target_page: Option<u32>,
}

fn resolve_dict<'a>(doc: &'a LopdfDocument, object: &'a Object) -> Option<&'a Dictionary> {
    match object.as_reference() {
        Ok(id) => doc.get_object(id).ok()?.as_dict().ok(),
        Err(_) => object.as_dict().ok(),
    }
}

fn read_link(
    doc: &LopdfDocument,
    page: u32,
    annot: &Dictionary,
    page_numbers: &HashMap<ObjectId, u32>,
) -> Option<LinkAnnotation> {
    if annot.get(b"Subtype").ok()?.as_name().ok()? != b"Link" {
        return None;
    }

    let rect = annot.get(b"Rect").ok().and_then(|r| r.as_array().ok()).and_then(|arr| {
        (arr.len() >= 4).then(|| {
            [
                arr[0].as_f32().unwrap_or(0.0),
                arr[1].as_f32().unwrap_or(0.0),
                arr[2].as_f32().unwrap_or(0.0),
                arr[3].as_f32().unwrap_or(0.0),
            ]
        })
    });

    let action = annot.get(b"A").ok().and_then(|a| resolve_dict(doc, a));
    let is_internal = action
        .and_then(|a| a.get(b"S").ok())
        .and_then(|s| s.as_name().ok())
        .is_some_and(|name| name == b"GoTo");
    let target_page = action
        .and_then(|a| a.get(b"D").ok())
        .and_then(|d| d.as_array().ok())
        .and_then(|d| d.first())
        .and_then(|target| target.as_reference().ok())
        .and_then(|id| page_numbers.get(&id).copied());

    Some(LinkAnnotation {
        page,
        rect,
        is_internal,
        target_page,
    })
}

/// Extract link annotations from PDF pages
pub fn extract_link_annotations(doc: &LopdfDocument) -> Vec<LinkAnnotation> {
    let pages = doc.get_pages();
    let page_numbers: HashMap<ObjectId, u32> = pages.iter().map(|(num, id)| (*id, *num)).collect();

    let mut annotations = Vec::new();
    for (page_num, page_id) in &pages {
        let Some(page) = doc.get_object(*page_id).ok().and_then(|o| o.as_dict().ok()) else {
            continue;
        };
        let Ok(annots) = page.get(b"Annots").and_then(|a| a.as_array()) else {
            continue;
        };
        for annot in annots {
            if let Some(link) = resolve_dict(doc, annot).and_then(|d| read_link(doc, *page_num, d, &page_numbers)) {
                annotations.push(link);
            }
        }
    }
    annotations
}

/// Count internal links in the PDF
pub fn count_internal_links(doc: &LopdfDocument) -> usize {
    extract_link_annotations(doc)
        .iter()
        .filter(|a| a.is_internal)
        .count()
}

/// Number of embedded JPEG image streams
pub fn count_jpeg_images(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Filter")
                .and_then(|f| f.as_name())
                .is_ok_and(|name| name == b"DCTDecode")
        })
        .count()
}

/// Number of image draws (`Do`) on one page
pub fn count_image_draws(doc: &LopdfDocument, page_num: u32) -> usize {
    doc.get_pages()
        .get(&page_num)
        .and_then(|id| doc.get_and_decode_page_content(*id).ok())
        .map(|content| content.operations.iter().filter(|op| op.operator == "Do").count())
        .unwrap_or(0)
}

pub fn has_outlines(doc: &LopdfDocument) -> bool {
    doc.catalog()
        .ok()
        .and_then(|catalog| catalog.get(b"Outlines").ok())
        .is_some()
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert the number of internal links
#[macro_export]
macro_rules! assert_pdf_internal_link_count {
    ($pdf:expr, $count:expr) => {
        let link_count = $crate::common::pdf_assertions::count_internal_links(&$pdf.doc);
        assert_eq!(
            link_count, $count,
            "Expected {} internal links, found {}",
            $count, link_count
        );
    };
}

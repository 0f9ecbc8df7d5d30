use auditpdf::{AuditMetadata, Document, ImageBlob, Item, Section, Status};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

pub fn metadata() -> AuditMetadata {
    AuditMetadata {
        prepared_by: "Jordan Reviewer".into(),
        date: "2024-05-01".into(),
        subject: "https://shop.example.com".into(),
    }
}

/// A solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> ImageBlob {
    let image = RgbaImage::from_pixel(width, height, Rgba([40, 120, 200, 255]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("PNG encoding of an in-memory image");
    ImageBlob::from(bytes)
}

/// Deterministic filler text of roughly `len` characters.
pub fn long_text(len: usize) -> String {
    let words = [
        "checkout", "visitors", "abandon", "the", "form", "because", "shipping", "costs", "appear",
        "late", "and", "trust", "signals", "are", "missing",
    ];
    let mut text = String::new();
    let mut i = 0;
    while text.len() < len {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(words[i % words.len()]);
        i += 1;
    }
    text
}

/// One section with a single passing item: no explanation, no image.
pub fn single_pass_item() -> Document {
    Document::new(metadata()).with_section(
        Section::new("homepage", "Homepage")
            .with_description("First impressions and value proposition.")
            .with_item(
                Item::new("hero", "Clear headline above the fold")
                    .with_description("Visitors understand the offer within five seconds.")
                    .with_status(Status::Pass),
            ),
    )
}

/// One section with `count` failing items, each with a long explanation.
pub fn long_explanations(count: usize) -> Document {
    Document::new(metadata()).with_section(
        Section::new("checkout", "Checkout").with_items((0..count).map(|i| {
            Item::new(format!("item-{i}"), format!("Checkout finding {i}"))
                .with_description("Review the step for friction.")
                .with_status(Status::Fail)
                .with_explanation(long_text(500))
        })),
    )
}

/// Three items; the middle one carries bytes that are not an image.
pub fn broken_image() -> Document {
    Document::new(metadata()).with_section(
        Section::new("product", "Product Page")
            .with_item(
                Item::new("gallery", "Image gallery")
                    .with_status(Status::Pass)
                    .with_image(png_bytes(320, 200)),
            )
            .with_item(
                Item::new("reviews", "Customer reviews")
                    .with_status(Status::Fail)
                    .with_explanation("Reviews are hidden below the fold.")
                    .with_image(b"definitely not a png".to_vec()),
            )
            .with_item(
                Item::new("price", "Price visibility")
                    .with_status(Status::Optional)
                    .with_image(png_bytes(200, 320)),
            ),
    )
}

/// Sections whose items are all still pending.
pub fn nothing_completed() -> Document {
    Document::new(metadata())
        .with_section(
            Section::new("navigation", "Navigation")
                .with_item(Item::new("menu", "Menu labels"))
                .with_item(Item::new("search", "Site search")),
        )
        .with_section(Section::new("footer", "Footer").with_item(Item::new("contact", "Contact details")))
}

/// `sections` sections of `items` items with alternating statuses.
pub fn multi_section(sections: usize, items: usize) -> Document {
    let statuses = [Status::Pass, Status::Fail, Status::Optional, Status::Pending];
    (0..sections).fold(Document::new(metadata()), |doc, s| {
        doc.with_section(
            Section::new(format!("section-{s}"), format!("Section {s}"))
                .with_description("Things to look at in this part of the site.")
                .with_items((0..items).map(|i| {
                    let status = statuses[(s + i) % statuses.len()];
                    let item = Item::new(format!("s{s}-i{i}"), format!("Check {i} of section {s}"))
                        .with_description("What a good implementation looks like.")
                        .with_status(status);
                    if status == Status::Fail {
                        item.with_explanation(long_text(180))
                    } else {
                        item
                    }
                })),
        )
    })
}

#![cfg(test)]

use crate::config::{IntroMetrics, SectionBreak};
use crate::paginate::Pagination;
use crate::test_utils::{
    default_settings, init_logging, long_text, paginate_test_sections, pass_item, section_with_items,
};
use auditpdf_types::{Item, Section, Status};

fn assert_no_overlap(pagination: &Pagination) {
    for page in &pagination.pages {
        let mut previous_bottom = f32::MIN;
        for intro in &page.intros {
            assert!(intro.offset >= previous_bottom);
            previous_bottom = intro.offset + intro.intro.height;
        }
        for placed in &page.blocks {
            assert_eq!(placed.page, page.number);
            assert!(
                placed.offset >= previous_bottom,
                "block at {} overlaps previous content ending at {} on page {}",
                placed.offset,
                previous_bottom,
                page.number
            );
            previous_bottom = placed.bottom();
        }
    }
}

#[test]
fn test_single_item_single_page() {
    init_logging();
    let sections = vec![section_with_items("hero", 1)];
    let pagination = paginate_test_sections(&sections, default_settings()).unwrap();

    assert_eq!(pagination.pages.len(), 1);
    assert_eq!(pagination.total_pages(), 3);
    assert_eq!(pagination.section_pages.get(&"hero".into()), Some(3));

    let page = &pagination.pages[0];
    assert_eq!(page.number, 3);
    assert_eq!(page.intros.len(), 1);
    assert_eq!(page.blocks.len(), 1);
    assert_eq!(page.intros[0].offset, default_settings().header_height);
    assert!(pagination.overflows.is_empty());
}

#[test]
fn test_every_item_placed_in_order() {
    let sections = vec![
        section_with_items("a", 7),
        section_with_items("b", 0),
        section_with_items("c", 25),
    ];
    let pagination = paginate_test_sections(&sections, default_settings()).unwrap();

    let placed: Vec<_> = pagination.placed_blocks().map(|p| p.block.item.clone()).collect();
    let expected: Vec<_> = sections
        .iter()
        .flat_map(|s| s.items.iter().map(|i| i.id.clone()))
        .collect();
    assert_eq!(placed, expected);
    assert_no_overlap(&pagination);
}

#[test]
fn test_blocks_stay_inside_content_area() {
    let settings = default_settings();
    let sections = vec![section_with_items("a", 40)];
    let pagination = paginate_test_sections(&sections, settings).unwrap();

    assert!(pagination.pages.len() > 1);
    for placed in pagination.placed_blocks() {
        assert!(placed.offset >= settings.header_height);
        assert!(placed.bottom() <= settings.content_height + 0.01);
    }
}

#[test]
fn test_section_starts_fresh_page_by_default() {
    let sections = vec![section_with_items("a", 1), section_with_items("b", 1)];
    let pagination = paginate_test_sections(&sections, default_settings()).unwrap();

    assert_eq!(pagination.pages.len(), 2);
    assert_eq!(pagination.section_pages.get(&"a".into()), Some(3));
    assert_eq!(pagination.section_pages.get(&"b".into()), Some(4));
    assert_eq!(pagination.pages[1].section_title, "Section b");
}

#[test]
fn test_continue_policy_shares_pages() {
    let sections = vec![section_with_items("a", 1), section_with_items("b", 1)];
    let settings = default_settings().with_section_break(SectionBreak::Continue);
    let pagination = paginate_test_sections(&sections, settings).unwrap();

    assert_eq!(pagination.pages.len(), 1);
    assert_eq!(pagination.pages[0].intros.len(), 2);
    assert_eq!(pagination.section_pages.get(&"b".into()), Some(3));
    assert_no_overlap(&pagination);
}

#[test]
fn test_section_pages_are_non_decreasing() {
    let sections: Vec<Section> = (0..6)
        .map(|i| section_with_items(&format!("s{i}"), i * 3))
        .collect();

    for policy in [SectionBreak::NewPage, SectionBreak::Continue] {
        let settings = default_settings().with_section_break(policy);
        let pagination = paginate_test_sections(&sections, settings).unwrap();
        let pages: Vec<usize> = sections
            .iter()
            .map(|s| pagination.section_pages.get(&s.id).unwrap())
            .collect();
        assert!(pages.windows(2).all(|w| w[0] <= w[1]), "{policy:?}: {pages:?}");
    }
}

#[test]
fn test_long_explanations_never_split() {
    let section = Section::new("forms", "Forms").with_items((0..20).map(|i| {
        pass_item(&format!("f{i}")).with_explanation(long_text(500))
    }));
    let settings = default_settings();
    let pagination = paginate_test_sections(std::slice::from_ref(&section), settings).unwrap();

    assert!(pagination.pages.len() >= 3);
    assert_eq!(pagination.block_count(), 20);
    assert!(pagination.overflows.is_empty());
    for page in &pagination.pages {
        assert_eq!(page.section_title, "Forms");
        for placed in &page.blocks {
            assert!(placed.bottom() <= settings.content_height + 0.01);
        }
    }
}

#[test]
fn test_oversized_block_is_placed_and_reported() {
    let huge = pass_item("huge").with_explanation(long_text(12_000));
    let section = Section::new("s", "S")
        .with_item(pass_item("before"))
        .with_item(huge)
        .with_item(pass_item("after"));
    let pagination = paginate_test_sections(&[section], default_settings()).unwrap();

    assert_eq!(pagination.block_count(), 3);
    assert_eq!(pagination.overflows.len(), 1);
    let overflow = &pagination.overflows[0];
    assert_eq!(overflow.item.as_str(), "huge");
    assert!(overflow.height > overflow.available);

    // Alone on its page.
    let page = pagination
        .pages
        .iter()
        .find(|p| p.blocks.iter().any(|b| b.block.item.as_str() == "huge"))
        .unwrap();
    assert_eq!(page.number, overflow.page);
    assert_eq!(page.blocks.len(), 1);
    assert!(page.intros.is_empty());
}

#[test]
fn test_long_section_description_keeps_banner_on_page() {
    init_logging();
    let settings = default_settings();
    let section = Section::new("checkout", long_text(600))
        .with_description(long_text(12_000))
        .with_item(pass_item("c1"));
    let pagination = paginate_test_sections(&[section], settings).unwrap();

    let placed = &pagination.pages[0].intros[0];
    assert!(
        placed.offset + placed.intro.height <= settings.content_height + 0.01,
        "banner ends at {} past {}",
        placed.offset + placed.intro.height,
        settings.content_height
    );
    let metrics = IntroMetrics::default();
    assert_eq!(placed.intro.title.lines.len(), metrics.title_max_lines);
    assert_eq!(placed.intro.description.lines.len(), metrics.description_max_lines);
    assert_eq!(pagination.pages.len(), 1);
    assert_eq!(pagination.pages[0].blocks.len(), 1);
    assert!(pagination.overflows.is_empty());
    assert_no_overlap(&pagination);
}

#[test]
fn test_continue_policy_keeps_banner_with_first_card() {
    init_logging();
    let settings = default_settings().with_section_break(SectionBreak::Continue);
    let tall = Section::new("b", "B").with_item(pass_item("big").with_explanation(long_text(1500)));

    for leading_items in 1..=30 {
        let sections = vec![section_with_items("a", leading_items), tall.clone()];
        let pagination = paginate_test_sections(&sections, settings).unwrap();

        let banner_page = pagination
            .pages
            .iter()
            .find(|page| page.intros.iter().any(|placed| placed.intro.section.as_str() == "b"))
            .unwrap();
        let first_block = pagination
            .placed_blocks()
            .find(|placed| placed.block.item.as_str() == "big")
            .unwrap();

        assert_eq!(banner_page.number, first_block.page, "{leading_items} leading items");
        assert_eq!(pagination.section_pages.get(&"b".into()), Some(first_block.page));
        assert!(pagination.overflows.is_empty());
        assert_no_overlap(&pagination);
    }
}

#[test]
fn test_skip_pending_items_and_empty_sections() {
    let sections = vec![
        Section::new("done", "Done")
            .with_item(pass_item("d1"))
            .with_item(Item::new("d2", "Still open")),
        Section::new("open", "Open").with_item(Item::new("o1", "Not looked at")),
        Section::new("last", "Last").with_item(pass_item("l1").with_status(Status::Fail)),
    ];
    let settings = default_settings().with_include_pending(false);
    let pagination = paginate_test_sections(&sections, settings).unwrap();

    let placed: Vec<_> = pagination.placed_blocks().map(|p| p.block.item.to_string()).collect();
    assert_eq!(placed, vec!["d1", "l1"]);
    assert_eq!(pagination.section_pages.get(&"open".into()), None);
    assert_eq!(pagination.section_pages.get(&"last".into()), Some(4));
    assert_eq!(pagination.pages[1].section_number, 3);
    assert_eq!(pagination.pages[0].intros[0].intro.item_count, 1);
}

#[test]
fn test_empty_document() {
    let pagination = paginate_test_sections(&[], default_settings()).unwrap();
    assert!(pagination.pages.is_empty());
    assert_eq!(pagination.total_pages(), 2);
}

#[test]
fn test_pagination_is_deterministic() {
    let sections = vec![section_with_items("a", 12), section_with_items("b", 9)];
    let first = paginate_test_sections(&sections, default_settings()).unwrap();
    let second = paginate_test_sections(&sections, default_settings()).unwrap();
    assert_eq!(first, second);
}

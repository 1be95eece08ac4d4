use super::*;
use crate::metadata::{keys, Metadata};
use crate::segmenter::{Fragment, FragmentKind, PARAGRAPH_SEPARATOR};

fn make_test_fragment(content: &str, order: usize) -> Fragment {
    Fragment {
        content: content.to_string(),
        kind: FragmentKind::Paragraph,
        order,
        parent_key: None,
        metadata: Metadata::new(),
    }
}

fn make_fragments(sizes: &[usize]) -> Vec<Fragment> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| make_test_fragment(&"x".repeat(size), i))
        .collect()
}

#[test]
fn test_builder_merges_small_fragments() {
    let fragments = vec![
        make_test_fragment("Paragraph A", 0),
        make_test_fragment("Paragraph B", 1),
        make_test_fragment("Paragraph C", 2),
    ];

    let resource = build(fragments, "doc", DEFAULT_RESOURCE_TYPE, DEFAULT_MAX_BLOCK_SIZE);

    assert_eq!(resource.blocks.len(), 1);
    assert_eq!(resource.blocks[0].kind, BLOCK_KIND);
    assert_eq!(
        resource.blocks[0].content,
        "Paragraph A\n\nParagraph B\n\nParagraph C"
    );
    assert_eq!(resource.resource_id, "doc");
    assert_eq!(resource.resource_type, "text");
}

#[test]
fn test_builder_respects_max_block_size() {
    let resource = build(make_fragments(&[60, 60, 60]), "doc", "text", 100);

    assert_eq!(resource.blocks.len(), 3);
    for (i, block) in resource.blocks.iter().enumerate() {
        assert_eq!(block.order, i);
        assert_eq!(block.fragments.len(), 1);
    }
}

#[test]
fn test_builder_fills_up_to_exact_budget() {
    let resource = build(make_fragments(&[40, 60, 1]), "doc", "text", 100);

    assert_eq!(resource.blocks.len(), 2);
    assert_eq!(resource.blocks[0].fragments.len(), 2);
    assert_eq!(resource.blocks[0].metadata[keys::SIZE].as_integer(), Some(100));
    assert_eq!(resource.blocks[1].fragments.len(), 1);
}

#[test]
fn test_builder_isolates_oversized_fragment() {
    let resource = build(make_fragments(&[10, 500, 10]), "doc", "text", 100);

    assert_eq!(resource.blocks.len(), 3);
    assert_eq!(resource.blocks[1].fragments.len(), 1);
    assert_eq!(resource.blocks[1].metadata[keys::SIZE].as_integer(), Some(500));
}

#[test]
fn test_builder_empty_input() {
    let resource = build(Vec::new(), "empty", "text", DEFAULT_MAX_BLOCK_SIZE);

    assert!(resource.blocks.is_empty());
    assert_eq!(resource.metadata[keys::TOTAL_FRAGMENTS].as_integer(), Some(0));
    assert_eq!(resource.metadata[keys::TOTAL_BLOCKS].as_integer(), Some(0));
}

#[test]
fn test_builder_tracks_metadata() {
    let resource = build(make_fragments(&[30, 30, 80, 5]), "doc", "json", 100);

    assert_eq!(resource.metadata[keys::TOTAL_FRAGMENTS].as_integer(), Some(4));
    assert_eq!(resource.metadata[keys::TOTAL_BLOCKS].as_integer(), Some(2));
    assert_eq!(resource.resource_type, "json");

    let first = &resource.blocks[0];
    assert_eq!(first.metadata[keys::FRAGMENT_COUNT].as_integer(), Some(2));
    assert_eq!(first.metadata[keys::SIZE].as_integer(), Some(60));
}

#[test]
fn test_builder_preserves_fragment_sequence() {
    let sizes = [12, 700, 3000, 25, 7999, 1, 8000, 8001, 40, 40];
    let input = make_fragments(&sizes);

    let resource = build(input.clone(), "doc", "text", DEFAULT_MAX_BLOCK_SIZE);

    let output: Vec<Fragment> = resource.fragments().cloned().collect();
    assert_eq!(output, input);
    assert_eq!(resource.fragment_count(), sizes.len());
}

#[test]
fn test_block_invariants_hold() {
    let sizes = [120, 30, 95, 5, 260, 99, 1, 1, 180, 50, 50];
    let resource = build(make_fragments(&sizes), "doc", "text", 200);

    for block in &resource.blocks {
        assert!(!block.fragments.is_empty());

        let reassembled = block
            .fragments
            .iter()
            .map(|f| f.content.as_str())
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR);
        assert_eq!(reassembled, block.content);

        let size = block.metadata[keys::SIZE].as_integer().unwrap() as usize;
        assert_eq!(size, block.size());

        if block.fragments.len() > 1 {
            assert!(size <= 200, "multi-fragment block over budget: {}", size);
        }
    }
}

#[test]
fn test_block_size_counts_characters() {
    let fragments = vec![
        make_test_fragment("Собаки", 0),
        make_test_fragment("Кошки", 1),
    ];

    let resource = build(fragments, "doc", "text", 11);

    assert_eq!(resource.blocks.len(), 1);
    assert_eq!(resource.blocks[0].metadata[keys::SIZE].as_integer(), Some(11));
}

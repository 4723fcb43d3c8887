#![allow(dead_code)]

use alveo_client::model::{
    Annotation, AnnotationList, AnnotationProperties, ApiVersion, DocIdentifier, Item, ItemList,
    ItemListIdentifier, ItemLists,
};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Free text, including quotes, escapes and non-ASCII.
pub fn text_strategy() -> BoxedStrategy<String> {
    "\\PC{0,24}".boxed()
}

pub fn url_strategy() -> BoxedStrategy<String> {
    "[a-z0-9_/.-]{1,40}"
        .prop_map(|path| format!("https://app.alveo.edu.au/{path}"))
        .boxed()
}

/// Offsets as the server writes them: decimal seconds or character positions.
pub fn offset_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        (0u32..100_000).prop_map(|n| n.to_string()),
        (0u32..10_000, 0u32..10_000).prop_map(|(s, frac)| format!("{s}.{frac:04}")),
    ]
    .boxed()
}

pub fn arb_api_version() -> BoxedStrategy<ApiVersion> {
    text_strategy()
        .prop_map(|api_version| ApiVersion { api_version })
        .boxed()
}

pub fn arb_item_list(max_items: usize) -> BoxedStrategy<ItemList> {
    (
        text_strategy(),
        any::<u64>(),
        proptest::collection::vec(url_strategy(), 0..=max_items),
    )
        .prop_map(|(name, num_items, items)| ItemList {
            name,
            num_items,
            items,
        })
        .boxed()
}

pub fn arb_item_list_identifier() -> BoxedStrategy<ItemListIdentifier> {
    (text_strategy(), url_strategy(), any::<u64>(), any::<bool>())
        .prop_map(|(name, item_list_url, num_items, shared)| ItemListIdentifier {
            name,
            item_list_url,
            num_items,
            shared,
        })
        .boxed()
}

pub fn arb_item_lists(max_lists: usize) -> BoxedStrategy<ItemLists> {
    (
        proptest::collection::vec(arb_item_list_identifier(), 0..=max_lists),
        proptest::collection::vec(arb_item_list_identifier(), 0..=max_lists),
    )
        .prop_map(|(own, shared)| ItemLists { own, shared })
        .boxed()
}

pub fn arb_doc_identifier() -> BoxedStrategy<DocIdentifier> {
    (
        "[0-9]{1,4}(\\.[0-9])? (KB|MB)",
        url_strategy(),
        prop_oneof![Just("Text"), Just("Audio"), Just("Video"), Just("Annotation")],
    )
        .prop_map(|(size, url, doc_type)| DocIdentifier {
            size,
            url,
            doc_type: doc_type.to_string(),
        })
        .boxed()
}

pub fn arb_item(max_metadata: usize, max_docs: usize) -> BoxedStrategy<Item> {
    (
        url_strategy(),
        proptest::collection::btree_map("[a-z]{2,8}:[a-zA-Z_]{1,12}", text_strategy(), 0..=max_metadata),
        url_strategy(),
        url_strategy(),
        proptest::collection::vec(arb_doc_identifier(), 0..=max_docs),
    )
        .prop_map(
            |(catalog_url, metadata, primary_text_url, annotations_url, documents)| Item {
                catalog_url,
                metadata,
                primary_text_url,
                annotations_url,
                documents,
            },
        )
        .boxed()
}

pub fn arb_annotation() -> BoxedStrategy<Annotation> {
    (
        "[a-z]{1,10}",
        text_strategy(),
        offset_strategy(),
        offset_strategy(),
    )
        .prop_map(|(kind, label, start, end)| Annotation {
            kind,
            label,
            start,
            end,
        })
        .boxed()
}

pub fn arb_annotation_list(max_annotations: usize) -> BoxedStrategy<AnnotationList> {
    (
        url_strategy(),
        proptest::collection::vec(arb_annotation(), 0..=max_annotations),
    )
        .prop_map(|(annotates, annotations)| AnnotationList {
            common_properties: AnnotationProperties { annotates },
            annotations,
        })
        .boxed()
}

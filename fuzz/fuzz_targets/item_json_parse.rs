//! Fuzz target for item and item-list decoding.
//!
//! Run with:
//!   cargo +nightly fuzz run item_json_parse

#![no_main]

use alveo_client::model::io_json::from_json_slice;
use alveo_client::model::{Item, ItemList, ItemLists};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_json_slice::<Item>(data);
    let _ = from_json_slice::<ItemList>(data);
    let _ = from_json_slice::<ItemLists>(data);
});

//! Fuzz target for annotation-list decoding, both schemas.

#![no_main]

use alveo_client::model::io_json::from_json_slice;
use alveo_client::model::legacy::LegacyAnnotationList;
use alveo_client::model::AnnotationList;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(list) = from_json_slice::<AnnotationList>(data) {
        for ann in &list.annotations {
            let _ = ann.start_offset();
            let _ = ann.end_offset();
        }
    }
    let _ = from_json_slice::<LegacyAnnotationList>(data);
});

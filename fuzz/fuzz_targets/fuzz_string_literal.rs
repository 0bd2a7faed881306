#![no_main]

use libfuzzer_sys::fuzz_target;
use odata_filter::literal::quote_string;
use odata_filter::prelude::*;

fuzz_target!(|data: &[u8]| {
    // Limit input size to avoid OOM on pathological inputs
    if data.len() > 1024 {
        return;
    }
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let quoted = quote_string(s);
    let inner = &quoted[1..quoted.len() - 1];
    assert!(quoted.starts_with('\'') && quoted.ends_with('\''));
    assert_eq!(inner.replace("''", "'"), s);
    assert_eq!(
        inner.matches('\'').count(),
        2 * s.matches('\'').count()
    );

    // Arbitrary segments and loop variable names must fail cleanly
    let _ = ODataDynamicFilterBuilder::build(|b, p| {
        b.collection(&p.child(s), s)
            .any(|i, item| i.eq(item.child(s), s))
    });
});

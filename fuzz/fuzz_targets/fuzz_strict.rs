#![no_main]
use libfuzzer_sys::fuzz_target;
use zengraymap::{DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_samples: Some(1 << 24),
        ..Default::default()
    };

    // Anything strict mode accepts, lenient mode must decode identically
    let Ok(strict) = DecodeRequest::new(data)
        .with_limits(&limits)
        .strict(true)
        .decode(enough::Unstoppable)
    else {
        return;
    };
    let lenient = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
        .expect("strict success implies lenient success");
    assert_eq!(strict, lenient);
});

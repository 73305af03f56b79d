#![no_main]
use libfuzzer_sys::fuzz_target;
use zengraymap::{DecodeRequest, HeaderLayout, ImageInfo, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_samples: Some(1 << 24),
        ..Default::default()
    };

    // Both header layouts, lenient and strict: must never panic
    for layout in [HeaderLayout::Compat, HeaderLayout::Netpbm] {
        for strict in [false, true] {
            if let Ok(image) = DecodeRequest::new(data)
                .with_limits(&limits)
                .header_layout(layout)
                .strict(strict)
                .decode(enough::Unstoppable)
            {
                let expected = image.width() as usize * image.height() as usize;
                assert_eq!(image.pixels().len(), expected);
            }
        }
        let _ = ImageInfo::from_bytes_with_layout(data, layout);
    }
});

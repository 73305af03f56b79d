#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_strict"] {
        fs::create_dir_all(dir).unwrap();

        // One 2x2 file per variant
        fs::write(format!("{dir}/p1_2x2.pbm"), b"P1\n2 2\n255\n1 0\n0 1\n").unwrap();
        fs::write(format!("{dir}/p2_2x2.pgm"), b"P2\n# seed\n2 2\n15\n0 5\n10 15\n").unwrap();
        fs::write(format!("{dir}/p4_10x2.pbm"), b"P4\n10 2\n255\n\xff\xc0\x00\x3f").unwrap();
        fs::write(format!("{dir}/p5_3x2.pgm"), b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64").unwrap();

        // Netpbm layout (no max value for bitmaps)
        fs::write(format!("{dir}/p4_netpbm.pbm"), b"P4 8 1\n\xa5").unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/just_p5.bin"), b"P5").unwrap();
        fs::write(format!("{dir}/deep.bin"), b"P5\n1 1\n65535\n\x00\x00").unwrap();
        fs::write(format!("{dir}/short_p2.bin"), b"P2\n4 4\n255\n1 2 x").unwrap();
    }

    println!("Generated seed corpora under fuzz/corpus/");
}

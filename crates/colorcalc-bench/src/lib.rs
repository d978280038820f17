//! Input generators shared by the colorcalc benchmarks.

use std::fmt::Write;

/// Deterministic 8-bit RGB triplets covering the cube.
pub fn sample_triplets(count: usize) -> Vec<[f64; 3]> {
    (0..count)
        .map(|i| {
            let i = i as u64;
            [
                (i % 256) as f64,
                (i * 7 % 256) as f64,
                (i * 13 % 256) as f64,
            ]
        })
        .collect()
}

/// CSV records of the form `name,r,g,b,t`.
pub fn sample_csv(count: usize) -> String {
    let mut out = String::with_capacity(count * 32);
    for (i, [r, g, b]) in sample_triplets(count).into_iter().enumerate() {
        let _ = writeln!(out, "p{i},{r},{g},{b},20170101T000000");
    }
    out
}

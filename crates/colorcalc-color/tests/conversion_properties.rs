//! Conversion law and reference value tests.
//!
//! Checks the dispatched converters against BT.601 reference values and the
//! algebraic laws every conversion must obey: round trips, identity,
//! clamping and listing.
//!
//! # Reference
//!
//! ITU-R BT.601-7, digital YCbCr with 16..235 luma and 16..240 chroma.

use approx::assert_abs_diff_eq;
use colorcalc_color::{dispatch, inference::infer_colorspace, list, ColorError};
use colorcalc_core::{Colorspace, Range};

// ============================================================================
// Reference Values
// ============================================================================
// Computed in double precision from:
//   Y  = 0.299 R + 0.587 G + 0.114 B
//   Cb = 128 + 224 * (B - Y) / 1.772
//   Cr = 128 + 224 * (R - Y) / 1.402
//   Y' = 16 + 219 * Y
// with R, G, B normalized to [0, 1].

/// (rgb ub, ycbcr in ub scale, unrounded)
const RGB_UB_TO_YCBCR: &[([f64; 3], [f64; 3])] = &[
    ([1.0, 2.0, 3.0], [17.558764705882353, 128.58743858717304, 127.48935694106457]),
    ([0.0, 0.0, 0.0], [16.0, 128.0, 128.0]),
    ([255.0, 255.0, 255.0], [235.0, 128.0, 128.0]),
    // primaries
    ([255.0, 0.0, 0.0], [81.481, 90.20316027088036, 240.0]),
    ([0.0, 255.0, 0.0], [144.553, 53.79683972911964, 34.21398002853067]),
    ([0.0, 0.0, 255.0], [40.966, 240.0, 109.78601997146933]),
];

fn grid() -> Vec<[f64; 3]> {
    let steps = [0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0];
    let mut out = Vec::new();
    for &a in &steps {
        for &b in &steps {
            for &c in &steps {
                out.push([a, b, c]);
            }
        }
    }
    out
}

fn assert_triplet(actual: [f64; 3], expected: [f64; 3], eps: f64) {
    for i in 0..3 {
        assert_abs_diff_eq!(actual[i], expected[i], epsilon = eps);
    }
}

// ============================================================================
// Reference Tests
// ============================================================================

#[test]
fn test_rgb_ub_to_ycbcr_reference() {
    // default output storage is double, unclamped
    let conv =
        dispatch(Colorspace::Rgb, Range::UB, Colorspace::Ycbcr, Range::UB, Some(Range::D)).unwrap();
    for (rgb, expected) in RGB_UB_TO_YCBCR {
        assert_triplet(conv.apply(*rgb), *expected, 1e-6);
    }
}

#[test]
fn test_rgb_f_to_ycbcr_uw() {
    let rounded = dispatch(Colorspace::Rgb, Range::F, Colorspace::Ycbcr, Range::UW, None).unwrap();
    let exact =
        dispatch(Colorspace::Rgb, Range::F, Colorspace::Ycbcr, Range::UW, Some(Range::D)).unwrap();

    let input = [1.0, 0.2, 0.3];
    let r = rounded.apply(input);
    let e = exact.apply(input);
    for i in 0..3 {
        assert_eq!(r[i], r[i].round());
        assert!((r[i] - e[i]).abs() <= 1.0, "channel {i}: {} vs {}", r[i], e[i]);
    }
    assert_eq!(r, [29473.0, 28003.0, 55455.0]);
}

// ============================================================================
// Laws
// ============================================================================

#[test]
fn test_round_trip_float() {
    for from in Colorspace::REAL {
        for to in Colorspace::REAL {
            let forward = dispatch(from, Range::D, to, Range::D, None).unwrap();
            let back = dispatch(to, Range::D, from, Range::D, None).unwrap();
            for v in grid() {
                let rt = back.apply(forward.apply(v));
                assert_triplet(rt, v, 1e-9);
            }
        }
    }
}

#[test]
fn test_round_trip_integer_quantum() {
    // one rounding on the way back: at most one code off
    for from in Colorspace::REAL {
        for to in Colorspace::REAL {
            for range in [Range::UB, Range::UW] {
                let forward = dispatch(from, range, to, Range::D, None).unwrap();
                let back = dispatch(to, Range::D, from, range, None).unwrap();
                let max = range.domain_max();
                for v in grid() {
                    let codes = v.map(|c| (c * max).round());
                    let rt = back.apply(forward.apply(codes));
                    assert_triplet(rt, codes, 1.0);
                }
            }
        }
    }
}

#[test]
fn test_identity() {
    for space in Colorspace::REAL {
        for range in Range::ALL {
            let conv = dispatch(space, range, space, range, Some(range)).unwrap();
            for v in grid() {
                let v = if range.is_integer() {
                    v.map(|c| (c * range.domain_max()).round())
                } else {
                    v
                };
                assert_triplet(conv.apply(v), v, 1e-9);
            }
        }
    }
}

#[test]
fn test_integer_clamp() {
    let conv = dispatch(Colorspace::Rgb, Range::D, Colorspace::Rgb, Range::UB, None).unwrap();
    assert_eq!(conv.apply([-0.5, 2.0, 0.5]), [0.0, 255.0, 128.0]);

    // out-of-gamut YCbCr: saturated chroma drives RGB past both ends
    let conv = dispatch(Colorspace::Ycbcr, Range::UB, Colorspace::Rgb, Range::UW, None).unwrap();
    let out = conv.apply([128.0, 255.0, 0.0]);
    assert_eq!(out[2], 65535.0);
    assert_eq!(out[0], 0.0);
}

#[test]
fn test_float_no_clamp() {
    let conv = dispatch(Colorspace::Rgb, Range::D, Colorspace::Rgb, Range::UB, Some(Range::D)).unwrap();
    assert_triplet(conv.apply([-0.5, 2.0, 0.5]), [-127.5, 510.0, 127.5], 1e-9);
}

#[test]
fn test_list_complete() {
    let lines = list();
    let mut unique = lines.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), lines.len());
    for from in Colorspace::REAL {
        for to in Colorspace::REAL {
            let line = format!("{from}/{},{to}/{}", from.default_range(), to.default_range());
            assert!(lines.contains(&line), "missing {line}");
        }
    }
}

#[test]
fn test_inference_ambiguity_kinds() {
    let none = infer_colorspace(&["a", "b", "c"], &Colorspace::REAL).unwrap_err();
    let many = infer_colorspace(&["r", "g", "b", "y", "cb", "cr"], &Colorspace::REAL).unwrap_err();
    assert!(none.is_ambiguity() && many.is_ambiguity());
    assert!(matches!(none, ColorError::NoColorspaceMatch { .. }));
    assert!(matches!(many, ColorError::MultipleColorspaceMatches { .. }));
    assert_ne!(none.to_string(), many.to_string());
}

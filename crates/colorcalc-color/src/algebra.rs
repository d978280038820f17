//! BT.601 luma/chroma conversion algebra.
//!
//! Every function here works in canonical unit domains:
//!
//! | Colorspace | Channel 0      | Channels 1, 2          |
//! |------------|----------------|------------------------|
//! | rgb        | [0, 1]         | [0, 1]                 |
//! | ypbpr      | [0, 1]         | [-0.5, 0.5]            |
//! | ycbcr      | [16, 235]/255  | [16, 240]/255          |
//!
//! # Formulas
//!
//! ```text
//! Y  =  Kr*R + Kg*G + Kb*B
//! Pb = (B - Y) / (2 * (1 - Kb))
//! Pr = (R - Y) / (2 * (1 - Kr))
//!
//! Y' = 16/255 + Y  * 219/255
//! Cb = 128/255 + Pb * 224/255
//! Cr = 128/255 + Pr * 224/255
//! ```
//!
//! RGB to YCbCr is always the composition through YPbPr. Nothing here clamps;
//! out-of-gamut values pass through unchanged.
//!
//! # Reference
//!
//! ITU-R BT.601-7
//!
//! # Usage
//!
//! ```rust
//! use colorcalc_color::algebra::{rgb_to_ycbcr, ycbcr_to_rgb};
//!
//! let ycbcr = rgb_to_ycbcr([1.0, 1.0, 1.0]);
//! assert!((ycbcr[0] - 235.0 / 255.0).abs() < 1e-12);
//!
//! let rgb = ycbcr_to_rgb(ycbcr);
//! assert!((rgb[1] - 1.0).abs() < 1e-12);
//! ```

use colorcalc_core::Colorspace;
use colorcalc_math::{Mat3, Vec3};

use crate::{ColorError, ColorResult, Pipeline};

/// Red luma weight.
pub const KR: f64 = 0.299;
/// Blue luma weight.
pub const KB: f64 = 0.114;
/// Green luma weight.
pub const KG: f64 = 1.0 - KR - KB;

/// Digital black level, normalized to 255.
pub const FOOTROOM: f64 = 16.0 / 255.0;
/// Digital luma excursion (16..235), normalized to 255.
pub const LUMA_SCALE: f64 = 219.0 / 255.0;
/// Digital chroma excursion (16..240), normalized to 255.
pub const CHROMA_SCALE: f64 = 224.0 / 255.0;
/// Digital chroma zero level, normalized to 255.
pub const CHROMA_OFFSET: f64 = 128.0 / 255.0;

/// RGB to YPbPr matrix.
pub const RGB_TO_YPBPR: Mat3 = Mat3::from_rows([
    [KR, KG, KB],
    [-KR / (2.0 * (1.0 - KB)), -KG / (2.0 * (1.0 - KB)), 0.5],
    [0.5, -KG / (2.0 * (1.0 - KR)), -KB / (2.0 * (1.0 - KR))],
]);

/// YPbPr to RGB matrix, closed form of the inverse of [`RGB_TO_YPBPR`].
pub const YPBPR_TO_RGB: Mat3 = Mat3::from_rows([
    [1.0, 0.0, 2.0 * (1.0 - KR)],
    [1.0, -2.0 * KB * (1.0 - KB) / KG, -2.0 * KR * (1.0 - KR) / KG],
    [1.0, 2.0 * (1.0 - KB), 0.0],
]);

const DIGITAL_SCALE: [f64; 3] = [LUMA_SCALE, CHROMA_SCALE, CHROMA_SCALE];
const DIGITAL_OFFSET: [f64; 3] = [FOOTROOM, CHROMA_OFFSET, CHROMA_OFFSET];

/// Converts RGB to YPbPr.
#[inline]
pub fn rgb_to_ypbpr(rgb: [f64; 3]) -> [f64; 3] {
    RGB_TO_YPBPR.transform(Vec3::from(rgb)).to_array()
}

/// Converts YPbPr to RGB.
#[inline]
pub fn ypbpr_to_rgb(ypbpr: [f64; 3]) -> [f64; 3] {
    YPBPR_TO_RGB.transform(Vec3::from(ypbpr)).to_array()
}

/// Converts analog YPbPr to digital YCbCr (normalized to 255).
#[inline]
pub fn ypbpr_to_ycbcr(ypbpr: [f64; 3]) -> [f64; 3] {
    let [y, pb, pr] = ypbpr;
    [
        y * LUMA_SCALE + FOOTROOM,
        pb * CHROMA_SCALE + CHROMA_OFFSET,
        pr * CHROMA_SCALE + CHROMA_OFFSET,
    ]
}

/// Converts digital YCbCr (normalized to 255) to analog YPbPr.
#[inline]
pub fn ycbcr_to_ypbpr(ycbcr: [f64; 3]) -> [f64; 3] {
    let [y, cb, cr] = ycbcr;
    [
        (y - FOOTROOM) / LUMA_SCALE,
        (cb - CHROMA_OFFSET) / CHROMA_SCALE,
        (cr - CHROMA_OFFSET) / CHROMA_SCALE,
    ]
}

/// Converts RGB to YCbCr through YPbPr.
#[inline]
pub fn rgb_to_ycbcr(rgb: [f64; 3]) -> [f64; 3] {
    ypbpr_to_ycbcr(rgb_to_ypbpr(rgb))
}

/// Converts YCbCr to RGB through YPbPr.
#[inline]
pub fn ycbcr_to_rgb(ycbcr: [f64; 3]) -> [f64; 3] {
    ypbpr_to_rgb(ycbcr_to_ypbpr(ycbcr))
}

fn ypbpr_to_ycbcr_ops() -> Pipeline {
    Pipeline::new().scale(DIGITAL_SCALE).offset(DIGITAL_OFFSET)
}

fn ycbcr_to_ypbpr_ops() -> Pipeline {
    Pipeline::new()
        .offset(DIGITAL_OFFSET.map(|o| -o))
        .scale(DIGITAL_SCALE.map(|s| 1.0 / s))
}

/// Builds the colorspace transform between two canonical unit domains.
///
/// Returns an empty pipeline when `from == to`.
///
/// # Errors
///
/// [`ColorError::UnsupportedConversion`] if either side is [`Colorspace::None`].
pub fn transform_ops(from: Colorspace, to: Colorspace) -> ColorResult<Pipeline> {
    use Colorspace as C;

    let ops = match (from, to) {
        (C::None, _) | (_, C::None) => {
            return Err(ColorError::unsupported(format!(
                "no transform from '{from}' to '{to}'"
            )));
        }
        (C::Rgb, C::Rgb) | (C::Ycbcr, C::Ycbcr) | (C::Ypbpr, C::Ypbpr) => Pipeline::new(),
        (C::Rgb, C::Ypbpr) => Pipeline::new().matrix(RGB_TO_YPBPR),
        (C::Ypbpr, C::Rgb) => Pipeline::new().matrix(YPBPR_TO_RGB),
        (C::Ypbpr, C::Ycbcr) => ypbpr_to_ycbcr_ops(),
        (C::Ycbcr, C::Ypbpr) => ycbcr_to_ypbpr_ops(),
        (C::Rgb, C::Ycbcr) => transform_ops(C::Rgb, C::Ypbpr)?.then(ypbpr_to_ycbcr_ops()),
        (C::Ycbcr, C::Rgb) => ycbcr_to_ypbpr_ops().then(transform_ops(C::Ypbpr, C::Rgb)?),
    };
    Ok(ops)
}

/// Converts one canonical-domain triplet between colorspaces.
pub fn convert(from: Colorspace, to: Colorspace, v: [f64; 3]) -> ColorResult<[f64; 3]> {
    Ok(transform_ops(from, to)?.apply(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_close(a: [f64; 3], b: [f64; 3], eps: f64) {
        for i in 0..3 {
            assert_abs_diff_eq!(a[i], b[i], epsilon = eps);
        }
    }

    #[test]
    fn test_bt601_coefficients() {
        assert_abs_diff_eq!(KG, 0.587, epsilon = 1e-15);
        assert_abs_diff_eq!(RGB_TO_YPBPR[1][0], -0.168736, epsilon = 1e-6);
        assert_abs_diff_eq!(RGB_TO_YPBPR[1][1], -0.331264, epsilon = 1e-6);
        assert_abs_diff_eq!(RGB_TO_YPBPR[2][1], -0.418688, epsilon = 1e-6);
        assert_abs_diff_eq!(RGB_TO_YPBPR[2][2], -0.081312, epsilon = 1e-6);
        assert_abs_diff_eq!(YPBPR_TO_RGB[0][2], 1.402, epsilon = 1e-12);
        assert_abs_diff_eq!(YPBPR_TO_RGB[1][1], -0.344136, epsilon = 1e-6);
        assert_abs_diff_eq!(YPBPR_TO_RGB[1][2], -0.714136, epsilon = 1e-6);
        assert_abs_diff_eq!(YPBPR_TO_RGB[2][1], 1.772, epsilon = 1e-12);
    }

    #[test]
    fn test_closed_form_inverse() {
        let inv = RGB_TO_YPBPR.inverse().unwrap();
        assert!(inv.max_abs_diff(&YPBPR_TO_RGB) < 1e-12);
    }

    #[test]
    fn test_white_black() {
        assert_close(rgb_to_ypbpr([1.0, 1.0, 1.0]), [1.0, 0.0, 0.0], 1e-12);
        assert_close(rgb_to_ypbpr([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0], 1e-12);
        assert_close(
            rgb_to_ycbcr([0.0, 0.0, 0.0]),
            [16.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0],
            1e-12,
        );
        assert_close(
            rgb_to_ycbcr([1.0, 1.0, 1.0]),
            [235.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0],
            1e-12,
        );
    }

    #[test]
    fn test_chroma_extremes() {
        // pure blue and red hit the chroma limits
        assert_abs_diff_eq!(rgb_to_ypbpr([0.0, 0.0, 1.0])[1], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(rgb_to_ypbpr([1.0, 0.0, 0.0])[2], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(rgb_to_ycbcr([0.0, 0.0, 1.0])[1], 240.0 / 255.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rgb_to_ycbcr([1.0, 1.0, 0.0])[1], 16.0 / 255.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ops_match_functions() {
        let v = [0.2, 0.7, 0.4];
        let cases: [(Colorspace, Colorspace, fn([f64; 3]) -> [f64; 3]); 6] = [
            (Colorspace::Rgb, Colorspace::Ypbpr, rgb_to_ypbpr),
            (Colorspace::Ypbpr, Colorspace::Rgb, ypbpr_to_rgb),
            (Colorspace::Ypbpr, Colorspace::Ycbcr, ypbpr_to_ycbcr),
            (Colorspace::Ycbcr, Colorspace::Ypbpr, ycbcr_to_ypbpr),
            (Colorspace::Rgb, Colorspace::Ycbcr, rgb_to_ycbcr),
            (Colorspace::Ycbcr, Colorspace::Rgb, ycbcr_to_rgb),
        ];
        for (from, to, f) in cases {
            assert_close(convert(from, to, v).unwrap(), f(v), 1e-12);
        }
    }

    #[test]
    fn test_composed_path() {
        let ops = transform_ops(Colorspace::Rgb, Colorspace::Ycbcr).unwrap();
        assert_eq!(ops.len(), 3);
        let ops = transform_ops(Colorspace::Ycbcr, Colorspace::Rgb).unwrap();
        assert_eq!(ops.len(), 3);
    }

    #[test]
    fn test_identity_and_none() {
        for c in Colorspace::REAL {
            assert!(transform_ops(c, c).unwrap().is_empty());
            assert!(transform_ops(c, Colorspace::None).is_err());
            assert!(transform_ops(Colorspace::None, c).is_err());
        }
    }

    #[test]
    fn test_no_clamp() {
        let v = rgb_to_ycbcr([2.0, -1.0, 0.5]);
        let back = ycbcr_to_rgb(v);
        assert_close(back, [2.0, -1.0, 0.5], 1e-12);
    }
}

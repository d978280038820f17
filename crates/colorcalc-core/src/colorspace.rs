//! Colorspace variants and their static channel tables.
//!
//! Colorspaces are a closed set of enum variants. Each real variant carries
//! a fixed, ordered triple of channel field names and a default [`Range`].
//! [`Colorspace::None`] is the unknown variant used while inferring a
//! colorspace from field names; its field names are the neutral channel
//! slots every other colorspace is renamed to.
//!
//! # Supported Colorspaces
//!
//! | Variant | Fields            | Default range | Meaning                            |
//! |---------|-------------------|---------------|------------------------------------|
//! | `rgb`   | `r,g,b`           | `ub`          | red-green-blue                     |
//! | `ycbcr` | `y,cb,cr`         | `ub`          | digital luma/chroma, 16-235/16-240 |
//! | `ypbpr` | `y,pb,pr`         | `f`           | analog luma/chroma                 |
//! | `none`  | `channel[0..2]`   | `d`           | unknown, neutral slots             |
//!
//! Adding a colorspace means adding a variant and extending the tables
//! below; every `match` in the workspace is exhaustive.
//!
//! # Usage
//!
//! ```
//! use colorcalc_core::Colorspace;
//!
//! assert_eq!(Colorspace::parse("ypbpr"), Colorspace::Ypbpr);
//! assert_eq!(Colorspace::parse("HSV"), Colorspace::None);
//! assert_eq!(Colorspace::None.field_names()[1], "channel[1]");
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::Range;

/// Role of a channel within its colorspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Primary color channel (R, G, B).
    Primary,
    /// Luma channel (Y).
    Luma,
    /// Color-difference channel (Cb, Cr, Pb, Pr).
    Chroma,
    /// Channel of an unknown colorspace.
    Neutral,
}

/// Enumerated colorspace variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Colorspace {
    /// Unknown colorspace; placeholder during field inference.
    #[default]
    None,
    /// Red-green-blue.
    Rgb,
    /// Digital luma and chroma with footroom/headroom (BT.601).
    Ycbcr,
    /// Analog luma and chroma.
    Ypbpr,
}

impl Colorspace {
    /// All real (non-`None`) colorspaces, in listing order.
    pub const REAL: [Self; 3] = [Self::Rgb, Self::Ycbcr, Self::Ypbpr];

    /// Parses a colorspace token.
    ///
    /// Matching is exact and case-sensitive. Unrecognized tokens resolve to
    /// [`Colorspace::None`]; the caller decides whether that is an error.
    pub fn parse(token: &str) -> Self {
        match token {
            "rgb" => Self::Rgb,
            "ycbcr" => Self::Ycbcr,
            "ypbpr" => Self::Ypbpr,
            _ => Self::None,
        }
    }

    /// Token of this colorspace.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rgb => "rgb",
            Self::Ycbcr => "ycbcr",
            Self::Ypbpr => "ypbpr",
        }
    }

    /// Canonical, ordered channel field names.
    pub const fn field_names(&self) -> &'static [&'static str; 3] {
        match self {
            Self::None => &["channel[0]", "channel[1]", "channel[2]"],
            Self::Rgb => &["r", "g", "b"],
            Self::Ycbcr => &["y", "cb", "cr"],
            Self::Ypbpr => &["y", "pb", "pr"],
        }
    }

    /// Role of each channel, in field order.
    pub const fn channel_kinds(&self) -> [ChannelKind; 3] {
        match self {
            Self::None => [ChannelKind::Neutral; 3],
            Self::Rgb => [ChannelKind::Primary; 3],
            Self::Ycbcr | Self::Ypbpr => [ChannelKind::Luma, ChannelKind::Chroma, ChannelKind::Chroma],
        }
    }

    /// Default range of this colorspace; see [`Range::default_for`].
    #[inline]
    pub const fn default_range(&self) -> Range {
        Range::default_for(*self)
    }

    /// Whether this is the unknown variant.
    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Every supported `(from, from_range, to, to_range)` combination.
    ///
    /// One entry per ordered pair of real colorspaces, self-pairs included,
    /// each with its default range.
    pub fn supported_conversions() -> Vec<(Self, Range, Self, Range)> {
        Self::REAL
            .iter()
            .flat_map(|&from| {
                Self::REAL
                    .iter()
                    .map(move |&to| (from, from.default_range(), to, to.default_range()))
            })
            .collect()
    }
}

impl FromStr for Colorspace {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Colorspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse() {
        assert_eq!(Colorspace::parse("rgb"), Colorspace::Rgb);
        assert_eq!(Colorspace::parse("ycbcr"), Colorspace::Ycbcr);
        assert_eq!(Colorspace::parse("ypbpr"), Colorspace::Ypbpr);
        assert_eq!(Colorspace::parse("RGB"), Colorspace::None);
        assert_eq!(Colorspace::parse(""), Colorspace::None);
        assert_eq!(Colorspace::parse("none"), Colorspace::None);
    }

    #[test]
    fn test_name_roundtrip() {
        for c in Colorspace::REAL {
            assert_eq!(Colorspace::parse(c.name()), c);
            assert_eq!(c.to_string().parse::<Colorspace>().unwrap(), c);
        }
    }

    #[test]
    fn test_field_names_unique() {
        for c in Colorspace::REAL.into_iter().chain([Colorspace::None]) {
            let names: HashSet<_> = c.field_names().iter().collect();
            assert_eq!(names.len(), 3, "{c} has duplicate field names");
        }
    }

    #[test]
    fn test_default_range() {
        assert_eq!(Colorspace::Rgb.default_range(), Range::UB);
        assert_eq!(Colorspace::Ycbcr.default_range(), Range::UB);
        assert_eq!(Colorspace::Ypbpr.default_range(), Range::F);
    }

    #[test]
    fn test_channel_kinds() {
        assert_eq!(Colorspace::Rgb.channel_kinds(), [ChannelKind::Primary; 3]);
        assert_eq!(Colorspace::Ypbpr.channel_kinds()[0], ChannelKind::Luma);
        assert_eq!(Colorspace::Ycbcr.channel_kinds()[2], ChannelKind::Chroma);
    }

    #[test]
    fn test_supported_conversions() {
        let all = Colorspace::supported_conversions();
        assert_eq!(all.len(), 9);
        let pairs: HashSet<_> = all.iter().map(|(f, _, t, _)| (*f, *t)).collect();
        assert_eq!(pairs.len(), 9);
        assert!(pairs.contains(&(Colorspace::Rgb, Colorspace::Rgb)));
        assert!(pairs.contains(&(Colorspace::Ypbpr, Colorspace::Ycbcr)));
        assert!(all.iter().all(|(f, _, t, _)| !f.is_none() && !t.is_none()));
    }
}

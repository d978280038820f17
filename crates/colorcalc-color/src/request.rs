//! Resolution of conversion options into a [`ConversionSpec`].
//!
//! A request holds the raw option tokens:
//!
//! ```text
//! --from <colorspace>[,<range>]
//! --to <colorspace>[,<range>[,<storage>]]
//! --input-type <range>
//! --output-type <range>
//! --fields <name>,<name>,...
//! ```
//!
//! Each range is picked by [`RangeChoice`] (default, suffix or override;
//! suffix and override together is a [`Conflict`]). Output storage is picked
//! by [`StorageChoice`]:
//!
//! 1. an explicit third `--to` token
//! 2. otherwise the output range, if one was given as suffix or override
//! 3. otherwise `d`, unclamped double precision
//!
//! # Usage
//!
//! ```rust
//! use colorcalc_color::ConversionRequest;
//! use colorcalc_core::{Colorspace, Range};
//!
//! let request = ConversionRequest {
//!     to: Some("ycbcr".into()),
//!     input_type: Some("ub".into()),
//!     fields: Some(vec!["name".into(), "r".into(), "g".into(), "b".into()]),
//!     ..Default::default()
//! };
//! let resolved = request.resolve().unwrap();
//! assert_eq!(resolved.spec.from, Colorspace::Rgb);
//! assert_eq!(resolved.spec.to_range, Range::UB);
//! assert_eq!(resolved.spec.storage, Range::D);
//! assert_eq!(resolved.fields[1], "channel[0]");
//! ```

use std::fmt;

use colorcalc_core::{Colorspace, CoreError, Range};
use tracing::trace;

use crate::inference::{
    infer_colorspace, rename_to_canonical, setup_fields_for_colorspace, FieldMap,
};
use crate::{ColorError, ColorResult, ConversionSpec, Converter};

/// Option combinations that cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// `--from` has more than two comma-separated tokens.
    TooManyFromTokens,
    /// `--to` has more than three comma-separated tokens.
    TooManyToTokens,
    /// Input range given both as `--from` suffix and `--input-type`.
    InputRangeTwice,
    /// Output range given both as `--to` suffix and `--output-type`.
    OutputRangeTwice,
    /// No destination colorspace.
    MissingDestination,
    /// Neither a source colorspace nor field names to infer it from.
    MissingSource,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TooManyFromTokens => "--from expects <colorspace>[,<range>]",
            Self::TooManyToTokens => "--to expects <colorspace>[,<range>[,<storage>]]",
            Self::InputRangeTwice => "input range given both in --from and --input-type",
            Self::OutputRangeTwice => "output range given both in --to and --output-type",
            Self::MissingDestination => "please specify --to",
            Self::MissingSource => "neither --from nor --fields given",
        })
    }
}

impl From<Conflict> for ColorError {
    fn from(c: Conflict) -> Self {
        ColorError::UnsupportedConversion(c.to_string())
    }
}

/// Where a range comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeChoice<'a> {
    /// The colorspace default.
    Default,
    /// Comma suffix of the colorspace option.
    Suffix(&'a str),
    /// Separate `--input-type`/`--output-type` option.
    Override(&'a str),
}

impl<'a> RangeChoice<'a> {
    /// Picks between a suffix token and an override token.
    pub fn pick(
        suffix: Option<&'a str>,
        over: Option<&'a str>,
        conflict: Conflict,
    ) -> ColorResult<Self> {
        match (suffix, over) {
            (Some(_), Some(_)) => Err(conflict.into()),
            (Some(s), None) => Ok(Self::Suffix(s)),
            (None, Some(o)) => Ok(Self::Override(o)),
            (None, None) => Ok(Self::Default),
        }
    }

    /// True when a range was given rather than defaulted.
    pub fn is_explicit(&self) -> bool {
        !matches!(self, Self::Default)
    }

    /// Resolves the range for `space`.
    pub fn resolve(&self, space: Colorspace) -> ColorResult<Range> {
        match self {
            Self::Default => Ok(space.default_range()),
            Self::Suffix(t) | Self::Override(t) => Ok(Range::parse(t)?),
        }
    }
}

/// Where the output storage comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageChoice<'a> {
    /// Third `--to` token.
    Explicit(&'a str),
    /// Same as the output range.
    FollowRange,
    /// Unclamped double precision.
    Double,
}

impl StorageChoice<'_> {
    /// Resolves the storage range given the resolved output range.
    pub fn resolve(&self, to_range: Range) -> ColorResult<Range> {
        match self {
            Self::Explicit(t) => Ok(Range::parse(t)?),
            Self::FollowRange => Ok(to_range),
            Self::Double => Ok(Range::D),
        }
    }
}

/// Resolved source side of a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Declared or inferred colorspace.
    pub colorspace: Colorspace,
    /// Input range.
    pub range: Range,
    /// Field list with channel names renamed to the neutral slots.
    pub fields: Vec<String>,
}

/// Resolved destination side of a conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    /// Destination colorspace.
    pub colorspace: Colorspace,
    /// Output range.
    pub range: Range,
    /// Output storage.
    pub storage: Range,
}

/// A request resolved into a validated spec plus its field layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConversion {
    /// The conversion to dispatch.
    pub spec: ConversionSpec,
    /// Field list with channel names renamed to the neutral slots.
    pub fields: Vec<String>,
}

impl ResolvedConversion {
    /// Positions of the channel slots in each record.
    pub fn field_map(&self) -> ColorResult<FieldMap> {
        FieldMap::new(&self.fields)
    }

    /// Dispatches the converter.
    pub fn converter(&self) -> ColorResult<Converter> {
        self.spec.dispatch()
    }
}

/// Raw conversion options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionRequest {
    /// `<colorspace>[,<range>]`
    pub from: Option<String>,
    /// `<colorspace>[,<range>[,<storage>]]`
    pub to: Option<String>,
    /// Input range override.
    pub input_type: Option<String>,
    /// Output range override.
    pub output_type: Option<String>,
    /// Declared record field names.
    pub fields: Option<Vec<String>>,
}

impl ConversionRequest {
    /// Resolves the source colorspace, range and field list.
    ///
    /// With `--from` naming a colorspace the fields default to the neutral
    /// slots; given fields must match that colorspace or the neutral slots.
    /// Otherwise the colorspace is inferred from the fields.
    pub fn source(&self) -> ColorResult<Source> {
        let tokens: Vec<&str> = self.from.as_deref().map(split).unwrap_or_default();
        if tokens.len() > 2 {
            return Err(Conflict::TooManyFromTokens.into());
        }
        let declared = tokens.first().map_or(Colorspace::None, |t| Colorspace::parse(t));
        let choice = RangeChoice::pick(
            tokens.get(1).copied(),
            self.input_type.as_deref(),
            Conflict::InputRangeTwice,
        )?;

        let (colorspace, fields) = match (declared, &self.fields) {
            (Colorspace::None, None) => return Err(Conflict::MissingSource.into()),
            (Colorspace::None, Some(fields)) => {
                let inferred = infer_colorspace(fields, &Colorspace::REAL)?;
                (inferred, rename_to_canonical(fields, inferred))
            }
            (space, Some(fields)) => (space, setup_fields_for_colorspace(fields, space)?),
            (space, None) => (
                space,
                Colorspace::None.field_names().iter().map(|s| s.to_string()).collect(),
            ),
        };
        let range = choice.resolve(colorspace)?;
        trace!(%colorspace, %range, ?choice, "resolved source");
        Ok(Source {
            colorspace,
            range,
            fields,
        })
    }

    /// Resolves the destination colorspace, range and storage.
    pub fn target(&self) -> ColorResult<Target> {
        let tokens = split(self.to.as_deref().ok_or(Conflict::MissingDestination)?);
        if tokens.len() > 3 {
            return Err(Conflict::TooManyToTokens.into());
        }
        let colorspace = target_colorspace(tokens[0])?;
        let choice = RangeChoice::pick(
            tokens.get(1).copied(),
            self.output_type.as_deref(),
            Conflict::OutputRangeTwice,
        )?;
        let storage_choice = match tokens.get(2) {
            Some(&t) => StorageChoice::Explicit(t),
            None if choice.is_explicit() => StorageChoice::FollowRange,
            None => StorageChoice::Double,
        };
        let range = choice.resolve(colorspace)?;
        let storage = storage_choice.resolve(range)?;
        trace!(%colorspace, %range, %storage, ?choice, ?storage_choice, "resolved target");
        Ok(Target {
            colorspace,
            range,
            storage,
        })
    }

    /// Resolves the whole request and validates the resulting spec.
    pub fn resolve(&self) -> ColorResult<ResolvedConversion> {
        let source = self.source()?;
        let target = self.target()?;
        let spec = ConversionSpec {
            from: source.colorspace,
            from_range: source.range,
            to: target.colorspace,
            to_range: target.range,
            storage: target.storage,
        };
        spec.validate()?;
        Ok(ResolvedConversion {
            spec,
            fields: source.fields,
        })
    }

    /// Channel names of the source colorspace.
    pub fn input_field_names(&self) -> ColorResult<&'static [&'static str; 3]> {
        Ok(self.source()?.colorspace.field_names())
    }

    /// Channel names of the destination colorspace.
    ///
    /// Only `--to` is consulted.
    pub fn output_field_names(&self) -> ColorResult<&'static [&'static str; 3]> {
        let tokens = split(self.to.as_deref().ok_or(Conflict::MissingDestination)?);
        Ok(target_colorspace(tokens[0])?.field_names())
    }
}

fn split(option: &str) -> Vec<&str> {
    option.split(',').collect()
}

fn target_colorspace(token: &str) -> ColorResult<Colorspace> {
    match Colorspace::parse(token) {
        Colorspace::None => Err(CoreError::InvalidColorspaceToken(token.to_string()).into()),
        space => Ok(space),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(from: Option<&str>, to: Option<&str>, fields: Option<&str>) -> ConversionRequest {
        ConversionRequest {
            from: from.map(String::from),
            to: to.map(String::from),
            fields: fields.map(|f| f.split(',').map(String::from).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_storage_defaults_to_double() {
        let target = request(None, Some("ycbcr"), None).target().unwrap();
        assert_eq!(target.colorspace, Colorspace::Ycbcr);
        assert_eq!(target.range, Range::UB);
        assert_eq!(target.storage, Range::D);
    }

    #[test]
    fn test_storage_follows_range() {
        let target = request(None, Some("ycbcr,uw"), None).target().unwrap();
        assert_eq!(target.range, Range::UW);
        assert_eq!(target.storage, Range::UW);

        let mut req = request(None, Some("ypbpr"), None);
        req.output_type = Some("ub".into());
        let target = req.target().unwrap();
        assert_eq!(target.range, Range::UB);
        assert_eq!(target.storage, Range::UB);
    }

    #[test]
    fn test_storage_explicit() {
        let target = request(None, Some("rgb,ub,f"), None).target().unwrap();
        assert_eq!(target.range, Range::UB);
        assert_eq!(target.storage, Range::F);
    }

    #[test]
    fn test_output_range_twice() {
        let mut req = request(None, Some("rgb,ub"), None);
        req.output_type = Some("uw".into());
        assert_eq!(req.target(), Err(Conflict::OutputRangeTwice.into()));
    }

    #[test]
    fn test_input_range_twice() {
        let mut req = request(Some("rgb,ub"), Some("ycbcr"), None);
        req.input_type = Some("f".into());
        assert_eq!(req.source(), Err(Conflict::InputRangeTwice.into()));
    }

    #[test]
    fn test_token_counts() {
        let req = request(Some("rgb,ub,d"), Some("ycbcr"), None);
        assert_eq!(req.source(), Err(Conflict::TooManyFromTokens.into()));
        let req = request(Some("rgb"), Some("ycbcr,ub,ub,ub"), None);
        assert_eq!(req.target(), Err(Conflict::TooManyToTokens.into()));
    }

    #[test]
    fn test_missing_to() {
        let err = request(Some("rgb"), None, None).resolve().unwrap_err();
        assert!(matches!(err, ColorError::UnsupportedConversion(_)));
    }

    #[test]
    fn test_invalid_to() {
        let err = request(Some("rgb"), Some("hsv"), None).target().unwrap_err();
        assert_eq!(err, ColorError::Core(CoreError::InvalidColorspaceToken("hsv".into())));
    }

    #[test]
    fn test_invalid_range_token() {
        let err = request(Some("rgb,byte"), Some("ycbcr"), None).source().unwrap_err();
        assert_eq!(err, ColorError::Core(CoreError::InvalidRangeToken("byte".into())));
    }

    #[test]
    fn test_source_neutral_default() {
        let source = request(Some("ypbpr"), Some("rgb"), None).source().unwrap();
        assert_eq!(source.colorspace, Colorspace::Ypbpr);
        assert_eq!(source.range, Range::F);
        assert_eq!(source.fields, ["channel[0]", "channel[1]", "channel[2]"]);
    }

    #[test]
    fn test_source_declared_with_fields() {
        let source = request(Some("rgb,uw"), Some("ycbcr"), Some("t,r,g,b")).source().unwrap();
        assert_eq!(source.range, Range::UW);
        assert_eq!(source.fields, ["t", "channel[0]", "channel[1]", "channel[2]"]);

        let err = request(Some("rgb"), Some("ycbcr"), Some("y,cb,cr")).source().unwrap_err();
        assert!(err.is_ambiguity());
    }

    #[test]
    fn test_source_inferred() {
        let mut req = request(None, Some("ycbcr"), Some("name,r,g,b,t"));
        req.input_type = Some("ub".into());
        let resolved = req.resolve().unwrap();
        assert_eq!(resolved.spec.from, Colorspace::Rgb);
        assert_eq!(resolved.spec.from_range, Range::UB);
        assert_eq!(
            resolved.fields,
            ["name", "channel[0]", "channel[1]", "channel[2]", "t"]
        );
        assert_eq!(resolved.field_map().unwrap().channels(), [1, 2, 3]);
    }

    #[test]
    fn test_unknown_from_falls_back_to_inference() {
        let source = request(Some("hsv"), Some("rgb"), Some("y,pb,pr")).source().unwrap();
        assert_eq!(source.colorspace, Colorspace::Ypbpr);
    }

    #[test]
    fn test_missing_source() {
        assert_eq!(
            request(None, Some("rgb"), None).source(),
            Err(Conflict::MissingSource.into())
        );
    }

    #[test]
    fn test_float_range_integer_storage() {
        let err = request(Some("rgb"), Some("ypbpr,f,ub"), None).resolve().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported conversion: f: storage format cannot be an integer"
        );
    }

    #[test]
    fn test_field_names_queries() {
        let req = request(Some("ycbcr"), Some("ypbpr,f"), None);
        assert_eq!(req.input_field_names().unwrap(), &["y", "cb", "cr"]);
        assert_eq!(req.output_field_names().unwrap(), &["y", "pb", "pr"]);

        let partial = request(None, Some("rgb"), None);
        assert_eq!(partial.output_field_names().unwrap(), &["r", "g", "b"]);
    }
}

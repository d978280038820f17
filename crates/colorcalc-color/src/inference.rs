//! Colorspace inference from record field names.
//!
//! A record schema is a list of field names such as `name,r,g,b,t`. The
//! colorspace is whichever candidate has all of its channel names present.
//! Matched channel names are then renamed to the neutral slots
//! `channel[0]`, `channel[1]`, `channel[2]`, and a [`FieldMap`] records the
//! position of each slot.
//!
//! # Usage
//!
//! ```rust
//! use colorcalc_color::inference::{infer_colorspace, rename_to_canonical, FieldMap};
//! use colorcalc_core::Colorspace;
//!
//! let fields = ["name", "r", "g", "b", "t"];
//! let space = infer_colorspace(&fields, &Colorspace::REAL).unwrap();
//! assert_eq!(space, Colorspace::Rgb);
//!
//! let renamed = rename_to_canonical(&fields, space);
//! assert_eq!(renamed, ["name", "channel[0]", "channel[1]", "channel[2]", "t"]);
//!
//! let map = FieldMap::new(&renamed).unwrap();
//! assert_eq!(map.channels(), [1, 2, 3]);
//! ```

use colorcalc_core::Colorspace;
use tracing::trace;

use crate::{ColorError, ColorResult};

/// True iff every name in `required` appears in `fields`.
pub fn fields_have_required<S: AsRef<str>>(fields: &[S], required: &[&str]) -> bool {
    required
        .iter()
        .all(|name| fields.iter().any(|f| f.as_ref() == *name))
}

/// Picks the single candidate whose channel names all appear in `fields`.
///
/// # Errors
///
/// - [`ColorError::NoColorspaceMatch`] when no candidate matches
/// - [`ColorError::MultipleColorspaceMatches`] when more than one does
pub fn infer_colorspace<S: AsRef<str>>(
    fields: &[S],
    candidates: &[Colorspace],
) -> ColorResult<Colorspace> {
    let matches: Vec<Colorspace> = candidates
        .iter()
        .copied()
        .filter(|c| fields_have_required(fields, c.field_names()))
        .collect();
    trace!(?candidates, ?matches, "colorspace inference");

    match matches.as_slice() {
        [only] => Ok(*only),
        [] => Err(ColorError::NoColorspaceMatch {
            candidates: join(candidates),
        }),
        _ => Err(ColorError::MultipleColorspaceMatches {
            matches: join(&matches),
        }),
    }
}

fn join(spaces: &[Colorspace]) -> String {
    spaces.iter().map(Colorspace::name).collect::<Vec<_>>().join(",")
}

/// Renames the channel names of `space` to the neutral slot names.
///
/// Other names keep their value and position. Renaming for
/// [`Colorspace::None`] is the identity.
pub fn rename_to_canonical<S: AsRef<str>>(fields: &[S], space: Colorspace) -> Vec<String> {
    let names = space.field_names();
    let neutral = Colorspace::None.field_names();
    fields
        .iter()
        .map(|f| {
            let f = f.as_ref();
            match names.iter().position(|n| *n == f) {
                Some(i) => neutral[i].to_string(),
                None => f.to_string(),
            }
        })
        .collect()
}

/// Prepares a declared field list for a colorspace given on the command line.
///
/// The list must carry either the channel names of `space` or the neutral
/// slot names, not both. Colorspace channel names are renamed to the
/// neutral slots.
///
/// # Errors
///
/// Ambiguity errors from [`infer_colorspace`] over `[space, none]`.
pub fn setup_fields_for_colorspace<S: AsRef<str>>(
    fields: &[S],
    space: Colorspace,
) -> ColorResult<Vec<String>> {
    let matched = infer_colorspace(fields, &[space, Colorspace::None])?;
    Ok(rename_to_canonical(fields, matched))
}

/// Positions of the three neutral channel slots within a record.
///
/// Built once per run from a renamed field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    channels: [usize; 3],
    width: usize,
}

impl FieldMap {
    /// Builds the map from a field list that carries the neutral slot names.
    ///
    /// # Errors
    ///
    /// [`ColorError::MissingChannel`] or [`ColorError::DuplicateChannel`]
    /// when a slot is absent or repeated.
    pub fn new<S: AsRef<str>>(fields: &[S]) -> ColorResult<Self> {
        let mut channels = [0usize; 3];
        for (slot, name) in Colorspace::None.field_names().iter().enumerate() {
            let mut positions = fields
                .iter()
                .enumerate()
                .filter(|(_, f)| f.as_ref() == *name)
                .map(|(i, _)| i);
            channels[slot] = positions
                .next()
                .ok_or_else(|| ColorError::MissingChannel(name.to_string()))?;
            if positions.next().is_some() {
                return Err(ColorError::DuplicateChannel(name.to_string()));
            }
        }
        Ok(Self {
            channels,
            width: fields.len(),
        })
    }

    /// Record positions of `channel[0..2]`.
    #[inline]
    pub fn channels(&self) -> [usize; 3] {
        self.channels
    }

    /// Number of declared fields.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
}

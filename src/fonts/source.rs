// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font sources and resources

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Weight of a regular face (CSS / OpenType `usWeightClass`)
pub const WEIGHT_REGULAR: u16 = 400;
/// Weight of a bold face (CSS / OpenType `usWeightClass`)
pub const WEIGHT_BOLD: u16 = 700;

fn regular() -> u16 {
    WEIGHT_REGULAR
}

/// A single candidate from which a font face may be loaded
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FontSource {
    /// A font file, with face index within a collection (usually 0)
    Path {
        path: PathBuf,
        #[cfg_attr(feature = "serde", serde(default))]
        index: u32,
    },
    /// An installed font family, matched by name
    Family {
        name: String,
        #[cfg_attr(feature = "serde", serde(default = "regular"))]
        weight: u16,
    },
    /// The system's default sans-serif family
    SansSerif {
        #[cfg_attr(feature = "serde", serde(default = "regular"))]
        weight: u16,
    },
}

impl FontSource {
    /// Construct from a file path (face index 0)
    pub fn path(path: impl Into<PathBuf>) -> Self {
        FontSource::Path {
            path: path.into(),
            index: 0,
        }
    }

    /// Construct from a family name and weight
    pub fn family(name: impl ToString, weight: u16) -> Self {
        FontSource::Family {
            name: name.to_string(),
            weight,
        }
    }
}

impl From<PathBuf> for FontSource {
    fn from(path: PathBuf) -> Self {
        FontSource::path(path)
    }
}

impl From<&str> for FontSource {
    fn from(path: &str) -> Self {
        FontSource::path(path)
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Path { path, index: 0 } => write!(f, "{}", path.display()),
            FontSource::Path { path, index } => write!(f, "{}#{index}", path.display()),
            FontSource::Family { name, weight } => write!(f, "family \"{name}\" ({weight})"),
            FontSource::SansSerif { weight } => write!(f, "sans-serif ({weight})"),
        }
    }
}

/// An ordered list of font candidates for one logical font role
///
/// Resolution picks the first candidate which loads successfully. An empty
/// resource never resolves (the caller then uses the built-in font).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FontResource {
    candidates: Vec<FontSource>,
}

impl FontResource {
    /// Construct an empty resource
    #[inline]
    pub fn new() -> Self {
        FontResource::default()
    }

    /// Construct from a list of candidates
    pub fn from_candidates(candidates: impl IntoIterator<Item: Into<FontSource>>) -> Self {
        FontResource {
            candidates: candidates.into_iter().map(|c| c.into()).collect(),
        }
    }

    /// Append a candidate (lowest priority)
    pub fn push(&mut self, source: impl Into<FontSource>) {
        self.candidates.push(source.into());
    }

    /// Builder-style variant of [`Self::push`]
    #[must_use]
    pub fn with(mut self, source: impl Into<FontSource>) -> Self {
        self.push(source);
        self
    }

    /// Iterate over candidates in priority order
    pub fn candidates(&self) -> impl Iterator<Item = &FontSource> {
        self.candidates.iter()
    }

    /// Number of candidates
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// True if there are no candidates
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// The logical font role of a glyph
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FontRole {
    #[default]
    Regular,
    Bold,
}

/// Font resources for each [`FontRole`]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FontSet {
    pub regular: FontResource,
    pub bold: FontResource,
}

impl FontSet {
    /// Get the resource for a role
    pub fn get(&self, role: FontRole) -> &FontResource {
        match role {
            FontRole::Regular => &self.regular,
            FontRole::Bold => &self.bold,
        }
    }
}

impl Default for FontSet {
    /// Arial by path (Windows location first, then the working directory),
    /// then common installed sans-serif families
    fn default() -> Self {
        fn chain(paths: [&str; 2], weight: u16) -> FontResource {
            FontResource::from_candidates(paths)
                .with(FontSource::family("Arial", weight))
                .with(FontSource::family("Liberation Sans", weight))
                .with(FontSource::family("DejaVu Sans", weight))
                .with(FontSource::SansSerif { weight })
        }

        FontSet {
            regular: chain(["C:/Windows/Fonts/arial.ttf", "arial.ttf"], WEIGHT_REGULAR),
            bold: chain(["C:/Windows/Fonts/arialbd.ttf", "arialbd.ttf"], WEIGHT_BOLD),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resource_order() {
        let res = FontResource::from_candidates(["a.ttf", "b.ttf"]).with(FontSource::family("X", 700));
        let list: Vec<_> = res.candidates().map(|s| s.to_string()).collect();
        assert_eq!(list, ["a.ttf", "b.ttf", "family \"X\" (700)"]);
    }

    #[test]
    fn default_set() {
        let set = FontSet::default();
        assert_eq!(
            set.get(FontRole::Bold).candidates().next(),
            Some(&FontSource::path("C:/Windows/Fonts/arialbd.ttf"))
        );
        assert_eq!(set.regular.len(), set.bold.len());
    }
}

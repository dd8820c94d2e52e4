// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Font library

use super::{FaceStore, Font, FontResource, FontSource, ScaledFace, MAX_DPEM};
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, RwLock};
use thiserror::Error;

/// Font loading errors
#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to read font file")]
    Io(#[from] std::io::Error),
    #[error("font parse error")]
    TtfParser(#[from] ttf_parser::FaceParsingError),
    #[error("font load error")]
    AbGlyph(#[from] ab_glyph::InvalidFont),
    #[error("no installed font matches {0}")]
    NoMatch(String),
}

// `FontError` is not `Clone`, so cached results share it through an `Arc`.
type Loaded = Result<Arc<FaceStore>, Arc<FontError>>;

/// Library of loaded fonts
///
/// This is the type of the global singleton accessible via the [`library()`]
/// function, although independent instances may also be constructed.
/// Thread-safety is handled via internal locks.
///
/// Each [`FontSource`] is loaded at most once; failures are remembered too,
/// so a missing file is only probed once however many sizes are tried.
#[derive(Default)]
pub struct FontLibrary {
    faces: RwLock<HashMap<FontSource, Loaded>>,
    // Enumerating system fonts is slow, so we only do it on first use.
    db: Mutex<Option<Database>>,
}

impl FontLibrary {
    /// Construct an empty library
    pub fn new() -> Self {
        FontLibrary::default()
    }

    /// Load a font face
    ///
    /// The result (success or failure) is cached.
    pub fn load(&self, source: &FontSource) -> Result<Arc<FaceStore>, Arc<FontError>> {
        if let Some(result) = self.faces.read().unwrap().get(source) {
            return result.clone();
        }

        let result = self.load_uncached(source).map(Arc::new).map_err(Arc::new);
        match &result {
            Ok(store) => log::debug!(
                "loaded {source}: {}",
                store.family().unwrap_or("(unnamed family)")
            ),
            Err(err) => log::debug!("failed to load {source}: {err}"),
        }

        self.faces
            .write()
            .unwrap()
            .entry(source.clone())
            .or_insert(result)
            .clone()
    }

    fn load_uncached(&self, source: &FontSource) -> Result<FaceStore, FontError> {
        match source {
            FontSource::Path { path, index } => {
                let data = std::fs::read(path)?;
                FaceStore::parse(data, *index)
            }
            FontSource::Family { name, weight } => {
                self.load_system(Family::Name(name), *weight, || source.to_string())
            }
            FontSource::SansSerif { weight } => {
                self.load_system(Family::SansSerif, *weight, || source.to_string())
            }
        }
    }

    fn load_system(
        &self,
        family: Family<'_>,
        weight: u16,
        describe: impl Fn() -> String,
    ) -> Result<FaceStore, FontError> {
        let mut guard = self.db.lock().unwrap();
        let db = guard.get_or_insert_with(|| {
            let mut db = Database::new();
            db.load_system_fonts();
            log::info!("Found {} system fonts", db.len());
            db
        });

        let query = Query {
            families: &[family],
            weight: Weight(weight),
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = db.query(&query).ok_or_else(|| FontError::NoMatch(describe()))?;
        let (data, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| FontError::NoMatch(describe()))?;
        drop(guard);

        FaceStore::parse(data, index)
    }

    /// Resolve a font resource at a given size
    ///
    /// Candidates are tried in order; the first which loads is used. Returns
    /// `None` if no candidate loads or if `size` is zero or above
    /// [`MAX_DPEM`].
    pub fn resolve(&self, resource: &FontResource, size: u32) -> Option<Font> {
        if size == 0 || size > MAX_DPEM {
            return None;
        }

        resource
            .candidates()
            .find_map(|source| self.load(source).ok())
            .map(|store| Font::Face(ScaledFace::new(store, size)))
    }

    /// Resolve a font resource at a given size, falling back to the built-in font
    pub fn resolve_or_default(&self, resource: &FontResource, size: u32) -> Font {
        self.resolve(resource, size).unwrap_or_else(|| {
            log::warn!("no font of {} candidates could be loaded; using built-in font", resource.len());
            Font::default()
        })
    }
}

static LIBRARY: LazyLock<FontLibrary> = LazyLock::new(FontLibrary::new);

/// Access the [`FontLibrary`] singleton
pub fn library() -> &'static FontLibrary {
    &LIBRARY
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_file_is_cached() {
        let lib = FontLibrary::new();
        let source = FontSource::path("/nonexistent/font.ttf");
        let err = lib.load(&source).unwrap_err();
        assert!(matches!(*err, FontError::Io(_)));

        let again = lib.load(&source).unwrap_err();
        assert!(Arc::ptr_eq(&err, &again));
    }

    #[test]
    fn invalid_file() {
        let path = std::env::temp_dir().join("glyph-icons-not-a-font.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();
        let lib = FontLibrary::new();
        let err = lib.load(&FontSource::path(&path)).unwrap_err();
        assert!(matches!(*err, FontError::TtfParser(_)));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn resolve_size_zero() {
        let lib = FontLibrary::new();
        let res = FontResource::from_candidates(["/nonexistent/font.ttf"]);
        assert!(lib.resolve(&res, 0).is_none());
        assert!(lib.resolve(&res, 12).is_none());
        assert!(lib.resolve_or_default(&res, 12).is_builtin());
    }

    #[test]
    fn unknown_family() {
        let lib = FontLibrary::new();
        let source = FontSource::family("No Such Family 7f3a", 400);
        let err = lib.load(&source).unwrap_err();
        assert!(matches!(*err, FontError::NoMatch(_)), "{err}");
    }

    #[test]
    fn empty_resource() {
        let lib = FontLibrary::new();
        assert!(lib.resolve(&FontResource::new(), 16).is_none());
    }
}

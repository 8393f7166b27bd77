//! Presets and audio source resolution.
//!
//! A preset is one bundle of nine tracks. Only its id matters to the mixer;
//! names, colors and the rest belong to the presentation layer.

use crate::constants::{PRESET_COUNT, TRACK_COUNT};
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PresetId(u8);

impl PresetId {
    pub const FIRST: Self = Self(1);

    /// Valid ids are `1..=PRESET_COUNT`.
    pub fn new(id: u8) -> Option<Self> {
        (1..=PRESET_COUNT).contains(&id).then_some(Self(id))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=PRESET_COUNT).map(Self)
    }
}

impl Default for PresetId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for PresetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based track id for the track at ordinal `index`.
#[inline]
pub fn track_id(index: usize) -> u8 {
    debug_assert!(index < TRACK_COUNT);
    index as u8 + 1
}

/// Where a track's audio lives. `None` (or an empty locator) means "skip".
pub trait SourceResolver {
    fn audio_source(&self, preset: PresetId, track_id: u8) -> Option<String>;
}

/// Sources served from a directory tree: `{base}/{preset}/track-{n}.mp3`.
#[derive(Clone, Debug)]
pub struct LocalLayout {
    base: String,
}

impl LocalLayout {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl SourceResolver for LocalLayout {
    fn audio_source(&self, preset: PresetId, track_id: u8) -> Option<String> {
        Some(format!("{}/{}/track-{}.mp3", self.base, preset, track_id))
    }
}

/// Explicit per-track locators, e.g. externally hosted files.
#[derive(Clone, Debug, Default)]
pub struct SourceTable {
    entries: FnvHashMap<(PresetId, u8), String>,
}

impl SourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, preset: PresetId, track_id: u8, locator: impl Into<String>) {
        self.entries.insert((preset, track_id), locator.into());
    }

    pub fn with(mut self, preset: PresetId, track_id: u8, locator: impl Into<String>) -> Self {
        self.insert(preset, track_id, locator);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SourceResolver for SourceTable {
    fn audio_source(&self, preset: PresetId, track_id: u8) -> Option<String> {
        self.entries.get(&(preset, track_id)).cloned()
    }
}

use crate::{OctreeError, OctreeResult, MAX_PATH_LEVEL};

/// Construction parameters of an `Octree`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OctreeConfig {
    /// Samples are never placed deeper than this level, even when their scale is finer than the node size there.
    pub max_level: usize,
}

impl OctreeConfig {
    pub const DEFAULT_MAX_LEVEL: usize = 20;

    pub fn new(max_level: usize) -> Self {
        Self { max_level }
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    /// Fails if `max_level` could not be addressed by a `NodeCursor`.
    pub fn validate(&self) -> OctreeResult<()> {
        if self.max_level > MAX_PATH_LEVEL {
            return Err(OctreeError::MaxLevelTooDeep {
                requested: self.max_level,
                max: MAX_PATH_LEVEL,
            });
        }

        Ok(())
    }
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_LEVEL)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

//! World Rendering Phases
//!
//! The closed enumeration of draw-loop stages the host engine walks every
//! frame. Exactly one phase is current at any instant; hooks set a phase on
//! entry and restore the prior one on exit (see
//! [`RenderSession`](super::session::RenderSession)).

/// A named stage of the host's fixed draw loop.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum WorldRenderingPhase {
    #[default]
    None,
    Sky,
    Sunset,
    CustomSky,
    Sun,
    Moon,
    Stars,
    Void,
    TerrainSolid,
    TerrainCutoutMipped,
    TerrainCutout,
    Entities,
    BlockEntities,
    Destroy,
    Outline,
    Debug,
    HandSolid,
    Terrain,
    TerrainTranslucent,
    Tripwire,
    Particles,
    Clouds,
    RainSnow,
    WorldBorder,
    HandTranslucent,
}

/// Terrain batch kinds as the host submits them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TerrainLayer {
    Solid,
    CutoutMipped,
    Cutout,
    Translucent,
    Tripwire,
}

impl WorldRenderingPhase {
    /// Maps a terrain batch kind to its rendering phase.
    #[must_use]
    pub fn from_terrain_layer(layer: TerrainLayer) -> Self {
        match layer {
            TerrainLayer::Solid => Self::TerrainSolid,
            TerrainLayer::CutoutMipped => Self::TerrainCutoutMipped,
            TerrainLayer::Cutout => Self::TerrainCutout,
            TerrainLayer::Translucent => Self::TerrainTranslucent,
            TerrainLayer::Tripwire => Self::Tripwire,
        }
    }

    /// Whether this phase draws world terrain geometry.
    #[must_use]
    pub fn is_terrain(self) -> bool {
        matches!(
            self,
            Self::Terrain
                | Self::TerrainSolid
                | Self::TerrainCutoutMipped
                | Self::TerrainCutout
                | Self::TerrainTranslucent
                | Self::Tripwire
        )
    }
}

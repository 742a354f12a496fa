//! Collision layers
//!
//! Layers are resolved once at startup into bit masks instead of being looked
//! up by name every query.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// A named collision layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Floors and ceilings the ground/ceiling sensors look for
    Ground,
    /// Surfaces the flash camera can mark
    Walls,
    /// Objects the player can interact with
    Interactable,
    /// Hostile bodies that cause knockback on contact
    Enemy,
    /// The player body itself
    Player,
}

impl Layer {
    pub const ALL: [Layer; 5] = [
        Layer::Ground,
        Layer::Walls,
        Layer::Interactable,
        Layer::Enemy,
        Layer::Player,
    ];

    /// Bit assigned to this layer
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }

    /// Mask containing only this layer
    pub const fn mask(self) -> LayerMask {
        LayerMask(self.bit())
    }
}

/// A set of layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Whether the mask contains the given layer
    pub fn contains(self, layer: Layer) -> bool {
        self.0 & layer.bit() != 0
    }

    /// Whether the two masks share any layer
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl From<Layer> for LayerMask {
    fn from(layer: Layer) -> Self {
        layer.mask()
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        LayerMask(self.0 | rhs.0)
    }
}

impl BitOr<Layer> for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: Layer) -> Self::Output {
        LayerMask(self.0 | rhs.bit())
    }
}

impl BitOr for Layer {
    type Output = LayerMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        LayerMask(self.bit() | rhs.bit())
    }
}

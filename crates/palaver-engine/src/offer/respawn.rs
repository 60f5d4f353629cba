//! Respawn-point binding.

use super::Offer;
use crate::player::{PlayerState, RespawnPoint};

/// Binds the player's respawn to an anchor configured on the NPC.
///
/// Available only while an anchor is configured — an innkeeper with no bed
/// assigned offers nothing, and the choice disappears from the menu. The
/// confirmation flow the original selection opens is presenter-side; the
/// engine records the binding itself.
#[derive(Debug, Clone)]
pub struct RespawnOffer {
    label: String,
    point: Option<RespawnPoint>,
}

impl RespawnOffer {
    /// Create an offer with the given label and no anchor configured.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            point: None,
        }
    }

    /// Configure the anchor this offer binds to.
    pub fn with_point(mut self, point: RespawnPoint) -> Self {
        self.point = Some(point);
        self
    }

    /// The configured anchor, if any.
    pub fn point(&self) -> Option<&RespawnPoint> {
        self.point.as_ref()
    }
}

impl Offer for RespawnOffer {
    fn is_available(&self, _player: &PlayerState) -> bool {
        self.point.is_some()
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn on_select(&self, player: &mut PlayerState) {
        if let Some(point) = &self.point {
            player.respawn = Some(point.clone());
        }
    }
}

//! NPC instances and their offer registries.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use palaver_core::OfferTag;

use crate::offer::Offer;

/// Unique identifier for an NPC instance.
///
/// Identifies one spawned NPC, not an NPC type: two innkeepers spawned from
/// the same template get distinct ids, and closing the conversations of one
/// leaves the other's untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NpcId(pub Uuid);

impl NpcId {
    /// Generate a new random NPC ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NpcId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Maps the offer tags carried by dialogue choices to the offers attached to
/// one NPC instance.
///
/// Exactly one offer is consulted per offer-flagged choice: the one under
/// the choice's tag. A tag with no registration is an authoring defect the
/// session surfaces as an error.
#[derive(Default)]
pub struct OfferRegistry {
    offers: HashMap<OfferTag, Box<dyn Offer>>,
}

impl OfferRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an offer under the given tag, replacing any previous one.
    pub fn register(&mut self, tag: impl Into<OfferTag>, offer: impl Offer + 'static) {
        self.offers.insert(tag.into(), Box::new(offer));
    }

    /// Resolve a tag to the attached offer.
    pub fn resolve(&self, tag: &OfferTag) -> Option<&dyn Offer> {
        self.offers.get(tag).map(|offer| offer.as_ref())
    }

    /// Number of attached offers.
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Whether no offers are attached.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}

/// An NPC instance a player can talk to.
///
/// Shared by reference with every session that targets it. Offers are
/// attached at spawn time and read-only afterwards; anything that changes
/// mid-conversation belongs in the offer's own availability check.
pub struct Npc {
    /// Unique instance ID.
    pub id: NpcId,
    /// Display name.
    pub name: String,
    offers: OfferRegistry,
}

impl Npc {
    /// Create an NPC with no offers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NpcId::new(),
            name: name.into(),
            offers: OfferRegistry::new(),
        }
    }

    /// Attach an offer under the given tag.
    pub fn with_offer(mut self, tag: impl Into<OfferTag>, offer: impl Offer + 'static) -> Self {
        self.offers.register(tag, offer);
        self
    }

    /// Resolve an offer tag against this NPC's registry.
    pub fn offer(&self, tag: &OfferTag) -> Option<&dyn Offer> {
        self.offers.resolve(tag)
    }

    /// The registry of attached offers.
    pub fn offers(&self) -> &OfferRegistry {
        &self.offers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::{RespawnOffer, ShopOffer};
    use crate::player::{PlayerState, RespawnPoint};

    #[test]
    fn npc_id_display_shows_short_form() {
        let id = NpcId(Uuid::parse_str("a3f2b1c8-1234-5678-9abc-def012345678").unwrap());
        assert_eq!(id.to_string(), "a3f2b1c8");
    }

    #[test]
    fn register_and_resolve() {
        let mut registry = OfferRegistry::new();
        assert!(registry.is_empty());

        registry.register("shop", ShopOffer::new("Let's trade").with_stock(["pewter mug"]));
        assert_eq!(registry.len(), 1);

        let offer = registry.resolve(&OfferTag::from("shop")).unwrap();
        assert_eq!(offer.label(), "Let's trade");

        assert!(registry.resolve(&OfferTag::from("respawn")).is_none());
    }

    #[test]
    fn register_replaces_previous_offer() {
        let mut registry = OfferRegistry::new();
        registry.register("shop", ShopOffer::new("Let's trade"));
        registry.register("shop", ShopOffer::new("Care to browse?"));

        assert_eq!(registry.len(), 1);
        let offer = registry.resolve(&OfferTag::from("shop")).unwrap();
        assert_eq!(offer.label(), "Care to browse?");
    }

    #[test]
    fn npc_with_several_offers() {
        let npc = Npc::new("Maren the Innkeeper")
            .with_offer(
                "respawn",
                RespawnOffer::new("Set my respawn here")
                    .with_point(RespawnPoint::new("the Hearth", [0.0, 0.0, 0.0])),
            )
            .with_offer("shop", ShopOffer::new("Let's trade").with_stock(["ale"]));

        assert_eq!(npc.offers().len(), 2);

        let player = PlayerState::new("Kael");
        let respawn = npc.offer(&OfferTag::from("respawn")).unwrap();
        assert!(respawn.is_available(&player));
    }

    #[test]
    fn spawned_instances_get_distinct_ids() {
        let a = Npc::new("Innkeeper");
        let b = Npc::new("Innkeeper");
        assert_ne!(a.id, b.id);
    }
}

//! Shop browsing.

use super::Offer;
use crate::player::PlayerState;

/// Opens the NPC's shop for browsing.
///
/// Available while the shop has stock. Selection flags the player as
/// browsing; the surrounding UI watches that flag to swap the dialogue panel
/// for the shop panel.
#[derive(Debug, Clone)]
pub struct ShopOffer {
    label: String,
    stock: Vec<String>,
}

impl ShopOffer {
    /// Flag set on the player while a shop panel should be open.
    pub const BROWSING_FLAG: &'static str = "browsing_shop";

    /// Create an offer with the given label and no stock.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            stock: Vec::new(),
        }
    }

    /// Add items for sale.
    pub fn with_stock(mut self, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.stock.extend(items.into_iter().map(Into::into));
        self
    }

    /// Items currently for sale.
    pub fn stock(&self) -> &[String] {
        &self.stock
    }
}

impl Offer for ShopOffer {
    fn is_available(&self, _player: &PlayerState) -> bool {
        !self.stock.is_empty()
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn on_select(&self, player: &mut PlayerState) {
        player.set_flag(Self::BROWSING_FLAG, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_only_with_stock() {
        let player = PlayerState::new("Kael");

        let offer = ShopOffer::new("Let's trade");
        assert!(!offer.is_available(&player));

        let offer = offer.with_stock(["pewter mug", "travel rations"]);
        assert!(offer.is_available(&player));
        assert_eq!(offer.stock().len(), 2);
    }

    #[test]
    fn select_flags_browsing() {
        let mut player = PlayerState::new("Kael");
        let offer = ShopOffer::new("Let's trade").with_stock(["pewter mug"]);

        offer.on_select(&mut player);
        assert!(player.has_flag(ShopOffer::BROWSING_FLAG));
    }
}

//! Image readiness rendezvous
//!
//! The first tick is gated on the required images reporting ready - a
//! counted rendezvous, not a race. A deadline keeps a failed load from
//! hanging the session forever: once it expires the game proceeds and the
//! renderer falls back to flat shapes for anything still missing.

use crate::consts::REQUIRED_ASSETS;

/// The images the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetId {
    Player,
    Egg,
    Background,
}

impl AssetId {
    pub const ALL: [AssetId; REQUIRED_ASSETS] = [AssetId::Player, AssetId::Egg, AssetId::Background];

    /// Stable slot for readiness tracking and image lookup
    pub fn index(&self) -> usize {
        match self {
            AssetId::Player => 0,
            AssetId::Egg => 1,
            AssetId::Background => 2,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            AssetId::Player => "player.png",
            AssetId::Egg => "egg.png",
            AssetId::Background => "background.png",
        }
    }
}

/// Readiness state for the required image set
#[derive(Debug, Clone, Default)]
pub struct AssetSet {
    ready: [bool; REQUIRED_ASSETS],
    deadline_expired: bool,
}

impl AssetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&mut self, id: AssetId) {
        if !self.ready[id.index()] {
            self.ready[id.index()] = true;
            log::debug!("{} ready ({}/{})", id.file_name(), self.ready_count(), REQUIRED_ASSETS);
        }
    }

    pub fn is_ready(&self, id: AssetId) -> bool {
        self.ready[id.index()]
    }

    pub fn ready_count(&self) -> usize {
        self.ready.iter().filter(|r| **r).count()
    }

    pub fn all_ready(&self) -> bool {
        self.ready_count() == REQUIRED_ASSETS
    }

    /// Stop waiting for stragglers. Anything still missing stays missing;
    /// the renderer draws placeholders for it.
    pub fn expire_deadline(&mut self) {
        if !self.all_ready() {
            log::error!(
                "asset deadline expired with {}/{} ready, continuing with placeholders",
                self.ready_count(),
                REQUIRED_ASSETS
            );
        }
        self.deadline_expired = true;
    }

    /// The session may begin: everything loaded, or we stopped waiting.
    pub fn may_start(&self) -> bool {
        self.all_ready() || self.deadline_expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendezvous_counts_each_asset_once() {
        let mut assets = AssetSet::new();
        assert!(!assets.may_start());

        assets.mark_ready(AssetId::Player);
        assets.mark_ready(AssetId::Player);
        assert_eq!(assets.ready_count(), 1);
        assert!(!assets.all_ready());

        assets.mark_ready(AssetId::Egg);
        assets.mark_ready(AssetId::Background);
        assert!(assets.all_ready());
        assert!(assets.may_start());
    }

    #[test]
    fn deadline_unblocks_a_partial_set() {
        let mut assets = AssetSet::new();
        assets.mark_ready(AssetId::Background);
        assert!(!assets.may_start());

        assets.expire_deadline();
        assert!(assets.may_start());
        assert!(!assets.is_ready(AssetId::Player));
    }
}

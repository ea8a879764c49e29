//! Pawn promotion resource for tracking pending promotions
//!
//! When a legal pawn move reaches the last rank without a piece choice, this
//! resource stores the move and blocks every other move application until the
//! player picks a piece or cancels.

use crate::game::types::{PieceColor, Square};

/// A promotion move waiting for its piece choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionRequest {
    pub from: Square,
    pub to: Square,
    pub color: PieceColor,
}

/// At most one pending promotion per session
#[derive(Default, Debug, Clone)]
pub struct PendingPromotion {
    request: Option<PromotionRequest>,
}

impl PendingPromotion {
    /// Record a promotion. Returns `false` if one is already pending.
    pub fn start(&mut self, from: Square, to: Square, color: PieceColor) -> bool {
        if self.request.is_some() {
            return false;
        }
        self.request = Some(PromotionRequest { from, to, color });
        true
    }

    /// Clear the pending promotion (after player selects or cancels)
    pub fn clear(&mut self) -> Option<PromotionRequest> {
        self.request.take()
    }

    pub fn request(&self) -> Option<PromotionRequest> {
        self.request
    }

    /// Check if a promotion is pending
    pub fn is_active(&self) -> bool {
        self.request.is_some()
    }
}

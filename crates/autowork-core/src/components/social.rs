//! Social components

use serde::{Deserialize, Serialize};

use autowork_logic::pawn::PawnId;

/// Partner-type relations (lover, fiancé, spouse) to other pawns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relations {
    pub partners: Vec<PawnId>,
}

impl Relations {
    pub fn add_partner(&mut self, other: PawnId) {
        if !self.partners.contains(&other) {
            self.partners.push(other);
        }
    }
}

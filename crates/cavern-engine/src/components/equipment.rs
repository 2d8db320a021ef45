//! Equipment-backed attack damage.
//!
//! Only the damage side of the inventory is modelled here. Acquiring,
//! pricing and trading swords belong to the shop layer.

use crate::core::constants::DEFAULT_ATTACK_DAMAGE;

/// Static description of a sword tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwordDef {
    pub id: u8,
    pub name: &'static str,
    pub damage: u32,
}

/// Sword tiers in ascending strength. Each tier doubles the last.
pub const SWORDS: [SwordDef; 6] = [
    SwordDef { id: 0, name: "Training Sword", damage: 1 },
    SwordDef { id: 1, name: "Wise Man's Sword", damage: 2 },
    SwordDef { id: 2, name: "Spirit Sword", damage: 4 },
    SwordDef { id: 3, name: "Knight's Sword", damage: 8 },
    SwordDef { id: 4, name: "Illumination Sword", damage: 16 },
    SwordDef { id: 5, name: "Fairy Flame Sword", damage: 32 },
];

pub fn sword(id: u8) -> Option<&'static SwordDef> {
    SWORDS.iter().find(|s| s.id == id)
}

/// What an actor is currently wielding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Equipment {
    /// Index into [`SWORDS`]; `None` when unarmed.
    pub sword: Option<u8>,
}

impl Equipment {
    pub fn with_sword(id: u8) -> Self {
        Self { sword: Some(id) }
    }

    /// Equip a sword if the id names a known tier. Returns whether it did.
    pub fn equip_sword(&mut self, id: u8) -> bool {
        match sword(id) {
            Some(def) => {
                log::debug!("equipped {}", def.name);
                self.sword = Some(id);
                true
            }
            None => false,
        }
    }

    /// Damage of one hit with the current loadout.
    pub fn attack_damage(&self) -> u32 {
        self.sword
            .and_then(sword)
            .map_or(DEFAULT_ATTACK_DAMAGE, |s| s.damage)
    }
}

//! Hit resolution: melee attacks into a single grid cell, and contact damage
//! from overlapping hostiles.
//!
//! Combat reads positions settled by the movement system for the current
//! tick and never touches velocity or grounded state. Health changes only
//! flow through [`Combatant::take_damage`].

use glam::Vec2;

use crate::core::constants::{CELL_SIZE, DEFAULT_ATTACK_DAMAGE, DEFAULT_CONTACT_DAMAGE};
use crate::core::physics::center_row;

/// Anything that can be struck.
pub trait Combatant {
    fn grid_x(&self) -> i32;
    fn logical_y(&self) -> f32;
    /// Inactive combatants are invisible to attacks and contact checks.
    fn is_active(&self) -> bool;
    fn take_damage(&mut self, amount: u32);
}

/// The protagonist side of combat.
pub trait CombatPlayer: Combatant {
    /// True when facing negative x.
    fn flip_x(&self) -> bool;
    /// Gates all contact damage.
    fn is_invulnerable(&self) -> bool;
    /// Damage of one attack hit, normally looked up from equipment.
    fn attack_damage(&self) -> u32 {
        DEFAULT_ATTACK_DAMAGE
    }
}

/// Which cell an attack reaches into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackKind {
    /// Adjacent cell in the facing direction, same row.
    #[default]
    Front,
    /// Cell directly below, same column.
    Down,
}

impl AttackKind {
    /// Down-stab only while airborne with down held.
    pub fn select(is_grounded: bool, holding_down: bool) -> Self {
        if !is_grounded && holding_down {
            AttackKind::Down
        } else {
            AttackKind::Front
        }
    }

    /// Target (column, row) for an attacker. `None` when the target cell
    /// would lie past the edge of the coordinate range.
    pub fn target_cell<P: CombatPlayer + ?Sized>(self, player: &P) -> Option<(i32, i32)> {
        let row = center_row(player.logical_y());
        match self {
            AttackKind::Front => {
                let dir = if player.flip_x() { -1 } else { 1 };
                Some((player.grid_x().checked_add(dir)?, row))
            }
            AttackKind::Down => Some((player.grid_x(), row.checked_add(1)?)),
        }
    }
}

/// One-cell collision box, `[x, x + CELL) × [y, y + CELL)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBox {
    pub min: Vec2,
}

impl CellBox {
    pub fn of<C: Combatant + ?Sized>(c: &C) -> Self {
        Self {
            min: Vec2::new(c.grid_x() as f32 * CELL_SIZE, c.logical_y()),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + Vec2::splat(CELL_SIZE)
    }

    /// Strict overlap: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &CellBox) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatSystem {
    /// Damage per overlapping hostile per contact check.
    pub contact_damage: u32,
}

impl CombatSystem {
    pub fn new() -> Self {
        Self {
            contact_damage: DEFAULT_CONTACT_DAMAGE,
        }
    }

    pub fn with_contact_damage(mut self, damage: u32) -> Self {
        self.contact_damage = damage;
        self
    }

    /// Strike every active candidate standing in the attack's target cell.
    /// All occupants of the cell are hit. Returns whether anything was hit.
    pub fn attack<'a, P, E, I>(&self, player: &P, candidates: I, kind: AttackKind) -> bool
    where
        P: CombatPlayer + ?Sized,
        E: Combatant + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut E>,
    {
        let Some((target_x, target_y)) = kind.target_cell(player) else {
            return false;
        };
        let damage = player.attack_damage();
        let mut hit = false;

        for candidate in candidates {
            if candidate.is_active()
                && candidate.grid_x() == target_x
                && center_row(candidate.logical_y()) == target_y
            {
                candidate.take_damage(damage);
                hit = true;
            }
        }

        if hit {
            log::debug!("{:?} attack hit ({}, {}) for {}", kind, target_x, target_y, damage);
        }
        hit
    }

    /// Damage the player once for every active candidate whose box overlaps
    /// theirs. An invulnerable player short-circuits before any candidate is
    /// examined. Returns the number of damage calls made.
    pub fn check_player_enemy_collision<'a, P, E, I>(&self, player: &mut P, candidates: I) -> u32
    where
        P: CombatPlayer + ?Sized,
        E: Combatant + ?Sized + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        if player.is_invulnerable() {
            return 0;
        }

        let player_box = CellBox::of(&*player);
        let mut hits = 0;
        for candidate in candidates {
            if !candidate.is_active() {
                continue;
            }
            if player_box.overlaps(&CellBox::of(candidate)) {
                player.take_damage(self.contact_damage);
                hits += 1;
            }
        }

        if hits > 0 {
            log::debug!("contact damage x{} ({} each)", hits, self.contact_damage);
        }
        hits
    }
}

impl Default for CombatSystem {
    fn default() -> Self {
        Self::new()
    }
}

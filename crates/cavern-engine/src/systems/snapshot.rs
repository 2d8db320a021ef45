use crate::bridge::snapshot::{SnapshotBuffer, SnapshotInstance};
use crate::components::actor::{Actor, ActorKind};

fn instance(actor: &Actor, alpha: f32) -> SnapshotInstance {
    let pos = actor.visual_position(alpha);
    SnapshotInstance {
        x: pos.x,
        y: pos.y,
        facing: if actor.flip_x { -1.0 } else { 1.0 },
        kind: match actor.kind {
            ActorKind::Player => SnapshotInstance::KIND_PLAYER,
            ActorKind::Hostile => SnapshotInstance::KIND_HOSTILE,
        },
        invulnerable: if actor.health.is_invulnerable() { 1.0 } else { 0.0 },
        attacking: if actor.is_attacking() { 1.0 } else { 0.0 },
        hp: actor.health.hp as f32,
        id: actor.id.0 as f32,
    }
}

/// Build the snapshot buffer from a set of actors.
/// Groups players first, then hostiles, and sets `hostile_start` at the
/// boundary. Inactive actors are skipped; anything past capacity is dropped.
pub fn build_snapshot<'a>(
    actors: impl Iterator<Item = &'a Actor>,
    alpha: f32,
    buffer: &mut SnapshotBuffer,
) {
    buffer.clear();
    buffer.alpha = alpha;

    let mut players: Vec<SnapshotInstance> = Vec::new();
    let mut hostiles: Vec<SnapshotInstance> = Vec::new();

    for actor in actors.filter(|a| a.active) {
        match actor.kind {
            ActorKind::Player => players.push(instance(actor, alpha)),
            ActorKind::Hostile => hostiles.push(instance(actor, alpha)),
        }
    }

    let mut dropped = 0;
    for inst in players {
        if !buffer.push(inst) {
            dropped += 1;
        }
    }
    buffer.hostile_start = buffer.instance_count();
    for inst in hostiles {
        if !buffer.push(inst) {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::debug!("snapshot full, dropped {} instances", dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::health::Health;
    use crate::core::physics::PhysicsBody;

    fn actors() -> Vec<Actor> {
        vec![
            Actor::new(EntityId(2), ActorKind::Hostile)
                .with_body(PhysicsBody::new(5, 16.0))
                .with_health(Health::new(3)),
            Actor::new(EntityId(1), ActorKind::Player)
                .with_body(PhysicsBody::new(1, 16.0))
                .facing_left(true),
            Actor::new(EntityId(3), ActorKind::Hostile).with_body(PhysicsBody::new(7, 16.0)),
        ]
    }

    #[test]
    fn players_come_first() {
        let mut actors = actors();
        actors[2].active = false;
        let mut buffer = SnapshotBuffer::with_capacity(8);
        build_snapshot(actors.iter(), 0.0, &mut buffer);

        assert_eq!(buffer.instance_count(), 2);
        assert_eq!(buffer.hostile_start, 1);
        let player = buffer.instances[0];
        assert_eq!(player.id, 1.0);
        assert_eq!(player.kind, SnapshotInstance::KIND_PLAYER);
        assert_eq!(player.facing, -1.0);
        assert_eq!(player.x, 8.0);

        let slime = buffer.instances[1];
        assert_eq!(slime.kind, SnapshotInstance::KIND_HOSTILE);
        assert_eq!(slime.hp, 3.0);
        assert_eq!(slime.x, 40.0);
    }

    #[test]
    fn positions_are_interpolated() {
        let mut actors = actors();
        actors[1].body.grid_x = 2;
        actors[1].body.logical_y = 20.0;
        let mut buffer = SnapshotBuffer::with_capacity(8);
        build_snapshot(actors.iter(), 0.25, &mut buffer);

        let player = buffer.instances[0];
        assert!((player.x - 10.0).abs() < 0.001);
        assert!((player.y - 17.0).abs() < 0.001);
        assert_eq!(buffer.alpha, 0.25);
    }

    #[test]
    fn overflow_is_dropped() {
        let actors = actors();
        let mut buffer = SnapshotBuffer::with_capacity(2);
        build_snapshot(actors.iter(), 0.0, &mut buffer);
        assert_eq!(buffer.instance_count(), 2);
        assert_eq!(buffer.instances[1].id, 2.0);
    }
}

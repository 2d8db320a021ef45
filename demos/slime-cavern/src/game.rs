use cavern_engine::*;

/// Built-in cavern. Two slimes patrol the floor, a ledge hangs mid-air.
pub const CAVERN_ROWS: [&str; 7] = [
    "################",
    "#..............#",
    "#..............#",
    "#.......##.....#",
    "#..............#",
    "#P....s.....s..#",
    "################",
];

pub const SLIME_HP: u32 = 3;
/// Sword the player starts with (Training Sword).
pub const STARTING_SWORD: u8 = 0;

/// Per-run bookkeeping owned by the game, not a global.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub slimes_defeated: u32,
    pub player_deaths: u32,
    pub hits_landed: u32,
    pub damage_taken: u32,
}

pub struct SlimeCavern {
    level: Level,
    config: GameConfig,
    player: EntityId,
    /// Attack requested this tick, resolved after movement.
    pending_attack: Option<AttackKind>,
    pub session: Session,
}

impl SlimeCavern {
    pub fn new() -> Result<Self, LevelError> {
        Self::with_level(&LevelDescriptor::from_rows("slime-cavern", &CAVERN_ROWS))
    }

    pub fn with_level(descriptor: &LevelDescriptor) -> Result<Self, LevelError> {
        Ok(Self {
            level: descriptor.build()?,
            config: GameConfig::default(),
            player: EntityId(0),
            pending_attack: None,
            session: Session::default(),
        })
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    fn apply_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(player) = ctx.scene.get_mut(self.player) else {
            return;
        };
        for event in input.iter() {
            match *event {
                InputEvent::Step { direction } => {
                    player.face(direction);
                    ctx.movement.move_horizontal(&mut player.body, direction, &ctx.map);
                }
                InputEvent::Jump => {
                    ctx.movement.jump(&mut player.body);
                }
                InputEvent::Attack { holding_down } => {
                    if player.begin_attack(self.config.attack_window_ms) {
                        self.pending_attack =
                            Some(AttackKind::select(player.body.is_grounded, holding_down));
                    }
                }
            }
        }
    }

    fn resolve_attack(&mut self, ctx: &mut EngineContext, kind: AttackKind) {
        let before: Vec<(EntityId, u32)> =
            ctx.scene.hostiles().map(|a| (a.id, a.health.hp)).collect();

        let Some((player, others)) = ctx.scene.split_mut(self.player) else {
            return;
        };
        let damage = player.attack_damage();
        if !ctx.combat.attack(&*player, others.filter(|a| a.is_hostile()), kind) {
            return;
        }

        for (id, hp_before) in before {
            let Some(slime) = ctx.scene.get(id) else {
                continue;
            };
            if slime.health.hp == hp_before {
                continue;
            }
            self.session.hits_landed += 1;
            let event = if slime.active {
                GameEvent::EnemyHit { id, damage, hp_left: slime.health.hp }
            } else {
                self.session.slimes_defeated += 1;
                GameEvent::EnemyDefeated {
                    id,
                    grid_x: slime.body.grid_x,
                    logical_y: slime.body.logical_y,
                }
            };
            ctx.emit_event(event);
        }
    }

    fn resolve_contact(&mut self, ctx: &mut EngineContext) {
        let Some((player, others)) = ctx.scene.split_mut(self.player) else {
            return;
        };
        let hp_before = player.health.hp;
        let hits = ctx
            .combat
            .check_player_enemy_collision(&mut *player, others.filter(|a| a.is_hostile()).map(|a| &*a));
        let taken = hp_before - player.health.hp;
        if hits == 0 || taken == 0 {
            return;
        }

        self.session.damage_taken += taken;
        let hp_left = player.health.hp;
        let dead = player.health.is_dead();
        if dead {
            self.session.player_deaths += 1;
            player.body = Level::spawn_body(self.level.player_spawn);
            player.health.restore();
            player.capture_state();
            log::info!("player defeated, respawning at {:?}", self.level.player_spawn);
        }

        ctx.emit_event(GameEvent::PlayerHurt { damage: taken, hp_left });
        if dead {
            ctx.emit_event(GameEvent::PlayerDefeated);
        }
    }
}

impl Game for SlimeCavern {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.map = self.level.map.clone();

        self.player = ctx.next_id();
        let health = Health::new(self.config.player_max_hp)
            .with_invulnerability(self.config.invulnerability_ms);
        ctx.scene.spawn(
            Actor::new(self.player, ActorKind::Player)
                .with_tag("player")
                .with_body(Level::spawn_body(self.level.player_spawn))
                .with_health(health)
                .with_equipment(Equipment::with_sword(STARTING_SWORD)),
        );

        for &cell in &self.level.slime_spawns {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Actor::new(id, ActorKind::Hostile)
                    .with_tag("slime")
                    .with_body(Level::spawn_body(cell))
                    .with_health(Health::new(SLIME_HP))
                    .with_patrol(Patrol::new(-1, self.config.patrol_interval_ms))
                    .facing_left(true),
            );
        }

        log::info!(
            "slime-cavern: {} slimes in '{}'",
            self.level.slime_spawns.len(),
            self.level.name
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.apply_input(ctx, input);
        ctx.step_patrols();
    }

    fn resolve_combat(&mut self, ctx: &mut EngineContext) {
        if let Some(kind) = self.pending_attack.take() {
            self.resolve_attack(ctx, kind);
        }
        self.resolve_contact(ctx);

        let removed = ctx.scene.remove_inactive();
        if !removed.is_empty() {
            log::debug!("cleared {:?}", removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> GameRunner<SlimeCavern> {
        let mut runner = GameRunner::new(SlimeCavern::new().unwrap());
        runner.init();
        runner
    }

    fn player(runner: &GameRunner<SlimeCavern>) -> &Actor {
        runner.context().scene.find_by_tag("player").unwrap()
    }

    #[test]
    fn init_spawns_player_and_slimes() {
        let runner = runner();
        let scene = &runner.context().scene;
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.hostiles().count(), 2);
        let p = player(&runner);
        assert_eq!(p.body.grid_x, 1);
        assert_eq!(p.body.logical_y, 40.0);
        assert_eq!(p.attack_damage(), 1);
    }

    #[test]
    fn player_settles_on_floor() {
        let mut runner = runner();
        for _ in 0..10 {
            runner.tick(1000.0 / 15.0);
        }
        let p = player(&runner);
        assert!(p.body.is_grounded);
        assert_eq!(p.body.logical_y, 40.0);
    }

    #[test]
    fn step_and_face() {
        let mut runner = runner();
        runner.push_input(InputEvent::Step { direction: 1 });
        runner.tick(70.0);
        let p = player(&runner);
        assert_eq!(p.body.grid_x, 2);
        assert!(!p.flip_x);

        runner.push_input(InputEvent::Step { direction: -1 });
        runner.tick(70.0);
        let p = player(&runner);
        assert_eq!(p.body.grid_x, 1);
        assert!(p.flip_x);
    }

    #[test]
    fn wall_blocks_step() {
        let mut runner = runner();
        runner.push_input(InputEvent::Step { direction: -1 });
        runner.tick(70.0);
        assert_eq!(player(&runner).body.grid_x, 1);
    }

    #[test]
    fn attack_window_limits_swings() {
        let mut runner = runner();
        runner.push_input(InputEvent::Attack { holding_down: false });
        runner.tick(70.0);
        assert!(player(&runner).is_attacking());

        // Second swing inside the window is refused.
        runner.push_input(InputEvent::Attack { holding_down: false });
        runner.tick(70.0);
        let remaining = player(&runner).attack_window.remaining_ms();
        assert!(remaining > 0.0 && remaining < 100.0, "window was restarted: {}", remaining);
    }

    #[test]
    fn front_attack_kills_adjacent_slime() {
        let level = LevelDescriptor::from_rows("duel", &["#....#", "#Ps..#", "######"]);
        let config = GameConfig { patrol_interval_ms: 100_000.0, ..Default::default() };
        let game = SlimeCavern::with_level(&level).unwrap().with_config(config);
        let mut runner = GameRunner::new(game);
        runner.init();

        let mut events = Vec::new();
        for _ in 0..SLIME_HP {
            runner.push_input(InputEvent::Attack { holding_down: false });
            for _ in 0..4 {
                runner.tick(70.0);
                events.extend_from_slice(runner.events());
            }
        }

        assert_eq!(runner.context().scene.hostiles().count(), 0);
        assert_eq!(runner.game().session.slimes_defeated, 1);
        assert_eq!(runner.game().session.hits_landed, SLIME_HP);
        let defeated = GameEvent::EnemyDefeated { id: EntityId(2), grid_x: 2, logical_y: 8.0 }.to_wire();
        assert!(events.contains(&defeated));
    }

    #[test]
    fn contact_hurts_then_invulnerability_protects() {
        let level = LevelDescriptor::from_rows("pinned", &["#....#", "#P...#", "######"]);
        let config = GameConfig { patrol_interval_ms: 100_000.0, ..Default::default() };
        let game = SlimeCavern::with_level(&level).unwrap().with_config(config);
        let mut runner = GameRunner::new(game);
        runner.init();

        // Drop a slime onto the player's cell.
        let id = EntityId(99);
        let mut slime = Actor::new(id, ActorKind::Hostile)
            .with_body(PhysicsBody::new(1, 8.0))
            .with_health(Health::new(SLIME_HP));
        slime.body.is_grounded = true;
        runner_scene(&mut runner).spawn(slime);

        runner.tick(70.0);
        assert_eq!(player(&runner).health.hp, 90);
        let hurt = GameEvent::PlayerHurt { damage: 10, hp_left: 90 }.to_wire();
        assert!(runner.events().contains(&hurt));

        // Still overlapping, but inside the invulnerability window.
        for _ in 0..5 {
            runner.tick(70.0);
        }
        assert_eq!(player(&runner).health.hp, 90);
        assert_eq!(runner.game().session.damage_taken, 10);
    }

    fn runner_scene(runner: &mut GameRunner<SlimeCavern>) -> &mut Scene {
        &mut runner.context_mut().scene
    }
}

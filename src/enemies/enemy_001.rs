//! Enemy001: ground walker that closes in on the player and shoots.
//!
//! States are driven imperatively. Every state's update reads the machine's
//! progress to gate its one-time setup and changes state itself; there is no
//! transition table.
//!
//! ```text
//! Idle -> Move -> Attack -> Idle
//!  any -> Damage -> Idle      (non-lethal hit)
//!  any -> Dead                (HP reaches 0, terminal)
//! ```

use bevy::prelude::*;
use serde::Deserialize;

use crate::character::{
    Blink, CharacterFrame, CharacterRig, HitStop, HitStopRole, Knockback, RendererSurface,
    StateMachine,
};
use crate::combat::{CombatHooks, ENEMY_HIT_STOP_SHAKE, ENEMY_HIT_STOP_TIME};

pub const DEAD_BLINK_INTERVAL: f32 = 0.04;
pub const DEAD_BLINK_TIME: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enemy001State {
    Idle,
    Move,
    Attack,
    Damage,
    Dead,
}

/// Knockback applied when this enemy is hit.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct KnockbackTuning {
    pub power: f32,
    pub damping: f32,
    pub threshold: f32,
    #[serde(default)]
    pub resistance: f32,
}

impl Default for KnockbackTuning {
    fn default() -> Self {
        Self {
            power: 3.0,
            damping: 15.0,
            threshold: 0.1,
            resistance: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Enemy001Tuning {
    /// Start attacking at or below this distance to the player
    pub attack_range: f32,
    /// Horizontal walk speed while approaching
    pub approach_speed: f32,
    /// Seconds an attack lasts
    pub attack_time: f32,
    /// Seconds after an attack before the next one may start
    pub attack_cooldown: f32,
    /// Seconds spent in Damage after a hit
    pub knockback_time: f32,
    /// Seconds between death and the start of the blink
    pub dead_action_time: f32,
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    /// Offset from the root to the body centre used for sensing and firing
    pub contact_offset: (f32, f32),
    pub knockback: KnockbackTuning,
}

impl Default for Enemy001Tuning {
    fn default() -> Self {
        Self {
            attack_range: 4.0,
            approach_speed: 2.0,
            attack_time: 2.0,
            attack_cooldown: 5.0,
            knockback_time: 0.2,
            dead_action_time: 1.0,
            bullet_speed: 5.0,
            bullet_lifetime: 3.0,
            contact_offset: (0.0, 0.0),
            knockback: KnockbackTuning::default(),
        }
    }
}

/// Side effects an update asks the caller to perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyCommand {
    Fire {
        origin: Vec2,
        direction: Vec2,
        speed: f32,
        lifetime: f32,
    },
    Despawn,
}

#[derive(Component, Debug, Clone)]
pub struct Enemy001 {
    tuning: Enemy001Tuning,
    machine: StateMachine<Enemy001State>,
    facing_right: bool,
    distance_to_player: f32,
    is_move: bool,
    is_attack: bool,
    is_dead: bool,
    attack_timer: f32,
    attack_cooldown_timer: f32,
    knockback_timer: f32,
    dead_action_timer: f32,
    dead_blink_timer: f32,
    dead_blink: Blink,
    has_dropped_items: bool,
    despawn_requested: bool,
}

impl Enemy001 {
    pub fn new(tuning: Enemy001Tuning) -> Self {
        Self {
            tuning,
            machine: StateMachine::new(Enemy001State::Idle),
            facing_right: false,
            distance_to_player: f32::INFINITY,
            is_move: false,
            is_attack: false,
            is_dead: false,
            attack_timer: 0.0,
            attack_cooldown_timer: 0.0,
            knockback_timer: 0.0,
            dead_action_timer: 0.0,
            dead_blink_timer: 0.0,
            dead_blink: Blink::new(DEAD_BLINK_INTERVAL),
            has_dropped_items: false,
            despawn_requested: false,
        }
    }

    pub fn tuning(&self) -> &Enemy001Tuning {
        &self.tuning
    }

    pub fn state(&self) -> Enemy001State {
        self.machine.current()
    }

    pub fn machine(&self) -> &StateMachine<Enemy001State> {
        &self.machine
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn distance_to_player(&self) -> f32 {
        self.distance_to_player
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Body centre used for sensing and as the muzzle.
    pub fn contact_center(&self, position: Vec2) -> Vec2 {
        position + Vec2::from(self.tuning.contact_offset)
    }

    /// Step one frame. `target` is the registered player's centre, if any.
    pub fn update(
        &mut self,
        frame: &mut CharacterFrame<'_>,
        target: Option<Vec2>,
    ) -> Option<EnemyCommand> {
        if !frame.step_reactions() {
            return None;
        }

        if !self.is_dead {
            self.sense(frame.position, target);
        }

        if self.attack_cooldown_timer > 0.0 {
            self.attack_cooldown_timer -= frame.delta;
        }

        let command = match self.machine.current() {
            Enemy001State::Idle => {
                self.update_idle();
                None
            }
            Enemy001State::Move => {
                self.update_move();
                None
            }
            Enemy001State::Attack => self.update_attack(frame.delta, frame.position, target),
            Enemy001State::Damage => {
                self.update_damage(frame.delta);
                None
            }
            Enemy001State::Dead => self.update_dead(frame.delta, &mut *frame.rig.renderer),
        };

        self.sync(&mut frame.rig);
        command
    }

    /// Horizontal velocity for the physics step; vertical velocity is left to
    /// gravity. `blocked_ahead` is true when a wall that stops this enemy
    /// kind is directly in front of it.
    pub fn fixed_velocity(&self, current: Vec2, blocked_ahead: bool) -> Vec2 {
        let vx = match self.machine.current() {
            Enemy001State::Move if !blocked_ahead => self.facing_sign() * self.tuning.approach_speed,
            _ => 0.0,
        };
        Vec2::new(vx, current.y)
    }

    pub fn facing_sign(&self) -> f32 {
        if self.facing_right {
            1.0
        } else {
            -1.0
        }
    }

    /// React to a non-lethal hit.
    pub fn enter_damage(&mut self) {
        if self.is_dead {
            return;
        }
        self.is_move = false;
        self.is_attack = false;
        self.knockback_timer = self.tuning.knockback_time;
        self.machine.change_state(Enemy001State::Damage);
    }

    /// Enter the death sequence. Returns true the one time items should drop.
    pub fn enter_dead(&mut self) -> bool {
        if self.is_dead {
            return false;
        }

        self.is_dead = true;
        self.is_move = false;
        self.is_attack = false;
        self.machine.change_state(Enemy001State::Dead);

        self.dead_action_timer = self.tuning.dead_action_time;
        self.dead_blink_timer = DEAD_BLINK_TIME;
        self.dead_blink = Blink::new(DEAD_BLINK_INTERVAL);

        if self.has_dropped_items {
            return false;
        }
        self.has_dropped_items = true;
        true
    }

    fn sense(&mut self, position: Vec2, target: Option<Vec2>) {
        let Some(target) = target else {
            self.distance_to_player = f32::INFINITY;
            return;
        };

        let center = self.contact_center(position);
        self.distance_to_player = center.distance(target);
        self.facing_right = target.x > center.x;
    }

    fn update_idle(&mut self) {
        self.machine.change_state(Enemy001State::Move);
    }

    fn update_move(&mut self) {
        if self.machine.progress() == 0 {
            self.is_move = true;
            self.machine.add_progress(1);
        }

        if self.distance_to_player <= self.tuning.attack_range && self.attack_cooldown_timer <= 0.0 {
            self.is_move = false;
            self.machine.change_state(Enemy001State::Attack);
        }
    }

    fn update_attack(
        &mut self,
        delta: f32,
        position: Vec2,
        target: Option<Vec2>,
    ) -> Option<EnemyCommand> {
        let mut command = None;

        if self.machine.progress() == 0 {
            self.is_attack = true;
            self.attack_timer = self.tuning.attack_time;
            self.machine.add_progress(1);

            if let Some(target) = target {
                let origin = self.contact_center(position);
                let direction = (target - origin)
                    .try_normalize()
                    .unwrap_or(Vec2::new(self.facing_sign(), 0.0));
                command = Some(EnemyCommand::Fire {
                    origin,
                    direction,
                    speed: self.tuning.bullet_speed,
                    lifetime: self.tuning.bullet_lifetime,
                });
            }
        }

        self.attack_timer -= delta;
        if self.attack_timer > 0.0 {
            return command;
        }

        self.is_attack = false;
        self.attack_cooldown_timer = self.tuning.attack_cooldown;
        self.machine.change_state(Enemy001State::Idle);
        command
    }

    fn update_damage(&mut self, delta: f32) {
        self.knockback_timer -= delta;
        if self.knockback_timer > 0.0 {
            return;
        }
        self.machine.change_state(Enemy001State::Idle);
    }

    fn update_dead(
        &mut self,
        delta: f32,
        renderer: &mut dyn RendererSurface,
    ) -> Option<EnemyCommand> {
        match self.machine.progress() {
            0 => {
                self.dead_action_timer -= delta;
                if self.dead_action_timer <= 0.0 {
                    self.machine.add_progress(1);
                }
                None
            }
            1 => {
                self.dead_blink_timer -= delta;
                if self.dead_blink_timer <= 0.0 {
                    self.machine.add_progress(1);
                } else {
                    self.dead_blink.tick(delta, renderer);
                }
                None
            }
            _ => {
                if self.despawn_requested {
                    return None;
                }
                self.despawn_requested = true;
                Some(EnemyCommand::Despawn)
            }
        }
    }

    fn sync(&self, rig: &mut CharacterRig<'_>) {
        rig.renderer.set_flip_x(self.facing_right);
        rig.animator.set_bool("isMove", self.is_move);
        rig.animator.set_bool("isAttack", self.is_attack);
        rig.animator.set_bool("isDead", self.is_dead);
    }
}

/// Hit reactions for an Enemy001: freeze-frame, knockback and the Damage
/// state on a hit, the death sequence on a kill.
pub struct Enemy001Hit<'a, 'r> {
    pub enemy: &'a mut Enemy001,
    pub hit_stop: &'a mut HitStop,
    pub knockback: &'a mut Knockback,
    pub rig: &'a mut CharacterRig<'r>,
    pub position: Vec2,
    /// Set when the kill should drop items.
    pub drop_items: bool,
}

impl CombatHooks for Enemy001Hit<'_, '_> {
    fn on_hurt(&mut self, hit_position: Vec2) {
        self.hit_stop.begin(
            ENEMY_HIT_STOP_TIME,
            ENEMY_HIT_STOP_SHAKE,
            HitStopRole::Victim,
            self.rig,
        );

        let tuning = self.enemy.tuning.knockback;
        self.knockback.begin(
            tuning.power,
            tuning.damping,
            tuning.threshold,
            hit_position,
            self.position,
        );

        self.enemy.enter_damage();
    }

    fn on_death(&mut self) {
        self.knockback.cancel();
        self.hit_stop.begin(
            ENEMY_HIT_STOP_TIME,
            ENEMY_HIT_STOP_SHAKE,
            HitStopRole::DeathBlow,
            self.rig,
        );
        self.drop_items = self.enemy.enter_dead();
    }
}

//! Player state machine: movement, hover, shooting and the hit window.
//!
//! Input is latched in `Update` and consumed by the fixed step, which also
//! derives the state from contact and velocity. The player never takes a
//! hit-stop; a hit only opens the invincibility window.

use bevy::prelude::*;

use super::components::PlayerConfig;
use crate::character::{
    AnimatorSurface, GroundType, PhysicsBody, RendererSurface, StateMachine,
};
use crate::combat::{CombatHooks, Invincibility};

/// Aim input below this horizontal size leaves facing to movement.
const AIM_FACING_DEADZONE: f32 = 0.1;
const MOVE_FACING_DEADZONE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Move,
    Airborne,
    Hover,
    Dead,
}

/// One frame of player input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// -1 (left) to 1 (right)
    pub move_x: f32,
    /// Jump pressed this frame
    pub jump: bool,
    /// Jump held
    pub hover: bool,
    pub aim: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    Fire {
        origin: Vec2,
        direction: Vec2,
        speed: f32,
        lifetime: f32,
    },
}

#[derive(Component, Debug, Clone)]
pub struct PlayerController {
    config: PlayerConfig,
    machine: StateMachine<PlayerState>,
    input: PlayerInput,
    jump_requested: bool,
    invincibility: Invincibility,
    fire_cooldown: f32,
    facing_right: bool,
    grounded: bool,
    ground: Option<GroundType>,
    can_control: bool,
    in_warp_range: bool,
    initial_position: Vec2,
    is_moving: bool,
    is_hover: bool,
    is_jump: bool,
    is_fall: bool,
    is_dead: bool,
}

impl PlayerController {
    pub fn new(config: PlayerConfig, initial_position: Vec2) -> Self {
        Self {
            config,
            machine: StateMachine::new(PlayerState::Idle),
            input: PlayerInput::default(),
            jump_requested: false,
            invincibility: Invincibility::default(),
            fire_cooldown: 0.0,
            facing_right: true,
            grounded: false,
            ground: None,
            can_control: true,
            in_warp_range: false,
            initial_position,
            is_moving: false,
            is_hover: false,
            is_jump: false,
            is_fall: false,
            is_dead: false,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.machine.current()
    }

    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_active()
    }

    pub fn can_control(&self) -> bool {
        self.can_control && !self.is_dead
    }

    pub fn set_can_control(&mut self, can_control: bool) {
        self.can_control = can_control;
        if !can_control {
            self.input = PlayerInput::default();
            self.jump_requested = false;
        }
    }

    pub fn in_warp_range(&self) -> bool {
        self.in_warp_range
    }

    pub fn set_in_warp_range(&mut self, in_range: bool) {
        self.in_warp_range = in_range;
    }

    pub fn initial_position(&self) -> Vec2 {
        self.initial_position
    }

    pub fn set_grounded(&mut self, grounded: bool, ground: Option<GroundType>) {
        self.grounded = grounded;
        self.ground = ground;
    }

    /// Latch this frame's input. Ignored without control.
    pub fn apply_input(&mut self, input: PlayerInput) {
        if !self.can_control() {
            return;
        }
        self.input = input;
        if input.jump {
            self.jump_requested = true;
        }
    }

    /// Per-frame update: facing, shooting, the invincibility blink and the
    /// animator parameters.
    pub fn update(
        &mut self,
        delta: f32,
        position: Vec2,
        renderer: &mut dyn RendererSurface,
        animator: &mut dyn AnimatorSurface,
    ) -> Option<PlayerCommand> {
        self.invincibility.tick(delta, renderer);
        self.fire_cooldown = (self.fire_cooldown - delta).max(0.0);

        let mut command = None;
        if self.can_control() {
            self.update_facing();
            command = self.try_fire(position);
        }

        renderer.set_flip_x(!self.facing_right);
        animator.set_bool("isMoving", self.is_moving);
        animator.set_bool("isHover", self.is_hover);
        animator.set_bool("isJump", self.is_jump);
        animator.set_bool("isFall", self.is_fall);
        animator.set_bool("isDead", self.is_dead);
        command
    }

    /// Physics step: apply the latched input to the body and derive the
    /// state from contact and velocity.
    pub fn fixed_update(&mut self, delta: f32, body: &mut dyn PhysicsBody) {
        if self.is_dead {
            let velocity = body.velocity();
            body.set_velocity(Vec2::new(0.0, velocity.y));
            self.set_flags(0.0, velocity.y, false);
            return;
        }

        if !self.can_control {
            body.set_velocity(Vec2::ZERO);
            self.set_flags(0.0, 0.0, false);
            self.derive_state();
            return;
        }

        let speed_scale = match (self.grounded, self.ground) {
            (true, Some(ground)) => ground.speed_multiplier(),
            _ => 1.0,
        };
        let vx = self.input.move_x.clamp(-1.0, 1.0) * self.config.move_speed * speed_scale;
        let mut vy = body.velocity().y;

        if self.jump_requested && self.grounded {
            vy = self.config.jump_force;
        }
        self.jump_requested = false;

        body.set_velocity(Vec2::new(vx, vy));

        let hovering = !self.grounded && self.input.hover;
        if hovering {
            body.apply_impulse(Vec2::Y * self.config.hover_force * delta);
        }

        self.set_flags(vx, vy, hovering);
        self.derive_state();
    }

    /// Stop all control and play the death pose. Returns false if already dead.
    pub fn enter_dead(&mut self) -> bool {
        if self.is_dead {
            return false;
        }
        self.is_dead = true;
        self.set_can_control(false);
        self.set_flags(0.0, 0.0, false);
        self.machine.change_state(PlayerState::Dead);
        true
    }

    /// Undo death and hand control back.
    pub fn revive(&mut self, renderer: &mut dyn RendererSurface) {
        self.is_dead = false;
        self.can_control = true;
        self.fire_cooldown = 0.0;
        self.invincibility.clear(renderer);
        self.machine.change_state(PlayerState::Idle);
    }

    fn update_facing(&mut self) {
        if self.input.aim.x.abs() > AIM_FACING_DEADZONE {
            self.facing_right = self.input.aim.x > 0.0;
        } else if self.input.move_x.abs() > MOVE_FACING_DEADZONE {
            self.facing_right = self.input.move_x > 0.0;
        }
    }

    fn try_fire(&mut self, position: Vec2) -> Option<PlayerCommand> {
        let aim = self.input.aim;
        if aim.length() < self.config.stick_fire_threshold || self.fire_cooldown > 0.0 {
            return None;
        }

        self.fire_cooldown = self.config.fire_rate;
        Some(PlayerCommand::Fire {
            origin: position,
            direction: aim.normalize_or_zero(),
            speed: self.config.bullet_speed,
            lifetime: self.config.bullet_lifetime,
        })
    }

    fn set_flags(&mut self, vx: f32, vy: f32, hovering: bool) {
        self.is_moving = self.grounded && vx.abs() > MOVE_FACING_DEADZONE;
        self.is_hover = hovering;
        self.is_jump = !self.grounded && !hovering && vy > 0.0;
        self.is_fall = !self.grounded && !hovering && vy < 0.0;
    }

    fn derive_state(&mut self) {
        let next = if self.is_dead {
            PlayerState::Dead
        } else if self.is_hover {
            PlayerState::Hover
        } else if !self.grounded {
            PlayerState::Airborne
        } else if self.is_moving {
            PlayerState::Move
        } else {
            PlayerState::Idle
        };

        if next != self.machine.current() {
            self.machine.change_state(next);
        }
    }
}

/// Hit reactions for the player: an invincibility window on a hit, the
/// death pose on a kill.
pub struct PlayerHit<'a> {
    pub controller: &'a mut PlayerController,
}

impl CombatHooks for PlayerHit<'_> {
    fn is_invincible(&self) -> bool {
        self.controller.is_invincible()
    }

    fn on_hurt(&mut self, _hit_position: Vec2) {
        self.controller.invincibility.start();
    }

    fn on_death(&mut self) {
        self.controller.enter_dead();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::testing::{MockAnimator, MockBody, MockRenderer};
    use crate::character::{GroundEffect, Health};
    use crate::combat::{apply_damage, DamageOutcome, DAMAGE_PER_HIT};

    const DT: f32 = 0.125;

    fn controller() -> PlayerController {
        let mut controller = PlayerController::new(PlayerConfig::default(), Vec2::new(-6.0, 1.0));
        controller.set_grounded(true, None);
        controller
    }

    fn hit(controller: &mut PlayerController, health: &mut Health) -> DamageOutcome {
        let mut hooks = PlayerHit { controller };
        apply_damage(health, &mut hooks, DAMAGE_PER_HIT, Vec2::ZERO)
    }

    #[test]
    fn lethal_hit_kills_once_and_halts_control() {
        let mut controller = controller();
        let mut health = Health::new(100);

        assert_eq!(hit(&mut controller, &mut health), DamageOutcome::Killed);
        assert_eq!(health.current(), 0);
        assert!(health.is_dead());
        assert_eq!(controller.state(), PlayerState::Dead);
        assert!(!controller.can_control());

        assert_eq!(hit(&mut controller, &mut health), DamageOutcome::Ignored);
        assert!(!controller.enter_dead());
    }

    #[test]
    fn hits_inside_the_window_are_ignored() {
        let mut controller = controller();
        let mut renderer = MockRenderer::default();
        let mut animator = MockAnimator::default();
        let mut health = Health::new(1000);

        assert_eq!(hit(&mut controller, &mut health), DamageOutcome::Hurt { remaining: 900 });
        assert!(controller.is_invincible());
        assert_eq!(controller.state(), PlayerState::Idle);

        assert_eq!(hit(&mut controller, &mut health), DamageOutcome::Ignored);
        assert_eq!(health.current(), 900);

        for _ in 0..16 {
            controller.update(DT, Vec2::ZERO, &mut renderer, &mut animator);
        }
        assert!(!controller.is_invincible());
        assert!(renderer.visible);
        assert!(renderer.toggles > 0);

        assert_eq!(hit(&mut controller, &mut health), DamageOutcome::Hurt { remaining: 800 });
    }

    #[test]
    fn fires_along_the_aim_at_the_fire_rate() {
        let mut controller = controller();
        let mut renderer = MockRenderer::default();
        let mut animator = MockAnimator::default();
        controller.apply_input(PlayerInput {
            aim: Vec2::new(-1.0, 0.0),
            ..default()
        });

        let shot = controller.update(DT, Vec2::new(2.0, 1.0), &mut renderer, &mut animator);
        assert_eq!(
            shot,
            Some(PlayerCommand::Fire {
                origin: Vec2::new(2.0, 1.0),
                direction: Vec2::NEG_X,
                speed: 10.0,
                lifetime: 3.0,
            })
        );
        assert!(!controller.facing_right());
        assert!(renderer.flip_x);

        // 0.2 s between shots: the next frame is still cooling down.
        assert_eq!(controller.update(DT, Vec2::ZERO, &mut renderer, &mut animator), None);
        assert!(controller
            .update(DT, Vec2::ZERO, &mut renderer, &mut animator)
            .is_some());
    }

    #[test]
    fn weak_aim_does_not_fire_but_turns_the_player() {
        let mut controller = controller();
        let mut renderer = MockRenderer::default();
        let mut animator = MockAnimator::default();
        controller.apply_input(PlayerInput {
            move_x: 1.0,
            aim: Vec2::new(-0.5, 0.0),
            ..default()
        });

        assert_eq!(controller.update(DT, Vec2::ZERO, &mut renderer, &mut animator), None);
        assert!(!controller.facing_right());
    }

    #[test]
    fn ground_effects_scale_walking_speed() {
        let mut controller = controller();
        let mut body = MockBody::default();
        controller.apply_input(PlayerInput {
            move_x: 1.0,
            ..default()
        });

        controller.fixed_update(DT, &mut body);
        assert_eq!(body.velocity.x, 5.0);
        assert_eq!(controller.state(), PlayerState::Move);

        controller.set_grounded(true, Some(GroundType::with_effect(GroundEffect::Slow)));
        controller.fixed_update(DT, &mut body);
        assert_eq!(body.velocity.x, 2.5);
    }

    #[test]
    fn jump_then_hover_while_held() {
        let mut controller = controller();
        let mut body = MockBody::default();
        controller.apply_input(PlayerInput {
            jump: true,
            hover: true,
            ..default()
        });

        controller.fixed_update(DT, &mut body);
        assert_eq!(body.velocity.y, 5.0);
        assert!(body.impulses.is_empty());

        controller.set_grounded(false, None);
        controller.fixed_update(DT, &mut body);
        assert_eq!(controller.state(), PlayerState::Hover);
        assert_eq!(body.impulses.len(), 1);
        assert!(body.impulses[0].y > 0.0);

        controller.apply_input(PlayerInput::default());
        body.velocity.y = -1.0;
        controller.fixed_update(DT, &mut body);
        assert_eq!(controller.state(), PlayerState::Airborne);
        assert!(controller.is_fall);
    }

    #[test]
    fn without_control_the_body_stops_and_input_is_dropped() {
        let mut controller = controller();
        let mut body = MockBody {
            velocity: Vec2::new(3.0, 2.0),
            ..default()
        };

        controller.set_can_control(false);
        controller.apply_input(PlayerInput {
            move_x: 1.0,
            jump: true,
            ..default()
        });
        controller.fixed_update(DT, &mut body);

        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(controller.state(), PlayerState::Idle);

        controller.set_can_control(true);
        controller.fixed_update(DT, &mut body);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn revive_restores_control() {
        let mut controller = controller();
        let mut renderer = MockRenderer::default();
        controller.enter_dead();

        controller.revive(&mut renderer);

        assert!(!controller.is_dead());
        assert!(controller.can_control());
        assert_eq!(controller.state(), PlayerState::Idle);
    }
}

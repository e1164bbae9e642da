//! Per-entity behaviours
//!
//! A behaviour advances its own private state in `update` and only touches
//! its owner in `apply`. The entity runs every `update` before any `apply`,
//! so within one tick all behaviours see the same entity, and the last one
//! registered wins when two write the same field.

use glam::Vec2;

use super::entity::Entity;
use super::particles::EmitParticles;
use crate::SimRng;
use crate::renderer::DrawList;

/// The single scalar an interpolation drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    PositionX,
    PositionY,
    Alpha,
    Scale,
    Rotation,
    /// Drives nothing; the interpolation is only a countdown
    Timer,
}

/// What the owner does when a behaviour reports it has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinishAction {
    #[default]
    Nothing,
    /// Owner leaves play (traversal complete)
    Deactivate,
    /// Owner loses hazard immunity
    EndIndestructible,
}

/// Extra per-apply effect
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ApplyHook {
    #[default]
    Nothing,
    /// Add this many radians to the owner's rotation on every apply
    Spin(f32),
}

impl ApplyHook {
    fn run(self, entity: &mut Entity) {
        match self {
            ApplyHook::Nothing => {}
            ApplyHook::Spin(radians) => entity.rotation += radians,
        }
    }
}

/// A vertical hop around a fixed ground position
#[derive(Debug, Clone)]
pub struct Jump {
    /// Initial upward speed (px/s)
    pub power: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    jumping: bool,
    offset: Vec2,
    velocity: f32,
    ground: Vec2,
}

impl Jump {
    /// `ground` is captured once; the owner is always placed relative to it
    pub fn new(ground: Vec2, power: f32, gravity: f32) -> Self {
        Self {
            power,
            gravity,
            jumping: false,
            offset: Vec2::ZERO,
            velocity: 0.0,
            ground,
        }
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Current vertical speed, negative while rising
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Start a hop. Returns false (and changes nothing) while airborne.
    pub fn jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.velocity = -self.power;
        true
    }

    fn update(&mut self, dt: f32) {
        self.velocity += self.gravity * dt;
        self.offset.y += self.velocity * dt;

        // Back at (or below) the ground while falling: hop is over
        if self.offset.y >= 0.0 && self.velocity >= 0.0 {
            self.offset = Vec2::ZERO;
            self.velocity = 0.0;
            self.jumping = false;
        }
    }

    fn apply(&self, entity: &mut Entity) {
        entity.position = self.ground + self.offset;
    }
}

/// Linear change of one scalar from a start value to a target
#[derive(Debug, Clone)]
pub struct Interpolation {
    pub channel: Channel,
    pub on_finish: FinishAction,
    pub on_apply: ApplyHook,
    start: f32,
    current: f32,
    target: f32,
    velocity: f32,
    duration: f32,
    elapsed: f32,
    finished: bool,
    reported: bool,
}

impl Interpolation {
    /// Negative durations are treated as zero: the value snaps to `target`.
    pub fn new(channel: Channel, start: f32, target: f32, duration: f32) -> Self {
        let duration = if duration > 0.0 { duration } else { 0.0 };
        let (current, velocity) = if duration == 0.0 {
            (target, 0.0)
        } else {
            (start, (target - start) / duration)
        };
        Self {
            channel,
            on_finish: FinishAction::Nothing,
            on_apply: ApplyHook::Nothing,
            start,
            current,
            target,
            velocity,
            duration,
            elapsed: 0.0,
            finished: false,
            reported: false,
        }
    }

    pub fn with_on_finish(mut self, action: FinishAction) -> Self {
        self.on_finish = action;
        self
    }

    pub fn with_on_apply(mut self, hook: ApplyHook) -> Self {
        self.on_apply = hook;
        self
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Units per second
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance; true only on the one update where the target is reached
    fn update(&mut self, dt: f32) -> bool {
        if self.finished {
            return false;
        }
        self.elapsed += dt;
        self.current = self.start + self.velocity * self.elapsed;

        let crossed = if self.velocity > 0.0 {
            self.current >= self.target
        } else if self.velocity < 0.0 {
            self.current <= self.target
        } else {
            true
        };
        if crossed || self.elapsed >= self.duration {
            self.current = self.target;
            self.finished = true;
        }

        if self.finished && !self.reported {
            self.reported = true;
            return true;
        }
        false
    }

    fn apply(&self, entity: &mut Entity) {
        match self.channel {
            Channel::PositionX => entity.position.x = self.current,
            Channel::PositionY => entity.position.y = self.current,
            Channel::Alpha => entity.alpha = self.current,
            Channel::Scale => entity.scale = self.current,
            Channel::Rotation => entity.rotation = self.current,
            Channel::Timer => {}
        }
        self.on_apply.run(entity);
    }
}

/// Constant leftward motion that retires the owner past an exit line
#[derive(Debug, Clone)]
pub struct HorizontalDrift {
    /// px/s, positive moves left
    pub speed: f32,
    /// Owner goes inactive once x is below this
    pub exit_x: f32,
    x: f32,
    exited: bool,
}

impl HorizontalDrift {
    pub fn new(start_x: f32, speed: f32, exit_x: f32) -> Self {
        Self {
            speed,
            exit_x,
            x: start_x,
            exited: false,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    fn update(&mut self, dt: f32) -> bool {
        self.x -= self.speed * dt;
        if !self.exited && self.x < self.exit_x {
            self.exited = true;
            return true;
        }
        false
    }

    fn apply(&self, entity: &mut Entity) {
        entity.position.x = self.x;
        if self.exited {
            entity.active = false;
        }
    }
}

/// Every kind of behaviour an entity can carry
#[derive(Debug)]
pub enum Behaviour {
    Jump(Jump),
    Interpolate(Interpolation),
    EmitParticles(Box<EmitParticles>),
    Drift(HorizontalDrift),
}

impl Behaviour {
    /// Advance private state. Returns true on the tick the behaviour finishes.
    pub fn update(&mut self, dt: f32, rng: &mut SimRng) -> bool {
        match self {
            Behaviour::Jump(jump) => {
                jump.update(dt);
                false
            }
            Behaviour::Interpolate(interp) => interp.update(dt),
            Behaviour::EmitParticles(emit) => {
                emit.update(dt, rng);
                false
            }
            Behaviour::Drift(drift) => drift.update(dt),
        }
    }

    /// Write results into the owner
    pub fn apply(&mut self, entity: &mut Entity) {
        match self {
            Behaviour::Jump(jump) => jump.apply(entity),
            Behaviour::Interpolate(interp) => interp.apply(entity),
            Behaviour::EmitParticles(emit) => emit.apply(entity),
            Behaviour::Drift(drift) => drift.apply(entity),
        }
    }

    /// Only particle emitters draw anything of their own
    pub fn is_drawable(&self) -> bool {
        matches!(self, Behaviour::EmitParticles(_))
    }

    pub fn draw(&self, list: &mut DrawList) {
        if let Behaviour::EmitParticles(emit) = self {
            emit.draw(list);
        }
    }

    pub fn finish_action(&self) -> FinishAction {
        match self {
            Behaviour::Interpolate(interp) => interp.on_finish,
            _ => FinishAction::Nothing,
        }
    }

    pub fn as_jump(&self) -> Option<&Jump> {
        match self {
            Behaviour::Jump(jump) => Some(jump),
            _ => None,
        }
    }

    pub fn as_jump_mut(&mut self) -> Option<&mut Jump> {
        match self {
            Behaviour::Jump(jump) => Some(jump),
            _ => None,
        }
    }

    pub fn as_interpolation(&self) -> Option<&Interpolation> {
        match self {
            Behaviour::Interpolate(interp) => Some(interp),
            _ => None,
        }
    }

    pub fn as_emitter(&self) -> Option<&EmitParticles> {
        match self {
            Behaviour::EmitParticles(emit) => Some(emit),
            _ => None,
        }
    }
}

impl From<Jump> for Behaviour {
    fn from(jump: Jump) -> Self {
        Behaviour::Jump(jump)
    }
}

impl From<Interpolation> for Behaviour {
    fn from(interp: Interpolation) -> Self {
        Behaviour::Interpolate(interp)
    }
}

impl From<EmitParticles> for Behaviour {
    fn from(emit: EmitParticles) -> Self {
        Behaviour::EmitParticles(Box::new(emit))
    }
}

impl From<HorizontalDrift> for Behaviour {
    fn from(drift: HorizontalDrift) -> Self {
        Behaviour::Drift(drift)
    }
}

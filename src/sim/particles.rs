//! Short-lived particle effects
//!
//! A particle is an ordinary entity with a remaining lifespan. The system
//! owns its particles outright; emitters fill it with fresh clones of a
//! template, each carrying its own fade (and optional drift) behaviours.

use glam::Vec2;
use rand::Rng;

use super::behaviour::{ApplyHook, Channel, Interpolation};
use super::entity::Entity;
use crate::SimRng;
use crate::renderer::DrawList;
use crate::settings::EmitterSettings;

/// Max positional jitter around the anchor (px, exclusive)
const JITTER: i32 = 20;
/// Particle scale is drawn from this range, in percent
const SCALE_PERCENT: std::ops::Range<i32> = 20..30;
/// Drifting particles head for this x
const DRIFT_TARGET_X: f32 = -50.0;
/// Drifting particles move left at this speed (px/s)
const DRIFT_SPEED: f32 = 100.0;
/// Radians added to a drifting particle's rotation per apply
const DRIFT_SPIN: f32 = 0.1;

#[derive(Debug)]
struct Particle {
    entity: Entity,
    remaining: f32,
}

/// Owns a set of particles and retires them when their time is up
#[derive(Debug, Default)]
pub struct ParticleSystem {
    /// Where new particles appear
    pub position: Vec2,
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negative lifespans count as zero: gone on the next update
    pub fn add_particle(&mut self, entity: Entity, lifespan: f32) {
        self.particles.push(Particle {
            entity,
            remaining: lifespan.max(0.0),
        });
    }

    /// Age every particle. Expired ones are dropped without being updated;
    /// the rest run their own behaviours.
    pub fn update(&mut self, dt: f32, rng: &mut SimRng) {
        self.particles.retain_mut(|p| {
            p.remaining -= dt;
            if p.remaining <= 0.0 {
                return false;
            }
            p.entity.update(dt, rng);
            true
        });
    }

    /// Oldest first, so the newest particles end up on top
    pub fn draw(&self, list: &mut DrawList) {
        for p in &self.particles {
            p.entity.draw(list);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Resident particles with their remaining lifespan
    pub fn iter(&self) -> impl Iterator<Item = (&Entity, f32)> {
        self.particles.iter().map(|p| (&p.entity, p.remaining))
    }
}

/// Periodically sprays clones of a template around its owner
#[derive(Debug)]
pub struct EmitParticles {
    /// Seconds between bursts
    pub spawn_delay: f32,
    pub per_spawn: u32,
    /// Seconds each particle lives (and takes to fade out)
    pub lifespan: f32,
    /// Particles also slide left, spinning
    pub drift: bool,
    template: Entity,
    system: ParticleSystem,
    since_last_spawn: f32,
}

impl EmitParticles {
    pub fn new(template: Entity) -> Self {
        Self::from_settings(template, &EmitterSettings::default())
    }

    /// `settings.alpha` is applied to the template
    pub fn from_settings(mut template: Entity, settings: &EmitterSettings) -> Self {
        template.alpha = settings.alpha;
        Self {
            spawn_delay: settings.spawn_delay,
            per_spawn: settings.per_spawn,
            lifespan: settings.lifespan,
            drift: settings.drift,
            template,
            system: ParticleSystem::new(),
            since_last_spawn: 0.0,
        }
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn template(&self) -> &Entity {
        &self.template
    }

    pub(crate) fn update(&mut self, dt: f32, rng: &mut SimRng) {
        self.system.update(dt, rng);

        self.since_last_spawn += dt;
        if self.since_last_spawn > self.spawn_delay {
            self.since_last_spawn = 0.0;
            for _ in 0..self.per_spawn {
                self.spawn_one(rng);
            }
        }
    }

    fn spawn_one(&mut self, rng: &mut SimRng) {
        let mut particle = self.template.clone_visual();
        particle.position = self.system.position
            + Vec2::new(
                rng.random_range(-JITTER..JITTER) as f32,
                rng.random_range(-JITTER..JITTER) as f32,
            );
        particle.scale = rng.random_range(SCALE_PERCENT) as f32 / 100.0;
        particle.rotation = (rng.random_range(0..360) as f32).to_radians();

        particle.add_behaviour(Interpolation::new(
            Channel::Alpha,
            particle.alpha,
            0.0,
            self.lifespan,
        ));
        if self.drift {
            let x = particle.position.x;
            particle.add_behaviour(
                Interpolation::new(
                    Channel::PositionX,
                    x,
                    DRIFT_TARGET_X,
                    (x - DRIFT_TARGET_X) / DRIFT_SPEED,
                )
                .with_on_apply(ApplyHook::Spin(DRIFT_SPIN)),
            );
        }

        self.system.add_particle(particle, self.lifespan);
    }

    /// Keep the spawn point on the owner
    pub(crate) fn apply(&mut self, owner: &Entity) {
        self.system.position = owner.position;
    }

    pub(crate) fn draw(&self, list: &mut DrawList) {
        self.system.draw(list);
    }
}

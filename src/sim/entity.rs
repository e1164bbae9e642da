//! Positioned, drawable game objects
//!
//! An entity is plain data plus an ordered list of behaviours. Behaviours
//! never share state with one another or with other entities: cloning an
//! entity copies only its transform and visuals.

use glam::Vec2;

use super::behaviour::{Behaviour, FinishAction};
use crate::SimRng;
use crate::assets::{TextureId, TextureInfo};
use crate::consts::DEFAULT_RADIUS;
use crate::renderer::{Color, DrawList, Sprite};

/// What happened inside an entity during one `update`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Behaviour slots that finished this tick, in registration order
    pub finished: Vec<usize>,
    /// How many behaviours ran their apply step
    pub applied: usize,
}

/// A game object
#[derive(Debug)]
pub struct Entity {
    /// Inactive entities are neither updated, drawn nor collided
    pub active: bool,
    /// Collision radius, never negative
    pub radius: f32,
    pub position: Vec2,
    /// Draw pivot inside the texture
    pub origin: Vec2,
    pub scale: f32,
    /// Radians
    pub rotation: f32,
    pub color: Color,
    /// 0.0 - 1.0
    pub alpha: f32,
    /// Immune to hazards (set by a lane revive)
    pub indestructible: bool,
    texture: Option<TextureId>,
    behaviours: Vec<Behaviour>,
    /// Slots of behaviours that also draw
    drawables: Vec<usize>,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            active: true,
            radius: DEFAULT_RADIUS,
            position: Vec2::ZERO,
            origin: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            color: Color::WHITE,
            alpha: 1.0,
            indestructible: false,
            texture: None,
            behaviours: Vec::new(),
            drawables: Vec::new(),
        }
    }
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.set_radius(radius);
        self
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }

    /// Assign a texture and centre the draw origin on it
    pub fn set_texture(&mut self, texture: TextureInfo) {
        self.texture = Some(texture.id);
        self.origin = texture.center();
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Append a behaviour; returns its slot
    pub fn add_behaviour(&mut self, behaviour: impl Into<Behaviour>) -> usize {
        let behaviour = behaviour.into();
        let slot = self.behaviours.len();
        if behaviour.is_drawable() {
            self.drawables.push(slot);
        }
        self.behaviours.push(behaviour);
        slot
    }

    pub fn behaviours(&self) -> &[Behaviour] {
        &self.behaviours
    }

    pub fn behaviour(&self, slot: usize) -> Option<&Behaviour> {
        self.behaviours.get(slot)
    }

    pub fn behaviour_mut(&mut self, slot: usize) -> Option<&mut Behaviour> {
        self.behaviours.get_mut(slot)
    }

    /// Run one tick: every behaviour's update, then every behaviour's
    /// apply, both in registration order. Finish actions run last.
    pub fn update(&mut self, dt: f32, rng: &mut SimRng) -> UpdateReport {
        let mut report = UpdateReport::default();

        for (slot, behaviour) in self.behaviours.iter_mut().enumerate() {
            if behaviour.update(dt, rng) {
                report.finished.push(slot);
            }
        }

        // Detach the list so behaviours can borrow the entity mutably
        let mut behaviours = std::mem::take(&mut self.behaviours);
        for behaviour in behaviours.iter_mut() {
            behaviour.apply(self);
            report.applied += 1;
        }
        for &slot in &report.finished {
            self.on_finished(behaviours[slot].finish_action());
        }
        self.behaviours = behaviours;

        report
    }

    fn on_finished(&mut self, action: FinishAction) {
        match action {
            FinishAction::Nothing => {}
            FinishAction::Deactivate => self.active = false,
            FinishAction::EndIndestructible => self.indestructible = false,
        }
    }

    /// Emit draw requests: behaviour visuals first, the entity on top
    pub fn draw(&self, list: &mut DrawList) {
        if !self.active {
            return;
        }
        for &slot in &self.drawables {
            self.behaviours[slot].draw(list);
        }
        if let Some(texture) = self.texture {
            list.sprite(Sprite {
                texture,
                position: self.position,
                rotation: self.rotation,
                origin: self.origin,
                scale: self.scale,
                color: self.color,
                alpha: self.alpha,
            });
        }
    }

    /// Circle overlap test, touching counts
    pub fn collides_with(&self, other: &Entity) -> bool {
        self.position.distance(other.position) <= self.radius + other.radius
    }

    /// Copy of transform and visuals with no behaviours attached
    pub fn clone_visual(&self) -> Entity {
        Entity {
            active: self.active,
            radius: self.radius,
            position: self.position,
            origin: self.origin,
            scale: self.scale,
            rotation: self.rotation,
            color: self.color,
            alpha: self.alpha,
            indestructible: false,
            texture: self.texture,
            behaviours: Vec::new(),
            drawables: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::behaviour::{Channel, Interpolation, Jump};
    use crate::sim::particles::EmitParticles;
    use rand::SeedableRng;

    fn rng() -> SimRng {
        SimRng::seed_from_u64(7)
    }

    #[test]
    fn test_collides_touching_circles() {
        let a = Entity::at(Vec2::new(0.0, 0.0)).with_radius(10.0);
        let b = Entity::at(Vec2::new(20.0, 0.0)).with_radius(10.0);
        let c = Entity::at(Vec2::new(20.1, 0.0)).with_radius(10.0);
        assert!(a.collides_with(&b));
        assert!(b.collides_with(&a));
        assert!(!a.collides_with(&c));
    }

    #[test]
    fn test_radius_never_negative() {
        let e = Entity::new().with_radius(-5.0);
        assert_eq!(e.radius, 0.0);
    }

    #[test]
    fn test_last_registered_apply_wins() {
        let mut e = Entity::new();
        e.add_behaviour(Interpolation::new(Channel::PositionX, 0.0, 100.0, 1.0));
        e.add_behaviour(Interpolation::new(Channel::PositionX, 500.0, 600.0, 1.0));
        let report = e.update(0.5, &mut rng());
        assert_eq!(report.applied, 2);
        assert!((e.position.x - 550.0).abs() < 0.001);
    }

    #[test]
    fn test_update_reports_finished_slots_and_runs_action() {
        let mut e = Entity::new();
        e.add_behaviour(Jump::new(Vec2::ZERO, 10.0, 10.0));
        e.add_behaviour(
            Interpolation::new(Channel::PositionX, 0.0, 10.0, 1.0)
                .with_on_finish(FinishAction::Deactivate),
        );
        let report = e.update(0.5, &mut rng());
        assert!(report.finished.is_empty());
        assert!(e.active);

        let report = e.update(0.5, &mut rng());
        assert_eq!(report.finished, vec![1]);
        assert!(!e.active);
        assert_eq!(e.position.x, 10.0);
    }

    #[test]
    fn test_clone_drops_behaviours() {
        let mut e = Entity::at(Vec2::new(3.0, 4.0)).with_radius(12.0);
        e.alpha = 0.5;
        e.color = Color::RED;
        e.add_behaviour(Jump::new(Vec2::ZERO, 1.0, 1.0));
        let copy = e.clone_visual();
        assert!(copy.behaviours().is_empty());
        assert_eq!(copy.position, e.position);
        assert_eq!(copy.radius, 12.0);
        assert_eq!(copy.alpha, 0.5);
        assert_eq!(copy.color, Color::RED);
    }

    #[test]
    fn test_texture_sets_origin() {
        let mut e = Entity::new();
        e.set_texture(TextureInfo::new(4, 86.0, 40.0));
        assert_eq!(e.origin, Vec2::new(43.0, 20.0));
        assert_eq!(e.texture(), Some(TextureId(4)));
    }

    #[test]
    fn test_inactive_entity_is_not_drawn() {
        let mut e = Entity::new();
        e.set_texture(TextureInfo::new(1, 10.0, 10.0));
        let mut list = DrawList::new();
        e.draw(&mut list);
        assert_eq!(list.len(), 1);

        e.active = false;
        list.clear();
        e.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_emitter_registers_for_draw() {
        let mut template = Entity::new();
        template.set_texture(TextureInfo::new(9, 10.0, 10.0));
        let mut e = Entity::new();
        e.set_texture(TextureInfo::new(1, 10.0, 10.0));
        e.add_behaviour(EmitParticles::new(template));

        let mut r = rng();
        // First burst happens once the spawn delay is exceeded
        e.update(0.25, &mut r);
        let mut list = DrawList::new();
        e.draw(&mut list);
        let sprites: Vec<_> = list.sprites().collect();
        assert_eq!(sprites.len(), 8);
        // Owner is drawn on top of its particles
        assert_eq!(sprites.last().unwrap().texture, TextureId(1));
    }
}

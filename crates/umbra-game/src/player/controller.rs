//! Side-view character controller
//!
//! The frame pass (turn, interact, crouch, enemy contact, item use) runs once
//! per rendered frame through [`Character::update`]; movement and jumping run
//! on the fixed physics step through [`Character::fixed_update`].

use std::fmt;

use glam::Vec2;
use tracing::{debug, info};
use umbra_core::{FacingDirection, Layer, Transform2D};
use umbra_physics::{CapsuleShape, CharacterBody, PhysicsBackend, PhysicsError};

use crate::camera::Viewport;
use crate::hud::{Healthbar, InventoryDisplay};
use crate::input::{InputAction, InputState};
use crate::interaction::{InteractionResult, InteractionSystem};
use crate::inventory::Inventory;
use crate::item::{ActionReport, Item, ItemActor, MarkLayer, UseContext};

use super::{CharacterConfig, CharacterError, Locomotion, LocomotionState};

/// Everything the frame pass reads or writes outside the character
pub struct FrameContext<'a> {
    pub physics: &'a mut dyn PhysicsBackend,
    pub input: &'a InputState,
    pub viewport: &'a dyn Viewport,
    pub interactions: &'a mut InteractionSystem,
    pub marks: &'a mut MarkLayer,
    /// Game time in seconds
    pub now: f64,
}

/// What happened during one frame pass
#[derive(Debug, Default)]
pub struct FrameEvents {
    pub interaction: Option<InteractionResult>,
    pub knockback: Option<Vec2>,
    pub action: Option<ActionReport>,
    /// Item removed by the drop action, for the scene to respawn
    pub dropped: Option<Item>,
}

/// Builder requiring the collaborators a character reports to
pub struct CharacterBuilder {
    config: CharacterConfig,
    inventory_display: Option<Box<dyn InventoryDisplay>>,
    healthbar: Option<Box<dyn Healthbar>>,
}

impl CharacterBuilder {
    /// Set the display notified after every inventory change
    pub fn inventory_display(mut self, display: impl InventoryDisplay + 'static) -> Self {
        self.inventory_display = Some(Box::new(display));
        self
    }

    /// Set the health bar that receives damage
    pub fn healthbar(mut self, healthbar: impl Healthbar + 'static) -> Self {
        self.healthbar = Some(Box::new(healthbar));
        self
    }

    /// Attach the character to an already spawned body. The body's capsule is
    /// captured as the standing size.
    pub fn build(
        self,
        physics: &dyn PhysicsBackend,
        body: CharacterBody,
    ) -> Result<Character, CharacterError> {
        self.config.validate()?;
        let inventory_display = self
            .inventory_display
            .ok_or(CharacterError::MissingInventoryDisplay)?;
        let healthbar = self.healthbar.ok_or(CharacterError::MissingHealthbar)?;
        let base_capsule = physics
            .capsule(body.collider)
            .ok_or(PhysicsError::NotACapsule(body.collider))?;

        let locomotion = Locomotion::new(self.config.speeds)?;
        let inventory = Inventory::with_capacity(self.config.inventory_size);
        let transform = Transform2D::from_position(physics.body_position(body.body));

        info!(
            "Character spawned at {:?} with {} inventory slot(s)",
            transform.position,
            inventory.capacity()
        );

        Ok(Character {
            config: self.config,
            body,
            locomotion,
            facing: FacingDirection::Right,
            transform,
            inventory,
            base_capsule,
            inventory_display,
            healthbar,
            invulnerable_until: f64::NEG_INFINITY,
        })
    }
}

/// A player-driven character
pub struct Character {
    config: CharacterConfig,
    body: CharacterBody,
    locomotion: Locomotion,
    facing: FacingDirection,
    /// Visual transform, mirrored horizontally to match facing
    transform: Transform2D,
    inventory: Inventory,
    /// Standing capsule captured at spawn
    base_capsule: CapsuleShape,
    inventory_display: Box<dyn InventoryDisplay>,
    healthbar: Box<dyn Healthbar>,
    invulnerable_until: f64,
}

impl fmt::Debug for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Character")
            .field("body", &self.body)
            .field("state", &self.locomotion.state())
            .field("facing", &self.facing)
            .field("position", &self.transform.position)
            .field("inventory", &self.inventory.len())
            .finish_non_exhaustive()
    }
}

impl Character {
    /// Start building a character with the given tuning
    pub fn builder(config: CharacterConfig) -> CharacterBuilder {
        CharacterBuilder {
            config,
            inventory_display: None,
            healthbar: None,
        }
    }

    /// Get the character's tuning
    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    /// Get the physics handles of the character's body
    pub fn body(&self) -> CharacterBody {
        self.body
    }

    /// Get the current locomotion state
    pub fn state(&self) -> LocomotionState {
        self.locomotion.state()
    }

    /// Get the direction the character faces
    pub fn facing(&self) -> FacingDirection {
        self.facing
    }

    /// Get the visual transform
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Get the body position as of the last frame pass
    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Get the character's inventory
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Get the standing capsule captured at spawn
    pub fn base_capsule(&self) -> CapsuleShape {
        self.base_capsule
    }

    /// Animation flag for the running pose
    pub fn is_running(&self) -> bool {
        self.locomotion.state() == LocomotionState::Run
    }

    /// Per-frame pass
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) -> FrameEvents {
        self.transform.position = ctx.physics.body_position(self.body.body);
        let cursor_world = ctx.viewport.screen_to_world(ctx.input.cursor_screen);

        self.turn(ctx.input.horizontal());

        let interaction = self.interact(
            &*ctx.physics,
            ctx.interactions,
            ctx.input.is_just_pressed(InputAction::Interact),
        );
        self.crouch(ctx.physics, ctx.input.vertical());
        let knockback = self.touch_enemy(ctx.physics, ctx.now);

        let action = {
            let mut use_ctx = UseContext {
                physics: &*ctx.physics,
                cursor_world,
                now: ctx.now,
                marks: &mut *ctx.marks,
            };
            self.use_item(ctx.input.is_just_pressed(InputAction::Use), &mut use_ctx)
        };

        let dropped = if ctx.input.is_just_pressed(InputAction::Drop) {
            self.drop_item()
        } else {
            None
        };

        let holder = self.transform.position;
        for item in self.inventory.items_mut() {
            item.update(holder, cursor_world, ctx.now);
        }

        FrameEvents {
            interaction,
            knockback,
            action,
            dropped,
        }
    }

    /// Fixed-step pass: movement then jumping
    pub fn fixed_update(&mut self, physics: &mut dyn PhysicsBackend, input: &InputState) {
        self.move_horizontal(
            physics,
            input.horizontal(),
            input.is_held(InputAction::Sprint),
        );
        self.jump(
            physics,
            input.vertical() > 0.0 || input.is_held(InputAction::Jump),
        );
    }

    /// Face the direction of horizontal input; zero input keeps the facing
    pub fn turn(&mut self, horizontal: f32) {
        if let Some(facing) = FacingDirection::from_axis(horizontal) {
            if facing != self.facing {
                debug!("Facing {:?}", facing);
            }
            self.facing = facing;
        }
        self.transform.face(self.facing);
    }

    /// Drive the body towards `horizontal * speed`, keeping vertical velocity.
    /// Returns the applied impulse.
    pub fn move_horizontal(
        &mut self,
        physics: &mut dyn PhysicsBackend,
        horizontal: f32,
        sprint: bool,
    ) -> Vec2 {
        if !self.locomotion.state().can_move() {
            return Vec2::ZERO;
        }
        self.locomotion.select(horizontal, sprint);

        let current = physics.linear_velocity(self.body.body);
        let target = Vec2::new(horizontal * self.locomotion.move_speed(), current.y);
        let impulse = (target - current) * self.config.body.mass;
        physics.apply_impulse(self.body.body, impulse);
        impulse
    }

    /// Jump if grounded and allowed. Returns whether an impulse was applied.
    pub fn jump(&mut self, physics: &mut dyn PhysicsBackend, wants_jump: bool) -> bool {
        if !self.locomotion.state().can_jump() || !self.is_grounded(&*physics) {
            return false;
        }
        if !wants_jump {
            return false;
        }
        physics.apply_impulse(self.body.body, Vec2::new(0.0, self.config.jump_force));
        debug!("Jump");
        true
    }

    /// Crouch on downward input while grounded; stand back up once the
    /// ceiling sensor is clear and input is no longer pointing down.
    pub fn crouch(&mut self, physics: &mut dyn PhysicsBackend, vertical: f32) {
        if !self.locomotion.state().can_crouch() {
            return;
        }
        let crouched = self.locomotion.state() == LocomotionState::Crouch;

        if vertical < 0.0 && self.is_grounded(&*physics) {
            if !crouched {
                let height = self.base_capsule.size.y;
                let shape = self.base_capsule.with_height(height / 2.0, -height / 4.0);
                physics.set_capsule(self.body.collider, shape);
                self.locomotion.enter_crouch();
            }
        } else if crouched && vertical >= 0.0 && !self.is_ceiling_blocked(&*physics) {
            physics.set_capsule(self.body.collider, self.base_capsule);
            self.locomotion.stand();
        }
    }

    /// Focus the nearest interactable in reach and interact with it when
    /// `pressed` is set.
    pub fn interact(
        &mut self,
        physics: &dyn PhysicsBackend,
        interactions: &mut InteractionSystem,
        pressed: bool,
    ) -> Option<InteractionResult> {
        let position = physics.body_position(self.body.body);
        let candidates = physics.overlap_circle(
            position,
            self.config.interact_radius,
            Layer::Interactable.mask(),
        );
        let nearest = candidates
            .into_iter()
            .filter(|handle| interactions.contains(*handle))
            .filter_map(|handle| {
                physics
                    .collider_position(handle)
                    .map(|at| (handle, at.distance_squared(position)))
            })
            .min_by(|a, b| {
                a.1.total_cmp(&b.1)
                    .then_with(|| a.0.into_raw_parts().cmp(&b.0.into_raw_parts()))
            })
            .map(|(handle, _)| handle);

        interactions.set_focus(nearest);

        if !pressed {
            return None;
        }
        interactions.interact(nearest?, self)
    }

    /// Knock the character back while it touches an enemy. Returns the impulse.
    pub fn touch_enemy(&mut self, physics: &mut dyn PhysicsBackend, now: f64) -> Option<Vec2> {
        if now < self.invulnerable_until {
            return None;
        }
        let enemy_mask = Layer::Enemy.mask();
        if !physics.is_touching_layer(self.body.collider, enemy_mask) {
            return None;
        }

        let position = physics.body_position(self.body.body);
        let enemy = physics
            .overlap_circle(position, self.config.enemy_radius, enemy_mask)
            .into_iter()
            .filter_map(|handle| physics.collider_position(handle))
            .min_by(|a, b| a.distance_squared(position).total_cmp(&b.distance_squared(position)))?;

        let direction = if enemy.x > position.x {
            FacingDirection::Right
        } else {
            FacingDirection::Left
        };
        let knockback = Vec2::new(
            self.config.horizontal_knockback * direction.sign(),
            self.config.vertical_knockback,
        );
        let impulse = (knockback - physics.linear_velocity(self.body.body)) * self.config.body.mass;
        physics.apply_impulse(self.body.body, impulse);
        self.invulnerable_until = now + f64::from(self.config.contact_cooldown);

        info!("Enemy contact, knockback {:?}", impulse);
        Some(impulse)
    }

    /// Store an item. A full inventory hands it straight back.
    #[allow(clippy::result_large_err)]
    pub fn pick_up_item(&mut self, item: Item) -> Result<(), Item> {
        let name = item.name.clone();
        match self.inventory.add_item(item) {
            Ok(()) => {
                info!("Picked up {}", name);
                self.inventory_display.set_inventory(self.inventory.items());
                Ok(())
            }
            Err(item) => {
                debug!("Inventory full, {} left behind", name);
                Err(item)
            }
        }
    }

    /// Use the item in slot 0 when `pressed` is set
    pub fn use_item(&mut self, pressed: bool, ctx: &mut UseContext<'_>) -> Option<ActionReport> {
        if !pressed {
            return None;
        }
        let actor = ItemActor {
            position: self.transform.position,
            facing: self.facing,
        };
        let item = self.inventory.active_mut()?;
        Some(item.use_item(&actor, ctx))
    }

    /// Remove the item in slot 0 and hand it back
    pub fn drop_item(&mut self) -> Option<Item> {
        let mut item = self.inventory.remove_item(0)?;
        item.on_drop();
        self.inventory_display.set_inventory(self.inventory.items());
        Some(item)
    }

    /// Forward damage to the health bar
    pub fn take_damage(&mut self, amount: i32) {
        debug!("Taking {} damage", amount);
        self.healthbar.take_damage(amount);
    }

    /// Check the ground sensor below the body
    pub fn is_grounded(&self, physics: &dyn PhysicsBackend) -> bool {
        self.sensor_hits(physics, self.config.ground_sensor_offset)
    }

    /// Check the ceiling sensor at standing head height
    pub fn is_ceiling_blocked(&self, physics: &dyn PhysicsBackend) -> bool {
        self.sensor_hits(physics, self.config.ceiling_sensor_offset)
    }

    fn sensor_hits(&self, physics: &dyn PhysicsBackend, offset: Vec2) -> bool {
        let center = physics.body_position(self.body.body) + offset;
        physics.overlap_circle_any(center, self.config.sensor_radius, Layer::Ground.mask())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use umbra_core::LayerMask;

    use super::*;
    use crate::camera::Camera2D;
    use crate::hud::{HealthMeter, InventoryList};
    use crate::interaction::{ItemPickup, Sign};
    use crate::item::{ItemId, SpriteId};
    use crate::testing::{flash_item, StubPhysics};

    struct Fixture {
        physics: StubPhysics,
        display: Rc<RefCell<InventoryList>>,
        health: Rc<RefCell<HealthMeter>>,
        character: Character,
    }

    fn fixture(config: CharacterConfig) -> Fixture {
        let mut physics = StubPhysics::default();
        // Ground right under the feet
        physics.add_collider(Vec2::new(0.0, -1.0), 0.5, Layer::Ground);
        let display = Rc::new(RefCell::new(InventoryList::default()));
        let health = Rc::new(RefCell::new(HealthMeter::new(10)));
        let body = CharacterBody {
            body: physics.body,
            collider: physics.collider,
        };
        let character = Character::builder(config)
            .inventory_display(display.clone())
            .healthbar(health.clone())
            .build(&physics, body)
            .unwrap();
        Fixture {
            physics,
            display,
            health,
            character,
        }
    }

    fn input(horizontal: f32, vertical: f32) -> InputState {
        let mut input = InputState::new();
        input.set_axes(horizontal, vertical);
        input
    }

    #[test]
    fn test_builder_requires_collaborators() {
        let physics = StubPhysics::default();
        let body = CharacterBody {
            body: physics.body,
            collider: physics.collider,
        };
        let missing_health = Character::builder(CharacterConfig::default())
            .inventory_display(InventoryList::default())
            .build(&physics, body);
        assert!(matches!(missing_health, Err(CharacterError::MissingHealthbar)));

        let missing_display = Character::builder(CharacterConfig::default())
            .healthbar(HealthMeter::new(3))
            .build(&physics, body);
        assert!(matches!(
            missing_display,
            Err(CharacterError::MissingInventoryDisplay)
        ));
    }

    #[test]
    fn test_spawn_defaults() {
        let f = fixture(CharacterConfig::default());
        assert_eq!(f.character.state(), LocomotionState::Idle);
        assert_eq!(f.character.facing(), FacingDirection::Right);
        assert_eq!(f.character.base_capsule(), CapsuleShape::new(0.8, 1.8));
    }

    #[test]
    fn test_walk_scenario() {
        let mut f = fixture(CharacterConfig::default());

        f.character.turn(0.0);
        f.character.fixed_update(&mut f.physics, &input(0.0, 0.0));
        assert_eq!(f.character.state(), LocomotionState::Idle);

        f.character.turn(1.0);
        f.character.fixed_update(&mut f.physics, &input(1.0, 0.0));
        assert_eq!(f.character.facing(), FacingDirection::Right);
        assert_eq!(f.character.state(), LocomotionState::Walk);
        assert_eq!(f.physics.velocity.x, 3.0);
        assert!(!f.character.is_running());
    }

    #[test]
    fn test_sprint_runs() {
        let mut f = fixture(CharacterConfig::default());
        let mut input = input(-1.0, 0.0);
        input.press(InputAction::Sprint);

        f.character.fixed_update(&mut f.physics, &input);
        assert_eq!(f.character.state(), LocomotionState::Run);
        assert_eq!(f.physics.velocity.x, -6.0);
        assert!(f.character.is_running());
    }

    #[test]
    fn test_move_impulse_zero_at_steady_state() {
        let mut f = fixture(CharacterConfig::default());
        f.physics.velocity = Vec2::new(3.0, -2.0);

        let impulse = f.character.move_horizontal(&mut f.physics, 1.0, false);
        assert_eq!(impulse, Vec2::ZERO);
        assert_eq!(f.physics.velocity, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_turn_mirrors_scale_and_keeps_facing() {
        let mut f = fixture(CharacterConfig::default());
        f.character.turn(-0.3);
        assert_eq!(f.character.facing(), FacingDirection::Left);
        assert_eq!(f.character.transform().scale.x, -1.0);

        f.character.turn(0.0);
        assert_eq!(f.character.facing(), FacingDirection::Left);
        assert_eq!(f.character.transform().scale.x, -1.0);
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut f = fixture(CharacterConfig::default());
        assert!(f.character.jump(&mut f.physics, true));
        assert_eq!(f.physics.velocity.y, 5.0);

        f.physics.remove_colliders_on(Layer::Ground);
        assert!(!f.character.jump(&mut f.physics, true));
        assert_eq!(f.physics.velocity.y, 5.0);
    }

    #[test]
    fn test_jump_action_or_vertical_axis() {
        let mut f = fixture(CharacterConfig::default());
        let mut held = input(0.0, 0.0);
        held.press(InputAction::Jump);
        f.character.fixed_update(&mut f.physics, &held);
        assert_eq!(f.physics.velocity.y, 5.0);

        f.physics.velocity = Vec2::ZERO;
        f.character.fixed_update(&mut f.physics, &input(0.0, 1.0));
        assert_eq!(f.physics.velocity.y, 5.0);

        f.physics.velocity = Vec2::ZERO;
        f.character.fixed_update(&mut f.physics, &input(0.0, 0.0));
        assert_eq!(f.physics.velocity.y, 0.0);
    }

    #[test]
    fn test_crouch_resizes_and_blocks_jump() {
        let mut f = fixture(CharacterConfig::default());
        f.character.crouch(&mut f.physics, -1.0);

        assert_eq!(f.character.state(), LocomotionState::Crouch);
        assert_eq!(f.physics.capsule.size.y, 0.9);
        assert_eq!(f.physics.capsule.offset.y, -0.45);
        assert!(!f.character.jump(&mut f.physics, true));

        // Crouch-walk keeps the state and uses the crouch speed
        f.character.move_horizontal(&mut f.physics, 1.0, true);
        assert_eq!(f.character.state(), LocomotionState::Crouch);
        assert_eq!(f.physics.velocity.x, 1.5);
    }

    #[test]
    fn test_crouch_sticky_under_ceiling() {
        let mut f = fixture(CharacterConfig::default());
        f.character.crouch(&mut f.physics, -1.0);
        f.physics.add_collider(Vec2::new(0.0, 1.0), 0.5, Layer::Ground);

        for _ in 0..5 {
            f.character.crouch(&mut f.physics, 0.0);
            assert_eq!(f.character.state(), LocomotionState::Crouch);
        }

        f.physics.colliders.retain(|c| c.position.y < 0.0);
        f.character.crouch(&mut f.physics, 0.0);
        assert_eq!(f.character.state(), LocomotionState::Idle);
        assert_eq!(f.physics.capsule, CapsuleShape::new(0.8, 1.8));
    }

    #[test]
    fn test_no_crouch_in_air() {
        let mut f = fixture(CharacterConfig::default());
        f.physics.remove_colliders_on(Layer::Ground);
        f.character.crouch(&mut f.physics, -1.0);
        assert_eq!(f.character.state(), LocomotionState::Idle);
    }

    #[test]
    fn test_pick_up_respects_capacity() {
        let mut f = fixture(CharacterConfig::default());
        f.character.pick_up_item(flash_item(1, SpriteId(0))).unwrap();
        let rejected = f.character.pick_up_item(flash_item(2, SpriteId(0))).unwrap_err();

        assert_eq!(rejected.id, ItemId(2));
        assert_eq!(f.character.inventory().len(), 1);
        assert_eq!(f.character.inventory().get(0).unwrap().id, ItemId(1));
        assert_eq!(f.display.borrow().updates, 1);
        assert_eq!(f.display.borrow().entries, vec!["Camera 1".to_string()]);
    }

    #[test]
    fn test_use_acts_on_first_item() {
        let config = CharacterConfig {
            inventory_size: 2,
            ..CharacterConfig::default()
        };
        let mut f = fixture(config);
        f.character.pick_up_item(flash_item(1, SpriteId(0))).unwrap();
        f.character.pick_up_item(flash_item(2, SpriteId(0))).unwrap();

        let mut marks = MarkLayer::new();
        let mut ctx = UseContext {
            physics: &f.physics,
            cursor_world: Vec2::new(4.0, 0.0),
            now: 0.0,
            marks: &mut marks,
        };
        assert!(f.character.use_item(false, &mut ctx).is_none());
        let report = f.character.use_item(true, &mut ctx).unwrap();
        assert_eq!(report.item, Some(ItemId(1)));
    }

    #[test]
    fn test_use_with_empty_inventory() {
        let mut f = fixture(CharacterConfig::default());
        let mut marks = MarkLayer::new();
        let mut ctx = UseContext {
            physics: &f.physics,
            cursor_world: Vec2::X,
            now: 0.0,
            marks: &mut marks,
        };
        assert!(f.character.use_item(true, &mut ctx).is_none());
    }

    #[test]
    fn test_drop_evicts_and_notifies() {
        let mut f = fixture(CharacterConfig::default());
        f.character.pick_up_item(flash_item(1, SpriteId(0))).unwrap();

        let dropped = f.character.drop_item().unwrap();
        assert_eq!(dropped.id, ItemId(1));
        assert!(f.character.inventory().is_empty());
        assert_eq!(f.display.borrow().updates, 2);
        assert!(f.display.borrow().entries.is_empty());
        assert!(f.character.drop_item().is_none());
    }

    #[test]
    fn test_knockback_once_per_cooldown() {
        let mut f = fixture(CharacterConfig::default());
        f.physics.add_collider(Vec2::new(1.0, 0.0), 0.5, Layer::Enemy);
        f.physics.touching = Layer::Enemy.mask();

        let impulse = f.character.touch_enemy(&mut f.physics, 0.0).unwrap();
        assert_eq!(impulse, Vec2::new(0.73, 0.73));
        assert_eq!(f.physics.velocity, Vec2::new(0.73, 0.73));

        assert!(f.character.touch_enemy(&mut f.physics, 0.25).is_none());
        assert!(f.character.touch_enemy(&mut f.physics, 0.6).is_some());
        assert_eq!(f.physics.impulses.len(), 2);
    }

    #[test]
    fn test_heavy_body_gets_same_knockback_and_move_speed() {
        let mut config = CharacterConfig::default();
        config.body.mass = 2.0;
        let mut f = fixture(config);
        f.physics.mass = 2.0;
        f.physics.add_collider(Vec2::new(1.0, 0.0), 0.5, Layer::Enemy);
        f.physics.touching = Layer::Enemy.mask();

        let impulse = f.character.touch_enemy(&mut f.physics, 0.0).unwrap();
        assert_eq!(impulse, Vec2::new(1.46, 1.46));
        assert_eq!(f.physics.velocity, Vec2::new(0.73, 0.73));

        f.physics.velocity = Vec2::ZERO;
        f.character.move_horizontal(&mut f.physics, 1.0, false);
        assert_eq!(f.physics.velocity.x, 3.0);
    }

    #[test]
    fn test_knockback_every_tick_without_cooldown() {
        let config = CharacterConfig {
            contact_cooldown: 0.0,
            ..CharacterConfig::default()
        };
        let mut f = fixture(config);
        f.physics.add_collider(Vec2::new(-1.0, 0.0), 0.5, Layer::Enemy);
        f.physics.touching = Layer::Enemy.mask();

        let first = f.character.touch_enemy(&mut f.physics, 0.0).unwrap();
        assert_eq!(first, Vec2::new(-0.73, 0.73));
        // Velocity already matches the knockback, so the second impulse is zero
        let second = f.character.touch_enemy(&mut f.physics, 0.0).unwrap();
        assert_eq!(second, Vec2::ZERO);
    }

    #[test]
    fn test_no_knockback_without_contact() {
        let mut f = fixture(CharacterConfig::default());
        f.physics.add_collider(Vec2::new(1.0, 0.0), 0.5, Layer::Enemy);
        f.physics.touching = LayerMask::NONE;
        assert!(f.character.touch_enemy(&mut f.physics, 0.0).is_none());
    }

    #[test]
    fn test_interact_picks_nearest() {
        let mut f = fixture(CharacterConfig::default());
        let mut interactions = InteractionSystem::new();
        let far = f.physics.add_collider(Vec2::new(1.2, 0.0), 0.1, Layer::Interactable);
        let near = f.physics.add_collider(Vec2::new(-0.5, 0.0), 0.1, Layer::Interactable);
        interactions.register(far, Sign::new("Far away"));
        interactions.register(near, Sign::new("Close by"));

        assert!(f.character.interact(&f.physics, &mut interactions, false).is_none());
        assert_eq!(interactions.focused(), Some(near));
        assert_eq!(interactions.focused_prompt(), Some("Read"));

        let result = f.character.interact(&f.physics, &mut interactions, true);
        assert!(matches!(result, Some(InteractionResult::ShowText(text)) if text == "Close by"));
    }

    #[test]
    fn test_interact_without_targets() {
        let mut f = fixture(CharacterConfig::default());
        let mut interactions = InteractionSystem::new();
        assert!(f.character.interact(&f.physics, &mut interactions, true).is_none());
        assert_eq!(interactions.focused(), None);
    }

    #[test]
    fn test_take_damage_forwards() {
        let mut f = fixture(CharacterConfig::default());
        f.character.take_damage(4);
        assert_eq!(f.health.borrow().current, 6);
    }

    #[test]
    fn test_frame_pass_picks_up_and_uses() {
        let mut f = fixture(CharacterConfig::default());
        f.physics.wall_x = Some(3.0);
        let mut interactions = InteractionSystem::new();
        let pickup = f.physics.add_collider(Vec2::new(0.5, 0.0), 0.2, Layer::Interactable);
        interactions.register(pickup, ItemPickup::new(flash_item(7, SpriteId(3))));

        let camera = Camera2D::new();
        let mut marks = MarkLayer::new();

        let mut frame = input(0.0, 0.0);
        frame.press(InputAction::Interact);
        let events = f.character.update(&mut FrameContext {
            physics: &mut f.physics,
            input: &frame,
            viewport: &camera,
            interactions: &mut interactions,
            marks: &mut marks,
            now: 0.0,
        });
        assert!(matches!(events.interaction, Some(InteractionResult::PickedUp(ItemId(7)))));
        assert_eq!(f.character.inventory().len(), 1);
        assert_eq!(interactions.take_despawned(), vec![pickup]);

        // Aim right of the character, into the wall
        let mut frame = input(0.0, 0.0);
        frame.cursor_screen = camera.world_to_screen(Vec2::new(5.0, 0.0));
        frame.press(InputAction::Use);
        let events = f.character.update(&mut FrameContext {
            physics: &mut f.physics,
            input: &frame,
            viewport: &camera,
            interactions: &mut interactions,
            marks: &mut marks,
            now: 1.0,
        });
        let report = events.action.unwrap();
        assert_eq!(report.rays.len(), 7);
        assert_eq!(marks.len(), 7);
        assert!(marks.iter().all(|mark| mark.sprite == SpriteId(3)));
    }
}

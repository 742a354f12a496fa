//! Demo level: a floor, a wall to photograph, a sign, a camera pickup and an enemy

use anyhow::{Context, Result};
use glam::Vec2;
use tracing::{debug, info};
use umbra_core::Layer;
use umbra_game::{
    Camera2D, Character, FrameContext, FrameEvents, HealthMeter, InputState, InteractionSystem,
    InventoryList, Item, ItemId, ItemPickup, LightConfig, LightSource, MarkLayer, Sign, SpriteId,
};
use umbra_physics::{CharacterBody, PhysicsWorld};

use crate::settings::GameSettings;

/// Radius of pickup sensors placed in the world
const PICKUP_RADIUS: f32 = 0.3;

/// Everything that lives in the running level
pub struct Scene {
    pub physics: PhysicsWorld,
    pub character: Character,
    pub interactions: InteractionSystem,
    pub marks: MarkLayer,
    pub camera: Camera2D,
}

impl Scene {
    pub fn build(settings: &GameSettings) -> Result<Self> {
        let mut physics = PhysicsWorld::with_config(settings.physics.clone());

        physics.create_static_box(Vec2::new(20.0, 0.5), Vec2::new(0.0, -0.5), Layer::Ground);
        physics.create_static_box(Vec2::new(0.5, 4.0), Vec2::new(9.0, 4.0), Layer::Walls);
        physics.create_static_box(Vec2::new(0.4, 0.4), Vec2::new(-5.0, 0.4), Layer::Enemy);

        let mut interactions = InteractionSystem::new();
        let sign = physics.create_sensor(PICKUP_RADIUS, Vec2::new(4.0, 1.0), Layer::Interactable);
        interactions.register(sign, Sign::new("Photograph the wall to mark it"));

        let camera_item = Item::flash_camera(
            ItemId(1),
            "Flash Camera",
            SpriteId(1),
            settings.flash_camera.clone(),
            LightSource::new(LightConfig::default()),
        )
        .context("Failed to build the flash camera")?;
        let pickup = physics.create_sensor(PICKUP_RADIUS, Vec2::new(2.0, 1.0), Layer::Interactable);
        interactions.register(pickup, ItemPickup::new(camera_item));

        let body_config = &settings.character.body;
        let spawn_at = Vec2::new(0.0, body_config.height / 2.0 + 0.05);
        let body = CharacterBody::spawn(&mut physics, body_config, spawn_at);
        physics.refresh_queries();

        let character = Character::builder(settings.character.clone())
            .inventory_display(InventoryList::default())
            .healthbar(HealthMeter::new(10))
            .build(&physics, body)
            .context("Failed to build the character")?;

        let mut camera = Camera2D::with_config(settings.camera.clone());
        camera.set_position(character.position());

        info!("Scene ready with {} interactables", interactions.count());

        Ok(Self {
            physics,
            character,
            interactions,
            marks: MarkLayer::new(),
            camera,
        })
    }

    /// Physics pass: character forces, then the world steps
    pub fn fixed_update(&mut self, input: &InputState) {
        self.character.fixed_update(&mut self.physics, input);
        self.physics.step();
    }

    /// Frame pass, followed by scene bookkeeping for dropped and used-up objects
    pub fn update(&mut self, input: &InputState, now: f64) -> FrameEvents {
        let mut events = self.character.update(&mut FrameContext {
            physics: &mut self.physics,
            input,
            viewport: &self.camera,
            interactions: &mut self.interactions,
            marks: &mut self.marks,
            now,
        });

        for collider in self.interactions.take_despawned() {
            debug!("Removing spent interactable {:?}", collider);
            self.physics.remove_collider(collider);
        }

        if let Some(item) = events.dropped.take() {
            let at = self.character.position() + Vec2::new(0.0, -0.5);
            let sensor = self.physics.create_sensor(PICKUP_RADIUS, at, Layer::Interactable);
            info!("{} left on the floor at {:?}", item.name, at);
            self.interactions.register(sensor, ItemPickup::new(item));
            self.physics.refresh_queries();
        }

        self.camera.follow(self.character.position());
        events
    }
}

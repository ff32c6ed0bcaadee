//! Headless simulation driving the ECS the way a host application would:
//! register systems once, then call `world.update(dt)` per frame.
//!
//! Run with logging to watch the churn:
//!
//! ```text
//! RUST_LOG=debug cargo run --example headless_sim
//! ```

use glam::Vec3;
use signet::prelude::*;

struct Position(Vec3);
struct Velocity(Vec3);
/// Seconds left before the entity despawns.
struct Lifetime(f32);

struct Movement;
impl System for Movement {
    fn update(&mut self, world: &mut World, dt: f32) {
        for entity in world.view::<(Position, Velocity)>() {
            let v = world.get_component::<Velocity>(entity).unwrap().0;
            world.get_component_mut::<Position>(entity).unwrap().0 += v * dt;
        }
    }
}

struct Reaper;
impl System for Reaper {
    fn update(&mut self, world: &mut World, dt: f32) {
        for entity in world.view::<(Lifetime,)>() {
            let ttl = world.get_component_mut::<Lifetime>(entity).unwrap();
            ttl.0 -= dt;
            if ttl.0 <= 0.0 {
                log::info!(
                    "{} expired",
                    world.entity_name(entity).unwrap_or("<unnamed>")
                );
                world.destroy_entity(entity);
            }
        }
    }
}

/// Spawns a burst of particles around the emitter every frame.
struct Emitter {
    cadence: u32,
    frame: u32,
}

impl System for Emitter {
    fn initialize(&mut self, world: &mut World) {
        let anchor = world.create_entity_named("emitter");
        world
            .add_component(anchor, Position(Vec3::ZERO))
            .expect("emitter spawn");
    }

    fn update(&mut self, world: &mut World, _dt: f32) {
        self.frame += 1;
        if self.frame % self.cadence != 0 {
            return;
        }
        let origin = world
            .find_entity("emitter")
            .and_then(|e| world.get_component::<Position>(e))
            .map(|p| p.0)
            .unwrap_or(Vec3::ZERO);

        for i in 0..8 {
            let particle = world.create_entity();
            if particle.is_null() {
                // Table full; the reaper will free slots in a later frame.
                break;
            }
            let angle = i as f32 * std::f32::consts::TAU / 8.0;
            let velocity = Vec3::new(angle.cos(), 1.5, angle.sin());
            world
                .add_components(
                    particle,
                    (Position(origin), Velocity(velocity), Lifetime(1.5)),
                )
                .expect("particle components");
        }
    }
}

fn main() {
    env_logger::init();

    let mut world = World::new();
    world.register_system("emitter", Emitter { cadence: 6, frame: 0 });
    world.register_system("movement", Movement);
    world.register_system("reaper", Reaper);

    let dt = 1.0 / 60.0;
    for frame in 0..240 {
        world.update(dt);
        if frame % 60 == 59 {
            println!(
                "t={:>4.1}s live={} moving={}",
                (frame + 1) as f32 * dt,
                world.entity_count(),
                world.view::<(Position, Velocity)>().len()
            );
        }
    }

    let emitter = world.find_entity("emitter").expect("emitter lives forever");
    let at = world.get_component::<Position>(emitter).unwrap().0;
    println!("emitter still at {at}, {} entities live", world.entity_count());
}

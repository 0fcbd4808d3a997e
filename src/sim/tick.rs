//! Simulation tick
//!
//! Phase order is fixed: rebuild grid, run the infection pass to completion,
//! then apply every agent's health transition followed by its motion.

use rand::Rng;

use super::census::Census;
use super::infection::Transmission;
use super::state::World;

/// Advance the world by one tick
pub fn tick<R: Rng>(world: &mut World<R>) {
    let bounds = world.bounds();
    let World {
        config,
        rng,
        agents,
        grid,
        engine,
        ..
    } = world;

    grid.build(agents);
    let infections = engine.propagate(
        grid,
        agents,
        Transmission {
            contact_distance: config.contact_distance,
            probability: config.transmission_probability,
            recovery_ticks: config.recovery_ticks,
        },
        rng,
    );

    // Dead agents keep drifting; motion is unconditional
    for agent in agents.iter_mut() {
        agent.tick_health(config.death_probability, config.immunity_ticks, rng);
        agent.advance(bounds, config.velocity_jitter, rng);
    }

    world.time_ticks += 1;
    world.last_infections = infections;

    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            "tick {}: {} new infections, {}",
            world.time_ticks,
            infections,
            Census::of(&world.agents)
        );
    }
}

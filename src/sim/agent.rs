//! Agent state and per-agent transitions
//!
//! Health follows a single directed cycle:
//! Healthy -> Infected -> (Dead | Immune), Immune -> Healthy.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::WALL_INSET;

/// Epidemiological state of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HealthState {
    #[default]
    Healthy,
    Infected,
    Immune,
    /// Terminal
    Dead,
}

impl HealthState {
    /// Whether `self -> next` is an edge of the health cycle
    pub fn can_transition_to(self, next: HealthState) -> bool {
        use HealthState::*;
        matches!(
            (self, next),
            (Healthy, Infected) | (Infected, Immune) | (Infected, Dead) | (Immune, Healthy)
        )
    }
}

/// A simulated individual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub pos: DVec2,
    pub vel: DVec2,
    pub health: HealthState,
    /// Ticks left as Infected (meaningful only while Infected)
    pub recovery_timer: u32,
    /// Ticks left as Immune (meaningful only while Immune)
    pub immunity_timer: u32,
}

impl Agent {
    /// A stationary Healthy agent at `pos`
    pub fn new(pos: DVec2) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            health: HealthState::Healthy,
            recovery_timer: 0,
            immunity_timer: 0,
        }
    }

    #[inline]
    pub fn is_healthy(&self) -> bool {
        self.health == HealthState::Healthy
    }

    #[inline]
    pub fn is_infected(&self) -> bool {
        self.health == HealthState::Infected
    }

    /// Advance position, reflect off the canvas walls, then jitter velocity.
    ///
    /// A coordinate leaving `[0, bound)` is pushed back one unit inside the wall
    /// and its velocity component is negated.
    pub fn advance<R: Rng>(&mut self, bounds: DVec2, jitter: f64, rng: &mut R) {
        self.pos += self.vel;

        if self.pos.x >= bounds.x {
            self.pos.x = bounds.x - WALL_INSET;
            self.vel.x = -self.vel.x;
        }
        if self.pos.y >= bounds.y {
            self.pos.y = bounds.y - WALL_INSET;
            self.vel.y = -self.vel.y;
        }
        if self.pos.x <= 0.0 {
            self.pos.x = WALL_INSET;
            self.vel.x = -self.vel.x;
        }
        if self.pos.y <= 0.0 {
            self.pos.y = WALL_INSET;
            self.vel.y = -self.vel.y;
        }

        self.vel.x += rng.random_range(-jitter..=jitter);
        self.vel.y += rng.random_range(-jitter..=jitter);
    }

    /// Become Infected with a fresh recovery countdown.
    ///
    /// Only valid on a Healthy agent or when seeding a world.
    pub fn infect(&mut self, recovery_ticks: u32) {
        debug_assert!(
            self.health == HealthState::Healthy,
            "infect called on {:?} agent",
            self.health
        );
        self.health = HealthState::Infected;
        self.recovery_timer = recovery_ticks;
    }

    /// One tick of illness: death check first, then recovery countdown.
    pub fn tick_infected<R: Rng>(
        &mut self,
        death_probability: f64,
        immunity_ticks: u32,
        rng: &mut R,
    ) {
        if self.health != HealthState::Infected {
            return;
        }
        if rng.random::<f64>() < death_probability {
            self.health = HealthState::Dead;
            return;
        }
        self.recovery_timer = self.recovery_timer.saturating_sub(1);
        if self.recovery_timer == 0 {
            self.health = HealthState::Immune;
            self.immunity_timer = immunity_ticks;
        }
    }

    /// One tick of immunity; reverts to Healthy when the countdown ends.
    pub fn tick_immune(&mut self) {
        if self.health != HealthState::Immune {
            return;
        }
        self.immunity_timer = self.immunity_timer.saturating_sub(1);
        if self.immunity_timer == 0 {
            self.health = HealthState::Healthy;
        }
    }

    /// Apply the state-specific transition for this tick (none for Healthy/Dead)
    pub fn tick_health<R: Rng>(
        &mut self,
        death_probability: f64,
        immunity_ticks: u32,
        rng: &mut R,
    ) {
        match self.health {
            HealthState::Infected => self.tick_infected(death_probability, immunity_ticks, rng),
            HealthState::Immune => self.tick_immune(),
            HealthState::Healthy | HealthState::Dead => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: DVec2 = DVec2::new(100.0, 80.0);

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    #[test]
    fn test_reflect_right_wall() {
        let mut agent = Agent::new(DVec2::new(BOUNDS.x - 0.5, 40.0));
        agent.vel = DVec2::new(2.0, 0.0);
        agent.advance(BOUNDS, 0.0, &mut rng());
        assert_eq!(agent.pos.x, BOUNDS.x - 1.0);
        assert_eq!(agent.vel.x, -2.0);
        assert_eq!(agent.pos.y, 40.0);
    }

    #[test]
    fn test_reflect_origin_walls() {
        let mut agent = Agent::new(DVec2::new(0.5, 0.5));
        agent.vel = DVec2::new(-1.0, -3.0);
        agent.advance(BOUNDS, 0.0, &mut rng());
        assert_eq!(agent.pos, DVec2::new(1.0, 1.0));
        assert_eq!(agent.vel, DVec2::new(1.0, 3.0));
    }

    #[test]
    fn test_jitter_bounded() {
        let mut r = rng();
        let mut agent = Agent::new(DVec2::new(50.0, 40.0));
        for _ in 0..100 {
            let before = agent.vel;
            agent.pos = DVec2::new(50.0, 40.0);
            agent.advance(BOUNDS, 0.25, &mut r);
            let delta = (agent.vel - before).abs();
            assert!(delta.x <= 0.25 + 1e-12 && delta.y <= 0.25 + 1e-12);
        }
    }

    #[test]
    fn test_infect_resets_timer() {
        let mut agent = Agent::new(DVec2::ZERO);
        agent.infect(30);
        assert_eq!(agent.health, HealthState::Infected);
        assert_eq!(agent.recovery_timer, 30);
    }

    #[test]
    fn test_recovery_on_last_tick() {
        let mut agent = Agent::new(DVec2::ZERO);
        agent.infect(1);
        agent.tick_infected(0.0, 25, &mut rng());
        assert_eq!(agent.health, HealthState::Immune);
        assert_eq!(agent.immunity_timer, 25);
    }

    #[test]
    fn test_countdown_before_recovery() {
        let mut agent = Agent::new(DVec2::ZERO);
        agent.infect(3);
        agent.tick_infected(0.0, 25, &mut rng());
        assert_eq!(agent.health, HealthState::Infected);
        assert_eq!(agent.recovery_timer, 2);
    }

    #[test]
    fn test_death_precedes_recovery() {
        let mut agent = Agent::new(DVec2::ZERO);
        agent.infect(1);
        agent.tick_infected(1.0, 25, &mut rng());
        assert_eq!(agent.health, HealthState::Dead);
        assert_eq!(agent.recovery_timer, 1);
    }

    #[test]
    fn test_immunity_wears_off() {
        let mut agent = Agent::new(DVec2::ZERO);
        agent.health = HealthState::Immune;
        agent.immunity_timer = 1;
        agent.tick_immune();
        assert_eq!(agent.health, HealthState::Healthy);
    }

    #[test]
    fn test_healthy_and_dead_ignore_ticks() {
        let mut r = rng();
        for state in [HealthState::Healthy, HealthState::Dead] {
            let mut agent = Agent::new(DVec2::ZERO);
            agent.health = state;
            agent.tick_health(1.0, 10, &mut r);
            assert_eq!(agent.health, state);
        }
    }

    #[test]
    fn test_transition_table() {
        use HealthState::*;
        assert!(Healthy.can_transition_to(Infected));
        assert!(Infected.can_transition_to(Dead));
        assert!(Immune.can_transition_to(Healthy));
        assert!(!Dead.can_transition_to(Healthy));
        assert!(!Healthy.can_transition_to(Immune));
        assert!(!Immune.can_transition_to(Infected));
    }

    proptest! {
        #[test]
        fn prop_advance_stays_in_bounds(
            x in 0.0f64..100.0,
            y in 0.0f64..80.0,
            vx in -150.0f64..150.0,
            vy in -150.0f64..150.0,
            seed in any::<u64>(),
        ) {
            let mut r = Pcg32::seed_from_u64(seed);
            let mut agent = Agent::new(DVec2::new(x, y));
            agent.vel = DVec2::new(vx, vy);
            agent.advance(BOUNDS, 0.5, &mut r);
            prop_assert!(agent.pos.x > 0.0 && agent.pos.x < BOUNDS.x);
            prop_assert!(agent.pos.y > 0.0 && agent.pos.y < BOUNDS.y);
        }
    }
}

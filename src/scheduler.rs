//! The two clocks of the game: a wall-clock food spawner running on its own
//! thread, and a frame-counting throttle for simulation steps.

use std::sync::Arc;
use std::thread::{self, sleep, JoinHandle};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::food::FoodRegistry;

pub struct FoodSpawner;

impl FoodSpawner {
    /// Starts a detached thread that tops up `registry` every `period` for the
    /// rest of the process lifetime.
    pub fn start(registry: Arc<FoodRegistry>, period: Duration, seed: Option<u64>) -> std::io::Result<JoinHandle<()>> {
        let mut rng = match seed {
            // Keep the spawner's stream apart from the game's own RNG
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };

        thread::Builder::new().name("food-spawner".into()).spawn(move || {
            debug!(?period, capacity = registry.capacity(), "food spawner running");
            loop {
                if registry.spawn_if_room(&mut rng, Instant::now()).is_none() {
                    trace!("food registry full, skipping spawn");
                }
                sleep(period);
            }
        })
    }
}

/// Counts render frames and fires once every `speed` of them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickThrottle {
    frames: u32,
}

impl TickThrottle {
    pub fn new() -> Self {
        TickThrottle { frames: 0 }
    }

    /// Registers one frame; returns true when a simulation step is due.
    pub fn frame(&mut self, speed: u32) -> bool {
        self.frames += 1;
        if self.frames >= speed {
            self.frames = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn throttle_fires_every_speed_frames() {
        let mut throttle = TickThrottle::new();
        let fired: Vec<bool> = (0..9).map(|_| throttle.frame(3)).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, false, false, true]);
    }

    #[test]
    fn throttle_follows_speed_changes() {
        let mut throttle = TickThrottle::new();
        assert!(!throttle.frame(4));
        assert!(!throttle.frame(4));
        // Speed dropped below the count already reached
        assert!(throttle.frame(2));
        assert!(throttle.frame(1));
    }

    #[test]
    fn spawner_fills_registry_up_to_capacity() {
        let config = GameConfig { max_foods: 4, ..GameConfig::default() };
        let registry = Arc::new(FoodRegistry::new(&config));
        FoodSpawner::start(Arc::clone(&registry), Duration::from_millis(1), Some(3)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while registry.len() < 4 && Instant::now() < deadline {
            sleep(Duration::from_millis(2));
        }

        assert_eq!(registry.len(), 4);
        sleep(Duration::from_millis(20));
        assert_eq!(registry.len(), 4);
    }
}

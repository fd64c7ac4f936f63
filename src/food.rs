use std::ops::Range;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::debug;

use crate::collision::overlaps;
use crate::color::Rgb;
use crate::config::GameConfig;
use crate::{Coords, GridInt};
use FoodCategory::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FoodCategory {
    Red,
    Blue,
    White,
    Green,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 4] = [Red, Blue, White, Green];

    pub fn color(self) -> Rgb {
        match self {
            Red => Rgb::new(255, 0, 0),
            Blue => Rgb::new(0, 0, 255),
            White => Rgb::new(255, 255, 255),
            Green => Rgb::new(0, 255, 0),
        }
    }

    /// Half-open range the score bonus for eating this category is drawn from.
    pub fn bonus_range(self) -> Range<u32> {
        match self {
            Red => 0..5,
            Blue => 0..4,
            White => 0..3,
            Green => 0..2,
        }
    }

    pub fn draw_bonus<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        rng.gen_range(self.bonus_range())
    }

    /// Position in [`FoodCategory::ALL`], used to index per-category counters.
    pub fn index(self) -> usize {
        match self {
            Red => 0,
            Blue => 1,
            White => 2,
            Green => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Red => "Red",
            Blue => "Blue",
            White => "White",
            Green => "Green",
        }
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoodItem {
    /// Unique within the registry that created the item.
    pub serial: u64,
    pub position: Coords,
    pub category: FoodCategory,
    pub created_at: Instant,
    pub lifetime: Duration,
}

impl FoodItem {
    pub fn color(&self) -> Rgb {
        self.category.color()
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.age(now) > self.lifetime
    }
}

struct Slots {
    items: Vec<FoodItem>,
    next_serial: u64,
}

impl Slots {
    fn push(&mut self, position: Coords, category: FoodCategory, created_at: Instant, lifetime: Duration) -> FoodItem {
        let item = FoodItem { serial: self.next_serial, position, category, created_at, lifetime };
        self.next_serial += 1;
        self.items.push(item.clone());
        item
    }
}

/// Thread-safe, capacity-bounded set of food items on the field.
///
/// Every operation, including [`FoodRegistry::snapshot`], takes the same
/// mutex, so readers never see a half-applied spawn or removal.
pub struct FoodRegistry {
    capacity: usize,
    item_size: GridInt,
    // Number of valid cell anchors along each axis
    cells: (GridInt, GridInt),
    lifetime: Range<Duration>,
    slots: Mutex<Slots>,
}

impl FoodRegistry {
    pub fn new(config: &GameConfig) -> Self {
        let fit = |extent: GridInt| ((extent - config.item_size) / config.item_size + 1).max(1);

        FoodRegistry {
            capacity: config.max_foods,
            item_size: config.item_size,
            cells: (fit(config.width), fit(config.height)),
            lifetime: config.food_lifetime.clone(),
            slots: Mutex::new(Slots { items: Vec::with_capacity(config.max_foods), next_serial: 0 }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds one randomly placed item if the registry is below capacity.
    pub fn spawn_if_room<R: Rng + ?Sized>(&self, rng: &mut R, now: Instant) -> Option<FoodItem> {
        let position = (
            rng.gen_range(0..self.cells.0) * self.item_size,
            rng.gen_range(0..self.cells.1) * self.item_size,
        );
        let category = FoodCategory::random(rng);
        let lifetime = rng.gen_range(self.lifetime.clone());

        let item = self.place(position, category, now, lifetime)?;
        debug!(serial = item.serial, x = position.0, y = position.1, category = category.name(), ?lifetime, "spawned food");
        Some(item)
    }

    /// Adds an item at a chosen position, subject to the same capacity rule as spawning.
    pub fn place(&self, position: Coords, category: FoodCategory, created_at: Instant, lifetime: Duration) -> Option<FoodItem> {
        let mut slots = self.lock();
        if slots.items.len() >= self.capacity {
            return None;
        }
        Some(slots.push(position, category, created_at, lifetime))
    }

    /// Removes the first item, by index, whose age exceeds its lifetime.
    /// At most one item goes per call.
    pub fn expire_oldest(&self, now: Instant) -> Option<FoodItem> {
        let mut slots = self.lock();
        let idx = slots.items.iter().position(|item| item.is_expired(now))?;
        let item = slots.items.remove(idx);
        drop(slots);

        debug!(serial = item.serial, category = item.category.name(), "food expired");
        Some(item)
    }

    /// Removes and returns every item whose box overlaps the box at `head`.
    pub fn consume_at(&self, head: Coords, item_size: GridInt) -> Vec<FoodItem> {
        let mut eaten = vec![];
        let mut slots = self.lock();

        // Walk backwards so removals don't shift the indices still to visit
        for i in (0..slots.items.len()).rev() {
            if overlaps(slots.items[i].position, head, item_size) {
                eaten.push(slots.items.remove(i));
            }
        }

        eaten
    }

    pub fn snapshot(&self) -> Vec<FoodItem> {
        self.lock().items.clone()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn lock(&self) -> MutexGuard<'_, Slots> {
        // A panic elsewhere can't leave the vector half-modified, so keep going
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

use serde::{Deserialize, Serialize};
use turn_core::EntityId;

/// Identifier of a region (a separate map) of the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u32);

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "region-{}", self.0)
    }
}

/// A creature living in the arena.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaActor {
    pub id: EntityId,
    pub name: String,
    /// Relative speed; 100 is baseline. Higher speeds act earlier and pay
    /// less time per action.
    pub speed: u16,
    pub health: u32,
    pub power: u32,
    /// Tile on the one-dimensional track of its region.
    pub position: i32,
    pub region: RegionId,
    pub alive: bool,
}

impl ArenaActor {
    pub const BASELINE_SPEED: u16 = 100;

    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            speed: Self::BASELINE_SPEED,
            health: 10,
            power: 1,
            position: 0,
            region: RegionId::default(),
            alive: true,
        }
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    pub fn at(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn in_region(mut self, region: RegionId) -> Self {
        self.region = region;
        self
    }

    /// Harvest priority: the inverse of speed, so faster actors decide first.
    pub fn priority(&self) -> f64 {
        f64::from(Self::BASELINE_SPEED) / f64::from(self.speed.max(1))
    }

    /// Scales a base cost by this actor's speed.
    pub fn scale_cost(&self, base: f64) -> f64 {
        base * self.priority()
    }

    /// Applies damage, returning true if this blow was lethal.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 && self.alive {
            self.alive = false;
            return true;
        }
        false
    }
}

use std::fmt;

/// Unique identifier for any entity that can take part in scheduling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the locally controlled player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rounds `value` to `precision` decimal places.
///
/// Sub-tick counters are snapped after every step so that repeated additions
/// of a fractional step land exactly on the turn boundary.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_snaps_accumulated_steps() {
        let mut t = 0.0;
        for _ in 0..10 {
            t = round_to(t + 0.1, 4);
        }
        assert_eq!(t, 1.0);
    }

    #[test]
    fn player_id_is_reserved() {
        assert!(EntityId::PLAYER.is_player());
        assert!(!EntityId(3).is_player());
        assert_eq!(EntityId(3).to_string(), "#3");
    }
}

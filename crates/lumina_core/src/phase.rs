//! The four animation phases.

use serde::{Deserialize, Serialize};

/// Animation mode governing the force law applied to particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Phase {
    /// Particles pursue their targets at randomized speed.
    #[default]
    Assembling = 0,
    /// Particles hover around their targets.
    Holding = 1,
    /// Hover, drawn as soft blurred discs.
    Liquid = 2,
    /// Particles drift radially away from the surface center.
    Dispersing = 3,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Self; 4] = [Self::Assembling, Self::Holding, Self::Liquid, Self::Dispersing];

    /// Phase that follows this one in the cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Assembling => Self::Holding,
            Self::Holding => Self::Liquid,
            Self::Liquid => Self::Dispersing,
            Self::Dispersing => Self::Assembling,
        }
    }

    /// True in holding and liquid: hover force and pointer repulsion apply.
    #[must_use]
    pub const fn is_hovering(self) -> bool {
        matches!(self, Self::Holding | Self::Liquid)
    }

    /// Raw tag for atomic storage.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decodes a raw tag. Out-of-range values map to `None`.
    #[must_use]
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Assembling),
            1 => Some(Self::Holding),
            2 => Some(Self::Liquid),
            3 => Some(Self::Dispersing),
            _ => None,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Assembling => "assembling",
            Self::Holding => "holding",
            Self::Liquid => "liquid",
            Self::Dispersing => "dispersing",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_start() {
        let mut phase = Phase::Assembling;
        for _ in 0..4 {
            phase = phase.next();
        }
        assert_eq!(phase, Phase::Assembling);
    }

    #[test]
    fn test_raw_round_trip() {
        for phase in Phase::ALL {
            assert_eq!(Phase::from_u8(phase.as_u8()), Some(phase));
        }
        assert_eq!(Phase::from_u8(4), None);
    }
}

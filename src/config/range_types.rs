use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// A movement budget in tile hops constrained to [0, 32]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
pub struct MoveBudget(u32);

impl MoveBudget {
    const MAX: u32 = 32;

    pub fn new(value: u32) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0.min(Self::MAX)
    }
}

impl Default for MoveBudget {
    fn default() -> Self {
        Self::new(5)
    }
}

/// A jump height tolerance constrained to [0.0, 10.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct JumpHeight(f32);

impl JumpHeight {
    const MIN: f32 = 0.0;
    const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0.clamp(Self::MIN, Self::MAX)
    }
}

impl Default for JumpHeight {
    fn default() -> Self {
        Self::new(2.0)
    }
}

/// A movement speed value constrained to [0.1, 50.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct MovementSpeed(f32);

impl MovementSpeed {
    const MIN: f32 = 0.1;
    const MAX: f32 = 50.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0.clamp(Self::MIN, Self::MAX)
    }
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self::new(2.0)
    }
}

/// A jump launch velocity constrained to [0.1, 50.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct JumpVelocity(f32);

impl JumpVelocity {
    const MIN: f32 = 0.1;
    const MAX: f32 = 50.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0.clamp(Self::MIN, Self::MAX)
    }
}

impl Default for JumpVelocity {
    fn default() -> Self {
        Self::new(4.5)
    }
}

/// An arrival distance threshold constrained to [0.001, 0.5]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct ArrivalEpsilon(f32);

impl ArrivalEpsilon {
    const MIN: f32 = 0.001;
    const MAX: f32 = 0.5;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0.clamp(Self::MIN, Self::MAX)
    }
}

impl Default for ArrivalEpsilon {
    fn default() -> Self {
        Self::new(crate::game_logic::movement::DEFAULT_ARRIVAL_EPSILON)
    }
}

/// How far below the unit the ground search looks, constrained to [0.1, 10.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct GroundSearchDistance(f32);

impl GroundSearchDistance {
    const MIN: f32 = 0.1;
    const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0.clamp(Self::MIN, Self::MAX)
    }
}

impl Default for GroundSearchDistance {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Gravitational acceleration magnitude constrained to [0.1, 100.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, From, Serialize, Deserialize)]
pub struct GravityStrength(f32);

impl GravityStrength {
    const MIN: f32 = 0.1;
    const MAX: f32 = 100.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0.clamp(Self::MIN, Self::MAX)
    }
}

impl Default for GravityStrength {
    fn default() -> Self {
        Self::new(9.81)
    }
}

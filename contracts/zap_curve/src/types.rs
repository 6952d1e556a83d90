use soroban_sdk::contracttype;

// ─── Curve shape ───────────────────────────────────────────────────────────

/// Shape of a provider pricing curve. Discriminants are wire-stable.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CurveType {
    /// `multiplier * n + start`
    Linear = 0,
    /// `multiplier * n^2 + start`
    Exponential = 1,
    /// `ceil(multiplier * log2(n) + start)`, rank 0 priced at `start`
    Logarithmic = 2,
}

// ─── Curve parameters ──────────────────────────────────────────────────────

/// Pricing parameters for one (provider, specifier) pair.
///
/// Set once by the provider through the registry and never mutated.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Curve {
    pub curve_type: CurveType,
    /// Base price of rank 0, in token units.
    pub start: i128,
    /// Slope applied to the rank term.
    pub multiplier: i128,
}

impl Curve {
    pub fn new(curve_type: CurveType, start: i128, multiplier: i128) -> Self {
        Curve {
            curve_type,
            start,
            multiplier,
        }
    }
}

// ─── Purchase quote ────────────────────────────────────────────────────────

/// Result of a purchase-under-budget query: dots obtainable and the exact
/// budget they consume.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Purchase {
    pub dots: u64,
    pub cost: i128,
}

impl Purchase {
    pub const NONE: Purchase = Purchase { dots: 0, cost: 0 };

    pub fn is_empty(&self) -> bool {
        self.dots == 0
    }
}

//! Global configuration constants for Scene Kit.

/// Default gravity magnitude used by the jump-force helper (m/s²).
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// Highest valid layer index; layer masks cover bits 0 through 31.
pub const MAX_LAYER: u32 = 31;

/// Fractional digits used by the default fixed-point formatter.
pub const DEFAULT_DECIMALS: usize = 2;

// Conversion-value multiplier arithmetic.
//
// The platform rejects multipliers outside [0.5, 11.0]; clamping the
// raw weight up front avoids a round-trip mutation failure.

/// Lowest accepted raw weight (multiplier 0.5).
pub const MIN_WEIGHT: f64 = -0.5;

/// Highest accepted raw weight (multiplier 11.0).
pub const MAX_WEIGHT: f64 = 10.0;

/// The effective multiplier for a raw rule weight:
/// `1 + clamp(weight, -0.5, 10.0)`.
pub fn multiplier_for_weight(raw_weight: f64) -> f64 {
    1.0 + raw_weight.clamp(MIN_WEIGHT, MAX_WEIGHT)
}

/// Compare two multiplier values for reconciliation purposes.
///
/// The platform stores the value as a double; exact equality is fine
/// for values we wrote ourselves but a small tolerance guards against
/// representation drift through the JSON round trip.
pub fn values_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

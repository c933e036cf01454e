/// Smallest power of two that is `>= value`, found by doubling from 1.
///
/// `0` rounds to `1`. Returns `None` when the result does not fit in a `u32`.
pub fn round_up_power_of_two(value: u32) -> Option<u32> {
    let mut pot = 1u32;
    while pot < value {
        pot = pot.checked_mul(2)?;
    }
    Some(pot)
}

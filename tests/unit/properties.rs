//! Property tests for the motion engine.

use proptest::prelude::*;

use stepburst::config::units::UnitExt;
use stepburst::{MotionEngine, QFormat};

fn engine(velocity: u32, acceleration: u32, bits: u8) -> MotionEngine {
    let mut engine = MotionEngine::new(velocity.counts_per_sec(), acceleration.counts_per_sec2());
    engine.set_fractional_bits(QFormat::new(bits).unwrap()).unwrap();
    engine.enable();
    engine
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Bursts sum to the commanded distance and never step backwards.
    #[test]
    fn bursts_sum_to_distance(
        velocity in 1_000u32..=100_000,
        acceleration in 1_000u32..=2_000_000,
        bits in 1u8..=16,
        distance in -30_000i32..=30_000,
    ) {
        let mut engine = engine(velocity, acceleration, bits);
        prop_assert!(engine.accept_move(distance));

        let mut sum = 0i64;
        while engine.is_command_pending() {
            let burst = engine.advance_one_tick();
            prop_assert!(burst as i64 * distance as i64 >= 0);
            sum += burst as i64;
        }

        prop_assert_eq!(sum, distance as i64);
        prop_assert_eq!(engine.commanded_position().value(), distance as i64);
    }

    /// A move no longer than twice the per-tick acceleration finishes at once.
    #[test]
    fn short_moves_finish_in_one_tick(
        acceleration in 1_000u32..=4_000_000,
        distance in -3i32..=3,
    ) {
        let mut engine = engine(100_000, acceleration, 10);
        let half = (distance.unsigned_abs() as i64 * 1024) / 2;
        prop_assume!(half <= engine.limits().acceleration_q);

        prop_assert!(engine.accept_move(distance));
        prop_assert_eq!(engine.advance_one_tick(), distance);
        prop_assert!(!engine.is_command_pending());
    }

    /// A bounded stop requested inside the bounds comes to rest inside them.
    #[test]
    fn bounded_stop_stays_within_bounds(
        velocity in 1_000u32..=100_000,
        acceleration in 1_000u32..=2_000_000,
        distance in prop_oneof![-30_000i32..=-1, 1i32..=30_000],
        min in -30_000i64..=-1,
        max in 1i64..=30_000,
        ticks_before_stop in 1u32..400,
        stop_distance in 0u32..50_000,
    ) {
        let mut engine = engine(velocity, acceleration, 10);
        engine.configure_travel_bounds(min, max);
        prop_assert!(engine.accept_move(distance));

        for _ in 0..ticks_before_stop {
            engine.advance_one_tick();
        }
        let position = engine.commanded_position().value();
        prop_assume!(engine.is_command_pending() && (min..=max).contains(&position));

        engine.request_stop_over_distance(stop_distance);
        while engine.is_command_pending() {
            engine.advance_one_tick();
            let position = engine.commanded_position().value();
            prop_assert!((min..=max).contains(&position));
        }
    }

    /// Once busy, every further command is refused without side effects.
    #[test]
    fn busy_engine_rejects_commands(
        distance in 100i32..=10_000,
        second in any::<i32>(),
        ticks in 0u32..50,
    ) {
        let mut engine = engine(20_000, 400_000, 10);
        prop_assert!(engine.accept_move(distance));
        for _ in 0..ticks {
            engine.advance_one_tick();
        }

        let before = (engine.position_q(), engine.velocity_q(), engine.phase(), *engine.timing());
        prop_assert!(!engine.accept_move(second));
        prop_assert!(!engine.accept_fast_move(second));
        prop_assert_eq!(before, (engine.position_q(), engine.velocity_q(), engine.phase(), *engine.timing()));
    }
}

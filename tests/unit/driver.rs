//! Unit tests for the step/direction axis driver.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};

use stepburst::config::units::UnitExt;
use stepburst::error::{ConfigError, Error};
use stepburst::{AxisDriverBuilder, ProfilePhase, Steps};

/// Output pin that counts rising edges.
#[derive(Default)]
struct CountingPin {
    rises: u32,
    high: bool,
}

impl ErrorType for CountingPin {
    type Error = Infallible;
}

impl OutputPin for CountingPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            self.rises += 1;
        }
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }
}

#[test]
fn test_enable_direction_and_pulses() {
    let step = PinMock::new(&[
        PinTransaction::set(State::High),
        PinTransaction::set(State::Low),
        PinTransaction::set(State::High),
        PinTransaction::set(State::Low),
        PinTransaction::set(State::High),
        PinTransaction::set(State::Low),
    ]);
    let dir = PinMock::new(&[PinTransaction::set(State::High)]);
    let en = PinMock::new(&[PinTransaction::set(State::High)]);

    let axis = AxisDriverBuilder::new()
        .name("x")
        .step_pin(step)
        .dir_pin(dir)
        .enable_pin(en)
        .delay(NoopDelay::new())
        .max_velocity(100_000u32.counts_per_sec())
        .max_acceleration(20_000u32.counts_per_sec2())
        .build()
        .unwrap();
    assert_eq!(axis.state_name(), "Disabled");

    let mut axis = axis.enable().map_err(|(_, e)| e).unwrap();
    assert_eq!(axis.state_name(), "Enabled");

    assert!(axis.move_fast(3).unwrap());
    assert!(axis.is_moving());
    assert_eq!(axis.tick().unwrap(), 3);
    assert!(!axis.is_moving());
    assert!(!axis.is_command_pending());
    assert_eq!(axis.commanded_position(), Steps(3));

    let (mut step, mut dir, mut en, _) = axis.release();
    step.done();
    dir.done();
    en.done();
}

#[test]
fn test_inverted_direction_written_only_on_change() {
    let dir = PinMock::new(&[
        PinTransaction::set(State::High),
        PinTransaction::set(State::Low),
    ]);

    let axis = AxisDriverBuilder::new()
        .step_pin(CountingPin::default())
        .dir_pin(dir)
        .enable_pin(CountingPin::default())
        .delay(NoopDelay::new())
        .max_velocity(100_000u32.counts_per_sec())
        .max_acceleration(20_000u32.counts_per_sec2())
        .invert_direction(true)
        .build()
        .unwrap();
    let mut axis = axis.enable().map_err(|(_, e)| e).unwrap();

    // Reverse with inversion drives DIR high
    assert!(axis.move_fast(-2).unwrap());
    axis.tick().unwrap();
    assert!(axis.move_fast(-1).unwrap());
    axis.tick().unwrap();
    assert!(axis.move_fast(4).unwrap());
    axis.tick().unwrap();

    assert_eq!(axis.commanded_position(), Steps(1));
    let (step, mut dir, _, _) = axis.release();
    assert_eq!(step.rises, 7);
    dir.done();
}

#[test]
fn test_busy_driver_writes_nothing() {
    let dir = PinMock::new(&[PinTransaction::set(State::High)]);

    let axis = AxisDriverBuilder::new()
        .step_pin(CountingPin::default())
        .dir_pin(dir)
        .enable_pin(CountingPin::default())
        .delay(NoopDelay::new())
        .max_velocity(100_000u32.counts_per_sec())
        .max_acceleration(20_000u32.counts_per_sec2())
        .build()
        .unwrap();
    let mut axis = axis.enable().map_err(|(_, e)| e).unwrap();

    assert!(axis.move_by(1000).unwrap());
    assert!(!axis.move_by(-5).unwrap());
    assert!(!axis.move_fast(-5).unwrap());

    let (_, mut dir, _, _) = axis.release();
    dir.done();
}

#[test]
fn test_full_move_pulses_every_step() {
    let axis = AxisDriverBuilder::new()
        .step_pin(CountingPin::default())
        .dir_pin(CountingPin::default())
        .enable_pin(CountingPin::default())
        .delay(NoopDelay::new())
        .max_velocity(20_000u32.counts_per_sec())
        .max_acceleration(400_000u32.counts_per_sec2())
        .build()
        .unwrap();
    let mut axis = axis.enable().map_err(|(_, e)| e).unwrap();

    assert!(axis.move_to(Steps(2000)).unwrap());
    let mut sum = 0;
    while axis.is_command_pending() {
        sum += axis.tick().unwrap();
    }
    assert_eq!(sum, 2000);

    assert!(axis.move_to(Steps(1500)).unwrap());
    while axis.is_command_pending() {
        axis.tick().unwrap();
    }
    assert_eq!(axis.commanded_position(), Steps(1500));

    let (step, _, _, _) = axis.release();
    assert_eq!(step.rises, 2500);
}

#[test]
fn test_stop_and_disable() {
    let en = PinMock::new(&[
        PinTransaction::set(State::High),
        PinTransaction::set(State::Low),
    ]);

    let axis = AxisDriverBuilder::new()
        .step_pin(CountingPin::default())
        .dir_pin(CountingPin::default())
        .enable_pin(en)
        .delay(NoopDelay::new())
        .max_velocity(20_000u32.counts_per_sec())
        .max_acceleration(400_000u32.counts_per_sec2())
        .build()
        .unwrap();
    let mut axis = axis.enable().map_err(|(_, e)| e).unwrap();
    axis.configure_travel_bounds(-1000, 3000);

    assert!(axis.move_by(20_000).unwrap());
    for _ in 0..150 {
        axis.tick().unwrap();
    }
    axis.stop_over_distance(100_000);
    assert_eq!(axis.phase(), ProfilePhase::DecelSetup);
    while axis.is_command_pending() {
        axis.tick().unwrap();
    }
    assert_eq!(axis.commanded_position(), Steps(3000));

    assert!(axis.move_by(-100).unwrap());
    axis.tick().unwrap();
    axis.halt();
    assert!(!axis.is_command_pending());

    let axis = axis.disable().map_err(|(_, e)| e).unwrap();
    assert!(!axis.engine().is_enabled());

    let (_, _, mut en, _) = axis.release();
    en.done();
}

#[test]
fn test_missing_pin_is_reported() {
    let result = AxisDriverBuilder::<CountingPin, CountingPin, CountingPin, NoopDelay>::new()
        .step_pin(CountingPin::default())
        .dir_pin(CountingPin::default())
        .delay(NoopDelay::new())
        .max_velocity(20_000u32.counts_per_sec())
        .max_acceleration(400_000u32.counts_per_sec2())
        .build();

    match result {
        Err(Error::Config(ConfigError::ParseError(msg))) => {
            assert_eq!(msg.as_str(), "enable_pin is required")
        }
        _ => panic!("expected a missing-field error"),
    }
}

#[test]
fn test_build_from_system_config() {
    let config = stepburst::parse_config(
        r#"
[axes.x]
name = "X"
max_velocity_counts_per_sec = 100000
max_acceleration_counts_per_sec2 = 20000
"#,
    )
    .unwrap();

    let axis = AxisDriverBuilder::new()
        .from_config(&config, "x")
        .unwrap()
        .step_pin(CountingPin::default())
        .dir_pin(CountingPin::default())
        .enable_pin(CountingPin::default())
        .delay(NoopDelay::new())
        .build()
        .unwrap();
    assert_eq!(axis.name(), "X");
    assert_eq!(axis.engine().limits().acceleration_q, 5);

    let missing = AxisDriverBuilder::<CountingPin, CountingPin, CountingPin, NoopDelay>::new()
        .from_config(&config, "y");
    assert!(matches!(
        missing,
        Err(Error::Config(ConfigError::AxisNotFound(_)))
    ));
}

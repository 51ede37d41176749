//! Unit tests for the active-low feedback input.

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};

use stepburst::FeedbackInput;

#[test]
fn test_low_is_asserted() {
    let pin = PinMock::new(&[
        PinTransaction::get(State::Low),
        PinTransaction::get(State::High),
    ]);
    let mut feedback = FeedbackInput::new(pin);

    assert!(feedback.is_asserted().unwrap());
    assert!(!feedback.is_asserted().unwrap());

    let mut pin = feedback.release();
    pin.done();
}

#[test]
fn test_wait_until_asserted() {
    let pin = PinMock::new(&[
        PinTransaction::get(State::High),
        PinTransaction::get(State::High),
        PinTransaction::get(State::Low),
    ]);
    let mut feedback = FeedbackInput::new(pin);

    assert!(feedback.wait_asserted(&mut NoopDelay::new(), 1000, 10).unwrap());

    let mut pin = feedback.release();
    pin.done();
}

#[test]
fn test_wait_times_out() {
    let pin = PinMock::new(&[
        PinTransaction::get(State::High),
        PinTransaction::get(State::High),
        PinTransaction::get(State::High),
    ]);
    let mut feedback = FeedbackInput::new(pin);

    assert!(!feedback.wait_asserted(&mut NoopDelay::new(), 20, 10).unwrap());

    let mut pin = feedback.release();
    pin.done();
}

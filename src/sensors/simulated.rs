//! Stand-in sensors for simulation mode.
//!
//! Motion comes from the keyboard: space or enter shakes the board, `q`,
//! Esc or Ctrl-C asks the loop to stop. The terminal is in raw mode, so
//! Ctrl-C arrives here as a key rather than as SIGINT.

use super::{MotionSample, MotionSensor, TemperatureSensor};
use crate::error::SensorError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Board lying flat: gravity on Z only.
pub const RESTING: MotionSample = MotionSample::new(0.0, 0.0, 1.0);

const POLL_TIMEOUT: Duration = Duration::from_millis(10);

/// Actions that can be performed based on user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Shake,
    Quit,
    None,
}

/// Map a key event to a simulator action
pub fn map_key_to_action(key_event: KeyEvent) -> InputAction {
    if key_event.kind == KeyEventKind::Release {
        return InputAction::None;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Quit
        }

        KeyCode::Char(' ') | KeyCode::Enter => InputAction::Shake,

        _ => InputAction::None,
    }
}

/// A random shake strong enough to pass default thresholds, random signs.
pub fn shake_sample<R: Rng + ?Sized>(rng: &mut R) -> MotionSample {
    let mut axis = || {
        let magnitude = rng.gen_range(2.5..4.0);
        if rng.gen_bool(0.5) { magnitude } else { -magnitude }
    };
    MotionSample::new(axis(), axis(), axis())
}

pub struct KeyboardMotion {
    stop: Arc<AtomicBool>,
}

impl KeyboardMotion {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        Self { stop }
    }

    fn apply(&self, action: InputAction) -> MotionSample {
        match action {
            InputAction::Shake => shake_sample(&mut rand::thread_rng()),
            InputAction::Quit => {
                tracing::info!("Quit requested from keyboard");
                self.stop.store(true, Ordering::SeqCst);
                RESTING
            }
            InputAction::None => RESTING,
        }
    }
}

impl MotionSensor for KeyboardMotion {
    fn read_acceleration(&mut self) -> Result<MotionSample, SensorError> {
        let action = poll_action(POLL_TIMEOUT)
            .map_err(|e| SensorError::ReadError(format!("keyboard: {}", e)))?;
        Ok(self.apply(action))
    }
}

fn poll_action(timeout: Duration) -> std::io::Result<InputAction> {
    if event::poll(timeout)? {
        if let Event::Key(key_event) = event::read()? {
            return Ok(map_key_to_action(key_event));
        }
    }
    Ok(InputAction::None)
}

/// Always reports the same temperature.
pub struct FixedTemperature {
    celsius: f64,
}

impl FixedTemperature {
    pub fn new(celsius: f64) -> Self {
        Self { celsius }
    }
}

impl TemperatureSensor for FixedTemperature {
    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        Ok(self.celsius)
    }
}

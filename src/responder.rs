//! The magic 8-ball loop.
//!
//! Sense, decide, display, forever: read the accelerometer, and if every
//! axis is past its threshold scroll a random answer, otherwise blank the
//! matrix. There is no debounce; a board that keeps shaking keeps answering.

use crate::board::SenseBoard;
use crate::config::ResponderSettings;
use crate::error::{AppError, Result, SensorError, ServiceError};
use crate::palette::TextColors;
use crate::responses::{PROMPT, Response, ResponseSet, celsius_to_fahrenheit, truncate_celsius};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// What the matrix is doing between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderState {
    /// Blank, waiting for a shake
    Idle,
    /// Just scrolled an answer
    Responding,
}

/// Result of one loop iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Shake detected, this text was scrolled
    Responded(String),
    /// No shake, display cleared
    Cleared,
}

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub iterations: u64,
    pub shakes: u64,
    pub failures: u64,
}

pub struct GestureResponder<B, R> {
    settings: ResponderSettings,
    responses: ResponseSet,
    board: B,
    rng: R,
    state: ResponderState,
}

impl<B: SenseBoard, R: Rng> GestureResponder<B, R> {
    pub fn new(settings: ResponderSettings, responses: ResponseSet, board: B, rng: R) -> Self {
        Self {
            settings,
            responses,
            board,
            rng,
            state: ResponderState::Idle,
        }
    }

    pub fn state(&self) -> ResponderState {
        self.state
    }

    /// Scroll the prompt once, in the default colors.
    pub fn greet(&mut self) -> Result<()> {
        self.board
            .show_message(PROMPT, self.settings.scroll_speed, TextColors::default())?;
        Ok(())
    }

    /// One pass of sense, decide, display.
    ///
    /// The state is `Responding` only after an answer was scrolled; a clear or
    /// a failed iteration leaves it `Idle`.
    pub fn step(&mut self) -> Result<Outcome> {
        let outcome = self.sense_and_display();
        self.state = match &outcome {
            Ok(Outcome::Responded(_)) => ResponderState::Responding,
            _ => ResponderState::Idle,
        };
        outcome
    }

    fn sense_and_display(&mut self) -> Result<Outcome> {
        let sample = self.board.read_acceleration()?;

        if !self.settings.thresholds.is_shake(&sample) {
            self.board.clear_display()?;
            tracing::trace!(?sample, "no shake, display cleared");
            return Ok(Outcome::Cleared);
        }

        let text = match self.responses.choose(&mut self.rng) {
            Response::Verbatim(text) => text.clone(),
            Response::Temperature(template) => {
                let celsius = self.board.read_temperature()?;
                if !celsius.is_finite() {
                    return Err(SensorError::ReadError(format!(
                        "temperature reading is not a number: {}",
                        celsius
                    ))
                    .into());
                }
                let fahrenheit = celsius_to_fahrenheit(truncate_celsius(celsius));
                tracing::debug!(celsius, fahrenheit, "temperature for answer");
                template.render(fahrenheit)
            }
        };

        tracing::info!(?sample, answer = %text, "shake detected");
        self.board
            .show_message(&text, self.settings.scroll_speed, self.settings.colors)?;
        Ok(Outcome::Responded(text))
    }

    /// Greet, then step until `stop` is set.
    ///
    /// A failed iteration is logged and skipped. With a positive
    /// `max_consecutive_failures` the loop gives up once that many fail in
    /// a row.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<RunSummary> {
        self.greet()?;
        tracing::info!(
            responses = self.responses.len(),
            scroll_speed = self.settings.scroll_speed,
            thresholds = ?self.settings.thresholds,
            "Waiting for a shake"
        );

        let mut summary = RunSummary::default();
        let mut consecutive_failures = 0u32;

        while !stop.load(Ordering::SeqCst) {
            summary.iterations += 1;
            match self.step() {
                Ok(outcome) => {
                    consecutive_failures = 0;
                    if let Outcome::Responded(_) = outcome {
                        summary.shakes += 1;
                    }
                }
                Err(e) => {
                    summary.failures += 1;
                    consecutive_failures += 1;
                    tracing::warn!(consecutive_failures, "Skipping iteration: {}", e);

                    let limit = self.settings.max_consecutive_failures;
                    if limit > 0 && consecutive_failures >= limit {
                        tracing::error!("Giving up after {} consecutive failures", limit);
                        return Err(AppError::Service(ServiceError::TooManyFailures(limit)));
                    }
                    thread::sleep(self.settings.failure_backoff);
                }
            }
        }

        tracing::info!(
            iterations = summary.iterations,
            shakes = summary.shakes,
            failures = summary.failures,
            "Responder stopped"
        );
        Ok(summary)
    }
}

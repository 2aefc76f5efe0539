//! The magic 8-ball's answers.
//!
//! Every answer is fixed text except one, which reports the room temperature
//! in Fahrenheit. The temperature comes from the Sense HAT humidity sensor and
//! is known to read high; it is shown as-is.

use rand::Rng;

/// Message scrolled once at startup.
pub const PROMPT: &str = "Ask a question and shake me up!";

/// Text with a single slot for a Fahrenheit reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemperatureTemplate {
    prefix: String,
    suffix: String,
}

impl TemperatureTemplate {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Fill the slot with `fahrenheit`.
    pub fn render(&self, fahrenheit: f64) -> String {
        format!("{}{}{}", self.prefix, format_fahrenheit(fahrenheit), self.suffix)
    }
}

/// One candidate answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Response {
    Verbatim(String),
    Temperature(TemperatureTemplate),
}

impl Response {
    pub fn verbatim(text: impl Into<String>) -> Self {
        Response::Verbatim(text.into())
    }
}

/// Ordered, non-empty list of answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSet {
    responses: Vec<Response>,
}

impl Default for ResponseSet {
    fn default() -> Self {
        Self {
            responses: vec![
                Response::verbatim("But of course!"),
                Response::verbatim("Heavens, no!"),
                Response::verbatim("Definitely!"),
                Response::verbatim("Don't know, don't care."),
                Response::Temperature(TemperatureTemplate::new(
                    "I don't know about that, but I do know it's ",
                    " degrees in here now.",
                )),
            ],
        }
    }
}

impl ResponseSet {
    /// Returns `None` for an empty list.
    pub fn new(responses: Vec<Response>) -> Option<Self> {
        if responses.is_empty() {
            None
        } else {
            Some(Self { responses })
        }
    }

    /// Pick one response uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &Response {
        // `new` and `default` never build an empty set
        &self.responses[rng.gen_range(0..self.responses.len())]
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Response> {
        self.responses.iter()
    }
}

/// Truncate a Celsius reading toward zero.
///
/// The conversion below works on whole degrees Celsius, so a reading of
/// 21.9 °C is reported as 69.8 °F rather than 71.4 °F. This keeps the output
/// identical to the classic Sense HAT demo but loses up to 1.8 °F.
pub fn truncate_celsius(celsius: f64) -> i64 {
    celsius.trunc() as i64
}

/// `F = C * 9 / 5 + 32`
pub fn celsius_to_fahrenheit(celsius: i64) -> f64 {
    (celsius as f64 * 9.0) / 5.0 + 32.0
}

/// Shortest round-trip decimal, always with a fractional part (`68.0`).
pub fn format_fahrenheit(fahrenheit: f64) -> String {
    format!("{fahrenheit:?}")
}

use std::time::Duration;

/// Characters revealed per tick
pub const DEFAULT_STEP: usize = 3;

/// Delay between ticks
pub const DEFAULT_SPEED: Duration = Duration::from_millis(15);

/// Progressive reveal of a freshly arrived answer
///
/// Iterating yields growing prefixes of the text, `step` characters at a
/// time. A disabled typewriter yields the whole text in one frame; an empty
/// text yields nothing.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Byte offset just past each char
    boundaries: Vec<usize>,
    revealed: usize,
    step: usize,
    speed: Duration,
    enabled: bool,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let boundaries = text
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        Self {
            text,
            boundaries,
            revealed: 0,
            step: DEFAULT_STEP,
            speed: DEFAULT_SPEED,
            enabled: true,
        }
    }

    /// Reveal everything at once (historical messages)
    pub fn disabled(text: impl Into<String>) -> Self {
        Self::new(text).enabled(false)
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_step(mut self, step: usize) -> Self {
        self.step = step.max(1);
        self
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn is_typing(&self) -> bool {
        self.revealed < self.boundaries.len()
    }

    /// Text shown so far
    pub fn displayed(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.text[..self.boundaries[n - 1]],
        }
    }

    /// Jump straight to the full text
    pub fn skip_to_end(&mut self) -> &str {
        self.revealed = self.boundaries.len();
        &self.text
    }
}

impl Iterator for Typewriter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.is_typing() {
            return None;
        }
        self.revealed = if self.enabled {
            (self.revealed + self.step).min(self.boundaries.len())
        } else {
            self.boundaries.len()
        };
        Some(self.displayed().to_string())
    }
}

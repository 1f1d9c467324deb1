#![forbid(unsafe_code)]

//! Count-up labels such as `"88K+"` or `"1,200"`.
//!
//! Every ASCII digit in the label contributes to the target value, in order;
//! every other character is kept, in order, as the suffix re-appended to each
//! intermediate value. `"88K+"` counts `0K+`, `1K+`, ... `88K+`.
//!
//! [`CountUpRegistry`] keeps one entry per counted element: the label text
//! seen the first time (so a later trigger never parses a half-counted
//! value) and the run currently driving it (so a newer run replaces, and
//! cancels, the older one).

use core::time::Duration;

use crate::animation::Tween;

/// A label split into its numeric target and the text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountUpLabel {
    pub value: u64,
    pub suffix: String,
}

impl CountUpLabel {
    /// Split `text`. Returns `None` when it has no digits or the digits do
    /// not fit in a `u64`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (digits, suffix): (String, String) = text.chars().partition(char::is_ascii_digit);
        let value = digits.parse::<u64>().ok()?;
        Some(Self { value, suffix })
    }

    /// Text shown for an intermediate value.
    #[must_use]
    pub fn render(&self, value: i64) -> String {
        format!("{value}{}", self.suffix)
    }

    /// Text shown before the count starts.
    #[must_use]
    pub fn zero_text(&self) -> String {
        self.render(0)
    }

    /// The label as it reads once the count has finished.
    #[must_use]
    pub fn final_text(&self) -> String {
        format!("{}{}", self.value, self.suffix)
    }

    /// Whether there is anything to count.
    #[must_use]
    pub const fn is_countable(&self) -> bool {
        self.value > 0
    }

    /// Tween from zero to the target value.
    #[must_use]
    pub fn tween(&self, duration: Duration) -> Tween {
        let to = i64::try_from(self.value).unwrap_or(i64::MAX);
        Tween::new(0, to, duration)
    }
}

struct Entry<K, R> {
    key: K,
    text: String,
    run: Option<R>,
}

/// Cached labels and in-flight runs, keyed by element.
///
/// `R` is the host's run handle; dropping it must cancel the run.
pub struct CountUpRegistry<K, R> {
    entries: Vec<Entry<K, R>>,
}

impl<K, R> Default for CountUpRegistry<K, R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq + Clone, R> CountUpRegistry<K, R> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|e| e.key == *key)
    }

    /// Label for `key`. The first call caches `live_text`; later calls
    /// ignore it and re-parse the cached text.
    pub fn label(&mut self, key: &K, live_text: &str) -> Option<CountUpLabel> {
        let index = match self.position(key) {
            Some(index) => index,
            None => {
                self.entries.push(Entry {
                    key: key.clone(),
                    text: live_text.to_string(),
                    run: None,
                });
                self.entries.len() - 1
            }
        };
        CountUpLabel::parse(&self.entries[index].text)
    }

    /// Record `run` as the one driving `key`. Returns the run it replaces,
    /// which the caller drops to cancel.
    pub fn track(&mut self, key: &K, run: R) -> Option<R> {
        match self.position(key) {
            Some(index) => self.entries[index].run.replace(run),
            None => {
                self.entries.push(Entry {
                    key: key.clone(),
                    text: String::new(),
                    run: Some(run),
                });
                None
            }
        }
    }

    /// Number of elements with a run attached.
    #[must_use]
    pub fn running(&self) -> usize {
        self.entries.iter().filter(|e| e.run.is_some()).count()
    }

    /// Drop every run and forget every label. Returns each element that had
    /// a run together with its cached text, so the host can restore it.
    pub fn clear(&mut self) -> Vec<(K, String)> {
        self.entries
            .drain(..)
            .filter(|e| e.run.is_some())
            .map(|e| (e.key, e.text))
            .collect()
    }
}

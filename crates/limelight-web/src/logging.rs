#![forbid(unsafe_code)]

//! Tracing layer that writes formatted events to the browser console.
//!
//! Each event becomes one line, `LEVEL target: message key=value ...`, handed
//! to a [`ConsoleSink`]. In the browser the sink is the devtools console
//! (`console.error` / `warn` / `info` / `log` / `debug` chosen by level);
//! tests capture lines in memory instead.
//!
//! ```ignore
//! use tracing_subscriber::prelude::*;
//!
//! let layer = ConsoleLayer::new(BrowserConsole);
//! tracing_subscriber::registry().with(layer).init();
//! ```

use std::fmt::{self, Write as FmtWrite};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Destination for formatted log lines.
pub trait ConsoleSink: Send + Sync + 'static {
    fn write_line(&self, level: Level, line: &str);
}

/// Which parts of an event are rendered.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Show log level. Default: true.
    pub show_level: bool,
    /// Show the tracing target. Default: true.
    pub show_target: bool,
    /// Show structured fields beyond `message`. Default: true.
    pub show_fields: bool,
    /// Drop events below this level. Default: `DEBUG`.
    pub max_level: Level,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            show_level: true,
            show_target: true,
            show_fields: true,
            max_level: Level::DEBUG,
        }
    }
}

/// Fixed-width level label.
fn level_str(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN ",
        Level::INFO => "INFO ",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Collects the message and structured fields of an event.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        let unquoted = rendered
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .map(str::to_string)
            .unwrap_or(rendered);
        self.push(field, unquoted);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value.to_string());
    }
}

/// A `tracing_subscriber::Layer` rendering events to a [`ConsoleSink`].
pub struct ConsoleLayer<S> {
    sink: S,
    config: ConsoleConfig,
}

impl<S: ConsoleSink> ConsoleLayer<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, ConsoleConfig::default())
    }

    pub fn with_config(sink: S, config: ConsoleConfig) -> Self {
        Self { sink, config }
    }

    #[must_use]
    pub fn max_level(mut self, level: Level) -> Self {
        self.config.max_level = level;
        self
    }

    fn format_event(&self, event: &Event<'_>) -> String {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut line = String::new();
        if self.config.show_level {
            line.push_str(level_str(*metadata.level()));
            line.push(' ');
        }
        if self.config.show_target {
            let _ = write!(line, "{}: ", metadata.target());
        }
        line.push_str(visitor.message.as_deref().unwrap_or_default());
        if self.config.show_fields {
            for (k, v) in &visitor.fields {
                let _ = write!(line, " {k}={v}");
            }
        }
        line
    }
}

impl<S, Sub> Layer<Sub> for ConsoleLayer<S>
where
    S: ConsoleSink,
    Sub: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, Sub>) {
        let level = *event.metadata().level();
        // Level ordering: TRACE > DEBUG > ... > ERROR.
        if level > self.config.max_level {
            return;
        }
        let line = self.format_event(event);
        self.sink.write_line(level, &line);
    }
}

/// The devtools console.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConsole;

#[cfg(target_arch = "wasm32")]
impl ConsoleSink for BrowserConsole {
    fn write_line(&self, level: Level, line: &str) {
        let value = wasm_bindgen::JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&value),
            Level::WARN => web_sys::console::warn_1(&value),
            Level::INFO => web_sys::console::info_1(&value),
            Level::DEBUG => web_sys::console::log_1(&value),
            Level::TRACE => web_sys::console::debug_1(&value),
        }
    }
}

/// Install the console layer as the global subscriber. Later calls are
/// ignored (a subscriber is already set).
#[cfg(target_arch = "wasm32")]
pub fn init(max_level: Level) {
    use tracing_subscriber::prelude::*;

    let layer = ConsoleLayer::new(BrowserConsole).max_level(max_level);
    let _ = tracing_subscriber::registry().with(layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::prelude::*;

    #[derive(Clone, Default)]
    struct CaptureSink {
        lines: Arc<Mutex<Vec<(Level, String)>>>,
    }

    impl CaptureSink {
        fn snapshot(&self) -> Vec<(Level, String)> {
            self.lines.lock().expect("capture lock").clone()
        }
    }

    impl ConsoleSink for CaptureSink {
        fn write_line(&self, level: Level, line: &str) {
            self.lines
                .lock()
                .expect("capture lock")
                .push((level, line.to_string()));
        }
    }

    fn capture<F: FnOnce()>(config: ConsoleConfig, f: F) -> Vec<(Level, String)> {
        let sink = CaptureSink::default();
        let subscriber =
            tracing_subscriber::registry().with(ConsoleLayer::with_config(sink.clone(), config));
        tracing::subscriber::with_default(subscriber, f);
        sink.snapshot()
    }

    #[test]
    fn formats_level_target_message_and_fields() {
        let lines = capture(ConsoleConfig::default(), || {
            tracing::warn!(target: "limelight::navigation", selector = "#nav-toggle", "element missing");
        });
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::WARN);
        assert_eq!(
            lines[0].1,
            "WARN  limelight::navigation: element missing selector=#nav-toggle"
        );
    }

    #[test]
    fn numeric_and_bool_fields() {
        let config = ConsoleConfig {
            show_level: false,
            show_target: false,
            ..ConsoleConfig::default()
        };
        let lines = capture(config, || {
            tracing::info!(count = 7u64, ok = true, ratio = 0.5, "attached");
        });
        assert_eq!(lines[0].1, "attached count=7 ok=true ratio=0.5");
    }

    #[test]
    fn events_below_max_level_are_dropped() {
        let config = ConsoleConfig {
            max_level: Level::INFO,
            ..ConsoleConfig::default()
        };
        let lines = capture(config, || {
            tracing::debug!("noisy");
            tracing::trace!("noisier");
            tracing::error!("kept");
        });
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::ERROR);
    }
}

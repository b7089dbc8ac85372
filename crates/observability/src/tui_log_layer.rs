//! Tracing layer that forwards one formatted line per event to a [LogSink].

use std::fmt::Write;

use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};

use crate::config::LogSink;

/// Longest line handed to the sink, in characters.
const MAX_LINE_CHARS: usize = 4_000;

/// Collects `message` first, then `key=value` pairs in field order.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn push_field(&mut self, name: &str, value: std::fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        write!(self.fields, "{}={}", name, value).ok();
    }

    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push_field(field.name(), format_args!("{:.2}", value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            write!(self.message, "{:?}", value).ok();
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

/// "[LEVEL] target: message key=value ...", truncated to [MAX_LINE_CHARS].
fn format_line(event: &tracing::Event<'_>) -> String {
    let meta = event.metadata();
    let mut visitor = LineVisitor::default();
    event.record(&mut visitor);
    let rest = visitor.finish();
    let line = if rest.is_empty() {
        format!("[{}] {}", meta.level(), meta.target())
    } else {
        format!("[{}] {}: {}", meta.level(), meta.target(), rest)
    };
    let total = line.chars().count();
    if total > MAX_LINE_CHARS {
        let trunc: String = line.chars().take(MAX_LINE_CHARS).collect();
        format!("{}… ({} chars)", trunc, total)
    } else {
        line
    }
}

/// Layer that sends each formatted event to the given sink when present. The sink must not block.
pub(crate) fn tui_log_layer(sink: Option<LogSink>) -> TuiLogLayer {
    TuiLogLayer { sink }
}

#[derive(Clone)]
pub(crate) struct TuiLogLayer {
    sink: Option<LogSink>,
}

impl<S> Layer<S> for TuiLogLayer
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if let Some(ref sink) = self.sink {
            sink(format_line(event));
        }
    }
}

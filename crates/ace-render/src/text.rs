use ace_types::{Decision, TraceEntry};

/// Outcome on the first line; with `trace`, one indented line per trace entry.
///
/// No trailing newline.
pub fn render_text(decision: &Decision, trace: bool) -> String {
    let mut out = decision.outcome.as_str().to_string();
    if trace {
        for entry in &decision.trace {
            out.push('\n');
            out.push_str(&render_trace_line(entry));
        }
    }
    out
}

/// `  <kind>: ok=<bool> <detail>`, without the trailing space when there is no detail.
pub fn render_trace_line(entry: &TraceEntry) -> String {
    let line = format!(
        "  {}: ok={} {}",
        entry.kind(),
        entry.ok(),
        entry.detail().unwrap_or_default()
    );
    line.trim_end().to_string()
}

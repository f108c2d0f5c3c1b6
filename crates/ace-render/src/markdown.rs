use ace_types::Decision;

pub fn render_markdown(decision: &Decision, trace: bool) -> String {
    let mut out = String::new();

    out.push_str("# ace decision\n\n");
    out.push_str(&format!("- Decision: **{}**\n", decision.outcome));
    if let Some(id) = &decision.policy_id {
        out.push_str(&format!("- Policy: `{id}`\n"));
    }
    if let Some(reason) = &decision.reason {
        out.push_str(&format!("- Reason: {reason}\n"));
    }

    if !trace {
        return out;
    }

    out.push('\n');
    if decision.trace.is_empty() {
        out.push_str("No trace entries.\n");
        return out;
    }

    out.push_str("## Trace\n\n");
    out.push_str("| # | Step | Result | Detail |\n");
    out.push_str("|---|------|--------|--------|\n");
    for (i, entry) in decision.trace.iter().enumerate() {
        let result = if entry.ok() { "ok" } else { "fail" };
        let detail = entry
            .detail()
            .map(|d| escape_cell(&d))
            .unwrap_or_default();
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            i + 1,
            entry.kind(),
            result,
            detail
        ));
    }

    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

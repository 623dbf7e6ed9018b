//! Custom panic hook for structured crash reports.
//!
//! The report names the aggregation phase, the input file and the
//! connectivity mode in effect when the panic happened.

use super::context::{get_current_context, AggregationContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BOX_WIDTH: usize = 78;

/// Install the custom panic hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();

    eprintln!();
    print_header();
    print_panic_details(info);
    print_context_section(&context);
    print_backtrace_section();
    print_footer(&context);
}

fn rule(left: char, right: char) -> String {
    format!("{}{}{}", left, "═".repeat(BOX_WIDTH), right)
}

fn line(text: &str) -> String {
    format!("║  {:<width$}║", truncate(text, BOX_WIDTH - 3), width = BOX_WIDTH - 2)
}

fn print_header() {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    eprintln!("{}", rule('╔', '╗'));
    eprintln!("{}", line("CORRIDORMAP CRASH REPORT"));
    eprintln!("{}", rule('╠', '╣'));
    eprintln!("{}", line(&format!("Version: {}", VERSION)));
    eprintln!("{}", line(&format!("Platform: {}", std::env::consts::OS)));
    eprintln!("{}", line(&format!("Time: {}", timestamp)));
    eprintln!("{}", rule('╠', '╣'));
}

fn print_panic_details(info: &PanicHookInfo<'_>) {
    eprintln!("{}", line(&format!("PANIC: {}", extract_panic_message(info))));

    if let Some(location) = info.location() {
        eprintln!(
            "{}",
            line(&format!(
                "Location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            ))
        );
    }
}

fn context_lines(context: &AggregationContext) -> Vec<String> {
    let mut lines = vec!["OPERATION CONTEXT:".to_string()];
    match &context.phase {
        Some(phase) => lines.push(format!("  Phase: {}", phase)),
        None => lines.push("  Phase: (not set - crash occurred before aggregation started)".into()),
    }
    if let Some(mode) = &context.mode {
        lines.push(format!("  Mode: {}", mode));
    }
    if let Some(input) = &context.current_input {
        lines.push(format!("  Input: {}", input.display()));
    }
    lines
}

fn print_context_section(context: &AggregationContext) {
    eprintln!("{}", rule('╠', '╣'));
    for text in context_lines(context) {
        eprintln!("{}", line(&text));
    }

    let current_span = Span::current();
    if let Some(metadata) = current_span.metadata() {
        eprintln!("{}", line(&format!("  Span: {}", metadata.name())));
    }
}

fn print_backtrace_section() {
    eprintln!("{}", rule('╠', '╣'));

    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!("{}", line("STACK TRACE:"));
        eprintln!("{}", rule('╚', '╝'));
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("{}", line("Run with RUST_BACKTRACE=1 for stack trace"));
        eprintln!("{}", rule('╚', '╝'));
    }
}

fn print_footer(context: &AggregationContext) {
    if let Some(input) = &context.current_input {
        eprintln!();
        eprintln!("Include this crash report and the input file: {}", input.display());
    }
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::context::AggregationPhase;
    use std::path::PathBuf;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_long_string() {
        let result = truncate("this is a long string that needs truncation", 20);
        assert_eq!(result.chars().count(), 20);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn test_line_has_fixed_width() {
        assert_eq!(line("x").chars().count(), BOX_WIDTH + 2);
        assert_eq!(line(&"y".repeat(200)).chars().count(), BOX_WIDTH + 2);
    }

    #[test]
    fn test_context_lines() {
        let context = AggregationContext {
            phase: Some(AggregationPhase::Indexing),
            current_input: Some(PathBuf::from("roads.json")),
            mode: Some("segment".into()),
        };
        assert_eq!(
            context_lines(&context),
            vec![
                "OPERATION CONTEXT:",
                "  Phase: indexing",
                "  Mode: segment",
                "  Input: roads.json",
            ]
        );
    }
}

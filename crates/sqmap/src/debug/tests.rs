use super::*;
use crate::compile::StatementKind;
use crate::value::Value;
use std::sync::{Arc, Mutex};

type Calls = Arc<Mutex<Vec<(String, Vec<Value>, Duration)>>>;

fn recording_hook() -> (Calls, impl CompileHook + 'static) {
    let calls: Calls = Arc::default();
    let sink = Arc::clone(&calls);
    let hook = move |sql: &str, params: &[Value], elapsed: Duration| {
        sink.lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec(), elapsed));
    };
    (calls, hook)
}

fn compiled() -> Compiled {
    Compiled {
        kind: StatementKind::Select,
        sql: r#"SELECT * FROM "public"."t" WHERE "id"=$1;"#.to_string(),
        params: vec![Value::Int(1)],
        elapsed: Some(Duration::from_micros(42)),
    }
}

#[test]
fn test_defaults_are_disabled() {
    let options = DebugOptions::default();
    assert!(!options.enabled);
    assert!(!options.wants_query());
    assert!(!options.skips_execution());
    assert_eq!(options.level, Level::DEBUG);
    assert!(options.hook.is_none());
}

#[test]
fn test_print_all_implies_every_flag() {
    let options = DebugOptions::enabled().print_all();
    assert!(options.wants_query());
    assert!(options.wants_params());
    assert!(options.wants_timing());

    let only_params = DebugOptions::enabled().print_params();
    assert!(!only_params.wants_query());
    assert!(only_params.wants_params());
    assert!(!only_params.wants_timing());
}

#[test]
fn test_dry_run_requires_enabled() {
    assert!(!DebugOptions::new().dry_run().skips_execution());
    assert!(DebugOptions::enabled().dry_run().skips_execution());
}

#[test]
fn test_report_invokes_hook_when_enabled() {
    let (calls, hook) = recording_hook();
    let options = DebugOptions::enabled().print_all().hook(hook);
    report(&options, &compiled());

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, compiled().sql);
    assert_eq!(calls[0].1, vec![Value::Int(1)]);
    assert_eq!(calls[0].2, Duration::from_micros(42));
}

#[test]
fn test_report_is_silent_when_disabled() {
    let (calls, hook) = recording_hook();
    let options = DebugOptions::new().print_all().hook(hook);
    report(&options, &compiled());
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_debug_format_hides_hook_body() {
    let (_, hook) = recording_hook();
    let rendered = format!("{:?}", DebugOptions::enabled().hook(hook));
    assert!(rendered.contains("hook: true"));
    assert!(rendered.contains("enabled: true"));
}

#[test]
fn test_tracing_hook_truncation() {
    let hook = TracingHook::new().max_sql_length(10);
    assert_eq!(hook.truncate_sql("SELECT * FROM t"), "SELECT * F...");
    assert_eq!(hook.truncate_sql("SELECT 1"), "SELECT 1");
    assert_eq!(
        TracingHook::new().no_truncate().truncate_sql(&"x".repeat(500)).len(),
        500
    );
}

#[test]
fn test_truncate_respects_char_boundary() {
    // 'é' is two bytes; cutting at byte 2 would split it.
    assert_eq!(truncate_sql_bytes("aé", 2), "a");
    assert_eq!(truncate_sql_bytes("abc", 5), "abc");
}

#[test]
fn test_tracing_hook_is_a_compile_hook() {
    let options = DebugOptions::enabled().hook(TracingHook::new().level(Level::TRACE));
    report(&options, &compiled());
}

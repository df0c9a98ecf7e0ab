use chrono::{FixedOffset, TimeZone};
use std::sync::Arc;
use tagwise::context::Context;
use tagwise::emitter::TimestampFormat;
use tagwise::emitter::text::{TextEmitter, TextOption};
use tagwise::sink::MemorySink;
use tagwise::{Logger, LoggerOption};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;
#[cfg(target_arch = "wasm32")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn logger(out: &MemorySink, options: impl IntoIterator<Item = TextOption>) -> Logger {
    let time = FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 9, 8, 30, 0)
        .unwrap();
    Logger::new([
        LoggerOption::Emitter(Arc::new(TextEmitter::new(out.clone(), options))),
        LoggerOption::Caller,
        LoggerOption::fixed_time(time),
    ])
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn unpaired_tag_is_dropped() {
    let out = MemorySink::new();
    let logger = Logger::new([LoggerOption::to(out.clone())]);
    let ctx = Context::background().add_tags(["a", "b", "unpaired"]);
    logger.print(&ctx, "test");
    assert_eq!(out.contents(), "[a=b] test\n");
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn every_section() {
    let out = MemorySink::new();
    let logger = logger(
        &out,
        [
            TextOption::Prefix("svc ".into()),
            TextOption::DateFormat(TimestampFormat::Rfc3339),
            TextOption::Utc,
            TextOption::ShortFile,
        ],
    );
    let ctx = Context::background().add_tags(["k", "v", "k", "w"]);

    let line = line!() + 1;
    logger.print(&ctx, "hello");

    assert_eq!(
        out.contents(),
        format!("svc 2024-03-09T13:30:00Z text.rs:{line}: [k=v k=w] hello\n")
    );
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn local_offset_and_strftime() {
    let out = MemorySink::new();
    let logger = logger(
        &out,
        [TextOption::DateFormat(TimestampFormat::Strftime(
            "%Y/%m/%d %H:%M".into(),
        ))],
    );
    logger.print(&Context::background(), "m");
    assert_eq!(out.contents(), "2024/03/09 08:30 m\n");
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn callers_are_the_logging_lines() {
    let out = MemorySink::new();
    let logger = logger(&out, [TextOption::ShortFile]);
    let ctx = Context::background();

    let line = line!() + 1;
    logger.print(&ctx, "print");
    logger.print_fmt(&ctx, format_args!("{}", "print_fmt"));
    logger.output(&ctx, "output");
    tagwise::printf!(logger, &ctx, "{}", "printf");

    let lines = out.lines();
    assert_eq!(
        lines,
        [
            format!("text.rs:{}: print", line),
            format!("text.rs:{}: print_fmt", line + 1),
            format!("text.rs:{}: output", line + 2),
            format!("text.rs:{}: printf", line + 3),
        ]
    );
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn full_file_path() {
    let out = MemorySink::new();
    let logger = logger(&out, [TextOption::File]);
    logger.print(&Context::background(), "m");
    let contents = out.contents();
    assert!(contents.contains("tests/text.rs:"), "{contents}");
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn no_caller_without_capture() {
    let out = MemorySink::new();
    let logger = Logger::new([LoggerOption::Emitter(Arc::new(TextEmitter::new(
        out.clone(),
        [TextOption::ShortFile],
    )))]);
    logger.print(&Context::background(), "m");
    assert_eq!(out.contents(), "m\n");
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn same_entry_twice_is_identical() {
    let out = MemorySink::new();
    let logger = logger(&out, [TextOption::DateFormat(TimestampFormat::Rfc3339Nano)]);
    let ctx = Context::background().add_tags(["q", "\"quoted\"\t"]);
    for _ in 0..2 {
        logger.output(&ctx, "same");
    }
    let lines = out.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], lines[1]);
}

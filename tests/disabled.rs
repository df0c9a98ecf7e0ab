use std::sync::Arc;
use tagwise::context::Context;
use tagwise::emitter::cloud::{SeverityLogger, log_critical};
use tagwise::leveled::{LevelTagger, Leveled};
use tagwise::{Logger, LoggerOption};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;
#[cfg(target_arch = "wasm32")]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn every_call_on_a_disabled_logger_is_a_no_op() {
    let ctx = Context::background().add_tags(["a", "b"]);
    for logger in [Logger::disabled(), Logger::default(), Logger::new([]), Logger::new([LoggerOption::Caller])] {
        assert!(!logger.is_enabled());
        assert!(logger.emitter().is_none());
        logger.print(&ctx, "nothing");
        logger.output(&ctx, "nothing");
        logger.print_fmt(&ctx, format_args!("{}", "nothing"));
        tagwise::printf!(logger, &ctx, "{}", "nothing");
        log_critical(&ctx, &logger, "nothing");
        logger.prepare_to_die();

        let logger = Arc::new(logger);
        LevelTagger::new(logger.clone()).error(&ctx, format_args!("nothing"));
        SeverityLogger::new(logger).critical(&ctx, format_args!("nothing"));
    }
}

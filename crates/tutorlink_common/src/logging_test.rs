#[cfg(test)]
mod tests {
    use crate::logging::{init_from_config, log_error, log_result};
    use tutorlink_config::LoggingConfig;

    #[test]
    fn test_log_result_passes_value_through() {
        let ok: Result<u32, String> = log_result(Ok(5), "schema ready", "schema failed");
        assert_eq!(ok, Ok(5));

        let err: Result<u32, String> =
            log_result(Err("disk full".to_string()), "schema ready", "schema failed");
        assert_eq!(err, Err("disk full".to_string()));
    }

    #[test]
    fn test_unknown_level_and_repeat_init_do_not_panic() {
        init_from_config(&LoggingConfig {
            level: "chatty".to_string(),
        });
        init_from_config(&LoggingConfig::default());
        log_error("connection refused", "Failed to reach store");
    }
}

#[cfg(test)]
mod tests {
    use logger::{ChannelObserver, ForwardedEntry, LogLevel, NoopLogTarget};
    use logger_proc_macro::log;

    #[log(debug)]
    fn add(a: u32, b: u32) -> u32 {
        a + b
    }

    #[log(trace)]
    fn early_return(flag: bool) -> Result<&'static str, String> {
        if flag {
            return Err("flagged".to_string());
        }
        Ok("clear")
    }

    #[log(debug)]
    fn no_arguments() {}

    #[log(debug)]
    fn locate_me() {}

    struct Counter {
        hits: u32,
    }

    impl Counter {
        #[log(debug)]
        fn hit(&mut self, by: u32) -> u32 {
            self.hits += by;
            self.hits
        }
    }

    // Tests share the process-wide default logger, so each one only keeps
    // entries emitted from its own instrumented function.
    fn collect_for(function: &str, entries: impl Iterator<Item = ForwardedEntry>) -> Vec<(LogLevel, String)> {
        entries
            .filter(|(_, entry)| entry.location().function.ends_with(function))
            .map(|(_, entry)| (entry.level(), entry.message().to_string()))
            .collect()
    }

    #[test]
    fn test_debug_logs_argument_types() {
        let (observer, receiver) = ChannelObserver::unbounded();
        logger::add_observer(observer);

        assert_eq!(add(2, 3), 5);

        assert_eq!(
            collect_for("::add", receiver.try_iter()),
            vec![
                (LogLevel::Debug, "Function call add(a: u32, b: u32)".to_string()),
                (LogLevel::Debug, "Function add returned.".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_arguments_and_methods() {
        let (observer, receiver) = ChannelObserver::unbounded();
        logger::add_observer(observer);

        no_arguments();
        let mut counter = Counter { hits: 1 };
        assert_eq!(counter.hit(2), 3);
        assert_eq!(counter.hits, 3);

        let entries: Vec<ForwardedEntry> = receiver.try_iter().collect();
        assert_eq!(
            collect_for("::no_arguments", entries.clone().into_iter())[0].1,
            "Function call no_arguments()"
        );
        assert_eq!(
            collect_for("::hit", entries.into_iter())[0].1,
            "Function call hit(by: u32)"
        );
    }

    #[test]
    fn test_trace_follows_console_threshold() {
        logger::set_console_target(Box::new(NoopLogTarget));
        let (observer, receiver) = ChannelObserver::unbounded();
        logger::add_observer(observer);

        assert_eq!(early_return(false), Ok("clear"));
        assert_eq!(
            collect_for("::early_return", receiver.try_iter()),
            vec![
                (LogLevel::Debug, "Function call early_return(flag: bool)".to_string()),
                (LogLevel::Debug, "Function early_return returned.".to_string()),
            ]
        );

        logger::set_console_threshold(LogLevel::Trace);
        assert_eq!(early_return(true), Err("flagged".to_string()));
        logger::set_console_threshold(LogLevel::Info);

        let entries = collect_for("::early_return", receiver.try_iter());
        assert_eq!(
            entries,
            vec![
                (LogLevel::Trace, "Function call early_return(flag: true)".to_string()),
                (LogLevel::Trace, "Function early_return returned: Err(\"flagged\")".to_string()),
            ]
        );
    }

    #[test]
    fn test_location_names_the_function() {
        let (observer, receiver) = ChannelObserver::unbounded();
        logger::add_observer(observer);

        locate_me();

        let (source, entry) = receiver
            .try_iter()
            .find(|(_, entry)| entry.location().function.ends_with("::locate_me"))
            .unwrap();
        assert_eq!(source, logger::default_logger().id());
        assert_eq!(entry.location().function, concat!(module_path!(), "::locate_me"));
        assert!(entry.location().file.ends_with("tests.rs"));
        assert_eq!(entry.category(), logger::DEFAULT_CATEGORY);
    }
}

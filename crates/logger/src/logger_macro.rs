#[doc(hidden)]
#[macro_export]
macro_rules! __source_location {
    () => {
        $crate::SourceLocation::new(file!(), module_path!(), line!(), column!())
    };
}

/// `log!(level, "fmt", args..)` logs through the default logger,
/// `log!(logger: l, level, "fmt", args..)` through `l`.
#[macro_export]
macro_rules! log {
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::Logger::record(&$logger, $level, format!($($arg)+))
            .location($crate::__source_location!())
            .emit()
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::log!(logger: $crate::default_logger(), $level, $($arg)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __leveled {
    ($level:ident, logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::LogLevel::$level, $($arg)+)
    };
    ($level:ident, $($arg:tt)+) => {
        $crate::log!($crate::LogLevel::$level, $($arg)+)
    };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::__leveled!(Trace, $($arg)+)
    }
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::__leveled!(Debug, $($arg)+)
    }
}

#[macro_export]
macro_rules! verbose {
    ($($arg:tt)+) => {
        $crate::__leveled!(Verbose, $($arg)+)
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::__leveled!(Info, $($arg)+)
    }
}

#[macro_export]
macro_rules! status {
    ($($arg:tt)+) => {
        $crate::__leveled!(Status, $($arg)+)
    }
}

#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => {
        $crate::__leveled!(Warning, $($arg)+)
    }
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::__leveled!(Error, $($arg)+)
    }
}

#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::__leveled!(Critical, $($arg)+)
    }
}

#[macro_export]
macro_rules! code {
    ($($arg:tt)+) => {
        $crate::__leveled!(Code, $($arg)+)
    }
}

use std::io::{self, Write};

/// Line-oriented sink for formatted console output.
pub trait LogTarget {
    fn write_line(&self, line: &str) -> io::Result<()>;
}

pub struct NoopLogTarget;

impl LogTarget for NoopLogTarget {
    fn write_line(&self, _line: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Writes each line to standard output.
pub struct ConsoleLogTarget;

impl LogTarget for ConsoleLogTarget {
    fn write_line(&self, line: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_accepts_everything() {
        assert!(NoopLogTarget.write_line("dropped").is_ok());
    }
}

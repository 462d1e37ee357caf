//! What should be printed for each unit of work.

/// Result of one posting step, ready for the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The successful case, printed to stdout.
    Successful(String),
    /// The error case, printed to stderr.
    Error(String),
}

impl Output {
    /// True for the error case.
    pub fn is_error(&self) -> bool {
        matches!(self, Output::Error(_))
    }

    /// The carried message.
    pub fn message(&self) -> &str {
        match self {
            Output::Successful(msg) | Output::Error(msg) => msg,
        }
    }
}

/// Print every output on its stream. Returns `false` when any was an error.
pub fn print_outputs(outputs: &[Output]) -> bool {
    let mut all_ok = true;
    for output in outputs {
        match output {
            Output::Successful(msg) => println!("{}", msg),
            Output::Error(msg) => {
                eprintln!("{}", msg);
                all_ok = false;
            }
        }
    }
    all_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_error() {
        assert!(!Output::Successful("ok".to_string()).is_error());
        assert!(Output::Error("bad".to_string()).is_error());
    }

    #[test]
    fn test_print_outputs_reports_errors() {
        let ok = vec![Output::Successful("ok".to_string())];
        assert!(print_outputs(&ok));

        let mixed = vec![
            Output::Successful("ok".to_string()),
            Output::Error("bad".to_string()),
        ];
        assert!(!print_outputs(&mixed));
    }
}

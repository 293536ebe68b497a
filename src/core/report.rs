use crate::utils::error::{ErrorCategory, FetchError};
use serde_json::Value;
use std::io::{self, Write};

pub const SUCCESS_HEADING: &str = "API Response (JSON):";

/// Terminal state of one run: either the decoded document or the failure.
#[derive(Debug)]
pub enum Outcome {
    Success(Value),
    Failure(FetchError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Exit status used in strict mode.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success(_) => 0,
            Outcome::Failure(e) => match e.category() {
                ErrorCategory::Request | ErrorCategory::Decode => 1,
                ErrorCategory::Unexpected => 3,
            },
        }
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Outcome::Success(value) => match serde_json::to_string_pretty(value) {
                Ok(pretty) => {
                    writeln!(out, "{}", SUCCESS_HEADING)?;
                    writeln!(out, "{}", pretty)
                }
                Err(e) => writeln!(out, "{}: {}", ErrorCategory::Unexpected.label(), e),
            },
            Outcome::Failure(e) => {
                writeln!(out, "{}: {}", e.category().label(), e)?;
                if let Some((status, body)) = e.response() {
                    writeln!(out, "HTTP Status Code: {}", status)?;
                    writeln!(out, "Response Content: {}", body)?;
                }
                Ok(())
            }
        }
    }

    pub fn to_text(&self) -> String {
        let mut buffer = Vec::new();
        self.render(&mut buffer).expect("writing to a Vec cannot fail");
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

//! JSON I/O handling for CLI
//!
//! - Output: one JSON object per command on stdout
//! - Prompts go to stderr, answers come from stdin

use std::io::{self, BufRead, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_line(&mut io::stdout(), &response)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(&mut io::stdout(), &response)
}

fn write_line<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Ask a yes/no question on stderr; only "y" or "yes" confirms
pub fn confirm(question: &str) -> CliResult<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{} [y/N] ", question)?;
    stderr.flush()?;

    read_confirmation(&mut io::stdin().lock())
}

fn read_confirmation<R: BufRead>(input: &mut R) -> CliResult<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_confirmation_answers() {
        for (answer, expected) in [
            ("y\n", true),
            ("YES\n", true),
            ("n\n", false),
            ("\n", false),
            ("", false),
            ("maybe\n", false),
        ] {
            let mut input = Cursor::new(answer.as_bytes());
            assert_eq!(read_confirmation(&mut input).unwrap(), expected, "{:?}", answer);
        }
    }

    #[test]
    fn test_write_line_is_single_json_object() {
        let mut out = Vec::new();
        write_line(&mut out, &serde_json::json!({"status": "ok", "data": null})).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "{\"data\":null,\"status\":\"ok\"}\n");
    }
}

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::Result;

/// Prints `prompt` without a newline and reads one line of input.
///
/// Returns `None` once the input is exhausted.
pub async fn ask<R, W>(input: &mut R, out: &mut W, prompt: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}

/// Prints the farewell shown when the user interrupts a session.
///
/// A pending stdin read cannot be cancelled, so callers exit the process
/// right after this instead of waiting for the runtime to shut down.
pub fn interrupted<W: Write>(out: &mut W, farewell: &str) -> Result<()> {
    writeln!(out, "\n{}", farewell)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_prints_farewell_on_fresh_line() {
        let mut out = b"Your guess: ".to_vec();

        interrupted(&mut out, "Bye!").unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Your guess: \nBye!\n");
    }

    #[tokio::test]
    async fn test_ask_trims_and_detects_eof() {
        let mut input: &[u8] = b"  hello world \r\n";
        let mut out = Vec::new();

        let first = ask(&mut input, &mut out, "> ").await.unwrap();
        let second = ask(&mut input, &mut out, "> ").await.unwrap();

        assert_eq!(first.as_deref(), Some("hello world"));
        assert_eq!(second, None);
        assert_eq!(String::from_utf8(out).unwrap(), "> > ");
    }
}

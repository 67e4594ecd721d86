//! Yes/no confirmation before deleting.

use std::io::{self, BufRead, Write};

/// Prompt shown before deleting duplicates.
pub const DELETE_PROMPT: &str = "Delete duplicates? [y/N] ";

/// Write `question` to `output` and read one line from `input`.
///
/// Returns `true` only for `y` or `yes` (any case, surrounding whitespace
/// ignored). An empty line, end of input, or anything else means no.
///
/// # Errors
///
/// Propagates I/O errors from writing the prompt or reading the answer.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }

    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

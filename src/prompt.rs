//! Interactive yes/no confirmation.

use std::io::{self, BufRead, Write};

/// Interpret an answer; empty input picks `default`, anything unknown is `None`.
pub(crate) fn parse_answer(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "ye" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask `question` with a `[y/N]` prompt until the answer is understood.
/// End of input counts as "no".
pub(crate) fn confirm_with<R: BufRead, W: Write>(
    question: &str,
    mut input: R,
    mut output: W,
) -> io::Result<bool> {
    loop {
        write!(output, "{} [y/N] ", question)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }

        match parse_answer(&line, false) {
            Some(answer) => return Ok(answer),
            None => writeln!(output, "Please respond with 'yes' or 'no' (or 'y' or 'n').")?,
        }
    }
}

/// [`confirm_with`] on the terminal.
pub(crate) fn confirm(question: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    confirm_with(question, stdin.lock(), io::stdout())
}

//! Interactive yes/no confirmation.

use std::io::{self, BufRead, Write};

/// Prefix of every line the CLI prints.
pub const PREFIX: &str = "[t201-script]";

/// Ask `message` until the answer is `y`/`Y` (true) or `n`/`N` (false).
///
/// Any other answer re-prompts with `Invalid option.` in front of the message. End of input
/// is returned as [`io::ErrorKind::UnexpectedEof`] so the caller can treat it as a cancel.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<bool> {
    write!(output, "{PREFIX} {message} [y/n]")?;
    loop {
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no answer given"));
        }
        match line.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            _ => write!(output, "{PREFIX} Invalid option. {message} [y/n]")?,
        }
    }
}

/// [`confirm`] on the process's stdin/stdout.
pub fn confirm_stdio(message: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    confirm(&mut stdin.lock(), &mut io::stdout(), message)
}

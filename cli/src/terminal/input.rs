use std::io::{self, BufRead, Write};

use anyhow::Context;

/// Shows `prompt` and reads one line from `input`, without its line ending.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> anyhow::Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        anyhow::bail!("no input given");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn prompt_stdin(prompt: &str) -> anyhow::Result<String> {
    prompt_line(&mut io::stdin().lock(), &mut io::stdout().lock(), prompt)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_reads_one_line() {
        let mut input = Cursor::new("10.0.0.1, 10.0.0.2\r\n1024\n");
        let mut output = Vec::new();

        let line = prompt_line(&mut input, &mut output, "targets: ").unwrap();
        assert_eq!(line, "10.0.0.1, 10.0.0.2");
        assert_eq!(output, b"targets: ");

        let line = prompt_line(&mut input, &mut output, "port: ").unwrap();
        assert_eq!(line, "1024");
    }

    #[test]
    fn eof_is_an_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(prompt_line(&mut input, &mut output, "> ").is_err());
    }
}

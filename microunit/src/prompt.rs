//! Interactive yes/no confirmation on the console.
//!
//! The prompt shows the bracketed default (`([yes]/no)>>> ` or
//! `(yes/[no])>>> `) and reads one line. Replies are lowercased; an empty
//! line, or end of input, selects the default.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    fn cue(self) -> &'static str {
        match self {
            Answer::Yes => " ([yes]/no)>>> ",
            Answer::No => " (yes/[no])>>> ",
        }
    }

    /// Whether a normalized reply counts as this answer. Empty is the default.
    pub fn accepts(self, reply: &str) -> bool {
        match self {
            Answer::Yes => matches!(reply, "y" | "yes" | ""),
            Answer::No => matches!(reply, "n" | "no" | ""),
        }
    }
}

/// Line-oriented console: a reader for replies and a writer for the cue.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show `text` with the cue for `default` and return the normalized reply.
    pub fn ask(&mut self, text: &str, default: Answer) -> io::Result<String> {
        write!(self.output, "{text}{}", default.cue())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("prompt input closed, using default answer {default:?}");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_lowercase())
    }

    /// Ask and report whether the reply matches `expected`.
    pub fn answers(&mut self, text: &str, expected: Answer) -> io::Result<bool> {
        let reply = self.ask(text, expected)?;
        Ok(expected.accepts(&reply))
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// Ask the user on stdin/stdout; `true` for yes (the default).
pub fn request_user_confirmation(text: &str) -> io::Result<bool> {
    Prompt::stdio().answers(text, Answer::Yes)
}

use std::io::{IsTerminal, Stdout, Write};

/// Where command output goes, plus what we know about the terminal it lands in.
pub struct IoStreams<W: Write> {
    pub out: W,
    stdout_tty: bool,
    stdin_tty: bool,
    never_prompt: bool,
}

impl IoStreams<Stdout> {
    pub fn system(is_ci: bool) -> Self {
        let stdout_tty = console::Term::stdout().is_term();
        let stdin_tty = std::io::stdin().is_terminal();

        log::debug!("stdout tty: {stdout_tty}, stdin tty: {stdin_tty}, ci: {is_ci}");

        Self::new(std::io::stdout(), stdout_tty, stdin_tty).never_prompt(is_ci)
    }
}

impl<W: Write> IoStreams<W> {
    pub fn new(out: W, stdout_tty: bool, stdin_tty: bool) -> Self {
        Self {
            out,
            stdout_tty,
            stdin_tty,
            never_prompt: false,
        }
    }

    #[must_use]
    pub fn never_prompt(mut self, never_prompt: bool) -> Self {
        self.never_prompt = never_prompt;
        self
    }

    pub fn is_stdout_tty(&self) -> bool {
        self.stdout_tty
    }

    /// Prompts need someone on both ends of the terminal.
    pub fn can_prompt(&self) -> bool {
        !self.never_prompt && self.stdin_tty && self.stdout_tty
    }
}

use anyhow::{ensure, Result};

pub trait Prompter {
    /// Asks the user to pick one of `items`, returning its index.
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize>;
}

pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        ensure!(!items.is_empty(), "Nothing to select");

        let idx = dialoguer::Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;

        Ok(idx)
    }
}

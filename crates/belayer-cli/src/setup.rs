//! Interactive setup flow.
//!
//! Runs when `belayer` is invoked without a subcommand. Prompts for every
//! configuration field and overwrites belayer-config.json.
//! Uses dialoguer for terminal UI prompts.

use std::io::{self, Write};

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};

use belayer_core::config::{
    BelayerConfig, ConfigStore, CredentialSource, DEFAULT_ALIAS, DEFAULT_INSTALL_PATH,
    DEFAULT_REMOTE_ROOT, TOKEN_ENV_VAR,
};

const INSTALL_PATH_PROMPT: &str =
    "Insert the path where you would like to install your components (relative to the project root)";
const REPO_PROMPT: &str =
    "What is the GitHub repository? (e.g., https://github.com/yourusername/your-repo.git)";
const PRIVATE_PROMPT: &str = "Is your GitHub repository private?";
const CREDENTIAL_PROMPT: &str = "Where should belayer get the access token?";
const TOKEN_PROMPT: &str = "Belayer needs a GitHub Personal Access Token to authenticate with your repository. Create one here: https://github.com/settings/tokens and paste it below";
const ALIAS_PROMPT: &str = "Give your library an alias (allows for multiple libraries)";
const REMOTE_ROOT_PROMPT: &str = "Define the remote root component folder (e.g., src/components)";

/// Source of answers for the setup questions.
pub trait Prompter {
    /// Free-form text. `None` default means an answer is required.
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
    fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;
    /// Hidden input for secrets.
    fn secret(&mut self, prompt: &str) -> Result<String>;
}

/// Terminal prompts backed by dialoguer.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn select(&mut self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        Ok(Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact()?)
    }
}

/// Collects the configuration and persists it.
pub struct SetupFlow<P: Prompter, W: Write = io::Stdout> {
    prompter: P,
    writer: W,
}

impl<P: Prompter> SetupFlow<P, io::Stdout> {
    pub fn new(prompter: P) -> Self {
        Self {
            prompter,
            writer: io::stdout(),
        }
    }
}

impl<P: Prompter, W: Write> SetupFlow<P, W> {
    /// Create a setup flow with custom writer (for testing).
    #[cfg(test)]
    pub fn with_writer(prompter: P, writer: W) -> Self {
        Self { prompter, writer }
    }

    /// Prompt in fixed order, then overwrite the config file.
    ///
    /// No confirmation is asked before replacing an existing file.
    pub fn run(&mut self, store: &ConfigStore) -> Result<BelayerConfig> {
        writeln!(
            self.writer,
            "{}",
            style("Welcome to Belayer! Let's get set up.").bold().cyan()
        )?;

        let config = self.collect()?;
        store.save(&config)?;

        writeln!(
            self.writer,
            "{} Setup complete! You can now use `belayer list` or `belayer add <ComponentName>`.",
            style("✔").green()
        )?;
        Ok(config)
    }

    fn collect(&mut self) -> Result<BelayerConfig> {
        let install_path = self
            .prompter
            .input(INSTALL_PATH_PROMPT, Some(DEFAULT_INSTALL_PATH))?;
        let github_repo = self.prompt_repo()?;
        let is_private = self.prompter.confirm(PRIVATE_PROMPT, false)?;

        let mut config = BelayerConfig::new(github_repo).with_install_path(install_path);
        if is_private {
            config = match self.prompt_credential_source()? {
                CredentialSource::ConfigFile => {
                    let token = self.prompter.secret(TOKEN_PROMPT)?;
                    config.with_token(token.trim())
                }
                CredentialSource::Environment => config.with_env_token(),
            };
        }

        let alias = self.prompter.input(ALIAS_PROMPT, Some(DEFAULT_ALIAS))?;
        let remote_root = self
            .prompter
            .input(REMOTE_ROOT_PROMPT, Some(DEFAULT_REMOTE_ROOT))?;

        Ok(config.with_alias(alias).with_remote_root(remote_root))
    }

    fn prompt_repo(&mut self) -> Result<String> {
        loop {
            let repo = self.prompter.input(REPO_PROMPT, None)?;
            let repo = repo.trim();
            if !repo.is_empty() {
                return Ok(repo.to_string());
            }
            writeln!(
                self.writer,
                "{}",
                style("A repository URL is required.").yellow()
            )?;
        }
    }

    fn prompt_credential_source(&mut self) -> Result<CredentialSource> {
        let env_choice = format!("Read it from the {TOKEN_ENV_VAR} environment variable");
        let items = [
            "Store it in belayer-config.json (plain text)",
            env_choice.as_str(),
        ];
        let selection = self.prompter.select(CREDENTIAL_PROMPT, &items, 0)?;
        Ok(match selection {
            0 => CredentialSource::ConfigFile,
            _ => CredentialSource::Environment,
        })
    }
}

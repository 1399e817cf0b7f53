//
//  jenkins-cli
//  cli/completion.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Shell completion commands

use std::io::Write;

use anyhow::Result;
use clap::{Args, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use super::{Cli, GlobalOptions};

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionCommand {
    #[command(subcommand)]
    pub command: CompletionSubcommand,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum CompletionSubcommand {
    /// Generate Bash completions
    Bash,

    /// Generate Zsh completions
    Zsh,

    /// Generate Fish completions
    Fish,

    /// Generate PowerShell completions
    Powershell,
}

impl From<CompletionSubcommand> for Shell {
    fn from(value: CompletionSubcommand) -> Self {
        match value {
            CompletionSubcommand::Bash => Shell::Bash,
            CompletionSubcommand::Zsh => Shell::Zsh,
            CompletionSubcommand::Fish => Shell::Fish,
            CompletionSubcommand::Powershell => Shell::PowerShell,
        }
    }
}

impl CompletionCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        self.write_to(&mut std::io::stdout())
    }

    fn write_to(&self, out: &mut dyn Write) -> Result<()> {
        let mut cmd = Cli::command();
        generate(Shell::from(self.command), &mut cmd, crate::APP_NAME, out);
        Ok(())
    }
}

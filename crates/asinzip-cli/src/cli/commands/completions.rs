//! `asinzip completions <shell>` – print a completion script to stdout.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

pub fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "asinzip", &mut std::io::stdout());
}

use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    darth-waydr completions bash > ~/.bash_completion.d/darth-waydr\n\n\
                  Generate zsh completions:\n    darth-waydr completions zsh > ~/.zfunc/_darth-waydr\n\n\
                  Generate fish completions:\n    darth-waydr completions fish > ~/.config/fish/completions/darth-waydr.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}

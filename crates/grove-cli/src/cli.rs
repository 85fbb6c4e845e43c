use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "grove",
    about = "In-memory version control for a sandboxed workspace",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log engine state transitions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open an interactive session over a fresh workspace
    Session,
    /// Run a scripted walkthrough of the engine
    Demo,
}

/// One line of an interactive session, parsed busybox-style: the first
/// word is the command itself.
#[derive(Parser)]
#[command(multicall = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub action: SessionAction,
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Print the current branch's tree
    Ls,
    /// Print a file's content
    Cat(PathArg),
    /// Open a file in the editing surface
    Open(PathArg),
    /// Replace a file's content
    Edit(EditArgs),
    /// Create an empty file; parent folders must exist
    Touch(PathArg),
    /// Create an empty folder
    Mkdir(PathArg),
    /// Remove a file, or a folder and everything under it
    Rm(PathArg),
    /// Stage a changed file for the next commit
    Stage(PathArg),
    /// Unstage a file
    Unstage(PathArg),
    /// Stage every changed file
    StageAll,
    /// Commit the staged files
    Commit(CommitArgs),
    /// List branches, create one, or delete one
    Branch(BranchArgs),
    /// Switch to another branch
    Switch(SwitchArgs),
    /// Show changed files and what is staged
    Status,
    /// Show the commit log, most recent first
    Log(LogArgs),
    /// Compose an advice request about the open file
    Ask(AskArgs),
    /// End the session
    Quit,
}

#[derive(Args)]
pub struct PathArg {
    /// Slash-separated path from the workspace root
    pub path: String,
}

#[derive(Args)]
pub struct EditArgs {
    pub path: String,
    /// New content; words are joined with single spaces
    #[arg(trailing_var_arg = true)]
    pub content: Vec<String>,
}

#[derive(Args)]
pub struct CommitArgs {
    /// Commit message; words are joined with single spaces
    #[arg(required = true)]
    pub message: Vec<String>,
}

#[derive(Args)]
pub struct BranchArgs {
    /// Create this branch from the current one and switch to it
    pub name: Option<String>,
    /// Delete the named branch instead
    #[arg(short = 'd', long)]
    pub delete: bool,
}

#[derive(Args)]
pub struct SwitchArgs {
    pub branch: String,
}

#[derive(Args)]
pub struct LogArgs {
    /// Show at most this many commits
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,
    #[arg(long)]
    pub oneline: bool,
}

#[derive(Args)]
pub struct AskArgs {
    /// Optional question; words are joined with single spaces
    pub question: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_session() {
        let cli = Cli::try_parse_from(["grove", "session"]).unwrap();
        assert!(matches!(cli.command, Command::Session));
    }

    #[test]
    fn parse_demo_verbose() {
        let cli = Cli::try_parse_from(["grove", "--verbose", "demo"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Demo));
    }

    #[test]
    fn parse_line_ls() {
        let line = SessionLine::try_parse_from(["ls"]).unwrap();
        assert!(matches!(line.action, SessionAction::Ls));
    }

    #[test]
    fn parse_line_edit_collects_words() {
        let line = SessionLine::try_parse_from(["edit", "src/index.ts", "hello", "world"]).unwrap();
        if let SessionAction::Edit(args) = line.action {
            assert_eq!(args.path, "src/index.ts");
            assert_eq!(args.content, vec!["hello", "world"]);
        } else {
            panic!("wrong action");
        }
    }

    #[test]
    fn parse_line_commit_requires_a_message() {
        assert!(SessionLine::try_parse_from(["commit"]).is_err());
        let line = SessionLine::try_parse_from(["commit", "fix", "the", "thing"]).unwrap();
        if let SessionAction::Commit(args) = line.action {
            assert_eq!(args.message, vec!["fix", "the", "thing"]);
        } else {
            panic!("wrong action");
        }
    }

    #[test]
    fn parse_line_branch_delete() {
        let line = SessionLine::try_parse_from(["branch", "-d", "old"]).unwrap();
        if let SessionAction::Branch(args) = line.action {
            assert!(args.delete);
            assert_eq!(args.name, Some("old".into()));
        } else {
            panic!("wrong action");
        }
    }

    #[test]
    fn parse_line_stage_all() {
        let line = SessionLine::try_parse_from(["stage-all"]).unwrap();
        assert!(matches!(line.action, SessionAction::StageAll));
    }

    #[test]
    fn parse_line_log_options() {
        let line = SessionLine::try_parse_from(["log", "-n", "5", "--oneline"]).unwrap();
        if let SessionAction::Log(args) = line.action {
            assert_eq!(args.limit, 5);
            assert!(args.oneline);
        } else {
            panic!("wrong action");
        }
    }

    #[test]
    fn parse_line_rejects_unknown_commands() {
        assert!(SessionLine::try_parse_from(["frobnicate"]).is_err());
    }
}

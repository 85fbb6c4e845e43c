use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use colored::{ColoredString, Colorize};
use grove_branch::DEFAULT_BRANCH;
use grove_engine::Engine;
use grove_persist::{load_or_default, InMemoryStateStore};
use grove_tree::{FolderNode, Node};
use grove_types::{FileStatus, NodeId};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Session => run_session(),
        Command::Demo => run_demo(),
    }
}

/// A session-scoped engine: persistence is wired for real, but backed by
/// memory, so every run starts from the starter workspace.
fn fresh_engine() -> Engine {
    let persist = InMemoryStateStore::new();
    let store = load_or_default(&persist);
    Engine::with_persistence(store, Box::new(persist))
}

fn run_session() -> anyhow::Result<()> {
    let mut engine = fresh_engine();
    debug!(branch = DEFAULT_BRANCH, "session ready");
    println!(
        "{} over a fresh workspace. Type {} for commands, {} to leave.",
        "grove session".bold(),
        "help".cyan(),
        "quit".cyan()
    );

    let stdin = io::stdin();
    loop {
        print!("{}{} ", engine.current_branch().yellow(), ">".dimmed());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        match SessionLine::try_parse_from(words) {
            Ok(parsed) => {
                if run_action(&mut engine, parsed.action) {
                    break;
                }
            }
            Err(err) => err.print()?,
        }
    }
    Ok(())
}

/// Returns true when the session should end.
fn run_action(engine: &mut Engine, action: SessionAction) -> bool {
    match action {
        SessionAction::Ls => cmd_ls(engine),
        SessionAction::Cat(args) => cmd_cat(engine, &args.path),
        SessionAction::Open(args) => cmd_open(engine, &args.path),
        SessionAction::Edit(args) => cmd_edit(engine, &args.path, args.content),
        SessionAction::Touch(args) => cmd_touch(engine, &args.path),
        SessionAction::Mkdir(args) => cmd_mkdir(engine, &args.path),
        SessionAction::Rm(args) => cmd_rm(engine, &args.path),
        SessionAction::Stage(args) => cmd_stage(engine, &args.path),
        SessionAction::Unstage(args) => cmd_unstage(engine, &args.path),
        SessionAction::StageAll => cmd_stage_all(engine),
        SessionAction::Commit(args) => cmd_commit(engine, args.message),
        SessionAction::Branch(args) => cmd_branch(engine, args),
        SessionAction::Switch(args) => cmd_switch(engine, &args.branch),
        SessionAction::Status => cmd_status(engine),
        SessionAction::Log(args) => cmd_log(engine, args),
        SessionAction::Ask(args) => cmd_ask(engine, args.question),
        SessionAction::Quit => return true,
    }
    false
}

/// Print a rejection and carry on; the session survives every refused
/// operation.
fn report<T, E: std::fmt::Display>(result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            println!("{} {err}", "error:".red().bold());
            None
        }
    }
}

fn missing(path: &str) {
    println!("{} nothing at {}", "error:".red().bold(), path.bold());
}

fn file_id(engine: &Engine, branch: &str, path: &str) -> Option<NodeId> {
    let tree = engine.tree(branch).ok()?;
    tree.find_by_path(path).map(|file| file.id)
}

fn node_id(engine: &Engine, branch: &str, path: &str) -> Option<NodeId> {
    let tree = engine.tree(branch).ok()?;
    tree.find_by_path(path)
        .map(|file| file.id)
        .or_else(|| tree.find_folder_by_path(path).map(|folder| folder.id))
}

/// Split `notes.md` into (root, "notes.md") and `src/app.ts` into
/// (the src folder, "app.ts").
fn split_parent(engine: &Engine, branch: &str, path: &str) -> Option<(NodeId, String)> {
    let tree = engine.tree(branch).ok()?;
    match path.rsplit_once('/') {
        Some((folder, name)) => tree
            .find_folder_by_path(folder)
            .map(|parent| (parent.id, name.to_string())),
        None => Some((tree.id, path.to_string())),
    }
}

fn status_marker(status: FileStatus) -> ColoredString {
    match status {
        FileStatus::Unmodified => " ".normal(),
        FileStatus::Modified => "M".yellow(),
        FileStatus::New => "N".green(),
    }
}

fn cmd_ls(engine: &Engine) {
    if let Some(tree) = report(engine.tree(engine.current_branch())) {
        println!("{}/", tree.name.blue().bold());
        render_children(tree, 1);
    }
}

fn render_children(folder: &FolderNode, depth: usize) {
    let pad = "  ".repeat(depth);
    for child in &folder.children {
        match child {
            Node::Folder(sub) => {
                println!("{pad}{}/", sub.name.blue().bold());
                render_children(sub, depth + 1);
            }
            Node::File(file) => {
                println!("{pad}{} {}", status_marker(file.status), file.name);
            }
        }
    }
}

fn cmd_cat(engine: &Engine, path: &str) {
    let Some(tree) = report(engine.tree(engine.current_branch())) else {
        return;
    };
    match tree.find_by_path(path) {
        Some(file) => {
            println!("{}", format!("{} ({})", path, file.language).dimmed());
            print!("{}", file.content);
            if !file.content.ends_with('\n') {
                println!();
            }
        }
        None => missing(path),
    }
}

fn cmd_open(engine: &mut Engine, path: &str) {
    let branch = engine.current_branch().to_owned();
    let Some(id) = file_id(engine, &branch, path) else {
        missing(path);
        return;
    };
    if report(engine.open_file(&branch, id)).is_some() {
        println!("Opened {}", path.bold());
    }
}

fn cmd_edit(engine: &mut Engine, path: &str, words: Vec<String>) {
    let branch = engine.current_branch().to_owned();
    let Some(id) = file_id(engine, &branch, path) else {
        missing(path);
        return;
    };
    if report(engine.edit(&branch, id, words.join(" "))).is_some() {
        println!("Edited {}", path.bold());
    }
}

fn cmd_touch(engine: &mut Engine, path: &str) {
    let branch = engine.current_branch().to_owned();
    let Some((parent, name)) = split_parent(engine, &branch, path) else {
        missing(path);
        return;
    };
    if report(engine.create_file(&branch, parent, &name, "")).is_some() {
        println!("Created {}", path.bold());
    }
}

fn cmd_mkdir(engine: &mut Engine, path: &str) {
    let branch = engine.current_branch().to_owned();
    let Some((parent, name)) = split_parent(engine, &branch, path) else {
        missing(path);
        return;
    };
    if report(engine.create_folder(&branch, parent, &name)).is_some() {
        println!("Created {}/", path.bold());
    }
}

fn cmd_rm(engine: &mut Engine, path: &str) {
    let branch = engine.current_branch().to_owned();
    let Some(id) = node_id(engine, &branch, path) else {
        missing(path);
        return;
    };
    // The engine quietly refuses to delete the root; say so instead of
    // claiming a removal.
    if engine.tree(&branch).is_ok_and(|tree| tree.id == id) {
        println!("{} the workspace root cannot be removed", "error:".red().bold());
        return;
    }
    if report(engine.delete(&branch, id)).is_some() {
        println!("Removed {}", path.bold());
    }
}

fn cmd_stage(engine: &mut Engine, path: &str) {
    let branch = engine.current_branch().to_owned();
    let Some(id) = file_id(engine, &branch, path) else {
        missing(path);
        return;
    };
    if report(engine.stage(&branch, id)).is_none() {
        return;
    }
    let staged = engine
        .staged_files(&branch)
        .map(|files| files.iter().any(|f| f.id == id))
        .unwrap_or(false);
    if staged {
        println!("  {} {}", "staged:".green(), path);
    } else {
        println!("{} is clean; nothing to stage", path.bold());
    }
}

fn cmd_unstage(engine: &mut Engine, path: &str) {
    let branch = engine.current_branch().to_owned();
    let Some(id) = file_id(engine, &branch, path) else {
        missing(path);
        return;
    };
    if report(engine.unstage(&branch, id)).is_some() {
        println!("  {} {}", "unstaged:".yellow(), path);
    }
}

fn cmd_stage_all(engine: &mut Engine) {
    let branch = engine.current_branch().to_owned();
    if let Some(count) = report(engine.stage_all(&branch)) {
        println!("Staged {} file(s)", count.to_string().bold());
    }
}

fn cmd_commit(engine: &mut Engine, words: Vec<String>) {
    let branch = engine.current_branch().to_owned();
    if let Some(commit) = report(engine.commit(&branch, &words.join(" "))) {
        println!(
            "{} Committed {} {}",
            "✓".green().bold(),
            commit.id.short_id().yellow(),
            commit.message
        );
    }
}

fn cmd_branch(engine: &mut Engine, args: BranchArgs) {
    match (args.delete, args.name) {
        (true, Some(name)) => {
            if report(engine.remove_branch(&name)).is_some() {
                println!("Deleted branch {}", name.yellow());
            }
        }
        (true, None) => println!("{} branch -d needs a name", "error:".red().bold()),
        (false, Some(name)) => {
            let from = engine.current_branch().to_owned();
            if report(engine.create_branch(&from, &name)).is_some() {
                println!("Created and switched to {}", name.yellow().bold());
            }
        }
        (false, None) => {
            for name in engine.branch_names() {
                if name == engine.current_branch() {
                    println!("* {}", name.green().bold());
                } else {
                    println!("  {name}");
                }
            }
        }
    }
}

fn cmd_switch(engine: &mut Engine, branch: &str) {
    if engine.switch_branch(branch) {
        println!("Switched to {}", branch.yellow().bold());
    } else if engine.current_branch() == branch {
        println!("Already on {}", branch.yellow());
    } else {
        println!("{} no branch named {}", "error:".red().bold(), branch.bold());
    }
}

fn cmd_status(engine: &Engine) {
    let Some(status) = report(engine.status(engine.current_branch())) else {
        return;
    };
    println!("On branch {}", status.branch.yellow().bold());
    println!("{} commit(s)", status.commit_count.to_string().bold());
    if status.is_clean() {
        println!("\nWorking tree clean.");
        return;
    }
    if status.has_staged_changes() {
        println!("\nStaged for commit:");
        for entry in status.staged() {
            println!("  {} {}", status_marker(entry.status), entry.name.green());
        }
    }
    if status.unstaged().next().is_some() {
        println!("\nNot staged:");
        for entry in status.unstaged() {
            println!("  {} {}", status_marker(entry.status), entry.name.yellow());
        }
    }
}

fn cmd_log(engine: &Engine, args: LogArgs) {
    let Some(commits) = report(engine.commits(engine.current_branch())) else {
        return;
    };
    if commits.is_empty() {
        println!("No commits yet.");
        return;
    }
    for (n, commit) in commits.iter().take(args.limit).enumerate() {
        let seq = commits.len() - n;
        if args.oneline {
            println!(
                "{} {} {}",
                format!("#{seq}").yellow(),
                commit.id.short_id().dimmed(),
                commit.message
            );
        } else {
            println!(
                "{}  {}  {}",
                format!("#{seq}").yellow().bold(),
                commit.id.short_id().dimmed(),
                commit.message
            );
            println!("   at {} ms since the epoch", commit.timestamp);
        }
    }
}

fn cmd_ask(engine: &Engine, words: Vec<String>) {
    let question = (!words.is_empty()).then(|| words.join(" "));
    match engine.request_advice(question) {
        Some((request, _ticket)) => {
            println!(
                "Advice request for the open file ({}):",
                request.language.to_string().cyan()
            );
            if let Some(question) = &request.question {
                println!("  question: {question}");
            }
            println!("  {} byte(s) of code attached", request.code.len().to_string().bold());
            println!("{}", "No advisor is connected in this build; request not sent.".dimmed());
        }
        None => println!("{} no file is open", "error:".red().bold()),
    }
}

fn banner(title: &str) {
    println!("\n{}", title.bold().underline());
}

fn must_file(engine: &Engine, branch: &str, path: &str) -> anyhow::Result<NodeId> {
    file_id(engine, branch, path).with_context(|| format!("no file at {path}"))
}

fn run_demo() -> anyhow::Result<()> {
    let mut engine = fresh_engine();

    banner("A fresh workspace");
    cmd_ls(&engine);

    banner("Edit and stage");
    let readme = must_file(&engine, DEFAULT_BRANCH, "README.md")?;
    engine.edit(DEFAULT_BRANCH, readme, "# sandbox\n\nRewritten for the demo.\n")?;
    engine.stage(DEFAULT_BRANCH, readme)?;
    cmd_status(&engine);

    banner("Commit");
    let commit = engine.commit(DEFAULT_BRANCH, "rewrite the readme")?;
    println!(
        "{} {} {}",
        "✓".green().bold(),
        commit.id.short_id().yellow(),
        commit.message
    );

    banner("Fork and diverge");
    engine.create_branch(DEFAULT_BRANCH, "feature")?;
    let index = must_file(&engine, "feature", "src/index.ts")?;
    engine.edit("feature", index, "console.log(\"feature work\");\n")?;
    engine.stage("feature", index)?;
    engine.commit("feature", "start the feature")?;
    println!(
        "{}: {} commit(s)   {}: {} commit(s)",
        "feature".yellow(),
        engine.commits("feature")?.len(),
        DEFAULT_BRANCH.yellow(),
        engine.commits(DEFAULT_BRANCH)?.len()
    );

    banner("Advice goes stale when the open file changes");
    engine.open_file("feature", index)?;
    let (request, ticket) = engine
        .request_advice(Some("anything to tighten here?".into()))
        .context("a file should be open")?;
    println!(
        "requested advice about {} code",
        request.language.to_string().cyan()
    );
    let util = must_file(&engine, "feature", "src/util.ts")?;
    engine.open_file("feature", util)?;
    match engine.admit_advice(ticket, "use a log helper".into()) {
        Some(reply) => println!("admitted: {reply}"),
        None => println!(
            "{}",
            "the reply arrived after the file changed and was dropped".dimmed()
        ),
    }

    banner("Back on the default branch, nothing leaked");
    engine.switch_branch(DEFAULT_BRANCH);
    cmd_ls(&engine);
    cmd_log(
        &engine,
        LogArgs {
            limit: 10,
            oneline: true,
        },
    );
    Ok(())
}

use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tasklist_cli::cli::{Cli, Command, ConfigOverride, parse_cell_patch, parse_config_override};
use tasklist_cli::render;
use tasklist_core::config::{self, ConfigOverrides};
use tasklist_core::error::AppError;
use tasklist_core::model::Task;
use tasklist_core::store::TaskStore;

fn print_task_json(task: &Task) -> Result<(), AppError> {
    println!("{}", serde_json::to_string(task)?);
    Ok(())
}

fn print_tasks_json(tasks: &[Task]) -> Result<(), AppError> {
    println!("{}", serde_json::to_string(tasks)?);
    Ok(())
}

fn parse_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        match parse_config_override(entry)? {
            ConfigOverride::Theme(theme) => overrides.theme = Some(theme),
            ConfigOverride::PageSize(size) => overrides.page_size = Some(size),
        }
    }
    Ok(overrides)
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    let mut in_quotes = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if in_quotes => match chars.next() {
                Some('"') => current.push('"'),
                Some('\\') => current.push('\\'),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            '"' => in_quotes = !in_quotes,
            ch if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_command(cli: Cli, store: &mut TaskStore) -> Result<(), AppError> {
    let overrides = parse_overrides(&cli.config_override)?;
    let json = cli.json;

    match cli.command {
        Command::Add {
            task,
            priority,
            deadline,
            status,
        } => {
            let task = store.add_task(task.as_deref().unwrap_or(""), priority, &deadline, status)?;
            if json {
                print_task_json(&task)?;
            } else {
                println!("Added task: {} (key {})", task.task, task.key);
            }
        }
        Command::Edit { key } => {
            store.begin_edit(key);
            if store.is_editing(key) {
                let name = store
                    .get(key)
                    .map(|task| task.task.clone())
                    .unwrap_or_default();
                println!("Editing task: {name} (key {key})");
            } else if let Some(busy) = store.editing_key() {
                println!("Task {busy} is already being edited");
            } else {
                println!("No task with key {key}");
            }
        }
        Command::Save { key } => {
            store.save_edit(key)?;
            println!("Saved task {key}");
        }
        Command::Cancel => {
            store.cancel_edit();
            println!("Cancelled edit");
        }
        Command::Delete { key } => match store.delete_task(key)? {
            Some(task) => {
                if json {
                    print_task_json(&task)?;
                } else {
                    println!("Deleted task: {} (key {})", task.task, task.key);
                }
            }
            None => println!("No task with key {key}"),
        },
        Command::Set { key, field, value } => {
            let patch = parse_cell_patch(&field, &value)?;
            match store.commit_cell(key, patch)? {
                Some(task) => {
                    if json {
                        print_task_json(&task)?;
                    } else {
                        println!("Updated task: {} (key {})", task.task, task.key);
                    }
                }
                None => println!("No task with key {key}"),
            }
        }
        Command::List { page } => {
            if json {
                print_tasks_json(store.tasks())?;
            } else {
                let loaded = config::load_config_with_fallback();
                if let Some(err) = loaded.error {
                    eprintln!("WARNING: {err}");
                }
                let effective = config::merge_overrides(&loaded.config, &overrides);
                let palette = config::palette_for_theme(effective.theme.as_deref());
                println!(
                    "{}",
                    render::render_page(
                        store.tasks(),
                        store.editing_key(),
                        &palette,
                        page.unwrap_or(1),
                        effective.page_size(),
                    )
                );
            }
        }
    }

    Ok(())
}

fn run_interactive() -> Result<(), AppError> {
    let mut store = TaskStore::open()?;
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock.read_line(&mut input)?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("tasklist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                if err.exit_code() == 0 {
                    let _ = err.print();
                } else {
                    eprintln!("ERROR: {}", normalize_parse_error(err));
                }
                continue;
            }
        };

        if let Err(err) = run_command(cli, &mut store) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if err.exit_code() == 0 {
                let _ = err.print();
                return;
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let mut store = match TaskStore::open() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli, &mut store) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}

//! CLI Module for codebox
//! One-shot commands against the remote catalog, for use without launching
//! the full TUI application.

pub mod commands;

use crate::catalog::{CatalogStore, CatalogView, Paginator};
use crate::config::AppConfig;
use crate::service::HttpCatalogService;
use colored::Colorize;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { search: String, page: usize },
    Show { id: String },
    Add {
        slip_no: String,
        language: String,
        question: String,
        file: Option<PathBuf>,
    },
    Delete { id: String },
    Help,
}

/// Parses the arguments after the program name
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some(first) = args.first() else {
        return Ok(Command::Help);
    };

    match first.as_str() {
        "list" | "ls" => {
            let mut search = String::new();
            let mut page = 1;
            let mut rest = args[1..].iter();
            while let Some(flag) = rest.next() {
                match flag.as_str() {
                    "--search" | "-s" => {
                        search = rest
                            .next()
                            .ok_or("Usage: codebox list --search <TERM>")?
                            .clone();
                    }
                    "--page" | "-p" => {
                        page = rest
                            .next()
                            .and_then(|p| p.parse().ok())
                            .ok_or("Usage: codebox list --page <N>")?;
                    }
                    other => return Err(format!("Unknown option for list: {}", other)),
                }
            }
            Ok(Command::List { search, page })
        }
        "search" | "find" => match args.get(1) {
            Some(term) => Ok(Command::List {
                search: term.clone(),
                page: 1,
            }),
            None => Err("Usage: codebox search <TERM>".to_string()),
        },
        "show" | "view" | "cat" => match args.get(1) {
            Some(id) => Ok(Command::Show { id: id.clone() }),
            None => Err("Usage: codebox show <ID>".to_string()),
        },
        "add" => match &args[1..] {
            [slip_no, language, question] | [slip_no, language, question, _] => Ok(Command::Add {
                slip_no: slip_no.clone(),
                language: language.clone(),
                question: question.clone(),
                file: args.get(4).map(PathBuf::from),
            }),
            _ => Err("Usage: codebox add <SLIP_NO> <LANGUAGE> <QUESTION> [FILE]".to_string()),
        },
        "delete" | "rm" => match args.get(1) {
            Some(id) => Ok(Command::Delete { id: id.clone() }),
            None => Err("Usage: codebox delete <ID>".to_string()),
        },
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(format!("Unknown command: {}", other)),
    }
}

/// Executes CLI commands based on the provided arguments
pub fn execute_cli(args: &[String], config: &AppConfig) -> Result<ExitCode, Box<dyn Error>> {
    let command = match parse_args(args) {
        Ok(command) => command,
        Err(message) => {
            println!("{}  {}", "┃".bright_magenta(), message.red());
            print_help();
            return Ok(ExitCode::from(2));
        }
    };

    if command == Command::Help {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }

    let service = HttpCatalogService::from_config(config)?;
    let mut view = CatalogView::new(CatalogStore::new(service), Paginator::new(config.page_size)?);

    let runtime = tokio::runtime::Runtime::new()?;
    let ok = runtime.block_on(commands::run(command, &mut view))?;

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Prints the help message with available commands
fn print_help() {
    println!(
        "{}  {}",
        "┃".bright_magenta(),
        "CODEBOX CLI - SNIPPET CATALOG".bold()
    );

    println!("{}  {}", "┃".bright_magenta(), "USAGE:".bright_yellow());
    println!("{}  codebox [COMMAND] [ARGS]", "┃".bright_magenta());
    println!("{}  {}", "┃".bright_magenta(), "COMMANDS:".bright_yellow());

    let commands = [
        ("list, ls", "List the first page of codes"),
        ("list --search <TERM> --page <N>", "Filter and pick a page"),
        ("search, find <TERM>", "Search by question, slip no, or language"),
        ("show, view <ID>", "Display one code with highlighting"),
        ("add <SLIP> <LANG> <QUESTION> [FILE]", "Add a code (reads stdin without FILE)"),
        ("delete, rm <ID>", "Delete a code"),
        ("help", "Display this help message"),
    ];
    for (usage, description) in commands {
        println!(
            "{}  {:<38} {}",
            "┃".bright_magenta(),
            usage.bright_white(),
            description
        );
    }

    println!("{}  {}", "┃".bright_magenta(), "TIP:".bright_green());
    println!(
        "{}  Run with no arguments to launch the full TUI (Terminal User Interface) mode",
        "┃".bright_magenta()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_means_help() {
        assert_eq!(parse_args(&[]), Ok(Command::Help));
    }

    #[test]
    fn list_flags_are_parsed() {
        assert_eq!(
            parse_args(&args(&["list", "--search", "java", "--page", "2"])),
            Ok(Command::List {
                search: "java".to_string(),
                page: 2
            })
        );
        assert_eq!(
            parse_args(&args(&["ls"])),
            Ok(Command::List {
                search: String::new(),
                page: 1
            })
        );
        assert!(parse_args(&args(&["list", "--page", "two"])).is_err());
    }

    #[test]
    fn add_takes_an_optional_file() {
        assert_eq!(
            parse_args(&args(&["add", "5", "java", "sum of two numbers", "Sum.java"])),
            Ok(Command::Add {
                slip_no: "5".to_string(),
                language: "java".to_string(),
                question: "sum of two numbers".to_string(),
                file: Some(PathBuf::from("Sum.java")),
            })
        );
        assert!(parse_args(&args(&["add", "5", "java"])).is_err());
    }

    #[test]
    fn missing_ids_and_unknown_commands_are_errors() {
        assert!(parse_args(&args(&["show"])).is_err());
        assert!(parse_args(&args(&["delete"])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
    }
}

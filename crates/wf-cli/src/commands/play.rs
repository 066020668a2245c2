use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use wf_interact::{App, AppConfig, Button, Interaction, Modal, ModalInput, Reply};

const HELP: [&str; 8] = [
    "oracle <id> [row]         roll an oracle, or show a row",
    "search <query>            find oracles",
    "move <id>                 show a move",
    "moves <query>             find moves",
    "truths                    show the setting truths",
    "progress <title> <rank>   start a progress track",
    "<number>                  press a button",
    "quit                      leave",
];

pub fn run(content: &Path, config: AppConfig) -> Result<(), String> {
    let app = super::load_app(content, config)?;

    println!("  {} Wayfinder", "Starting".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut session = Session {
        app,
        buttons: Vec::new(),
        reader: stdin.lock(),
    };
    session.run()
}

struct Session<R> {
    app: App,
    /// Buttons of the replies shown last, in display order.
    buttons: Vec<Button>,
    reader: R,
}

impl<R: BufRead> Session<R> {
    fn run(&mut self) -> Result<(), String> {
        while let Some(input) = self.read_line("> ")? {
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                break;
            }
            self.handle(&input)?;
        }
        Ok(())
    }

    /// Read one trimmed line; `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, String> {
        print!("{prompt}");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(line.trim().to_string())),
            Err(e) => Err(e.to_string()),
        }
    }

    fn handle(&mut self, input: &str) -> Result<(), String> {
        if let Ok(number) = input.parse::<usize>() {
            return self.press(number);
        }

        let (command, rest) = input
            .split_once(char::is_whitespace)
            .map_or((input, ""), |(c, r)| (c, r.trim()));
        let replies = match command {
            "help" => {
                for line in HELP {
                    println!("  {line}");
                }
                println!();
                return Ok(());
            }
            "oracle" => {
                let mut parts = rest.split_whitespace();
                let Some(id) = parts.next() else {
                    return usage("oracle <id> [row]");
                };
                let row = match parts.next().map(str::parse::<usize>) {
                    Some(Ok(row)) => Some(row),
                    Some(Err(_)) => return usage("oracle <id> [row]"),
                    None => None,
                };
                vec![self.app.oracle(id, row)]
            }
            "search" => {
                super::search::print_choices(&self.app.oracle_autocomplete(rest), rest);
                println!();
                return Ok(());
            }
            "move" if rest.is_empty() => return usage("move <id>"),
            "move" => vec![self.app.move_(rest)],
            "moves" => {
                super::search::print_choices(&self.app.move_autocomplete(rest), rest);
                println!();
                return Ok(());
            }
            "truths" => self.app.truths(),
            "progress" => match rest.rsplit_once(char::is_whitespace) {
                Some((title, rank)) => vec![self.app.progress(title.trim(), rank)],
                None => return usage("progress <title> <rank>"),
            },
            _ => {
                println!("  {}\n", format!("unknown command '{input}', try 'help'").yellow());
                return Ok(());
            }
        };
        self.display(replies)
    }

    fn press(&mut self, number: usize) -> Result<(), String> {
        let Some(button) = number.checked_sub(1).and_then(|i| self.buttons.get(i)) else {
            println!("  {}\n", format!("there is no button {number}").yellow());
            return Ok(());
        };
        if button.disabled {
            println!("  {}\n", format!("button {number} is disabled").yellow());
            return Ok(());
        }
        let reply = self.app.press(&Interaction::button(button.token.clone()));
        self.display(vec![reply])
    }

    /// Print replies and remember their buttons. Modals are filled in
    /// right away and their result displayed in turn.
    fn display(&mut self, replies: Vec<Reply>) -> Result<(), String> {
        if replies.iter().any(|r| !r.ephemeral) {
            self.buttons.clear();
        }
        for reply in replies {
            if let Some(modal) = &reply.modal {
                match self.fill(modal)? {
                    Some(interaction) => {
                        let next = self.app.press(&interaction);
                        self.display(vec![next])?;
                    }
                    None => println!("  {}\n", "cancelled".dimmed()),
                }
                continue;
            }
            super::print_reply(&reply, self.buttons.len() + 1);
            if !reply.ephemeral {
                self.buttons.extend(reply.buttons);
            }
        }
        Ok(())
    }

    /// Prompt for every input of a modal. `None` if input ends early.
    fn fill(&mut self, modal: &Modal) -> Result<Option<Interaction>, String> {
        println!("  {} {}", "▸".bold(), modal.title.bold());

        let mut fields = std::collections::BTreeMap::new();
        for input in &modal.inputs {
            let value = match input {
                ModalInput::Text { label, value, .. } => {
                    let prompt = match value {
                        Some(default) => format!("  {label} [{default}]: "),
                        None => format!("  {label}: "),
                    };
                    let Some(answer) = self.read_line(&prompt)? else {
                        return Ok(None);
                    };
                    match value {
                        Some(default) if answer.is_empty() => default.clone(),
                        _ => answer,
                    }
                }
                ModalInput::Select { label, options, .. } => {
                    println!("  {label}");
                    for (i, option) in options.iter().enumerate() {
                        match &option.description {
                            Some(description) => {
                                println!(
                                    "    {}) {} {}",
                                    i + 1,
                                    option.label,
                                    description.dimmed()
                                );
                            }
                            None => println!("    {}) {}", i + 1, option.label),
                        }
                    }
                    let Some(answer) = self.read_line("  choice: ")? else {
                        return Ok(None);
                    };
                    // A number picks by position; anything else is taken as the value.
                    answer
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|i| options.get(i))
                        .map_or_else(|| answer, |option| option.value.clone())
                }
            };
            fields.insert(input.id().to_string(), value);
        }
        Ok(Some(Interaction::modal_submit(modal.token.clone(), fields)))
    }
}

fn usage(text: &str) -> Result<(), String> {
    println!("  {}\n", format!("usage: {text}").yellow());
    Ok(())
}

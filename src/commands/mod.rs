use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

pub mod food_cmd;

pub use food_cmd::{Console, FoodSession, SessionOutcome};

/// Console backed by a rustyline editor with coloured output.
pub struct TerminalConsole {
    editor: Editor<(), DefaultHistory>,
}

impl TerminalConsole {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: Editor::<(), DefaultHistory>::new()?,
        })
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.trim());
                Some(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("👋 Goodbye!");
                None
            }
            Err(err) => {
                println!("Error: {:?}", err);
                None
            }
        }
    }

    fn heading(&mut self, text: &str) {
        println!("\n{}", text.bright_yellow());
    }

    fn say(&mut self, text: &str) {
        println!("{}", text);
    }

    fn warn(&mut self, text: &str) {
        println!("{}", text.red());
    }
}

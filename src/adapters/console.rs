//! Terminal adapters for interactive play

use std::io::{self, BufRead, Write};

use crate::{
    Error, Result,
    ports::{MoveInput, Presenter},
    tictactoe::Board,
};

/// Reads `row col` lines from standard input
#[derive(Debug, Default)]
pub struct StdinInput;

impl StdinInput {
    pub fn new() -> Self {
        Self
    }
}

impl MoveInput for StdinInput {
    fn read_move(&mut self) -> Result<String> {
        print!("Enter coordinates (row col): ");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|source| Error::Io {
                operation: "read move from stdin".to_string(),
                source,
            })?;
        if read == 0 {
            return Err(Error::InputClosed);
        }
        Ok(line)
    }

    fn reject(&mut self, reason: &Error) {
        println!("{reason}, try again");
    }
}

/// Prints the board to standard output
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn render(&mut self, board: &Board) {
        println!();
        print!("{board}");
        println!();
    }
}

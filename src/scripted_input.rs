use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use tracing::warn;

use crate::input::Direction;

/// A canned sequence of moves, replayed one step per frame.
pub struct ScriptedInput {
    script_commands: Vec<Direction>,
    current_command_index: usize,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut script_commands = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            for char_code in trimmed_line.chars().filter(|c| !c.is_whitespace()) {
                if let Some(direction) = Direction::from_char(char_code) {
                    script_commands.push(direction);
                } else {
                    warn!(key = %char_code, "unknown key in script");
                }
            }
        }

        Ok(Self {
            script_commands,
            current_command_index: 0,
        })
    }

    pub fn next_direction(&mut self) -> Option<Direction> {
        let direction = self.script_commands.get(self.current_command_index).copied()?;
        self.current_command_index += 1;
        Some(direction)
    }

    pub fn remaining(&self) -> usize {
        self.script_commands.len() - self.current_command_index
    }
}

use bracket_terminal::prelude::VirtualKeyCode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(dr, dc)` grid step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' | 'W' | 'k' | 'K' => Some(Direction::Up),
            's' | 'S' | 'j' | 'J' => Some(Direction::Down),
            'a' | 'A' | 'h' | 'H' => Some(Direction::Left),
            'd' | 'D' | 'l' | 'L' => Some(Direction::Right),
            _ => None,
        }
    }
}

pub fn direction_for_key(key: VirtualKeyCode) -> Option<Direction> {
    match key {
        VirtualKeyCode::Up | VirtualKeyCode::W | VirtualKeyCode::K => Some(Direction::Up),
        VirtualKeyCode::Down | VirtualKeyCode::S | VirtualKeyCode::J => Some(Direction::Down),
        VirtualKeyCode::Left | VirtualKeyCode::A | VirtualKeyCode::H => Some(Direction::Left),
        VirtualKeyCode::Right | VirtualKeyCode::D | VirtualKeyCode::L => Some(Direction::Right),
        _ => None,
    }
}

pub fn is_quit_key(key: VirtualKeyCode) -> bool {
    matches!(key, VirtualKeyCode::Escape | VirtualKeyCode::Q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_letters_agree() {
        assert_eq!(direction_for_key(VirtualKeyCode::Up), Some(Direction::Up));
        assert_eq!(direction_for_key(VirtualKeyCode::A), Some(Direction::Left));
        assert_eq!(direction_for_key(VirtualKeyCode::L), Some(Direction::Right));
        assert_eq!(direction_for_key(VirtualKeyCode::Space), None);
        assert_eq!(Direction::from_char('j'), Some(Direction::Down));
        assert_eq!(Direction::from_char('x'), None);
    }

    #[test]
    fn deltas_are_cardinal() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (dr, dc) = dir.delta();
            assert_eq!(dr.abs() + dc.abs(), 1);
        }
    }
}

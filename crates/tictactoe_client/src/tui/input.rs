//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;

/// Moves the cursor (a board index) based on arrow keys.
pub fn move_cursor(cursor: usize, key: KeyCode) -> usize {
    let (row, col) = (cursor / 3, cursor % 3);
    match key {
        KeyCode::Right if col < 2 => cursor + 1,
        KeyCode::Left if col > 0 => cursor - 1,
        KeyCode::Down if row < 2 => cursor + 3,
        KeyCode::Up if row > 0 => cursor - 3,
        // No change for other keys or edge cases
        _ => cursor,
    }
}

/// Maps keys `1`-`9` to board indices 0-8.
pub fn digit_index(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(digit @ 1..=9) => Some(digit as usize - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_within_grid() {
        assert_eq!(move_cursor(4, KeyCode::Right), 5);
        assert_eq!(move_cursor(4, KeyCode::Left), 3);
        assert_eq!(move_cursor(4, KeyCode::Up), 1);
        assert_eq!(move_cursor(4, KeyCode::Down), 7);
    }

    #[test]
    fn test_stops_at_edges() {
        assert_eq!(move_cursor(2, KeyCode::Right), 2);
        assert_eq!(move_cursor(3, KeyCode::Left), 3);
        assert_eq!(move_cursor(1, KeyCode::Up), 1);
        assert_eq!(move_cursor(7, KeyCode::Down), 7);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        assert_eq!(move_cursor(0, KeyCode::Enter), 0);
    }

    #[test]
    fn test_digit_index() {
        assert_eq!(digit_index('1'), Some(0));
        assert_eq!(digit_index('9'), Some(8));
        assert_eq!(digit_index('0'), None);
        assert_eq!(digit_index('x'), None);
    }
}

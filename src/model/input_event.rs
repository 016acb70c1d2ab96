#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    CellClicked(usize, usize), // row, col, already hit-tested
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    Leaderboard,
    Quit,
}

impl MenuChoice {
    pub fn from_key(key: char) -> Option<MenuChoice> {
        match key.to_ascii_lowercase() {
            'p' => Some(MenuChoice::Play),
            'l' => Some(MenuChoice::Leaderboard),
            'q' => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_keys_are_case_insensitive() {
        assert_eq!(MenuChoice::from_key('P'), Some(MenuChoice::Play));
        assert_eq!(MenuChoice::from_key('l'), Some(MenuChoice::Leaderboard));
        assert_eq!(MenuChoice::from_key('Q'), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::from_key('x'), None);
    }
}

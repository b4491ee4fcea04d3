use anyhow::{anyhow, Result};
use console::{style, Key, Term};
use dialoguer::Input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Back,
    Quit,
    Index(usize),
}

/// A numbered list screen. The first key decides the input mode: arrows
/// start cursor navigation, anything printable starts a typed selection.
pub struct Menu<'a> {
    pub title: &'a str,
    pub items: &'a [String],
    pub header: Option<&'a str>,
    pub status: Option<&'a str>,
}

impl Menu<'_> {
    pub fn prompt(&self) -> Result<MenuChoice> {
        let term = Term::stdout();
        let _ = term.clear_screen();
        self.print_top();
        if self.items.is_empty() {
            println!("  (nothing here)");
        }
        for (i, it) in self.items.iter().enumerate() {
            println!("{}: {}", i + 1, it);
        }
        println!("Type a number + Enter, or use arrow keys + Enter. 'b' = back, 'q' = quit.");

        match term.read_key()? {
            Key::ArrowUp | Key::ArrowDown | Key::Home | Key::End | Key::PageUp | Key::PageDown
                if !self.items.is_empty() =>
            {
                self.navigate(&term)
            }
            Key::Char('q') | Key::Char('Q') => Ok(MenuChoice::Quit),
            Key::Char('b') | Key::Char('B') | Key::Escape => Ok(MenuChoice::Back),
            Key::Char(c) if !c.is_control() => {
                let typed: String = Input::new()
                    .with_prompt("Selection")
                    .with_initial_text(c.to_string())
                    .allow_empty(true)
                    .interact_text()?;
                parse_selection(&typed, self.items.len())
            }
            _ => {
                let typed: String = Input::new()
                    .with_prompt("Selection")
                    .allow_empty(true)
                    .interact_text()?;
                parse_selection(&typed, self.items.len())
            }
        }
    }

    fn print_top(&self) {
        if let Some(h) = self.header {
            println!("{}", h);
        }
        if let Some(s) = self.status {
            println!("{}", style(s).yellow());
        }
        println!("{}", self.title);
    }

    fn navigate(&self, term: &Term) -> Result<MenuChoice> {
        let last = self.items.len().saturating_sub(1);
        let mut sel: usize = 0;
        let mut top: usize = 0;
        loop {
            term.clear_screen()?;
            self.print_top();

            let reserved = 2 + usize::from(self.header.is_some()) + usize::from(self.status.is_some());
            let (rows, _cols) = term.size();
            let visible = (rows as usize)
                .saturating_sub(reserved)
                .max(3)
                .min(self.items.len());

            if sel < top {
                top = sel;
            } else if sel >= top + visible {
                top = sel + 1 - visible;
            }
            for i in top..(top + visible).min(self.items.len()) {
                let marker = if i == sel { ">" } else { " " };
                println!("{} {}: {}", marker, i + 1, self.items[i]);
            }
            println!("Use arrows + Enter. 'b' = back, 'q' = quit.");

            let page = visible.saturating_sub(1).max(1);
            match term.read_key()? {
                Key::ArrowUp => sel = sel.saturating_sub(1),
                Key::ArrowDown => sel = (sel + 1).min(last),
                Key::Home => sel = 0,
                Key::End => sel = last,
                Key::PageUp => sel = sel.saturating_sub(page),
                Key::PageDown => sel = (sel + page).min(last),
                Key::Enter => return Ok(MenuChoice::Index(sel)),
                Key::Char('q') | Key::Char('Q') => return Ok(MenuChoice::Quit),
                Key::Char('b') | Key::Char('B') | Key::Escape => return Ok(MenuChoice::Back),
                _ => {}
            }
        }
    }
}

/// Read one line of free text. Empty input is returned as-is.
pub fn prompt_text(label: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn parse_selection(input: &str, len: usize) -> Result<MenuChoice> {
    let s = input.trim();
    if s.eq_ignore_ascii_case("q") {
        return Ok(MenuChoice::Quit);
    }
    if s.is_empty() || s.eq_ignore_ascii_case("b") {
        return Ok(MenuChoice::Back);
    }
    let idx: usize = s.parse().map_err(|_| anyhow!("invalid selection: {}", s))?;
    if idx == 0 || idx > len {
        return Err(anyhow!("out of range: {}", idx));
    }
    Ok(MenuChoice::Index(idx - 1))
}

#[cfg(test)]
mod tests {
    use super::{parse_selection, MenuChoice};

    #[test]
    fn numbers_are_one_based() {
        assert_eq!(parse_selection(" 2 ", 3).unwrap(), MenuChoice::Index(1));
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("4", 3).is_err());
        assert!(parse_selection("x", 3).is_err());
    }

    #[test]
    fn letters_and_blank_navigate() {
        assert_eq!(parse_selection("Q", 3).unwrap(), MenuChoice::Quit);
        assert_eq!(parse_selection("b", 3).unwrap(), MenuChoice::Back);
        assert_eq!(parse_selection("", 0).unwrap(), MenuChoice::Back);
    }
}

//! Terminal presentation: a navigation menu over two pages

pub mod render;
mod session;

pub use session::Session;

/// Window title shown above the navigation menu
pub const APP_TITLE: &str = "Complaint Management System";

/// The pages reachable from the navigation menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Submit,
    History,
}

impl Page {
    /// Menu order
    pub const ALL: [Page; 2] = [Page::Submit, Page::History];

    /// Label shown in the navigation menu
    pub fn menu_label(&self) -> &'static str {
        match self {
            Page::Submit => "Submit Complaint",
            Page::History => "Past Complaints",
        }
    }

    /// Heading shown at the top of the page
    pub fn title(&self) -> &'static str {
        match self {
            Page::Submit => "Submit a Complaint",
            Page::History => "Past Complaints",
        }
    }

    /// Key the user types in the menu to open this page
    pub fn key(&self) -> char {
        match self {
            Page::Submit => '1',
            Page::History => '2',
        }
    }

    /// Resolve a menu choice by key or (case-insensitive) label.
    pub fn from_choice(choice: &str) -> Option<Page> {
        let choice = choice.trim();
        Self::ALL.into_iter().find(|page| {
            (choice.len() == 1 && choice.starts_with(page.key()))
                || choice.eq_ignore_ascii_case(page.menu_label())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_choice_accepts_keys_and_labels() {
        assert_eq!(Page::from_choice("1"), Some(Page::Submit));
        assert_eq!(Page::from_choice(" 2 \n"), Some(Page::History));
        assert_eq!(Page::from_choice("past complaints"), Some(Page::History));
        assert_eq!(Page::from_choice("Submit Complaint"), Some(Page::Submit));
    }

    #[test]
    fn from_choice_rejects_unknown_input() {
        assert_eq!(Page::from_choice("3"), None);
        assert_eq!(Page::from_choice("12"), None);
        assert_eq!(Page::from_choice(""), None);
        assert_eq!(Page::from_choice("q"), None);
        assert_eq!(Page::from_choice("1 2"), None);
    }
}

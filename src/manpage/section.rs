//! Manual sections and their conventional header texts.

use std::{fmt, path::Path};

/// Conventional headers, indexed by section number - 1.
const SECTION_HEADERS: [&str; 9] = [
    "User Commands",
    "System Calls Manual",
    "Library Functions Manual",
    "Kernel Interfaces Manual",
    "File Formats Manual",
    "Games Manual",
    "Miscellaneous Information Manual",
    "System Administration",
    "Kernel Routines",
];

/// A manual section, 1 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Section(u8);

impl Section {
    pub const USER_COMMANDS: Self = Self(1);

    /// Section for a valid number, `None` outside 1..=9.
    pub const fn new(number: u8) -> Option<Self> {
        match number {
            1..=9 => Some(Self(number)),
            _ => None,
        }
    }

    /// Section selected by the extension of an output path.
    ///
    /// The first character of the extension is the section digit
    /// (`tool.8` and `tool.3p` are sections 8 and 3). A missing or
    /// unrecognized extension selects section 1.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.chars().next())
            .and_then(|c| c.to_digit(10))
            .and_then(|digit| Self::new(digit as u8))
            .unwrap_or(Self::USER_COMMANDS)
    }

    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Conventional header text of the section.
    #[inline]
    pub const fn header(self) -> &'static str {
        SECTION_HEADERS[(self.0 - 1) as usize]
    }

    /// Header text, preferring an explicit override.
    pub fn header_or<'a>(self, explicit: Option<&'a str>) -> &'a str {
        explicit.unwrap_or(self.header())
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::USER_COMMANDS
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_from_extension() {
        let section = Section::from_path(Path::new("share/man/man8/toold.8"));
        assert_eq!(section.number(), 8);
        assert_eq!(section.to_string(), "8");
        assert_eq!(section.header(), "System Administration");
    }

    #[test]
    fn test_section_one_and_default() {
        for path in ["tool.1", "tool", "tool.html", "tool.0", ".hidden"] {
            let section = Section::from_path(Path::new(path));
            assert_eq!(section.to_string(), "1", "{path}");
            assert_eq!(section.header(), "User Commands", "{path}");
        }
    }

    #[test]
    fn test_section_with_suffix_letters() {
        assert_eq!(Section::from_path(Path::new("Foo::Bar.3pm")).number(), 3);
    }

    #[test]
    fn test_every_section_has_header() {
        for number in 1..=9 {
            assert!(!Section::new(number).unwrap().header().is_empty());
        }
        assert_eq!(Section::new(0), None);
        assert_eq!(Section::new(10), None);
    }

    #[test]
    fn test_header_override_wins() {
        let section = Section::from_path(Path::new("toold.8"));
        assert_eq!(section.header_or(Some("Daemons")), "Daemons");
        assert_eq!(section.header_or(None), "System Administration");
    }
}

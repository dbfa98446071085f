//! Paging code vocabulary
//!
//! Every coded field of a paging message decodes to one of the
//! enumerations in this module. Each variant carries three
//! representations:
//!
//! 1. its short *code*, like "`pf`", as typed by the operator;
//! 2. its spoken *phrase*, like "`practice field`"; and
//! 3. its audio *segment* identifier, like "`location_practice_field`".
//!
//! | Field                       | Codes                                  |
//! |-----------------------------|----------------------------------------|
//! | [`LocationCode`]            | `pf`, `mf`, `p`                        |
//! | [`ClassSeverity`]           | `e`, `m`, `s`                          |
//! | [`Subsystem`]               | `ind`, `shtr`, `clmb`, `dt`, `int`, `hand` |
//! | [`Subteam`]                 | `e`, `m`, `p`, `a`                     |
//! | [`SeverityLevel`]           | `1` through `5`                        |
//!
//! All of the above implement the [`Code`] trait.

mod class;
mod issue;
mod location;

use std::str::FromStr;

use strum::{EnumMessage, EnumProperty};

pub use class::ClassSeverity;
pub use issue::{IssueField, SeverityLevel, Subsystem, Subteam};
pub use location::LocationCode;

/// A member of the fixed paging vocabulary
///
/// The vocabulary is fixed at compile time and is immutable.
/// Lookups are exact: callers are expected to trim and
/// lower-case tokens first.
///
/// ```
/// use pagecode::{Code, LocationCode};
///
/// let loc = LocationCode::lookup("mf").unwrap();
/// assert_eq!(LocationCode::MainField, loc);
/// assert_eq!("mf", loc.as_code_str());
/// assert_eq!("main field", loc.as_phrase());
/// assert_eq!("location_main_field", loc.segment_id());
///
/// assert_eq!(None, LocationCode::lookup("MF"));
/// ```
pub trait Code: Copy + EnumMessage + EnumProperty + FromStr + 'static {
    /// Decode from a (lower-case) code
    ///
    /// Returns `None` if `code` is not part of the vocabulary.
    fn lookup<S>(code: S) -> Option<Self>
    where
        S: AsRef<str>,
    {
        Self::from_str(code.as_ref()).ok()
    }

    /// Short code, like "`pf`"
    fn as_code_str(&self) -> &'static str {
        self.get_serializations()[0]
    }

    /// Spoken phrase, like "`practice field`"
    fn as_phrase(&self) -> &'static str {
        self.get_detailed_message().expect("missing phrase")
    }

    /// Audio segment identifier, like "`location_practice_field`"
    fn segment_id(&self) -> &'static str {
        self.get_str("segment").expect("missing segment")
    }
}

// Display shows the phrase; the alternate form shows the code
macro_rules! impl_code {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Code for $ty {}

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    if f.alternate() {
                        std::fmt::Display::fmt(self.as_code_str(), f)
                    } else {
                        std::fmt::Display::fmt(self.as_phrase(), f)
                    }
                }
            }

            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.as_code_str()
                }
            }
        )+
    };
}

impl_code!(LocationCode, ClassSeverity, Subsystem, Subteam, SeverityLevel);

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use lazy_static::lazy_static;
    use regex::Regex;
    use strum::IntoEnumIterator;

    lazy_static! {
        static ref CODE: Regex = Regex::new(r"^[a-z1-5]{1,4}$").expect("bad test regexp");
        static ref SEGMENT: Regex = Regex::new(r"^[a-z][a-z0-9_]+$").expect("bad test regexp");
    }

    // every variant has a well-formed, unique code, phrase, and segment
    fn check_vocabulary<C>()
    where
        C: Code + IntoEnumIterator + PartialEq + std::fmt::Debug,
    {
        let mut codes = HashSet::new();
        let mut phrases = HashSet::new();

        for word in C::iter() {
            let code = word.as_code_str();
            assert!(CODE.is_match(code), "bad code {:?}", code);
            assert!(SEGMENT.is_match(word.segment_id()));
            assert!(!word.as_phrase().is_empty());
            assert!(codes.insert(code));
            assert!(phrases.insert(word.as_phrase()));
            assert_eq!(Some(word), C::lookup(code));
        }
    }

    #[test]
    fn test_vocabulary_complete() {
        check_vocabulary::<LocationCode>();
        check_vocabulary::<ClassSeverity>();
        check_vocabulary::<Subsystem>();
        check_vocabulary::<Subteam>();
        check_vocabulary::<SeverityLevel>();
    }

    #[test]
    fn test_display() {
        assert_eq!("launcher", format!("{}", Subsystem::Launcher));
        assert_eq!("shtr", format!("{:#}", Subsystem::Launcher));
        assert_eq!("Severity 4", format!("{}", SeverityLevel::Four));
        assert_eq!("4", format!("{:#}", SeverityLevel::Four));
        assert_eq!("a", Subteam::AllHands.as_ref());
    }
}

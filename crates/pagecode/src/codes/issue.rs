//! Issue triplet codes: subsystem, sub-team, and severity level

use std::convert::TryFrom;
use std::fmt;

/// Robot subsystem which needs attention
///
/// | Code   | Subsystem                           |
/// |--------|-------------------------------------|
/// | `ind`  | [indexer](Subsystem::Indexer)       |
/// | `shtr` | [launcher](Subsystem::Launcher)     |
/// | `clmb` | [climb](Subsystem::Climb)           |
/// | `dt`   | [drivetrain](Subsystem::Drivetrain) |
/// | `int`  | [intake](Subsystem::Intake)         |
/// | `hand` | [handoff](Subsystem::Handoff)       |
///
/// The shooter code `shtr` is announced as the "launcher."
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumProperty,
    strum_macros::EnumIter,
)]
pub enum Subsystem {
    #[strum(
        serialize = "ind",
        detailed_message = "indexer",
        props(segment = "subsystem_indexer")
    )]
    Indexer,

    #[strum(
        serialize = "shtr",
        detailed_message = "launcher",
        props(segment = "subsystem_launcher")
    )]
    Launcher,

    #[strum(
        serialize = "clmb",
        detailed_message = "climb",
        props(segment = "subsystem_climb")
    )]
    Climb,

    #[strum(
        serialize = "dt",
        detailed_message = "drivetrain",
        props(segment = "subsystem_drivetrain")
    )]
    Drivetrain,

    #[strum(
        serialize = "int",
        detailed_message = "intake",
        props(segment = "subsystem_intake")
    )]
    Intake,

    #[strum(
        serialize = "hand",
        detailed_message = "handoff",
        props(segment = "subsystem_handoff")
    )]
    Handoff,
}

/// Sub-team which is being paged
///
/// | Code | Sub-team                             |
/// |------|--------------------------------------|
/// | `e`  | [electrical](Subteam::Electrical)    |
/// | `m`  | [mechanical](Subteam::Mechanical)    |
/// | `p`  | [programming](Subteam::Programming)  |
/// | `a`  | [all hands](Subteam::AllHands)       |
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumProperty,
    strum_macros::EnumIter,
)]
pub enum Subteam {
    #[strum(
        serialize = "e",
        detailed_message = "electrical",
        props(segment = "subteam_electrical")
    )]
    Electrical,

    #[strum(
        serialize = "m",
        detailed_message = "mechanical",
        props(segment = "subteam_mechanical")
    )]
    Mechanical,

    #[strum(
        serialize = "p",
        detailed_message = "programming",
        props(segment = "subteam_programming")
    )]
    Programming,

    /// Everyone
    #[strum(
        serialize = "a",
        detailed_message = "all hands",
        props(segment = "subteam_all_hands")
    )]
    AllHands,
}

/// Per-issue severity level, from one to five
///
/// Severity levels are `Ord` and convert to and from their
/// numeric value.
///
/// ```
/// # use std::convert::TryFrom;
/// use pagecode::{Code, SeverityLevel};
///
/// let lvl = SeverityLevel::lookup("3").unwrap();
/// assert_eq!(SeverityLevel::Three, lvl);
/// assert_eq!(3, lvl.as_number());
/// assert_eq!("Severity 3", lvl.as_phrase());
/// assert_eq!(Ok(lvl), SeverityLevel::try_from(3u8));
///
/// assert!(SeverityLevel::try_from(9u8).is_err());
/// assert!(SeverityLevel::One < SeverityLevel::Five);
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumProperty,
    strum_macros::EnumIter,
)]
#[repr(u8)]
pub enum SeverityLevel {
    #[strum(
        serialize = "1",
        detailed_message = "Severity 1",
        props(segment = "severity_1")
    )]
    One = 1,

    #[strum(
        serialize = "2",
        detailed_message = "Severity 2",
        props(segment = "severity_2")
    )]
    Two = 2,

    #[strum(
        serialize = "3",
        detailed_message = "Severity 3",
        props(segment = "severity_3")
    )]
    Three = 3,

    #[strum(
        serialize = "4",
        detailed_message = "Severity 4",
        props(segment = "severity_4")
    )]
    Four = 4,

    #[strum(
        serialize = "5",
        detailed_message = "Severity 5",
        props(segment = "severity_5")
    )]
    Five = 5,
}

impl SeverityLevel {
    /// Numeric severity, `1..=5`
    pub fn as_number(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for SeverityLevel {
    type Error = u8;

    /// Convert from `1..=5`; returns the input on failure
    fn try_from(num: u8) -> Result<Self, Self::Error> {
        match num {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            _ => Err(num),
        }
    }
}

/// Which field of an issue triplet
///
/// Reported by [`DecodeError::UnknownIssueField`](crate::DecodeError::UnknownIssueField).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IssueField {
    /// First token of the triplet
    Subsystem,

    /// Second token of the triplet
    Subteam,

    /// Third token of the triplet
    SeverityLevel,
}

impl IssueField {
    /// Field for the given offset `0..3` within a triplet
    pub(crate) fn at_offset(offset: usize) -> Self {
        match offset % 3 {
            0 => Self::Subsystem,
            1 => Self::Subteam,
            _ => Self::SeverityLevel,
        }
    }
}

impl fmt::Display for IssueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Subsystem => "subsystem",
            Self::Subteam => "sub-team",
            Self::SeverityLevel => "severity level",
        };
        f.write_str(name)
    }
}

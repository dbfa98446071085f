//! Fixed announcement phrases and the audio segment table
//!
//! Announcements are assembled from the coded vocabulary
//! (see [`codes`](crate::codes)) and a handful of fixed
//! [`Connective`] phrases which glue them together. Every phrase,
//! coded or fixed, has an audio segment identifier. The
//! [`segment_phrase()`] function maps identifiers back to the
//! words they speak.

use phf::phf_map;
use strum::{EnumMessage, EnumProperty};

/// Fixed phrases used to compose an announcement
///
/// ```
/// use pagecode::Connective;
///
/// assert_eq!("Specifically,", Connective::Specifically.as_phrase());
/// assert_eq!("lead_in_specifically", Connective::Specifically.segment_id());
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumProperty,
    strum_macros::EnumIter,
)]
pub enum Connective {
    /// Names the paged team and opens the location clause
    #[strum(
        detailed_message = "Attention Pack of Parts pit crew! Please report to the",
        props(segment = "intro")
    )]
    Intro,

    /// Joins location and class severity
    #[strum(
        detailed_message = "as there is a",
        props(segment = "connective_as_there_is_a")
    )]
    AsThereIsA,

    /// Closes the opening sentence
    #[strum(
        detailed_message = "with the robot.",
        props(segment = "connective_with_the_robot")
    )]
    WithTheRobot,

    /// Precedes a long list of issues
    #[strum(
        detailed_message = "Specifically,",
        props(segment = "lead_in_specifically")
    )]
    Specifically,

    /// Opens each issue sentence
    #[strum(detailed_message = "There is a", props(segment = "issue_there_is_a"))]
    IssueOpener,

    /// Joins an issue's sub-team and subsystem
    #[strum(
        detailed_message = "issue with the",
        props(segment = "connective_issue_with_the")
    )]
    IssueWithThe,

    /// Attributes the free-text note
    #[strum(detailed_message = "Logan says:", props(segment = "note_attribution"))]
    NoteAttribution,

    /// Announced in place of a malformed paging code
    #[strum(
        detailed_message = "Read with bad format",
        props(segment = "invalid_format")
    )]
    InvalidFormat,
}

impl Connective {
    /// Spoken phrase
    pub fn as_phrase(&self) -> &'static str {
        self.get_detailed_message().expect("missing phrase")
    }

    /// Audio segment identifier
    pub fn segment_id(&self) -> &'static str {
        self.get_str("segment").expect("missing segment")
    }
}

/// Words spoken by an audio segment
///
/// Returns `None` if `segment_id` is not known.
///
/// ```
/// use pagecode::segment_phrase;
///
/// assert_eq!(Some("drivetrain"), segment_phrase("subsystem_drivetrain"));
/// assert_eq!(None, segment_phrase("subsystem_flux_capacitor"));
/// ```
pub fn segment_phrase<S>(segment_id: S) -> Option<&'static str>
where
    S: AsRef<str>,
{
    SEGMENTS.get(segment_id.as_ref()).cloned()
}

/// Every audio segment which an announcement may contain
static SEGMENTS: phf::Map<&'static str, &'static str> = phf_map! {
    // fixed phrases
    "intro" => "Attention Pack of Parts pit crew! Please report to the",
    "connective_as_there_is_a" => "as there is a",
    "connective_with_the_robot" => "with the robot.",
    "lead_in_specifically" => "Specifically,",
    "issue_there_is_a" => "There is a",
    "connective_issue_with_the" => "issue with the",
    "note_attribution" => "Logan says:",
    "invalid_format" => "Read with bad format",

    // locations
    "location_practice_field" => "practice field",
    "location_main_field" => "main field",
    "location_pit" => "pit",

    // class severity
    "class_emergency" => "emergency",
    "class_medium" => "medium issue",
    "class_small" => "small issue",

    // issue severity
    "severity_1" => "Severity 1",
    "severity_2" => "Severity 2",
    "severity_3" => "Severity 3",
    "severity_4" => "Severity 4",
    "severity_5" => "Severity 5",

    // sub-teams
    "subteam_electrical" => "electrical",
    "subteam_mechanical" => "mechanical",
    "subteam_programming" => "programming",
    "subteam_all_hands" => "all hands",

    // subsystems
    "subsystem_indexer" => "indexer",
    "subsystem_launcher" => "launcher",
    "subsystem_climb" => "climb",
    "subsystem_drivetrain" => "drivetrain",
    "subsystem_intake" => "intake",
    "subsystem_handoff" => "handoff",
};

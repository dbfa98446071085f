//! Announcement sequencer
//!
//! An [`Alert`] is first laid out as an ordered list of typed
//! [`AnnouncementUnit`]. The same list is then rendered in one of
//! two ways:
//!
//! * as a single sentence for a speech synthesizer; or
//! * as a playlist of pre-recorded audio segment identifiers.
//!
//! Both renderings visit the units in the same order, so the two
//! never disagree about what is said.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::alert::{Alert, IssueEntry};
use crate::codes::{ClassSeverity, Code, LocationCode};
use crate::vocabulary::Connective;

/// Announcements with at least this many issues get a lead-in
const LEAD_IN_MIN_ISSUES: usize = 3;

/// How an announcement is rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    /// One sentence of synthesized speech
    #[default]
    Speech,

    /// A playlist of audio segments
    Segments,
}

/// An unrecognized output mode
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("unknown output mode \"{0}\" (expected \"speech\" or \"segments\")")]
pub struct UnknownOutputMode(pub String);

/// A piece of an announcement
///
/// Each unit is rendered either to words or to one or more audio
/// segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnnouncementUnit {
    /// A fixed phrase
    Connective(Connective),

    /// Where to report
    Location(LocationCode),

    /// How bad it is
    Class(ClassSeverity),

    /// One complete issue sentence
    Issue(IssueEntry),

    /// Verbatim free text
    ///
    /// Notes have no audio segment.
    Note(String),
}

/// Ordered units which describe an [`Alert`]
///
/// ```
/// use pagecode::{Alert, Announcement};
///
/// let alert = Alert::decode("pf-e-ind-e-1").unwrap();
/// let announcement = Announcement::from(&alert);
/// assert_eq!(
///     "Attention Pack of Parts pit crew! Please report to the practice field \
///      as there is a emergency with the robot. There is a Severity 1 electrical \
///      issue with the indexer.",
///     announcement.speech_text()
/// );
/// assert_eq!(
///     vec![
///         "intro",
///         "location_practice_field",
///         "connective_as_there_is_a",
///         "class_emergency",
///         "connective_with_the_robot",
///         "issue_there_is_a",
///         "severity_1",
///         "subteam_electrical",
///         "connective_issue_with_the",
///         "subsystem_indexer",
///     ],
///     announcement.segments()
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Announcement {
    units: Vec<AnnouncementUnit>,
}

/// A rendered announcement, ready for playback
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnnouncementPlan {
    /// Text for a speech synthesizer
    Speech(String),

    /// Audio segment identifiers, in playback order
    ///
    /// The `dropped_note` contains any free-text note which
    /// could not be represented as audio segments.
    Segments {
        segments: Vec<&'static str>,
        dropped_note: Option<String>,
    },
}

/// Render an alert for playback
///
/// Rendering never fails: every field of an [`Alert`] is part of
/// the vocabulary.
///
/// ```
/// use pagecode::{render, Alert, AnnouncementPlan, OutputMode};
///
/// let alert = Alert::decode("mf-s-dt-p-3-clmb-a-5-Logan").unwrap();
/// match render(&alert, OutputMode::Segments) {
///     AnnouncementPlan::Segments { segments, dropped_note } => {
///         assert_eq!(Some("subsystem_climb"), segments.last().copied());
///         assert_eq!(Some("Logan".to_owned()), dropped_note);
///     }
///     _ => unreachable!(),
/// }
/// ```
pub fn render(alert: &Alert, mode: OutputMode) -> AnnouncementPlan {
    Announcement::from(alert).render(mode)
}

impl Announcement {
    /// Lay out the announcement for `alert`
    pub fn new(alert: &Alert) -> Self {
        let issues = alert.issues();
        let mut units = Vec::with_capacity(8 + issues.len());

        units.push(AnnouncementUnit::Connective(Connective::Intro));
        units.push(AnnouncementUnit::Location(alert.location()));
        units.push(AnnouncementUnit::Connective(Connective::AsThereIsA));
        units.push(AnnouncementUnit::Class(alert.class_severity()));
        units.push(AnnouncementUnit::Connective(Connective::WithTheRobot));

        if issues.len() >= LEAD_IN_MIN_ISSUES {
            units.push(AnnouncementUnit::Connective(Connective::Specifically));
        }
        units.extend(issues.iter().copied().map(AnnouncementUnit::Issue));

        if let Some(note) = alert.trailing_note() {
            units.push(AnnouncementUnit::Connective(Connective::NoteAttribution));
            units.push(AnnouncementUnit::Note(note.to_owned()));
        }

        Self { units }
    }

    /// The fixed announcement for a malformed paging code
    pub fn invalid_format() -> Self {
        Self {
            units: vec![AnnouncementUnit::Connective(Connective::InvalidFormat)],
        }
    }

    /// Units, in announcement order
    pub fn units(&self) -> &[AnnouncementUnit] {
        &self.units
    }

    /// Free-text note, if any
    pub fn note(&self) -> Option<&str> {
        self.units.iter().find_map(|unit| match unit {
            AnnouncementUnit::Note(note) => Some(note.as_str()),
            _ => None,
        })
    }

    /// Render to text or segments
    pub fn render(&self, mode: OutputMode) -> AnnouncementPlan {
        match mode {
            OutputMode::Speech => AnnouncementPlan::Speech(self.speech_text()),
            OutputMode::Segments => AnnouncementPlan::Segments {
                segments: self.segments(),
                dropped_note: self.note().map(str::to_owned),
            },
        }
    }

    /// Render as one sentence of speech
    ///
    /// Units are separated by single spaces.
    pub fn speech_text(&self) -> String {
        self.units
            .iter()
            .map(AnnouncementUnit::speech_text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render as audio segment identifiers
    ///
    /// A note and its attribution have no audio and are omitted.
    pub fn segments(&self) -> Vec<&'static str> {
        let mut out = Vec::with_capacity(self.units.len() + 4);
        for unit in &self.units {
            unit.push_segments(&mut out);
        }
        out
    }
}

impl AnnouncementUnit {
    /// Words spoken for this unit
    pub fn speech_text(&self) -> String {
        match self {
            Self::Connective(conn) => conn.as_phrase().to_owned(),
            Self::Location(loc) => loc.as_phrase().to_owned(),
            Self::Class(class) => class.as_phrase().to_owned(),
            Self::Issue(issue) => format!(
                "{} {} {} {} {}.",
                Connective::IssueOpener.as_phrase(),
                issue.severity_level.as_phrase(),
                issue.subteam.as_phrase(),
                Connective::IssueWithThe.as_phrase(),
                issue.subsystem.as_phrase()
            ),
            Self::Note(note) => note.clone(),
        }
    }

    // Append this unit's audio segments, in speech order
    //
    // Notes are free text, so neither the note nor its
    // attribution is recorded.
    fn push_segments(&self, out: &mut Vec<&'static str>) {
        match self {
            Self::Connective(Connective::NoteAttribution) => {}
            Self::Connective(conn) => out.push(conn.segment_id()),
            Self::Location(loc) => out.push(loc.segment_id()),
            Self::Class(class) => out.push(class.segment_id()),
            Self::Issue(issue) => out.extend_from_slice(&[
                Connective::IssueOpener.segment_id(),
                issue.severity_level.segment_id(),
                issue.subteam.segment_id(),
                Connective::IssueWithThe.segment_id(),
                issue.subsystem.segment_id(),
            ]),
            Self::Note(_) => {}
        }
    }
}

impl From<&Alert> for Announcement {
    fn from(alert: &Alert) -> Self {
        Self::new(alert)
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.speech_text())
    }
}

impl OutputMode {
    /// Lower-case name, like "`speech`"
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speech => "speech",
            Self::Segments => "segments",
        }
    }
}

impl FromStr for OutputMode {
    type Err = UnknownOutputMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "speech" => Ok(Self::Speech),
            "segments" => Ok(Self::Segments),
            _ => Err(UnknownOutputMode(s.to_owned())),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::vocabulary::segment_phrase;

    const FIRST_EXAMPLE_SPEECH: &str = "Attention Pack of Parts pit crew! Please report to the \
        practice field as there is a emergency with the robot. There is a Severity 1 \
        electrical issue with the indexer.";

    fn alert(code: &str) -> Alert {
        Alert::decode(code).expect("bad code")
    }

    #[test]
    fn test_speech_single_issue() {
        assert_eq!(
            AnnouncementPlan::Speech(FIRST_EXAMPLE_SPEECH.to_owned()),
            render(&alert("pf-e-ind-e-1"), OutputMode::Speech)
        );
    }

    #[test]
    fn test_speech_with_note() {
        assert_eq!(
            AnnouncementPlan::Speech(
                "Attention Pack of Parts pit crew! Please report to the main field as there is a \
                 small issue with the robot. There is a Severity 3 programming issue with the \
                 drivetrain. There is a Severity 5 all hands issue with the climb. Logan says: \
                 Logan"
                    .to_owned()
            ),
            render(&alert("mf-s-dt-p-3-clmb-a-5-Logan"), OutputMode::Speech)
        );
    }

    #[test]
    fn test_speech_no_issues() {
        assert_eq!(
            "Attention Pack of Parts pit crew! Please report to the pit as there is a medium \
             issue with the robot. Logan says: Need zip ties",
            Announcement::new(&alert("p-m-Need zip ties")).speech_text()
        );
    }

    #[test]
    fn test_lead_in() {
        let two = Announcement::new(&alert("pf-e-ind-e-1-dt-m-2"));
        assert!(!two
            .units()
            .contains(&AnnouncementUnit::Connective(Connective::Specifically)));

        let three = Announcement::new(&alert("pf-e-ind-e-1-dt-m-2-int-p-3"));
        assert_eq!(
            AnnouncementUnit::Connective(Connective::Specifically),
            three.units()[5]
        );
        assert!(three
            .speech_text()
            .contains("with the robot. Specifically, There is a Severity 1 electrical"));
        assert_eq!(Some(&"lead_in_specifically"), three.segments().get(5));
    }

    #[test]
    fn test_segments_with_note() {
        let plan = render(&alert("mf-s-dt-p-3-clmb-a-5-Logan"), OutputMode::Segments);
        assert_eq!(
            AnnouncementPlan::Segments {
                segments: vec![
                    "intro",
                    "location_main_field",
                    "connective_as_there_is_a",
                    "class_small",
                    "connective_with_the_robot",
                    "issue_there_is_a",
                    "severity_3",
                    "subteam_programming",
                    "connective_issue_with_the",
                    "subsystem_drivetrain",
                    "issue_there_is_a",
                    "severity_5",
                    "subteam_all_hands",
                    "connective_issue_with_the",
                    "subsystem_climb",
                ],
                dropped_note: Some("Logan".to_owned()),
            },
            plan
        );
    }

    // segments and speech say the same words in the same order
    #[test]
    fn test_segments_agree_with_speech() {
        let announcement = Announcement::new(&alert("p-e-hand-a-4-shtr-m-1-int-e-2-clmb-p-5"));
        let transcript: Vec<&str> = announcement
            .segments()
            .iter()
            .map(|seg| segment_phrase(seg).expect("unknown segment"))
            .collect();
        assert_eq!(
            announcement.speech_text().replace('.', ""),
            transcript.join(" ").replace('.', "")
        );
    }

    #[test]
    fn test_invalid_format() {
        let announcement = Announcement::invalid_format();
        assert_eq!("Read with bad format", announcement.speech_text());
        assert_eq!(vec!["invalid_format"], announcement.segments());
        assert_eq!(None, announcement.note());
    }

    #[test]
    fn test_output_mode() {
        assert_eq!(Ok(OutputMode::Segments), "Segments".parse());
        assert_eq!(Ok(OutputMode::Speech), "speech".parse());
        assert_eq!(
            Err(UnknownOutputMode("morse".to_owned())),
            "morse".parse::<OutputMode>()
        );
        assert_eq!("segments", OutputMode::Segments.to_string());
        assert_eq!(OutputMode::Speech, OutputMode::default());
    }
}

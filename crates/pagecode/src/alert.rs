//! Paging code decoder

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use thiserror::Error;

use crate::codes::{ClassSeverity, Code, IssueField, LocationCode, SeverityLevel, Subsystem, Subteam};
use crate::logutil::escape_log;

/// A fully-decoded paging code
///
/// Paging codes are short, dash-delimited strings which are
/// typed into a text message by whoever needs the pit crew:
///
/// ```txt
/// mf-s-dt-p-3-clmb-a-5-Logan
/// ^  ^ ^^^^^^ ^^^^^^^^ ^^^^^
/// |  | issue  issue    note
/// |  class
/// location
/// ```
///
/// 1. The *location* where the crew should report
/// 2. The *class* or overall severity of the page
/// 3. Zero or more *issues*, each of which is a triplet of
///    subsystem, sub-team, and severity level
/// 4. An optional free-text *note*, which must be the one
///    and only token left over after the last complete triplet
///
/// Codes are case-insensitive and whitespace around each
/// token is ignored. The note is kept verbatim.
///
/// ```
/// use pagecode::{Alert, ClassSeverity, LocationCode, SeverityLevel, Subsystem, Subteam};
///
/// let alert = Alert::decode("mf-s-dt-p-3-clmb-a-5-Logan").expect("bad code");
/// assert_eq!(LocationCode::MainField, alert.location());
/// assert_eq!(ClassSeverity::Small, alert.class_severity());
/// assert_eq!(2, alert.issues().len());
/// assert_eq!(Subsystem::Climb, alert.issues()[1].subsystem);
/// assert_eq!(Subteam::AllHands, alert.issues()[1].subteam);
/// assert_eq!(SeverityLevel::Five, alert.issues()[1].severity_level);
/// assert_eq!(Some("Logan"), alert.trailing_note());
/// ```
///
/// An `Alert` is only ever constructed from a code which is valid
/// in its entirety. Every field is guaranteed to be part of the
/// vocabulary, so an `Alert` can always be announced.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Alert {
    location: LocationCode,
    class_severity: ClassSeverity,
    issues: Vec<IssueEntry>,
    trailing_note: Option<String>,
}

/// One issue with the robot
///
/// Decoded from a `subsystem-subteam-severity` triplet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IssueEntry {
    /// What part of the robot is affected
    pub subsystem: Subsystem,

    /// Who should fix it
    pub subteam: Subteam,

    /// How bad it is
    pub severity_level: SeverityLevel,
}

/// Error decoding a paging code
///
/// Decoding fails fast: the first invalid token is reported,
/// and no partial [`Alert`] is produced.
///
/// Most text messages are not paging codes at all. These will
/// fail with [`DecodeError::TooFewTokens`], which callers should
/// ignore silently. Use [`is_silent()`](DecodeError::is_silent)
/// to distinguish this case from a genuine typo.
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DecodeError {
    /// Fewer than three tokens: not a paging code
    #[error("not a paging code: too few tokens")]
    TooFewTokens,

    /// First token is not a location code
    #[error("invalid paging code: unknown location \"{0}\"")]
    UnknownLocation(String),

    /// Second token is not a class severity code
    #[error("invalid paging code: unknown class \"{0}\"")]
    UnknownClass(String),

    /// A token in an issue triplet is not known
    #[error("invalid paging code: unknown {field} \"{token}\" at position {position}")]
    UnknownIssueField {
        /// Zero-based token index
        position: usize,

        /// Which field of the triplet
        field: IssueField,

        /// Offending token, trimmed and lower-cased
        token: String,
    },

    /// Two tokens remain after the last complete triplet
    #[error("invalid paging code: incomplete issue at position {position}")]
    IncompleteTriplet {
        /// Zero-based index of the first dangling token
        position: usize,
    },
}

impl DecodeError {
    /// True if this error should not be reported to anyone
    ///
    /// Ordinary conversation does not look like a paging code.
    /// Only [`DecodeError::TooFewTokens`] is silent; every other
    /// error indicates a paging code with a typo in it.
    pub fn is_silent(&self) -> bool {
        matches!(self, DecodeError::TooFewTokens)
    }
}

impl Alert {
    /// Decode a paging code from a message body
    ///
    /// See [`decode()`](crate::decode).
    pub fn decode<S>(body: S) -> Result<Self, DecodeError>
    where
        S: AsRef<str>,
    {
        let body = body.as_ref();
        let tokens = tokenize(body);
        for (i, tok) in tokens.iter().enumerate() {
            trace!("token {}: \"{}\"", i, escape_log(tok));
        }

        if tokens.len() < Self::MIN_TOKENS {
            return Err(DecodeError::TooFewTokens);
        }

        let location = LocationCode::lookup(fold(tokens[0]))
            .ok_or_else(|| DecodeError::UnknownLocation(fold(tokens[0])))?;
        let class_severity = ClassSeverity::lookup(fold(tokens[1]))
            .ok_or_else(|| DecodeError::UnknownClass(fold(tokens[1])))?;

        let mut issues = Vec::with_capacity((tokens.len() - Self::MIN_TOKENS + 1) / 3);
        let mut i = Self::OFFSET_ISSUES;
        while i + 2 < tokens.len() {
            issues.push(IssueEntry {
                subsystem: lookup_issue_field(&tokens, i)?,
                subteam: lookup_issue_field(&tokens, i + 1)?,
                severity_level: lookup_issue_field(&tokens, i + 2)?,
            });
            i += 3;
        }

        let trailing_note = match tokens.len() - i {
            0 => None,
            // a trailing delimiter leaves an empty note: there is none
            1 if tokens[i].is_empty() => None,
            1 => Some(tokens[i].to_owned()),
            _ => return Err(DecodeError::IncompleteTriplet { position: i }),
        };

        let out = Self {
            location,
            class_severity,
            issues,
            trailing_note,
        };
        debug!("decoded paging code \"{}\" → {}", escape_log(body), out);
        Ok(out)
    }

    /// Where the crew should report
    pub fn location(&self) -> LocationCode {
        self.location
    }

    /// Overall severity
    pub fn class_severity(&self) -> ClassSeverity {
        self.class_severity
    }

    /// Issues, in the order they were listed
    ///
    /// Repeated issues are neither merged nor reordered.
    pub fn issues(&self) -> &[IssueEntry] {
        &self.issues
    }

    /// Free-text note, if present
    ///
    /// The note is reproduced verbatim, without case-folding.
    pub fn trailing_note(&self) -> Option<&str> {
        self.trailing_note.as_deref()
    }

    const MIN_TOKENS: usize = 3;
    const OFFSET_ISSUES: usize = 2;
}

impl fmt::Display for Alert {
    /// Canonical paging code, like `pf-e-ind-e-1`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}-{:#}", self.location, self.class_severity)?;
        for issue in &self.issues {
            write!(f, "-{}", issue)?;
        }
        if let Some(note) = &self.trailing_note {
            write!(f, "-{}", note)?;
        }
        Ok(())
    }
}

impl fmt::Display for IssueEntry {
    /// Canonical triplet, like `ind-e-1`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#}-{:#}-{:#}",
            self.subsystem, self.subteam, self.severity_level
        )
    }
}

impl FromStr for Alert {
    type Err = DecodeError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl TryFrom<&str> for Alert {
    type Error = DecodeError;

    #[inline]
    fn try_from(inp: &str) -> Result<Self, Self::Error> {
        Self::decode(inp)
    }
}

// Split a message body into trimmed tokens
//
// Tokens keep their original case. Consecutive delimiters
// produce empty tokens.
fn tokenize(body: &str) -> Vec<&str> {
    lazy_static! {
        static ref DELIMITER: Regex = Regex::new(r"\s*-\s*").expect("bad delimiter regexp");
    }

    DELIMITER.split(body.trim()).collect()
}

// Case-fold a token for vocabulary lookup
fn fold(token: &str) -> String {
    token.to_lowercase()
}

// Decode one member of the issue triplet at `position`
fn lookup_issue_field<C>(tokens: &[&str], position: usize) -> Result<C, DecodeError>
where
    C: Code,
{
    let token = fold(tokens[position]);
    C::lookup(&token).ok_or_else(|| DecodeError::UnknownIssueField {
        position,
        field: IssueField::at_offset(position - Alert::OFFSET_ISSUES),
        token,
    })
}

//! Class severity codes

/// Overall severity of the page
///
/// The second token of every paging code.
///
/// | Code | Class                                    |
/// |------|------------------------------------------|
/// | `e`  | [emergency](ClassSeverity::Emergency)    |
/// | `m`  | [medium issue](ClassSeverity::Medium)    |
/// | `s`  | [small issue](ClassSeverity::Small)      |
///
/// Class severities are `Ord`, with [`ClassSeverity::Emergency`]
/// being the greatest.
///
/// ```
/// use pagecode::{ClassSeverity, Code};
///
/// assert_eq!(Some(ClassSeverity::Medium), ClassSeverity::lookup("m"));
/// assert_eq!("medium issue", ClassSeverity::Medium.as_phrase());
/// assert!(ClassSeverity::Small < ClassSeverity::Emergency);
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
pub enum ClassSeverity {
    /// A small issue
    #[strum(
        serialize = "s",
        detailed_message = "small issue",
        props(segment = "class_small")
    )]
    Small,

    /// A medium issue
    #[strum(
        serialize = "m",
        detailed_message = "medium issue",
        props(segment = "class_medium")
    )]
    Medium,

    /// An emergency: drop everything
    #[strum(
        serialize = "e",
        detailed_message = "emergency",
        props(segment = "class_emergency")
    )]
    Emergency,
}

//! Location codes

/// Where the crew should report
///
/// The first token of every paging code.
///
/// | Code | Location                                         |
/// |------|--------------------------------------------------|
/// | `pf` | [practice field](LocationCode::PracticeField)    |
/// | `mf` | [main field](LocationCode::MainField)            |
/// | `p`  | [pit](LocationCode::Pit)                         |
///
/// ```
/// use pagecode::{Code, LocationCode};
///
/// assert_eq!(Some(LocationCode::Pit), LocationCode::lookup("p"));
/// assert_eq!("pit", LocationCode::Pit.as_phrase());
/// assert_eq!("pf", format!("{:#}", LocationCode::PracticeField));
/// ```
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
pub enum LocationCode {
    /// The practice field
    #[strum(
        serialize = "pf",
        detailed_message = "practice field",
        props(segment = "location_practice_field")
    )]
    PracticeField,

    /// The main (competition) field
    #[strum(
        serialize = "mf",
        detailed_message = "main field",
        props(segment = "location_main_field")
    )]
    MainField,

    /// The team's pit
    #[strum(serialize = "p", detailed_message = "pit", props(segment = "location_pit"))]
    Pit,
}

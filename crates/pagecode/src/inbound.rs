//! Inbound text messages
//!
//! Paging codes arrive as ordinary text messages, either
//! directly as SMS or indirectly as a notification posted by a
//! messaging app. Both are reduced to a [`RawMessage`] before
//! decoding. Capturing the SMS or notification itself is the
//! job of the host platform.

use std::fmt;

use log::debug;

use crate::logutil::escape_log;

/// Package name of the default messaging app
pub const DEFAULT_MESSAGING_PACKAGE: &str = "com.google.android.apps.messaging";

/// Sender name used when none is available
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Status text which the messaging app posts while it syncs
const BACKGROUND_WORK_TEXT: &str = "Messages is doing work in the background";

/// A text message which may contain a paging code
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawMessage {
    /// Who sent the message
    pub sender: String,

    /// Message text
    pub body: String,
}

/// Where a [`RawMessage`] came from
///
/// Both sources are treated identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InboundSource {
    /// An SMS broadcast
    Sms,

    /// A messaging app notification
    Notification,
}

/// One SMS, as delivered by the platform
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SmsMessage {
    /// Display originating address
    pub originating_address: String,

    /// Message body
    pub body: String,
}

/// A notification posted by some app
///
/// Each field mirrors an optional notification extra. Messaging
/// apps usually include a list of recent conversation
/// [`messages`](Notification::messages); older apps only set a
/// title and text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Notification {
    /// Package name of the posting app
    pub package: String,

    /// Conversation title
    pub conversation_title: Option<String>,

    /// Notification title
    pub title: Option<String>,

    /// Expanded notification text
    pub big_text: Option<String>,

    /// Notification text
    pub text: Option<String>,

    /// Conversation messages, oldest first
    pub messages: Vec<ConversationMessage>,
}

/// One entry of a conversation-style notification
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConversationMessage {
    /// Sender display name
    pub sender: Option<String>,

    /// Message text
    pub text: Option<String>,
}

/// Selects paging candidates from posted notifications
///
/// Only notifications from the configured messaging app are
/// considered. Notifications without any text, and the app's
/// "doing work in the background" status notification, are
/// ignored.
///
/// ```
/// use pagecode::{Notification, NotificationFilter};
///
/// let filter = NotificationFilter::default();
///
/// let notification = Notification {
///     package: "com.google.android.apps.messaging".to_owned(),
///     title: Some("Drive Coach".to_owned()),
///     text: Some("pf-e-ind-e-1".to_owned()),
///     ..Default::default()
/// };
/// let msg = filter.accept(&notification).expect("filtered");
/// assert_eq!("Drive Coach", msg.sender);
/// assert_eq!("pf-e-ind-e-1", msg.body);
///
/// let other_app = Notification {
///     package: "com.example.game".to_owned(),
///     ..notification
/// };
/// assert_eq!(None, filter.accept(&other_app));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationFilter {
    package: String,
}

impl RawMessage {
    /// New message from `sender`
    pub fn new<S, B>(sender: S, body: B) -> Self
    where
        S: Into<String>,
        B: Into<String>,
    {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for RawMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sender, escape_log(&self.body))
    }
}

impl fmt::Display for InboundSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InboundSource::Sms => f.write_str("SMS"),
            InboundSource::Notification => f.write_str("notification"),
        }
    }
}

impl From<SmsMessage> for RawMessage {
    fn from(sms: SmsMessage) -> Self {
        Self {
            sender: sms.originating_address,
            body: sms.body,
        }
    }
}

/// Convert a multi-part SMS delivery into messages
///
/// Every SMS is delivered, in order, as its own message.
pub fn from_sms<I>(messages: I) -> impl Iterator<Item = RawMessage>
where
    I: IntoIterator<Item = SmsMessage>,
{
    messages.into_iter().map(|sms| {
        debug!("SMS received from: {}", sms.originating_address);
        RawMessage::from(sms)
    })
}

impl NotificationFilter {
    /// Accept notifications from the messaging app `package`
    pub fn new<S>(package: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            package: package.into(),
        }
    }

    /// Package name of the accepted messaging app
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Extract a message from `notification`, if it has one
    pub fn accept(&self, notification: &Notification) -> Option<RawMessage> {
        if notification.package != self.package {
            return None;
        }

        let (sender, body) = extract_message(notification);
        let body = match body {
            Some(body) if !body.trim().is_empty() => body,
            _ => {
                debug!("messaging notification with no text");
                return None;
            }
        };
        if body == BACKGROUND_WORK_TEXT {
            debug!("ignoring background work notification");
            return None;
        }

        let msg = RawMessage::new(sender.unwrap_or(UNKNOWN_SENDER), body);
        debug!("notification from {}", msg);
        Some(msg)
    }
}

impl Default for NotificationFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGING_PACKAGE)
    }
}

// Find the (sender, text) pair in a notification
//
// The newest conversation message with text wins. Otherwise,
// fall back to the title and text of the notification itself.
fn extract_message(notification: &Notification) -> (Option<&str>, Option<&str>) {
    let newest = notification.messages.iter().rev().find_map(|msg| {
        let text = msg.text.as_deref().filter(|t| !t.trim().is_empty())?;
        Some((msg.sender.as_deref(), Some(text)))
    });
    if let Some(newest) = newest {
        return newest;
    }

    let title = notification
        .conversation_title
        .as_deref()
        .or(notification.title.as_deref());
    let text = notification
        .big_text
        .as_deref()
        .or(notification.text.as_deref());
    (title, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messaging() -> Notification {
        Notification {
            package: DEFAULT_MESSAGING_PACKAGE.to_owned(),
            ..Default::default()
        }
    }

    fn convo(sender: Option<&str>, text: Option<&str>) -> ConversationMessage {
        ConversationMessage {
            sender: sender.map(str::to_owned),
            text: text.map(str::to_owned),
        }
    }

    #[test]
    fn test_newest_conversation_message() {
        let notification = Notification {
            messages: vec![
                convo(Some("Alice"), Some("p-s-int-m-2")),
                convo(Some("Bob"), Some("mf-e-dt-a-5")),
                convo(Some("Carol"), Some("   ")),
            ],
            title: Some("Pit crew".to_owned()),
            text: Some("ignored".to_owned()),
            ..messaging()
        };
        assert_eq!(
            Some(RawMessage::new("Bob", "mf-e-dt-a-5")),
            NotificationFilter::default().accept(&notification)
        );
    }

    #[test]
    fn test_title_and_text_fallback() {
        let notification = Notification {
            conversation_title: Some("Pit crew".to_owned()),
            title: Some("Bob".to_owned()),
            big_text: Some("pf-m-hand-p-1".to_owned()),
            text: Some("pf-m-hand…".to_owned()),
            ..messaging()
        };
        assert_eq!(
            Some(RawMessage::new("Pit crew", "pf-m-hand-p-1")),
            NotificationFilter::default().accept(&notification)
        );

        let notification = Notification {
            text: Some("p-e-clmb-e-3".to_owned()),
            ..messaging()
        };
        assert_eq!(
            Some(RawMessage::new(UNKNOWN_SENDER, "p-e-clmb-e-3")),
            NotificationFilter::default().accept(&notification)
        );
    }

    #[test]
    fn test_ignored_notifications() {
        let filter = NotificationFilter::default();

        assert_eq!(None, filter.accept(&messaging()));

        let blank = Notification {
            title: Some("Bob".to_owned()),
            text: Some(" \n".to_owned()),
            ..messaging()
        };
        assert_eq!(None, filter.accept(&blank));

        let busy = Notification {
            text: Some(BACKGROUND_WORK_TEXT.to_owned()),
            ..messaging()
        };
        assert_eq!(None, filter.accept(&busy));

        let custom = NotificationFilter::new("org.example.chat");
        assert_eq!("org.example.chat", custom.package());
        let ok = Notification {
            text: Some("pf-e-ind-e-1".to_owned()),
            ..messaging()
        };
        assert_eq!(None, custom.accept(&ok));
    }

    #[test]
    fn test_from_sms() {
        let msgs: Vec<RawMessage> = from_sms(vec![
            SmsMessage {
                originating_address: "+15555550100".to_owned(),
                body: "pf-e-ind-e-1".to_owned(),
            },
            SmsMessage {
                originating_address: "+15555550101".to_owned(),
                body: "on my way".to_owned(),
            },
        ])
        .collect();
        assert_eq!(
            vec![
                RawMessage::new("+15555550100", "pf-e-ind-e-1"),
                RawMessage::new("+15555550101", "on my way"),
            ],
            msgs
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            "Bob: pf-e\\nind",
            RawMessage::new("Bob", "pf-e\nind").to_string()
        );
    }
}

//! Parse notification / diagnostic system.
//!
//! The binary format is only partially reverse engineered.  Non-fatal
//! findings made while reading (opaque byte regions, values outside the
//! observed set, streams left unparsed) are collected as `Notification`
//! items rather than being silently dropped or causing hard errors.
//!
//! After a read operation the caller can inspect
//! [`Library::notifications`](crate::library::Library::notifications) to see
//! what was encountered.

use std::fmt;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// An opaque byte region was skipped; its meaning is still unknown.
    UnknownData,
    /// A value outside the observed set was accepted (e.g. lock markers,
    /// per-stream format versions).
    UnexpectedValue,
    /// Non-fatal warning (e.g. a stream was present but never parsed).
    Warning,
    /// Error that was recovered from (failsafe mode).
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownData => write!(f, "UnknownData"),
            Self::UnexpectedValue => write!(f, "UnexpectedValue"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A single notification produced during reading.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The severity / category.
    pub notification_type: NotificationType,
    /// A human-readable description of the finding.
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Collects notifications during a read operation.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.items.push(Notification::new(notification_type, message));
    }

    /// Record an unknown-data note carrying the label and a hex dump.
    pub fn unknown_data(&mut self, offset: u64, label: &str, bytes: &[u8]) {
        let dump: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
        self.items.push(Notification::new(
            NotificationType::UnknownData,
            format!("{label} @ {offset:#X}: {}", dump.join(" ")),
        ));
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| n.notification_type == nt)
            .collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// Absorb all notifications from another collection.
    pub fn extend(&mut self, other: NotificationCollection) {
        self.items.extend(other.items);
    }

    /// Consume the collection into a `Vec`.
    pub fn into_vec(self) -> Vec<Notification> {
        self.items
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let n = Notification::new(NotificationType::Warning, "stream left unparsed");
        assert_eq!(n.notification_type, NotificationType::Warning);
        assert_eq!(n.message, "stream left unparsed");
    }

    #[test]
    fn test_collection_basics() {
        let mut c = NotificationCollection::new();
        assert!(c.is_empty());

        c.notify(NotificationType::Warning, "w1");
        c.notify(NotificationType::Error, "e1");
        c.notify(NotificationType::Warning, "w2");

        assert_eq!(c.len(), 3);
        assert_eq!(c.of_type(NotificationType::Warning).len(), 2);
        assert!(c.has_type(NotificationType::Error));
        assert!(!c.has_type(NotificationType::UnknownData));
    }

    #[test]
    fn test_unknown_data_dump() {
        let mut c = NotificationCollection::new();
        c.unknown_data(0x10, "readWireScalar - 1", &[0xAB, 0x00]);
        let n = c.iter().next().unwrap();
        assert_eq!(n.notification_type, NotificationType::UnknownData);
        assert!(n.message.contains("readWireScalar - 1"));
        assert!(n.message.contains("AB 00"));
    }

    #[test]
    fn test_display() {
        let n = Notification::new(NotificationType::UnexpectedValue, "lock marker 0x17");
        assert_eq!(format!("{}", n), "[UnexpectedValue] lock marker 0x17");
    }
}

/// One line of a rendered changelog, taken from a commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub message: String,
}

impl ChangelogEntry {
    /// Select a commit message for the changelog
    ///
    /// With a message key, only messages starting with `"<key>: "` qualify; the
    /// prefix is stripped and only the subject line is kept. Without one, every
    /// message qualifies in full. Blank results are dropped.
    pub fn from_commit(message: &str, message_key: Option<&str>) -> Option<Self> {
        let text = match message_key {
            Some(key) => {
                let subject = message.lines().next().unwrap_or("");
                let prefix = format!("{}: ", key);
                subject.strip_prefix(prefix.as_str())?
            }
            None => message,
        };

        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(ChangelogEntry {
            message: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_key_every_message_qualifies() {
        let entry = ChangelogEntry::from_commit("Fix crash on start", None).unwrap();
        assert_eq!(entry.message, "Fix crash on start");
    }

    #[test]
    fn test_key_prefix_is_required_and_stripped() {
        assert_eq!(
            ChangelogEntry::from_commit("CHANGELOG: New login screen", Some("CHANGELOG"))
                .unwrap()
                .message,
            "New login screen"
        );
        assert!(ChangelogEntry::from_commit("New login screen", Some("CHANGELOG")).is_none());
        assert!(ChangelogEntry::from_commit("CHANGELOG:missing space", Some("CHANGELOG")).is_none());
        assert!(ChangelogEntry::from_commit("changelog: lowercase", Some("CHANGELOG")).is_none());
    }

    #[test]
    fn test_without_key_full_message_is_kept() {
        let entry = ChangelogEntry::from_commit("Subject\n\nBody\n", None).unwrap();
        assert_eq!(entry.message, "Subject\n\nBody");
    }

    #[test]
    fn test_keyed_entry_keeps_subject_line() {
        let entry =
            ChangelogEntry::from_commit("CHANGELOG: Subject\n\nLong body text", Some("CHANGELOG"))
                .unwrap();
        assert_eq!(entry.message, "Subject");
    }

    #[test]
    fn test_blank_messages_are_dropped() {
        assert!(ChangelogEntry::from_commit("", None).is_none());
        assert!(ChangelogEntry::from_commit("  \n\t", None).is_none());
        assert!(ChangelogEntry::from_commit("CHANGELOG:  ", Some("CHANGELOG")).is_none());
    }
}

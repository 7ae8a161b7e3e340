use std::collections::VecDeque;

/// Toast lifetime in animation ticks (the tick fires every 300ms).
pub const TOAST_TICKS: u8 = 12;

/// Cap on simultaneously visible toasts; older ones are dropped first.
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

/// Where user-facing notifications go. The app routes them into the toast
/// overlay; tests swap in a recording sink.
pub trait NotificationSink {
    fn notify(&mut self, toast: Toast);
}

/// Toast queue aged by the animation tick.
#[derive(Debug, Default)]
pub struct Toasts {
    entries: VecDeque<(Toast, u8)>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Age every toast by one tick and drop the expired ones.
    pub fn tick(&mut self) {
        for (_, remaining) in self.entries.iter_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        self.entries.retain(|(_, remaining)| *remaining > 0);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().map(|(toast, _)| toast)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NotificationSink for Toasts {
    fn notify(&mut self, toast: Toast) {
        if self.entries.len() == MAX_VISIBLE {
            self.entries.pop_front();
        }
        self.entries.push_back((toast, TOAST_TICKS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_ttl() {
        let mut toasts = Toasts::new();
        toasts.notify(Toast::new("Success", "done"));
        for _ in 0..TOAST_TICKS - 1 {
            toasts.tick();
        }
        assert_eq!(toasts.visible().count(), 1);
        toasts.tick();
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_queue_caps_visible_toasts() {
        let mut toasts = Toasts::new();
        for i in 0..6 {
            toasts.notify(Toast::new(format!("t{i}"), ""));
        }
        assert_eq!(toasts.visible().count(), 4);
        // Oldest were dropped, newest kept.
        assert_eq!(toasts.visible().next().map(|t| t.title.as_str()), Some("t2"));
    }

    #[test]
    fn test_destructive_constructor_sets_severity() {
        let toast = Toast::destructive("Error", "boom");
        assert_eq!(toast.severity, Severity::Destructive);
        assert_eq!(Toast::new("ok", "fine").severity, Severity::Default);
    }
}

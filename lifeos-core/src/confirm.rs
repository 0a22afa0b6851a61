/// One confirmation request waiting for the user, carrying the deferred
/// action to apply if they accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation<A> {
    pub title: String,
    pub message: String,
    /// Informational acknowledgement (single OK) rather than a
    /// destructive confirm/cancel pair.
    pub is_alert: bool,
    action: A,
}

/// Process-wide single-slot gate for destructive actions. Two states:
/// idle and pending. There is no queue: a second `request` while pending
/// silently replaces the first — at most one confirmation is ever
/// visible, and the replaced action is never applied.
#[derive(Debug, Default)]
pub struct ConfirmationGate<A> {
    pending: Option<PendingConfirmation<A>>,
}

impl<A> ConfirmationGate<A> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Park `action` behind a destructive confirm/cancel prompt. Last
    /// caller wins.
    pub fn request(&mut self, title: impl Into<String>, message: impl Into<String>, action: A) {
        self.pending = Some(PendingConfirmation {
            title: title.into(),
            message: message.into(),
            is_alert: false,
            action,
        });
    }

    /// Informational variant: the user can only acknowledge.
    pub fn request_alert(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        action: A,
    ) {
        self.request(title, message, action);
        if let Some(pending) = &mut self.pending {
            pending.is_alert = true;
        }
    }

    /// Hand back the pending action exactly once and return to idle.
    pub fn confirm(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.action)
    }

    /// Return to idle without applying anything.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&PendingConfirmation<A>> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_confirm_yields_the_action() {
        let mut gate = ConfirmationGate::new();
        gate.request("Delete section", "Really delete Finance?", 1);
        assert!(gate.is_pending());
        assert_eq!(gate.confirm(), Some(1));
        assert!(!gate.is_pending());
    }

    #[test]
    fn second_request_replaces_the_first() {
        let mut gate = ConfirmationGate::new();
        gate.request("First", "first message", 1);
        gate.request("Second", "second message", 2);
        let pending = gate.pending().unwrap();
        assert_eq!(pending.title, "Second");
        // Confirming yields only the second action; the first is gone.
        assert_eq!(gate.confirm(), Some(2));
        assert_eq!(gate.confirm(), None);
    }

    #[test]
    fn dismiss_drops_the_action_unapplied() {
        let mut gate = ConfirmationGate::new();
        gate.request("Delete", "sure?", 1);
        gate.dismiss();
        assert_eq!(gate.confirm(), None);
    }

    #[test]
    fn confirm_while_idle_is_none() {
        let mut gate: ConfirmationGate<i32> = ConfirmationGate::new();
        assert_eq!(gate.confirm(), None);
    }

    #[test]
    fn alert_requests_are_flagged() {
        let mut gate = ConfirmationGate::new();
        gate.request_alert("Heads up", "something happened", ());
        assert!(gate.pending().unwrap().is_alert);
    }
}

use crate::error::AppError;

pub const RATIONALE_TITLE: &str = "Kids Drawing App";
pub const RATIONALE_MESSAGE: &str = "Kids Drawing App needs to Access Your External Storage";
pub const RATIONALE_DISMISS: &str = "Cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    #[default]
    Idle,
    AwaitingPermission,
    Granted,
    Denied,
}

/// What to carry on with once storage access is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    ImportBackground,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Access was already granted; run the action now.
    Proceed(PendingAction),
    /// The host prompt is up; the action waits for the answer.
    Prompting,
    /// The user denied access before; explain why instead of prompting.
    ShowRationale,
}

/// Storage access: `Idle → AwaitingPermission → Granted | Denied`.
#[derive(Debug, Default)]
pub struct PermissionFlow {
    status: PermissionStatus,
    pending: Option<PendingAction>,
    rationale_due: bool,
    rationale_visible: bool,
}

impl PermissionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, action: PendingAction) -> RequestOutcome {
        match self.status {
            PermissionStatus::Granted => RequestOutcome::Proceed(action),
            PermissionStatus::AwaitingPermission => {
                log::debug!("Permission prompt already showing, ignoring {:?}", action);
                RequestOutcome::Prompting
            }
            PermissionStatus::Idle | PermissionStatus::Denied => {
                if self.rationale_due {
                    self.rationale_due = false;
                    self.rationale_visible = true;
                    return RequestOutcome::ShowRationale;
                }
                self.status = PermissionStatus::AwaitingPermission;
                self.pending = Some(action);
                RequestOutcome::Prompting
            }
        }
    }

    /// Applies the user's answer to the prompt. On grant, returns the action
    /// that was waiting for it.
    pub fn resolve(&mut self, granted: bool) -> Result<Option<PendingAction>, AppError> {
        if self.status != PermissionStatus::AwaitingPermission {
            log::warn!("Permission answer with no prompt showing");
            return Ok(None);
        }

        let pending = self.pending.take();
        if granted {
            log::info!("Storage permission granted");
            self.status = PermissionStatus::Granted;
            Ok(pending)
        } else {
            log::info!("Storage permission denied, dropping {:?}", pending);
            self.status = PermissionStatus::Denied;
            self.rationale_due = true;
            Err(AppError::PermissionDenied)
        }
    }

    pub fn dismiss_rationale(&mut self) {
        self.rationale_visible = false;
    }

    pub fn status(&self) -> PermissionStatus {
        self.status
    }

    pub fn is_prompting(&self) -> bool {
        self.status == PermissionStatus::AwaitingPermission
    }

    pub fn rationale_visible(&self) -> bool {
        self.rationale_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_resumes_pending_action() {
        let mut flow = PermissionFlow::new();
        assert_eq!(flow.request(PendingAction::Export), RequestOutcome::Prompting);
        assert!(flow.is_prompting());
        assert_eq!(flow.pending, Some(PendingAction::Export));

        assert_eq!(flow.resolve(true).unwrap(), Some(PendingAction::Export));
        assert_eq!(flow.status(), PermissionStatus::Granted);
        assert_eq!(
            flow.request(PendingAction::ImportBackground),
            RequestOutcome::Proceed(PendingAction::ImportBackground)
        );
    }

    #[test]
    fn test_denial_then_rationale_then_prompt() {
        let mut flow = PermissionFlow::new();
        flow.request(PendingAction::ImportBackground);
        assert!(matches!(flow.resolve(false), Err(AppError::PermissionDenied)));
        assert_eq!(flow.status(), PermissionStatus::Denied);
        assert_eq!(flow.pending, None);

        assert_eq!(
            flow.request(PendingAction::ImportBackground),
            RequestOutcome::ShowRationale
        );
        assert!(flow.rationale_visible());
        assert!(!flow.is_prompting());
        flow.dismiss_rationale();
        assert!(!flow.rationale_visible());

        assert_eq!(flow.request(PendingAction::ImportBackground), RequestOutcome::Prompting);
    }

    #[test]
    fn test_second_request_while_prompting_is_ignored() {
        let mut flow = PermissionFlow::new();
        flow.request(PendingAction::ImportBackground);
        assert_eq!(flow.request(PendingAction::Export), RequestOutcome::Prompting);
        assert_eq!(flow.pending, Some(PendingAction::ImportBackground));
    }

    #[test]
    fn test_stray_answer_is_ignored() {
        let mut flow = PermissionFlow::new();
        assert_eq!(flow.resolve(true).unwrap(), None);
        assert_eq!(flow.status(), PermissionStatus::Idle);
    }
}

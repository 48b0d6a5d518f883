//! Use case invoked by the host's ability-trigger dispatch

use crate::application::dto::{ActivationOutcome, ActivationRequest};

pub trait ActivateAbilityUseCase {
    /// Command the host fires to trigger this ability
    fn command_id(&self) -> &str;

    /// Run one activation transaction to completion
    fn activate(&self, request: ActivationRequest) -> ActivationOutcome;

    /// Route a host command. Returns `None` when the command belongs to
    /// some other ability.
    fn handle_command(
        &self,
        command: &str,
        request: ActivationRequest,
    ) -> Option<ActivationOutcome> {
        if command != self.command_id() {
            return None;
        }
        Some(self.activate(request))
    }
}

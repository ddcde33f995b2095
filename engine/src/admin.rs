//! Administrative control — owner identity, pause flag, policy parameters.

use crate::error::MeshError;
use proofmesh_types::{ActorId, MeshParams};

/// Global administrative state. Only the owner may change it.
#[derive(Clone, Debug)]
pub struct AdminControl {
    owner: ActorId,
    params: MeshParams,
    paused: bool,
}

impl AdminControl {
    pub fn new(owner: ActorId, params: MeshParams) -> Result<Self, MeshError> {
        if params.min_verifications == 0 {
            return Err(MeshError::InvalidThreshold);
        }
        Ok(Self {
            owner,
            params,
            paused: false,
        })
    }

    pub fn owner(&self) -> &ActorId {
        &self.owner
    }

    pub fn params(&self) -> &MeshParams {
        &self.params
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_owner(&self, actor: &ActorId) -> bool {
        &self.owner == actor
    }

    /// Capability check for owner-only entry points.
    pub fn ensure_owner(&self, caller: &ActorId, action: &'static str) -> Result<(), MeshError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            tracing::debug!(caller = %caller, action, "owner-only action refused");
            Err(MeshError::Unauthorized {
                actor: caller.to_string(),
                action,
            })
        }
    }

    pub fn ensure_running(&self) -> Result<(), MeshError> {
        if self.paused {
            Err(MeshError::SystemPaused)
        } else {
            Ok(())
        }
    }

    pub fn set_min_verifications(&mut self, caller: &ActorId, n: u32) -> Result<(), MeshError> {
        self.ensure_owner(caller, "set the verification threshold")?;
        if n == 0 {
            return Err(MeshError::InvalidThreshold);
        }
        let previous = self.params.min_verifications;
        self.params.min_verifications = n;
        tracing::info!(previous, current = n, "minimum verifications updated");
        Ok(())
    }

    /// Idempotent.
    pub fn pause(&mut self, caller: &ActorId) -> Result<(), MeshError> {
        self.ensure_owner(caller, "pause the system")?;
        if !self.paused {
            self.paused = true;
            tracing::info!(by = %caller, "system paused");
        }
        Ok(())
    }

    /// Idempotent.
    pub fn resume(&mut self, caller: &ActorId) -> Result<(), MeshError> {
        self.ensure_owner(caller, "resume the system")?;
        if self.paused {
            self.paused = false;
            tracing::info!(by = %caller, "system resumed");
        }
        Ok(())
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &ActorId,
        new_owner: ActorId,
    ) -> Result<(), MeshError> {
        self.ensure_owner(caller, "transfer ownership")?;
        tracing::info!(from = %self.owner, to = %new_owner, "ownership transferred");
        self.owner = new_owner;
        Ok(())
    }

    pub(crate) fn restore(
        owner: ActorId,
        params: MeshParams,
        paused: bool,
    ) -> Result<Self, MeshError> {
        let mut admin = Self::new(owner, params)?;
        admin.paused = paused;
        Ok(admin)
    }
}

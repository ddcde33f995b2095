//! The `ProofMesh` engine — the single authoritative state machine.
//!
//! Lock order, outermost first:
//!
//! 1. `gate` (shared by every mutation, exclusive for snapshots)
//! 2. proof locks, inside [`ProofStore`] (two only for `link`, lower id first)
//! 3. `admin`
//! 4. `registry`
//!
//! No path acquires an earlier lock while holding a later one. Notifications
//! are emitted after every lock has been released.

use crate::admin::AdminControl;
use crate::config::MeshConfig;
use crate::error::MeshError;
use crate::events::{EventBus, MeshEvent};
use crate::snapshot::MeshSnapshot;
use crate::spans;
use crate::verification::{AttestOutcome, VerificationEngine};
use parking_lot::RwLock;
use proofmesh_proofs::{
    MeshGraph, NewProof, Proof, ProofError, ProofStats, ProofStore, StatsAggregator,
};
use proofmesh_registry::{VerifierInfo, VerifierRegistry};
use proofmesh_types::{
    ActorId, Clock, Fingerprint, MeshParams, ProofCategory, ProofId, ProofStatus, Timestamp,
};
use std::sync::Arc;

pub struct ProofMesh {
    gate: RwLock<()>,
    proofs: ProofStore,
    admin: RwLock<AdminControl>,
    registry: RwLock<VerifierRegistry>,
    events: EventBus,
    clock: Arc<dyn Clock>,
}

impl ProofMesh {
    pub fn new(
        owner: ActorId,
        params: MeshParams,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, MeshError> {
        Ok(Self {
            gate: RwLock::new(()),
            proofs: ProofStore::new(),
            admin: RwLock::new(AdminControl::new(owner, params)?),
            registry: RwLock::new(VerifierRegistry::new()),
            events: EventBus::new(),
            clock,
        })
    }

    pub fn from_config(config: &MeshConfig, clock: Arc<dyn Clock>) -> Result<Self, MeshError> {
        let mesh = Self::new(config.owner.clone(), config.params(), clock)?;
        if config.start_paused {
            let owner = config.owner.clone();
            mesh.admin.write().pause(&owner)?;
        }
        Ok(mesh)
    }

    /// Register a notification listener.
    pub fn subscribe(&self, listener: impl Fn(&MeshEvent) + Send + Sync + 'static) {
        self.events.subscribe(listener);
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn ensure_running(&self) -> Result<(), MeshError> {
        self.admin.read().ensure_running()
    }

    // ── Proof lifecycle ────────────────────────────────────────────────

    /// Register a proof on behalf of `creator`. `expires_at = None` means the
    /// proof never expires.
    pub fn create_proof(
        &self,
        creator: &ActorId,
        fingerprint: Fingerprint,
        category: ProofCategory,
        metadata: impl Into<String>,
        expires_at: Option<Timestamp>,
    ) -> Result<ProofId, MeshError> {
        let _span = spans::create_span(creator).entered();
        let (id, now) = {
            let _gate = self.gate.read();
            self.ensure_running()?;
            let now = self.clock.now();
            let draft = NewProof {
                creator: creator.clone(),
                fingerprint,
                category,
                metadata: metadata.into(),
                expires_at,
            };
            (self.proofs.create(draft, now)?, now)
        };
        self.events.emit(&MeshEvent::ProofCreated {
            proof: id,
            creator: creator.clone(),
            category,
            at: now,
        });
        Ok(id)
    }

    /// Record `verifier`'s attestation of `proof`.
    ///
    /// Fails, in this order, with `NotFound`, `Unauthorized`,
    /// `DuplicateAttestation`, `Inactive`, `AlreadyProcessed` or `Expired`.
    ///
    /// **`Expired` is not side-effect free:** the proof is moved from
    /// `Pending` to `Rejected` before the error is returned, and that change
    /// is kept.
    pub fn attest(
        &self,
        proof: &ProofId,
        verifier: &ActorId,
    ) -> Result<AttestOutcome, MeshError> {
        let _span = spans::attest_span(proof, verifier).entered();
        let (outcome, now) = {
            let _gate = self.gate.read();
            self.ensure_running()?;
            let now = self.clock.now();
            let outcome = self.proofs.with_proof_mut(proof, |p| {
                let params = self.admin.read().params().clone();
                let mut registry = self.registry.write();
                VerificationEngine.attest(p, &mut registry, &params, verifier, now)
            })??;
            (outcome, now)
        };
        self.events.emit(&MeshEvent::ProofVerified {
            proof: *proof,
            verifier: verifier.clone(),
            attestations: outcome.attestations,
            verified: outcome.newly_verified,
            at: now,
        });
        Ok(outcome)
    }

    /// Link two proofs. `caller` must have created at least one of them.
    pub fn link(&self, a: &ProofId, b: &ProofId, caller: &ActorId) -> Result<(), MeshError> {
        let _span = spans::link_span(a, b).entered();
        let now = {
            let _gate = self.gate.read();
            self.ensure_running()?;
            MeshGraph::new(&self.proofs).link(a, b, caller)?;
            self.clock.now()
        };
        self.events.emit(&MeshEvent::ProofsLinked {
            from: *a,
            to: *b,
            by: caller.clone(),
            at: now,
        });
        Ok(())
    }

    /// Revoke a proof. Allowed for its creator and for the owner, and while
    /// the system is paused.
    pub fn revoke(&self, proof: &ProofId, caller: &ActorId) -> Result<(), MeshError> {
        let _span = spans::revoke_span(proof, caller).entered();
        let now = {
            let _gate = self.gate.read();
            let owner = self.admin.read().owner().clone();
            self.proofs.revoke(proof, caller, &owner)?;
            self.clock.now()
        };
        self.events.emit(&MeshEvent::ProofRevoked {
            proof: *proof,
            by: caller.clone(),
            at: now,
        });
        Ok(())
    }

    // ── Verifier registry ──────────────────────────────────────────────

    pub fn authorize_verifier(
        &self,
        caller: &ActorId,
        verifier: &ActorId,
    ) -> Result<(), MeshError> {
        let _span = spans::admin_span("authorize_verifier", caller).entered();
        let now = {
            let _gate = self.gate.read();
            let admin = self.admin.read();
            admin.ensure_owner(caller, "authorize verifiers")?;
            let now = self.clock.now();
            self.registry
                .write()
                .authorize(verifier, admin.params().initial_reputation, now)?;
            now
        };
        self.events.emit(&MeshEvent::VerifierAuthorized {
            verifier: verifier.clone(),
            at: now,
        });
        Ok(())
    }

    pub fn deauthorize_verifier(
        &self,
        caller: &ActorId,
        verifier: &ActorId,
    ) -> Result<(), MeshError> {
        let _span = spans::admin_span("deauthorize_verifier", caller).entered();
        let now = {
            let _gate = self.gate.read();
            self.admin.read().ensure_owner(caller, "deauthorize verifiers")?;
            self.registry.write().deauthorize(verifier)?;
            self.clock.now()
        };
        self.events.emit(&MeshEvent::VerifierRemoved {
            verifier: verifier.clone(),
            at: now,
        });
        Ok(())
    }

    // ── Administrative control ─────────────────────────────────────────

    pub fn set_min_verifications(&self, caller: &ActorId, n: u32) -> Result<(), MeshError> {
        let _span = spans::admin_span("set_min_verifications", caller).entered();
        let _gate = self.gate.read();
        self.admin.write().set_min_verifications(caller, n)
    }

    pub fn pause(&self, caller: &ActorId) -> Result<(), MeshError> {
        let _span = spans::admin_span("pause", caller).entered();
        let _gate = self.gate.read();
        self.admin.write().pause(caller)
    }

    pub fn resume(&self, caller: &ActorId) -> Result<(), MeshError> {
        let _span = spans::admin_span("resume", caller).entered();
        let _gate = self.gate.read();
        self.admin.write().resume(caller)
    }

    pub fn transfer_ownership(
        &self,
        caller: &ActorId,
        new_owner: ActorId,
    ) -> Result<(), MeshError> {
        let _span = spans::admin_span("transfer_ownership", caller).entered();
        let _gate = self.gate.read();
        self.admin.write().transfer_ownership(caller, new_owner)
    }

    pub fn owner(&self) -> ActorId {
        self.admin.read().owner().clone()
    }

    pub fn params(&self) -> MeshParams {
        self.admin.read().params().clone()
    }

    pub fn is_paused(&self) -> bool {
        self.admin.read().is_paused()
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn proof(&self, id: &ProofId) -> Result<Proof, MeshError> {
        self.proofs
            .get(id)
            .ok_or_else(|| ProofError::NotFound(*id).into())
    }

    pub fn proof_verifiers(&self, id: &ProofId) -> Result<Vec<ActorId>, MeshError> {
        Ok(self.proofs.with_proof(id, |p| p.verifiers.clone())?)
    }

    pub fn linked_proofs(&self, id: &ProofId) -> Result<Vec<ProofId>, MeshError> {
        Ok(MeshGraph::new(&self.proofs).neighbors(id)?)
    }

    pub fn user_proofs(&self, creator: &ActorId) -> Vec<ProofId> {
        self.proofs.by_creator(creator)
    }

    pub fn is_verified(&self, id: &ProofId) -> Result<bool, MeshError> {
        Ok(self
            .proofs
            .with_proof(id, |p| p.status == ProofStatus::Verified)?)
    }

    /// Active, verified, and not past its expiry.
    pub fn is_valid(&self, id: &ProofId) -> Result<bool, MeshError> {
        let now = self.clock.now();
        Ok(self.proofs.with_proof(id, |p| p.is_valid(now))?)
    }

    pub fn verifier_info(&self, actor: &ActorId) -> VerifierInfo {
        self.registry.read().info(actor)
    }

    /// Everyone ever authorized, including later de-authorized verifiers.
    pub fn all_verifiers(&self) -> Vec<ActorId> {
        self.registry.read().list_authorized().to_vec()
    }

    pub fn stats(&self) -> ProofStats {
        StatsAggregator::new(&self.proofs).snapshot()
    }

    pub fn proof_ids(&self, start: usize, count: usize) -> Result<Vec<ProofId>, MeshError> {
        Ok(self.proofs.page(start, count)?)
    }

    pub fn total_proofs(&self) -> u64 {
        self.proofs.len() as u64
    }

    // ── Snapshots ──────────────────────────────────────────────────────

    /// Capture a consistent copy of the whole engine. Blocks mutations for
    /// the duration of the copy.
    pub fn snapshot(&self) -> Result<MeshSnapshot, MeshError> {
        let _gate = self.gate.write();
        let (owner, params, paused) = {
            let admin = self.admin.read();
            (admin.owner().clone(), admin.params().clone(), admin.is_paused())
        };
        let verifiers = self.registry.read().records().cloned().collect();
        MeshSnapshot::create(
            self.clock.now(),
            owner,
            params,
            paused,
            self.proofs.sequence(),
            self.proofs.records(),
            verifiers,
        )
    }

    /// Rebuild an engine from a verified snapshot. Listeners are not part of
    /// a snapshot and must be subscribed again.
    pub fn restore(snapshot: MeshSnapshot, clock: Arc<dyn Clock>) -> Result<Self, MeshError> {
        snapshot.verify()?;
        let proofs = ProofStore::from_records(snapshot.proofs, snapshot.sequence)
            .map_err(|e| MeshError::CorruptSnapshot(e.to_string()))?;
        let registry = VerifierRegistry::from_records(snapshot.verifiers)
            .map_err(|e| MeshError::CorruptSnapshot(e.to_string()))?;
        let admin = AdminControl::restore(snapshot.owner, snapshot.params, snapshot.paused)?;
        tracing::info!(
            proofs = proofs.len(),
            verifiers = registry.len(),
            "engine restored from snapshot"
        );
        Ok(Self {
            gate: RwLock::new(()),
            proofs,
            admin: RwLock::new(admin),
            registry: RwLock::new(registry),
            events: EventBus::new(),
            clock,
        })
    }
}

//! The verifier registry proper.

use crate::error::RegistryError;
use crate::verifier::{Verifier, VerifierInfo};
use proofmesh_types::{ActorId, Timestamp};
use std::collections::HashMap;

/// Owns all verifier records and the ordered list of everyone ever authorized.
///
/// Role checks (who may call `authorize`) are the caller's job; the registry
/// only enforces the record-level rules.
#[derive(Debug, Default)]
pub struct VerifierRegistry {
    verifiers: HashMap<ActorId, Verifier>,
    /// Every actor ever authorized, in first-authorization order.
    order: Vec<ActorId>,
}

impl VerifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from records in first-authorization order.
    pub fn from_records(records: Vec<Verifier>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for record in records {
            if registry.verifiers.contains_key(&record.actor) {
                return Err(RegistryError::DuplicateRecord(record.actor.to_string()));
            }
            registry.order.push(record.actor.clone());
            registry.verifiers.insert(record.actor.clone(), record);
        }
        Ok(registry)
    }

    /// Grant the verifier role.
    ///
    /// A returning verifier keeps its attestation count but has its reputation
    /// reset to `initial_reputation`.
    pub fn authorize(
        &mut self,
        actor: &ActorId,
        initial_reputation: u64,
        now: Timestamp,
    ) -> Result<&Verifier, RegistryError> {
        match self.verifiers.get(actor) {
            Some(v) if v.authorized => {
                return Err(RegistryError::AlreadyAuthorized(actor.to_string()));
            }
            Some(_) => {}
            None => self.order.push(actor.clone()),
        }

        let record = self
            .verifiers
            .entry(actor.clone())
            .or_insert_with(|| Verifier {
                actor: actor.clone(),
                authorized: false,
                attestation_count: 0,
                reputation: 0,
                registered_at: now,
            });
        record.authorized = true;
        record.reputation = initial_reputation;
        record.registered_at = now;

        tracing::info!(verifier = %actor, reputation = initial_reputation, "verifier authorized");
        Ok(record)
    }

    /// Revoke the verifier role. The record and its history are kept.
    pub fn deauthorize(&mut self, actor: &ActorId) -> Result<(), RegistryError> {
        match self.verifiers.get_mut(actor) {
            Some(v) if v.authorized => {
                v.authorized = false;
                tracing::info!(verifier = %actor, "verifier deauthorized");
                Ok(())
            }
            _ => Err(RegistryError::NotAuthorized(actor.to_string())),
        }
    }

    pub fn is_authorized(&self, actor: &ActorId) -> bool {
        self.verifiers.get(actor).is_some_and(|v| v.authorized)
    }

    /// Credit a successful attestation: bump the count and add `increment`
    /// to the verifier's reputation.
    pub fn record_attestation(
        &mut self,
        actor: &ActorId,
        increment: u64,
    ) -> Result<&Verifier, RegistryError> {
        match self.verifiers.get_mut(actor) {
            Some(v) if v.authorized => {
                v.attestation_count = v.attestation_count.saturating_add(1);
                v.reputation = v.reputation.saturating_add(increment);
                Ok(v)
            }
            _ => Err(RegistryError::NotAuthorized(actor.to_string())),
        }
    }

    /// Read-only view; unknown actors yield the zero-valued record.
    pub fn info(&self, actor: &ActorId) -> VerifierInfo {
        self.verifiers
            .get(actor)
            .map(VerifierInfo::from)
            .unwrap_or_default()
    }

    /// Everyone ever authorized, including currently de-authorized verifiers.
    pub fn list_authorized(&self) -> &[ActorId] {
        &self.order
    }

    /// Records in first-authorization order.
    pub fn records(&self) -> impl Iterator<Item = &Verifier> + '_ {
        self.order.iter().filter_map(|a| self.verifiers.get(a))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

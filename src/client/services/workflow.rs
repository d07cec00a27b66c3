//! Generic request/response cycle shared by diagram generation and requirement
//! validation.
//!
//! A workflow moves `Idle -> Pending -> {Succeeded, Failed}` and re-enters
//! `Pending` on every new submission. Each submission is stamped with a
//! [`Ticket`]; only the completion carrying the ticket the workflow is waiting
//! for is applied, so a slow response to a superseded submission can never
//! overwrite a newer one.

use crate::client::services::backend::{BackendClient, CallError, Endpoint};
use log::debug;
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Identifies one submission: the session that owns the workflow and a
/// per-workflow sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub session: u64,
    pub seq: u64,
}

/// What applying a completion did to the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Succeeded,
    Failed,
    /// The completion belonged to a superseded submission or another session.
    Stale,
}

/// Notified when a workflow reaches `Succeeded`.
pub trait WorkflowObserver<R> {
    fn on_succeeded(&mut self, result: &R);
}

pub struct Workflow<E: Endpoint> {
    phase: Phase,
    result: Option<E::Response>,
    error_message: Option<String>,
    session: u64,
    issued: u64,
    awaiting: Option<u64>,
    _endpoint: PhantomData<E>,
}

impl<E: Endpoint> Workflow<E> {
    pub fn new(session: u64) -> Self {
        Self {
            phase: Phase::Idle,
            result: None,
            error_message: None,
            session,
            issued: 0,
            awaiting: None,
            _endpoint: PhantomData,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    pub fn result(&self) -> Option<&E::Response> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Enter `Pending` for a new submission, clearing the previous outcome.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.phase = Phase::Pending;
        self.result = None;
        self.error_message = None;
        self.awaiting = Some(self.issued);
        Ticket {
            session: self.session,
            seq: self.issued,
        }
    }

    pub fn complete(&mut self, ticket: Ticket, outcome: Result<E::Response, CallError>) -> Transition {
        if ticket.session != self.session || self.awaiting != Some(ticket.seq) {
            debug!(
                "Dropping stale {} response (ticket {}/{}, awaiting {:?} in session {})",
                E::PATH,
                ticket.session,
                ticket.seq,
                self.awaiting,
                self.session
            );
            return Transition::Stale;
        }
        self.awaiting = None;

        match outcome {
            Ok(response) => {
                self.phase = Phase::Succeeded;
                self.result = Some(response);
                Transition::Succeeded
            }
            Err(e) => {
                let message = e.to_string();
                self.phase = Phase::Failed;
                self.error_message = Some(if message.trim().is_empty() {
                    E::FALLBACK_ERROR.to_string()
                } else {
                    message
                });
                Transition::Failed
            }
        }
    }

    /// Like [`Workflow::complete`], then notify `observer` on success.
    pub fn complete_observed(
        &mut self,
        ticket: Ticket,
        outcome: Result<E::Response, CallError>,
        observer: &mut dyn WorkflowObserver<E::Response>,
    ) -> Transition {
        let transition = self.complete(ticket, outcome);
        if transition == Transition::Succeeded {
            if let Some(result) = self.result.as_ref() {
                observer.on_succeeded(result);
            }
        }
        transition
    }
}

/// Run one backend call for a submission. The ticket travels with the outcome
/// so the caller can hand both back to [`Workflow::complete`].
pub async fn dispatch<E: Endpoint>(
    backend: BackendClient,
    ticket: Ticket,
    request: E::Request,
) -> (Ticket, Result<E::Response, CallError>) {
    let outcome = backend.call::<E>(&request).await;
    (ticket, outcome)
}

//! Async checkout driver — runs the machine's commands against the backend.

use super::{CheckoutCommand, CheckoutMachine, CheckoutOutcome, CheckoutStep, PaymentOutcome};
use crate::client::SalonClient;
use crate::domain::order::{ContactDetails, OrderStatus, PaymentMethod};
use crate::domain::product::ProductLookup;
use crate::error::{CheckoutError, HttpError, RemoteStage, SdkError};
use crate::shared::SalonId;

/// A customer's checkout at one salon, wired to a [`SalonClient`].
///
/// Every command the machine emits is executed exactly once; failures are
/// reported back to the machine (which keeps its state) and surface as
/// [`CheckoutError::RemoteRequestFailure`]. Nothing is retried.
///
/// If a returned future is dropped mid-request the machine stays busy; call
/// [`abandon_request`](CheckoutMachine::abandon_request) via
/// [`machine_mut`](Self::machine_mut) to recover.
pub struct CheckoutSession {
    client: SalonClient,
    machine: CheckoutMachine,
}

impl CheckoutSession {
    pub fn new(client: &SalonClient, salon_id: SalonId) -> Self {
        Self {
            client: client.clone(),
            machine: CheckoutMachine::new(salon_id),
        }
    }

    pub fn machine(&self) -> &CheckoutMachine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut CheckoutMachine {
        &mut self.machine
    }

    pub fn step(&self) -> CheckoutStep {
        self.machine.step()
    }

    pub fn set_contact(&mut self, contact: ContactDetails) -> Result<(), CheckoutError> {
        self.machine.set_contact(contact)
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.machine.set_payment_method(method)
    }

    /// Move forward one step, creating the draft order when leaving `Details`.
    pub async fn advance(&mut self) -> Result<CheckoutStep, CheckoutError> {
        if let Some(command) = self.machine.advance()? {
            self.run(command).await?;
        }
        Ok(self.machine.step())
    }

    pub fn back(&mut self) -> Result<CheckoutStep, CheckoutError> {
        self.machine.back()?;
        Ok(self.machine.step())
    }

    /// Submit the order priced against `lookup`.
    pub async fn submit<L: ProductLookup + ?Sized>(
        &mut self,
        lookup: &L,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let CheckoutCommand::SubmitOrder(request) = self.machine.submit(lookup)? else {
            return Err(CheckoutError::InvalidTransition(
                "submission produced no order".to_string(),
            ));
        };
        match self.client.orders().submit(&request).await {
            Ok(response) => self.machine.submission_accepted(response),
            Err(e) => {
                self.machine.submission_failed()?;
                Err(remote_failure(RemoteStage::Submission, e))
            }
        }
    }

    /// Record the payment gateway's outcome on the placed order.
    pub async fn report_payment(
        &mut self,
        outcome: PaymentOutcome,
    ) -> Result<OrderStatus, CheckoutError> {
        let command = self.machine.report_payment(&outcome)?;
        self.run(command).await?;
        self.machine
            .placed()
            .and_then(|p| p.status)
            .ok_or_else(|| CheckoutError::InvalidTransition("no status recorded".to_string()))
    }

    async fn run(&mut self, command: CheckoutCommand) -> Result<(), CheckoutError> {
        match command {
            CheckoutCommand::CreateDraft(request) => {
                match self.client.orders().create_draft(&request).await {
                    Ok(id) => self.machine.draft_created(id),
                    Err(e) => {
                        self.machine.draft_failed()?;
                        Err(remote_failure(RemoteStage::DraftCreation, e))
                    }
                }
            }
            CheckoutCommand::UpdateStatus { order_id, status } => {
                match self.client.orders().update_status(&order_id, status).await {
                    Ok(_) => self.machine.status_updated().map(|_| ()),
                    Err(e) => {
                        self.machine.status_update_failed()?;
                        Err(remote_failure(RemoteStage::StatusUpdate, e))
                    }
                }
            }
            CheckoutCommand::SubmitOrder(_) => Err(CheckoutError::InvalidTransition(
                "submission goes through submit()".to_string(),
            )),
        }
    }
}

fn remote_failure(stage: RemoteStage, error: SdkError) -> CheckoutError {
    let source = match error {
        SdkError::Http(e) => e,
        other => HttpError::Decode(other.to_string()),
    };
    tracing::warn!(stage = %stage, error = %source, "checkout request failed");
    CheckoutError::RemoteRequestFailure { stage, source }
}

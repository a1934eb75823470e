use super::{CheckoutCommand, CheckoutOutcome, CheckoutStep, PaymentOutcome, PaymentParams, PlacedOrder};
use crate::domain::cart::{line_snapshots, lines_total, order_total, Cart};
use crate::domain::order::wire::{
    CreateDraftRequest, OrderItemBody, SubmitOrderRequest, SubmitOrderResponse,
};
use crate::domain::order::{ContactDetails, OrderStatus, PaymentMethod};
use crate::domain::product::ProductLookup;
use crate::error::{CheckoutError, HttpError, RemoteStage};
use crate::shared::{OrderId, SalonId};
use rust_decimal::Decimal;

/// The remote call currently outstanding.
#[derive(Debug, Clone, PartialEq)]
enum InFlight {
    Draft,
    Submission {
        payment_method: PaymentMethod,
        total_amount: Decimal,
    },
    StatusUpdate(OrderStatus),
}

impl InFlight {
    fn stage(&self) -> RemoteStage {
        match self {
            InFlight::Draft => RemoteStage::DraftCreation,
            InFlight::Submission { .. } => RemoteStage::Submission,
            InFlight::StatusUpdate(_) => RemoteStage::StatusUpdate,
        }
    }
}

/// One customer's checkout at one salon.
///
/// Owns the contact form, the cart and the chosen payment method for the
/// lifetime of the flow. Every failed transition leaves the machine exactly
/// as it was.
#[derive(Debug, Clone)]
pub struct CheckoutMachine {
    salon_id: SalonId,
    step: CheckoutStep,
    contact: ContactDetails,
    cart: Cart,
    payment_method: PaymentMethod,
    draft_id: Option<OrderId>,
    in_flight: Option<InFlight>,
    placed: Option<PlacedOrder>,
}

impl CheckoutMachine {
    pub fn new(salon_id: SalonId) -> Self {
        Self {
            salon_id,
            step: CheckoutStep::Details,
            contact: ContactDetails::default(),
            cart: Cart::new(),
            payment_method: PaymentMethod::default(),
            draft_id: None,
            in_flight: None,
            placed: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn salon_id(&self) -> &SalonId {
        &self.salon_id
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn draft_id(&self) -> Option<&OrderId> {
        self.draft_id.as_ref()
    }

    /// Whether a remote call is outstanding (the UI shows a spinner and
    /// disables its triggers).
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn placed(&self) -> Option<&PlacedOrder> {
        self.placed.as_ref()
    }

    /// Current total of the cart against `lookup`.
    pub fn total<L: ProductLookup + ?Sized>(&self, lookup: &L) -> Result<Decimal, CheckoutError> {
        Ok(order_total(&self.cart, lookup)?)
    }

    // ── Form edits ───────────────────────────────────────────────────────

    pub fn set_contact(&mut self, contact: ContactDetails) -> Result<(), CheckoutError> {
        self.ensure_idle()?;
        self.contact = contact;
        Ok(())
    }

    pub fn cart_mut(&mut self) -> Result<&mut Cart, CheckoutError> {
        self.ensure_idle()?;
        Ok(&mut self.cart)
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        self.ensure_idle()?;
        self.payment_method = method;
        Ok(())
    }

    // ── Navigation ───────────────────────────────────────────────────────

    /// Move forward one step.
    ///
    /// From `Details` this validates the contact form and returns the
    /// `CreateDraft` command; the step only changes once
    /// [`draft_created`](Self::draft_created) is reported. From `Upsell` it
    /// moves straight to `Catalog`. `Catalog` has no forward step; use
    /// [`submit`](Self::submit).
    pub fn advance(&mut self) -> Result<Option<CheckoutCommand>, CheckoutError> {
        self.ensure_idle()?;
        match self.step {
            CheckoutStep::Details => {
                let missing = self.contact.missing_required_fields();
                if !missing.is_empty() {
                    return Err(CheckoutError::ValidationFailure { missing });
                }
                self.in_flight = Some(InFlight::Draft);
                Ok(Some(CheckoutCommand::CreateDraft(CreateDraftRequest::new(
                    self.salon_id.clone(),
                    &self.contact,
                ))))
            }
            CheckoutStep::Upsell => {
                self.move_to(CheckoutStep::Catalog);
                Ok(None)
            }
            CheckoutStep::Catalog => Err(CheckoutError::InvalidTransition(
                "catalog is the last step; submit the order instead".to_string(),
            )),
        }
    }

    /// Move back one step. Never makes a remote call.
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        self.ensure_idle()?;
        match self.step {
            CheckoutStep::Catalog => self.move_to(CheckoutStep::Upsell),
            CheckoutStep::Upsell => self.move_to(CheckoutStep::Details),
            CheckoutStep::Details => {
                return Err(CheckoutError::InvalidTransition(
                    "already at the first step".to_string(),
                ))
            }
        }
        Ok(())
    }

    pub fn draft_created(&mut self, draft_id: OrderId) -> Result<(), CheckoutError> {
        self.finish(RemoteStage::DraftCreation)?;
        tracing::info!(salon_id = %self.salon_id, draft_id = %draft_id, "draft order recorded");
        self.draft_id = Some(draft_id);
        self.move_to(CheckoutStep::Upsell);
        Ok(())
    }

    /// Draft creation failed; the flow stays at `Details`.
    pub fn draft_failed(&mut self) -> Result<(), CheckoutError> {
        self.finish(RemoteStage::DraftCreation)?;
        tracing::warn!(salon_id = %self.salon_id, "draft creation failed");
        Ok(())
    }

    // ── Submission ───────────────────────────────────────────────────────

    /// Freeze the cart into an order and return the `SubmitOrder` command.
    ///
    /// An empty cart is rejected before anything else is computed.
    pub fn submit<L: ProductLookup + ?Sized>(
        &mut self,
        lookup: &L,
    ) -> Result<CheckoutCommand, CheckoutError> {
        self.ensure_idle()?;
        if self.step != CheckoutStep::Catalog {
            return Err(CheckoutError::InvalidTransition(format!(
                "cannot submit from the {} step",
                self.step
            )));
        }
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCartSubmission);
        }
        let missing = self.contact.missing_required_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::ValidationFailure { missing });
        }

        let lines = line_snapshots(&self.cart, lookup)?;
        let total_amount = lines_total(&lines)?;
        let contact = self.contact.normalized();

        let request = SubmitOrderRequest {
            order_id: self.draft_id.clone(),
            salon_id: self.salon_id.clone(),
            customer_name: contact.customer_name,
            customer_phone: contact.customer_phone,
            additional_phone: contact.additional_phone,
            address: contact.address,
            city: contact.city,
            items: lines.iter().map(OrderItemBody::from).collect(),
            total_amount,
            payment_method: self.payment_method.as_str().to_string(),
        };

        self.in_flight = Some(InFlight::Submission {
            payment_method: self.payment_method,
            total_amount,
        });
        Ok(CheckoutCommand::SubmitOrder(request))
    }

    /// Record the backend's answer to `SubmitOrder`.
    ///
    /// An online order without gateway parameters cannot proceed and is
    /// treated as a failed submission.
    pub fn submission_accepted(
        &mut self,
        response: SubmitOrderResponse,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let (payment_method, total_amount) = match &self.in_flight {
            Some(InFlight::Submission {
                payment_method,
                total_amount,
            }) => (*payment_method, *total_amount),
            _ => return Err(self.unexpected(RemoteStage::Submission)),
        };

        let order_id = response.placed_id().cloned().or_else(|| self.draft_id.clone());
        let status = response
            .order
            .as_ref()
            .and_then(|o| o.status.as_deref())
            .and_then(|s| s.parse::<OrderStatus>().ok());

        let outcome = if payment_method.requires_gateway() {
            match response.payhere {
                Some(params) => CheckoutOutcome::AwaitingPayment {
                    order_id: order_id.clone(),
                    params: PaymentParams::new(params),
                },
                None => {
                    self.in_flight = None;
                    return Err(CheckoutError::RemoteRequestFailure {
                        stage: RemoteStage::Submission,
                        source: HttpError::Decode(
                            "online order response carries no payment parameters".to_string(),
                        ),
                    });
                }
            }
        } else {
            CheckoutOutcome::Placed {
                order_id: order_id.clone(),
            }
        };

        self.in_flight = None;
        tracing::info!(
            salon_id = %self.salon_id,
            order_id = ?order_id.as_ref().map(OrderId::as_str),
            payment_method = %payment_method,
            total = %total_amount,
            "order placed"
        );
        self.placed = Some(PlacedOrder {
            order_id,
            payment_method,
            total_amount,
            status,
        });
        Ok(outcome)
    }

    /// Submission failed; the flow stays at `Catalog` and may be retried.
    pub fn submission_failed(&mut self) -> Result<(), CheckoutError> {
        self.finish(RemoteStage::Submission)?;
        tracing::warn!(salon_id = %self.salon_id, "order submission failed");
        Ok(())
    }

    // ── Payment ──────────────────────────────────────────────────────────

    /// Turn a gateway outcome into the status update for the placed order.
    ///
    /// A completed payment without a locally known order id falls back to the
    /// id the gateway reported.
    pub fn report_payment(&mut self, outcome: &PaymentOutcome) -> Result<CheckoutCommand, CheckoutError> {
        if self.in_flight.is_some() {
            return Err(CheckoutError::RequestInFlight);
        }
        let placed = self.placed.as_ref().ok_or_else(|| {
            CheckoutError::InvalidTransition("no order has been placed".to_string())
        })?;
        if !placed.awaiting_payment() {
            return Err(CheckoutError::InvalidTransition(
                "order is not awaiting payment".to_string(),
            ));
        }

        let order_id = match (&placed.order_id, outcome) {
            (Some(id), _) => id.clone(),
            (None, PaymentOutcome::Completed { gateway_order_id }) => {
                OrderId::from(gateway_order_id.as_str())
            }
            (None, _) => {
                return Err(CheckoutError::InvalidTransition(
                    "placed order has no id to update".to_string(),
                ))
            }
        };
        if let PaymentOutcome::Error { message } = outcome {
            tracing::warn!(order_id = %order_id, error = %message, "payment gateway error");
        }

        let status = outcome.resulting_status();
        self.in_flight = Some(InFlight::StatusUpdate(status));
        Ok(CheckoutCommand::UpdateStatus { order_id, status })
    }

    pub fn status_updated(&mut self) -> Result<OrderStatus, CheckoutError> {
        let status = match &self.in_flight {
            Some(InFlight::StatusUpdate(status)) => *status,
            _ => return Err(self.unexpected(RemoteStage::StatusUpdate)),
        };
        self.in_flight = None;
        if let Some(placed) = self.placed.as_mut() {
            placed.status = Some(status);
        }
        Ok(status)
    }

    /// The status update failed; the payment outcome may be reported again.
    pub fn status_update_failed(&mut self) -> Result<(), CheckoutError> {
        self.finish(RemoteStage::StatusUpdate)?;
        tracing::warn!(salon_id = %self.salon_id, "payment status update failed");
        Ok(())
    }

    /// Forget an outstanding request whose answer will never arrive (the
    /// caller dropped it). Returns the stage that was abandoned.
    pub fn abandon_request(&mut self) -> Option<RemoteStage> {
        let stage = self.in_flight.take()?.stage();
        tracing::warn!(salon_id = %self.salon_id, stage = %stage, "abandoned in-flight request");
        Some(stage)
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn ensure_idle(&self) -> Result<(), CheckoutError> {
        if self.in_flight.is_some() {
            return Err(CheckoutError::RequestInFlight);
        }
        if self.placed.is_some() {
            return Err(CheckoutError::AlreadySubmitted);
        }
        Ok(())
    }

    /// Clear the in-flight marker if it matches `stage`.
    fn finish(&mut self, stage: RemoteStage) -> Result<(), CheckoutError> {
        match &self.in_flight {
            Some(pending) if pending.stage() == stage => {
                self.in_flight = None;
                Ok(())
            }
            _ => Err(self.unexpected(stage)),
        }
    }

    fn unexpected(&self, stage: RemoteStage) -> CheckoutError {
        CheckoutError::InvalidTransition(format!("no {} is in flight", stage))
    }

    fn move_to(&mut self, step: CheckoutStep) {
        tracing::debug!(from = %self.step, to = %step, "checkout step");
        self.step = step;
    }
}

use tracing::warn;

use crate::{
    cart::CartAggregator,
    models::Session,
    remote::{CartRepository, OrderRepository},
    HoagieError, Result,
};

/// The single valid discount code. Flat 10% off, no expiry or stacking.
const DISCOUNT_CODE: &str = "SAVE10";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PaymentMethod {
    Credit,
    CashOnDelivery,
}

/// Where the flow currently sits. Linear: payment method, then details,
/// then an optional discount, then confirmation; terminal on success,
/// failure or cancel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CheckoutState {
    SelectingPayment,
    CollectingDetails(PaymentMethod),
    OrderPlaced,
    OrderFailed,
    Cancelled,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Outcome {
    Placed,
    Failed,
    Cancelled,
}

/// Checkout over a snapshot of the cart total: collects a payment method,
/// an optional discount code and a tip, then submits the order and clears
/// the cart.
#[derive(Debug)]
pub struct CheckoutFlow {
    total: f64,
    payable: f64,
    tip: f64,
    payment_method: Option<PaymentMethod>,
    outcome: Option<Outcome>,
}

impl CheckoutFlow {
    /// Begins checkout for the given cart total.
    pub fn start(total: f64) -> Self {
        Self {
            total,
            payable: total,
            tip: 0.0,
            payment_method: None,
            outcome: None,
        }
    }

    pub fn state(&self) -> CheckoutState {
        match (self.outcome, self.payment_method) {
            (Some(Outcome::Placed), _) => CheckoutState::OrderPlaced,
            (Some(Outcome::Failed), _) => CheckoutState::OrderFailed,
            (Some(Outcome::Cancelled), _) => CheckoutState::Cancelled,
            (None, Some(method)) => CheckoutState::CollectingDetails(method),
            (None, None) => CheckoutState::SelectingPayment,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn choose_payment(&mut self, method: PaymentMethod) {
        if self.outcome.is_none() {
            self.payment_method = Some(method);
        }
    }

    /// Negative amounts are treated as no tip, matching how the original
    /// form coerced unparseable input.
    pub fn set_tip(&mut self, tip: f64) {
        self.tip = if tip.is_finite() { tip.max(0.0) } else { 0.0 };
    }

    /// Applies the discount code. The payable amount is always derived
    /// from the undiscounted total, so reapplying cannot stack.
    pub fn apply_discount(&mut self, code: &str) -> Result<f64> {
        if code.trim().is_empty() {
            return Err(HoagieError::validation("Please enter a discount code."));
        }
        if code != DISCOUNT_CODE {
            return Err(HoagieError::InvalidDiscountCode);
        }
        self.payable = self.total - self.total * 0.1;
        Ok(self.payable)
    }

    /// The amount the order will be placed for.
    pub fn final_total(&self) -> f64 {
        self.payable + self.tip
    }

    pub fn cancel(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(Outcome::Cancelled);
        }
    }

    /// Submits the order: requires a payment method and a session, writes
    /// the serialized cart rows as the order snapshot, and clears the cart
    /// on success. A missing payment method submits nothing and leaves the
    /// cart untouched.
    #[tracing::instrument(skip(self, session, cart, orders))]
    pub async fn confirm<R, O>(
        &mut self,
        session: Option<&Session>,
        cart: &CartAggregator<R>,
        orders: &O,
    ) -> Result<f64>
    where
        R: CartRepository,
        O: OrderRepository,
    {
        if self.is_terminal() {
            return Err(HoagieError::validation("Checkout has already finished."));
        }
        if self.payment_method.is_none() {
            return Err(HoagieError::PaymentMethodRequired);
        }
        let session = session.ok_or(HoagieError::LoginRequired)?;

        let snapshot = serde_json::to_string(&cart.items())?;
        let final_total = self.final_total();

        if let Err(err) = orders.place(session, final_total, snapshot).await {
            self.outcome = Some(Outcome::Failed);
            return Err(err);
        }
        self.outcome = Some(Outcome::Placed);

        // The order is already placed; a failed cart wipe only leaves
        // stale rows behind for the next load
        if let Err(err) = cart.clear(Some(session)).await {
            warn!(?err, "failed to clear cart after checkout");
        }
        Ok(final_total)
    }
}

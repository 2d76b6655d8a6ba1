use std::sync::Arc;

use crate::{
    cart::CartAggregator,
    checkout::CheckoutFlow,
    configuration::Settings,
    deal::{DealStart, DealWizard},
    models::{CatalogTable, Deal, MenuItem, NewCartItem, Order, Session},
    remote::{RemoteDataService, RemoteRepository},
    session::SessionStore,
    HoagieError, Result,
};

/// The app-wide context: one shared remote handle, the session store and
/// the cart aggregator, wired together. Created once at startup and never
/// torn down; sign-out resets its state instead.
pub struct Storefront<R> {
    remote: Arc<R>,
    session: SessionStore<R>,
    cart: CartAggregator<R>,
}

/// Builds the storefront against the hosted remote described by the
/// settings.
pub fn build_storefront(settings: &Settings) -> Result<Storefront<RemoteDataService>> {
    let remote = RemoteDataService::new(&settings.remote)?;
    Ok(Storefront::new(Arc::new(remote)))
}

impl<R: RemoteRepository> Storefront<R> {
    pub fn new(remote: Arc<R>) -> Self {
        Self {
            session: SessionStore::new(Arc::clone(&remote)),
            cart: CartAggregator::new(Arc::clone(&remote)),
            remote,
        }
    }

    pub fn session(&self) -> &SessionStore<R> {
        &self.session
    }

    pub fn cart(&self) -> &CartAggregator<R> {
        &self.cart
    }

    /// Signs in and pulls the user's persisted cart rows into the local
    /// mirror.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.session.sign_in(email, password).await?;
        self.cart.load(Some(&session)).await?;
        Ok(session)
    }

    pub async fn sign_up(&self, email: &str, password: &str, confirm: &str) -> Result<()> {
        self.session.sign_up(email, password, confirm).await
    }

    /// Signs out and drops the local cart mirror; the remote rows stay for
    /// the next sign-in.
    pub async fn sign_out(&self) {
        self.session.sign_out().await;
        self.cart.reset();
    }

    /// App-restart check: restores a still-valid session and its cart, or
    /// leaves the storefront signed out with an empty cart.
    pub async fn restore(&self) -> Result<Option<Session>> {
        let session = self.session.restore().await?;
        match &session {
            Some(session) => self.cart.load(Some(session)).await?,
            None => self.cart.reset(),
        }
        Ok(session)
    }

    pub async fn menu(&self, table: CatalogTable) -> Result<Vec<MenuItem>> {
        self.remote.menu(table).await
    }

    pub async fn deals(&self) -> Result<Vec<Deal>> {
        self.remote.deals().await
    }

    pub async fn add_to_cart(&self, item: NewCartItem) -> Result<()> {
        let session = self.session.current();
        self.cart.add(session.as_ref(), item).await
    }

    pub async fn clear_cart(&self) -> Result<()> {
        let session = self.session.current();
        self.cart.clear(session.as_ref()).await
    }

    /// Starts the deal flow. A deal with no required choices goes straight
    /// into the cart and no wizard is returned.
    pub async fn start_deal(&self, deal: Deal) -> Result<Option<DealWizard>> {
        match DealWizard::begin(deal) {
            DealStart::AddDirectly(line) => {
                self.add_to_cart(line).await?;
                Ok(None)
            }
            DealStart::Customize(wizard) => Ok(Some(wizard)),
        }
    }

    /// Folds a completed wizard into the cart.
    pub async fn confirm_deal(&self, wizard: &DealWizard) -> Result<()> {
        let line = wizard.confirm()?;
        self.add_to_cart(line).await
    }

    /// Opens checkout over the current cart total.
    pub fn begin_checkout(&self) -> CheckoutFlow {
        CheckoutFlow::start(self.cart.total())
    }

    /// Runs the flow's confirmation against this storefront's session,
    /// cart and order store.
    pub async fn confirm_checkout(&self, flow: &mut CheckoutFlow) -> Result<f64> {
        let session = self.session.current();
        flow.confirm(session.as_ref(), &self.cart, &*self.remote)
            .await
    }

    pub async fn order_history(&self) -> Result<Vec<Order>> {
        let session = self.session.current().ok_or(HoagieError::LoginRequired)?;
        self.remote.history(&session).await
    }

    pub async fn clear_order_history(&self) -> Result<()> {
        let session = self.session.current().ok_or(HoagieError::LoginRequired)?;
        crate::remote::OrderRepository::clear(&*self.remote, &session).await
    }
}

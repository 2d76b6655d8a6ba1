pub mod cart;
pub mod checkout;
pub mod configuration;
pub mod customize;
pub mod deal;
mod error;
pub mod models;
pub mod remote;
pub mod session;
mod startup;
pub mod telemetry;

pub use cart::CartAggregator;
pub use checkout::{CheckoutFlow, CheckoutState, PaymentMethod};
pub use configuration::get_configuration;
pub use customize::SandwichCustomizer;
pub use deal::{ChoiceKind, DealStart, DealSummary, DealWizard};
pub use error::{HoagieError, Result};
pub use session::SessionStore;
pub use startup::{build_storefront, Storefront};

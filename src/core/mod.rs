//! Core module containing the data model, validation and the seams to
//! external collaborators

pub mod auth;
pub mod cache;
pub mod clock;
pub mod error;
pub mod form;
pub mod invoice;
pub mod store;
pub mod validation;

pub use auth::{
    CREDENTIALS_STRATEGY, Credentials, CredentialsProvider, InMemoryCredentialsProvider,
    ProviderError, ProviderErrorKind,
};
pub use cache::{ActionOutcome, InMemoryRouteCache, RouteCache};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DashboardError, DashboardResult, FieldErrors, ValidationError};
pub use form::FormData;
pub use invoice::{
    Invoice, InvoiceChanges, InvoiceStatus, LatestInvoice, NewInvoice, Revenue, dollars_to_cents,
};
pub use store::InvoiceStore;
pub use validation::{InvoiceForm, InvoiceSchema};

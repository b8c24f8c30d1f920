//! Typed client for the Increase banking API.
//!
//! [`Increase`] is the entry point. It hands out one service per resource;
//! each service performs exactly one request per call and decodes the
//! response into the resource's struct. List calls return a [`Page`] or a
//! lazy [`Pager`].
//!
//! ## Examples
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use increase::{Increase, RequestOptions};
//! use increase::resources::accounts::{AccountCreateParams, AccountListParams};
//!
//! let increase = Increase::from_env()?;
//!
//! let account = increase
//!     .accounts()
//!     .with_options(RequestOptions::new().idempotency_key("open-payroll"))
//!     .create(&AccountCreateParams::new("Payroll"))
//!     .await?;
//!
//! let every_account: Vec<_> = increase
//!     .accounts()
//!     .list_auto_paging(&AccountListParams::default())?
//!     .into_stream()
//!     .try_collect()
//!     .await?;
//! ```

pub mod filters;
pub mod resources;

pub use increase_core::{
    ApiClient, ApiError, ApiObject, CancelSignal, ClientConfig, ClientConfigBuilder, ConfigError,
    DecodeError, EncodeError, Environment, Extras, Field, HttpTransport, IncreaseError,
    ListResponse, Page, Pager, RequestOptions, Transport, TransportError, codec, pagination,
};

use resources::{
    account_statements::AccountStatementsService, account_transfers::AccountTransfersService,
    accounts::AccountsService, ach_prenotifications::AchPrenotificationsService,
    bookkeeping_entries::BookkeepingEntriesService, card_disputes::CardDisputesService,
    card_profiles::CardProfilesService, check_transfers::CheckTransfersService,
    digital_wallet_tokens::DigitalWalletTokensService, documents::DocumentsService,
    entities::EntitiesService, files::FilesService, groups::GroupsService,
    simulations::SimulationsService, transactions::TransactionsService,
};

/// The Increase API.
///
/// Cloning is cheap; clones share one connection pool. Options set with
/// [`with_options`](Self::with_options) apply to every service handed out
/// afterwards.
#[derive(Debug)]
pub struct Increase<T = HttpTransport> {
    client: ApiClient<T>,
    options: RequestOptions,
}

impl<T> Clone for Increase<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            options: self.options.clone(),
        }
    }
}

impl Increase<HttpTransport> {
    /// ## Errors
    ///
    /// Returns a [`ConfigError`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_client(ApiClient::new(config)?))
    }

    /// Configures the client from `INCREASE_API_KEY`, `INCREASE_ENVIRONMENT`
    /// and `INCREASE_BASE_URL`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if no API key is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::from_client(ApiClient::from_env()?))
    }
}

impl<T: Transport> Increase<T> {
    /// Talks to the API through a custom transport.
    pub fn with_transport(transport: T) -> Self {
        Self::from_client(ApiClient::with_transport(transport))
    }

    pub fn from_client(client: ApiClient<T>) -> Self {
        Self {
            client,
            options: RequestOptions::default(),
        }
    }

    /// Layers `options` over the options every service starts with.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = self.options.merged_with(&options);
        self
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn accounts(&self) -> AccountsService<T> {
        AccountsService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn account_statements(&self) -> AccountStatementsService<T> {
        AccountStatementsService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn account_transfers(&self) -> AccountTransfersService<T> {
        AccountTransfersService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn ach_prenotifications(&self) -> AchPrenotificationsService<T> {
        AchPrenotificationsService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn bookkeeping_entries(&self) -> BookkeepingEntriesService<T> {
        BookkeepingEntriesService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn card_disputes(&self) -> CardDisputesService<T> {
        CardDisputesService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn card_profiles(&self) -> CardProfilesService<T> {
        CardProfilesService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn check_transfers(&self) -> CheckTransfersService<T> {
        CheckTransfersService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn digital_wallet_tokens(&self) -> DigitalWalletTokensService<T> {
        DigitalWalletTokensService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn documents(&self) -> DocumentsService<T> {
        DocumentsService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn entities(&self) -> EntitiesService<T> {
        EntitiesService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn files(&self) -> FilesService<T> {
        FilesService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn groups(&self) -> GroupsService<T> {
        GroupsService::new(self.client.clone()).with_options(self.options.clone())
    }

    /// Sandbox-only simulations.
    pub fn simulations(&self) -> SimulationsService<T> {
        SimulationsService::new(self.client.clone()).with_options(self.options.clone())
    }

    pub fn transactions(&self) -> TransactionsService<T> {
        TransactionsService::new(self.client.clone()).with_options(self.options.clone())
    }
}

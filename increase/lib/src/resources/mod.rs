//! One module per API resource.
//!
//! Each module holds the resource object, its parameter and list query
//! structs, and a service bound to an [`ApiClient`](increase_core::ApiClient).
//! Services are cheap to clone; [`with_options`](accounts::AccountsService::with_options)
//! returns a copy whose calls all carry the given [`RequestOptions`](increase_core::RequestOptions).

/// Declares a service struct bound to a client and a set of default options.
macro_rules! service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name<T = increase_core::HttpTransport> {
            client: increase_core::ApiClient<T>,
            options: increase_core::RequestOptions,
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                Self {
                    client: self.client.clone(),
                    options: self.options.clone(),
                }
            }
        }

        impl<T: increase_core::Transport> $name<T> {
            pub fn new(client: increase_core::ApiClient<T>) -> Self {
                Self {
                    client,
                    options: increase_core::RequestOptions::default(),
                }
            }

            /// Returns this service with `options` layered over its current options.
            pub fn with_options(mut self, options: increase_core::RequestOptions) -> Self {
                self.options = self.options.merged_with(&options);
                self
            }

            pub fn options(&self) -> &increase_core::RequestOptions {
                &self.options
            }
        }
    };
}

pub mod account_statements;
pub mod account_transfers;
pub mod accounts;
pub mod ach_prenotifications;
pub mod bookkeeping_entries;
pub mod card_disputes;
pub mod card_profiles;
pub mod check_transfers;
pub mod digital_wallet_tokens;
pub mod documents;
pub mod entities;
pub mod files;
pub mod groups;
pub mod simulations;
pub mod transactions;

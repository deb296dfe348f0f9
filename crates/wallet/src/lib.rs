//! # Browser wallet session orchestration
//!
//! Keeps a page's connection, network, and balance panels in sync with an
//! injected wallet provider following
//! [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193).
//!
//! ## Architecture
//!
//! 1. [`SessionOrchestrator`] sequences provider calls, folds provider-emitted
//!    events into session state, and pushes the results to the view.
//! 2. [`WalletProvider`] is the injected-wallet capability. The [`bridge`]
//!    implementation relays calls to `window.ethereum` through a local HTTP
//!    server; tests substitute in-memory doubles.
//! 3. [`WalletView`] receives plain UI state updates. The bridge queues them
//!    for the served page, which applies each one with an existence check, so
//!    a missing panel degrades to a no-op.

pub mod bridge;
mod connection;
mod error;
mod provider;
mod session;
mod units;
mod view;

pub use connection::ConnectionController;
pub use error::{BridgeError, WalletError};
pub use provider::{EthereumRequest, WalletEvent, WalletProvider};
pub use session::{NetworkInfo, Session, SessionOrchestrator};
pub use units::format_balance;
pub use view::{NullView, WalletView};

//! Client side of the tracker: kiosk and admin sessions over HTTP
//!
//! Sessions hold a local copy of server state. The kiosk applies an
//! operation locally before the server confirms it, then keeps or reverts the
//! change depending on the reply.

pub mod admin;
pub mod cache;
pub mod errors;
pub mod kiosk;
pub mod remote;

pub use admin::{AdminSession, CredentialStore, FileCredentials, MemoryCredentials};
pub use cache::{LogCache, StatusCache};
pub use errors::{Result, SyncError};
pub use kiosk::{KioskSession, Submitted};
pub use remote::{AdminRemote, HttpRemote, KioskRemote, RemoteState, SubmitReply};

//! Data-store (PostgREST) outbound adapters.
//!
//! One [`PostgrestClient`] is shared by the table repositories; each
//! repository maps transport failures to its port's `Connection` variant and
//! everything else to `Query`.

mod accounts;
mod channels;
mod client;
mod profiles;
mod waitlist;

pub use accounts::PostgrestAccountRepository;
pub use channels::PostgrestChannelRepository;
pub use client::{PostgrestClient, PostgrestError};
pub use profiles::PostgrestProfileRepository;
pub use waitlist::PostgrestWaitlistRepository;

//! warmup-fuzz - structured HTTP request mutator and raw-socket fuzzer.
//!
//! The crate turns a seeded random source into hostile input for local HTTP
//! targets:
//!
//! - **Payloads:** booking records, date-format strings, markdown/HTML soup
//!   and hybrids of the three ([`payload`]).
//! - **Requests:** byte-exact, frequently malformed HTTP/1.x requests with
//!   chunked framing, lying `Content-Length`s and truncation points
//!   ([`request`]).
//! - **Campaigns:** sequential rounds streaming those requests over TCP with
//!   bit flips and half-closes, counting what got through ([`transmit`]).
//!
//! Every generator takes an explicit random source; the same seed replays the
//! same campaign.

pub mod config;
pub mod error;
pub mod logging;
pub mod payload;
pub mod request;
pub mod rng;
pub mod tables;
pub mod transmit;

pub use config::SprayConfig;
pub use payload::{OutputKind, Payload, creative_inputs};
pub use request::{BuiltRequest, build_request};
pub use transmit::{Campaign, CampaignConfig, CampaignStats, fuzz_http_server};

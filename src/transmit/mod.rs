//! Fuzzing campaigns against a live TCP target.
//!
//! A [`Campaign`] runs a fixed number of rounds. Each round builds one
//! request, (re)uses a connection, streams the request with
//! [`stream::stream_request`], optionally drains the reply, and updates
//! [`CampaignStats`]. Transport failures never abort the campaign: they are
//! counted, the connection is dropped, and the next round starts fresh.
//!
//! Rounds run strictly one after another on the calling thread.

pub mod stream;

use std::io::{self, ErrorKind};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::ops::AddAssign;
use std::thread;
use std::time::Duration;

use serde::Serialize;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tracing::{debug, info, warn};

use crate::request::build_request;
use crate::rng::{FuzzRng, chance, seeded};

use self::stream::{drain, stream_request};

/// Smallest timeout applied to sockets; the OS rejects zero.
const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// Settings for one campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignConfig {
    /// Number of rounds; zero runs nothing.
    pub rounds: u64,
    /// Seed for the campaign's random source. `None` draws from the OS.
    pub seed: Option<u64>,
    /// Connect, write and drain timeout.
    pub timeout: Duration,
    /// Pause after every round.
    pub delay: Duration,
    /// Reuse one connection across rounds.
    pub persistent: bool,
    /// Log transport failures.
    pub verbose: bool,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            rounds: 1024,
            seed: None,
            timeout: Duration::from_millis(500),
            delay: Duration::ZERO,
            persistent: false,
            verbose: false,
        }
    }
}

impl CampaignConfig {
    /// The timeout actually applied to sockets.
    pub fn effective_timeout(&self) -> Duration {
        self.timeout.max(MIN_TIMEOUT)
    }
}

/// Aggregate counters of a campaign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CampaignStats {
    /// Rounds started.
    pub attempts: u64,
    /// Requests fully streamed.
    pub sent: u64,
    /// Rounds that hit a transport failure.
    pub errors: u64,
}

impl AddAssign for CampaignStats {
    fn add_assign(&mut self, other: Self) {
        self.attempts += other.attempts;
        self.sent += other.sent;
        self.errors += other.errors;
    }
}

/// One fuzzing campaign against `host:port`.
pub struct Campaign {
    host: String,
    port: u16,
    config: CampaignConfig,
    rng: FuzzRng,
    stats: CampaignStats,
    connection: Option<TcpStream>,
}

impl Campaign {
    pub fn new(host: impl Into<String>, port: u16, config: CampaignConfig) -> Self {
        let rng = seeded(config.seed);
        Self {
            host: host.into(),
            port,
            config,
            rng,
            stats: CampaignStats::default(),
            connection: None,
        }
    }

    /// Run every round and return the final counters.
    ///
    /// Counters start from zero on each call. The connection is closed when
    /// this returns.
    pub fn run(&mut self) -> CampaignStats {
        self.stats = CampaignStats::default();
        info!(
            host = %self.host,
            port = self.port,
            rounds = self.config.rounds,
            seed = ?self.config.seed,
            persistent = self.config.persistent,
            "Starting campaign"
        );

        for attempt in 0..self.config.rounds {
            self.round(attempt);
        }
        self.close();

        info!(
            attempts = self.stats.attempts,
            sent = self.stats.sent,
            errors = self.stats.errors,
            "Campaign finished"
        );
        self.stats
    }

    /// Counters so far.
    pub fn stats(&self) -> CampaignStats {
        self.stats
    }

    /// Whether a connection is currently held open.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn round(&mut self, attempt: u64) {
        self.stats.attempts += 1;
        if let Err(err) = self.exchange(attempt) {
            self.stats.errors += 1;
            if self.config.verbose {
                warn!(attempt, error = %err, "Transport failure");
            }
            self.close();
        }
        if !self.config.delay.is_zero() {
            thread::sleep(self.config.delay);
        }
    }

    fn exchange(&mut self, attempt: u64) -> io::Result<()> {
        let request = build_request(&mut self.rng);
        debug!(
            attempt,
            method = %request.method,
            len = request.raw.len(),
            cutoff = request.cutoff,
            chunked = request.chunked,
            linger = request.linger,
            "Built request"
        );

        let timeout = self.config.effective_timeout();
        let mut stream = match self.connection.take() {
            Some(stream) => stream,
            None => connect(&self.host, self.port, timeout)?,
        };

        stream_request(&mut stream, &request, &mut self.rng)?;
        self.stats.sent += 1;

        if request.linger {
            drain(&mut stream, &mut self.rng, timeout);
        }

        if self.config.persistent && !chance(&mut self.rng, 0.25) {
            self.connection = Some(stream);
        }
        Ok(())
    }

    fn close(&mut self) {
        // Dropping the stream closes the socket.
        self.connection = None;
    }
}

/// Connect to the first reachable address of `host:port`.
fn connect(host: &str, port: u16, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in (host, port).to_socket_addrs()? {
        match connect_addr(addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            ErrorKind::AddrNotAvailable,
            format!("{host}:{port} resolved to no addresses"),
        )
    }))
}

fn connect_addr(addr: SocketAddr, timeout: Duration) -> io::Result<TcpStream> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.connect_timeout(&SockAddr::from(addr), timeout)?;
    let stream = TcpStream::from(socket);
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;
    stream.set_nodelay(true)?;
    Ok(stream)
}

/// Run one campaign against `host:port` and return its counters.
pub fn fuzz_http_server(host: &str, port: u16, config: &CampaignConfig) -> CampaignStats {
    Campaign::new(host, port, config.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_zero_rounds_opens_nothing() {
        let config = CampaignConfig {
            rounds: 0,
            seed: Some(1),
            ..CampaignConfig::default()
        };
        // Port 9 on loopback is almost never open; nothing should dial it.
        let mut campaign = Campaign::new("127.0.0.1", 9, config);
        let stats = campaign.run();
        assert_eq!(stats, CampaignStats::default());
        assert!(!campaign.is_connected());
    }

    #[test]
    fn test_refused_connections_are_counted() {
        // Bind then drop to find a port with no listener.
        let port = TcpListener::bind("127.0.0.1:0")
            .and_then(|l| l.local_addr())
            .map(|a| a.port())
            .expect("ephemeral port");
        let config = CampaignConfig {
            rounds: 5,
            seed: Some(2),
            timeout: Duration::from_millis(100),
            ..CampaignConfig::default()
        };
        let stats = fuzz_http_server("127.0.0.1", port, &config);
        assert_eq!(stats.attempts, 5);
        assert_eq!(stats.sent, 0);
        assert_eq!(stats.errors, 5);
    }

    #[test]
    fn test_stats_add_assign() {
        let mut total = CampaignStats {
            attempts: 1,
            sent: 1,
            errors: 0,
        };
        total += CampaignStats {
            attempts: 2,
            sent: 1,
            errors: 1,
        };
        assert_eq!(
            total,
            CampaignStats {
                attempts: 3,
                sent: 2,
                errors: 1
            }
        );
    }

    #[test]
    fn test_stats_json_shape() {
        let stats = CampaignStats::default();
        assert_eq!(
            serde_json::to_string(&stats).expect("serialize"),
            r#"{"attempts":0,"sent":0,"errors":0}"#
        );
    }

    #[test]
    fn test_zero_timeout_is_raised() {
        let config = CampaignConfig {
            timeout: Duration::ZERO,
            ..CampaignConfig::default()
        };
        assert_eq!(config.effective_timeout(), MIN_TIMEOUT);
    }
}

use crate::constants::{DEFAULT_IP, DEFAULT_PORT, DEFAULT_READ_TIMEOUT_MS, DEFAULT_SCAN_CAPACITY};
use crate::error::RBLidarError;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// What to do with a sub-packet that arrives when the scan buffer is full.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the incoming sub-packet.
    #[default]
    Reject,
    /// Evict the oldest sub-packet of the revolution to make room.
    DropOldest,
    /// Accept the sub-packet beyond the nominal capacity.
    Grow,
}

impl FromStr for OverflowPolicy {
    type Err = RBLidarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(OverflowPolicy::Reject),
            "drop-oldest" | "drop_oldest" => Ok(OverflowPolicy::DropOldest),
            "grow" => Ok(OverflowPolicy::Grow),
            _ => Err(RBLidarError::InvalidConfig(format!(
                "unknown overflow policy \"{}\"",
                s
            ))),
        }
    }
}

/// Driver settings.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverConfig {
    /// Local address to bind, such as `192.168.198.1`.
    pub ip: String,
    pub port: u16,
    /// Nominal number of sub-packets per revolution.
    pub scan_capacity: usize,
    pub overflow_policy: OverflowPolicy,
    /// Socket read timeout. Bounds how long shutdown waits on a silent sensor.
    pub read_timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            ip: DEFAULT_IP.to_string(),
            port: DEFAULT_PORT,
            scan_capacity: DEFAULT_SCAN_CAPACITY,
            overflow_policy: OverflowPolicy::default(),
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }
}

impl DriverConfig {
    pub fn new(ip: &str, port: u16) -> Self {
        DriverConfig {
            ip: ip.to_string(),
            port,
            ..Default::default()
        }
    }

    pub fn with_scan_capacity(mut self, scan_capacity: usize) -> Self {
        self.scan_capacity = scan_capacity;
        self
    }

    pub fn with_overflow_policy(mut self, overflow_policy: OverflowPolicy) -> Self {
        self.overflow_policy = overflow_policy;
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, RBLidarError> {
        let ip = IpAddr::from_str(&self.ip)
            .map_err(|_| RBLidarError::InvalidAddress(format!("{}:{}", self.ip, self.port)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub(crate) fn validate(&self) -> Result<(), RBLidarError> {
        if self.scan_capacity == 0 {
            return Err(RBLidarError::InvalidConfig(
                "scan capacity must be at least one sub-packet".to_string(),
            ));
        }
        // A zero read timeout is rejected by the socket layer
        if self.read_timeout.is_zero() {
            return Err(RBLidarError::InvalidConfig(
                "read timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

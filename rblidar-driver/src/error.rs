use std::error::Error;
use std::{fmt, io};

#[derive(Debug)]
pub enum RBLidarError {
    InvalidDatagramLength(usize),
    InvalidAddress(String),
    InvalidConfig(String),
    BufferOverflow(usize),
    ThreadSpawnError(io::Error),
    IoError(io::Error),
}

impl fmt::Display for RBLidarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RBLidarError::InvalidDatagramLength(len) => write!(
                f,
                "Datagram must be exactly {} bytes. Actually {} bytes.",
                crate::constants::DATAGRAM_SIZE,
                len
            ),
            RBLidarError::InvalidAddress(addr) => write!(f, "Cannot parse \"{}\" as a socket address.", addr),
            RBLidarError::InvalidConfig(reason) => write!(f, "Invalid driver configuration: {}", reason),
            RBLidarError::BufferOverflow(capacity) => write!(
                f,
                "Scan buffer is full ({} sub-packets). Sub-packet rejected.",
                capacity
            ),
            RBLidarError::ThreadSpawnError(err) => write!(f, "Failed to spawn driver thread: {}", err),
            RBLidarError::IoError(err) => fmt::Display::fmt(&err, f),
        }
    }
}

impl Error for RBLidarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RBLidarError::ThreadSpawnError(err) | RBLidarError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RBLidarError {
    fn from(err: io::Error) -> Self {
        RBLidarError::IoError(err)
    }
}

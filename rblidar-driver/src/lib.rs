//! Driver for spinning LiDARs that stream 1206-byte UDP datagrams.
//!
//! Two threads run per driver. The receiver parses datagrams and collects
//! sub-packets until a revolution marker (azimuth zero) arrives, then hands
//! the completed revolution to the decoder, which interpolates per-point
//! azimuth and timestamp and invokes the user callback.

use std::net::UdpSocket;
use std::sync::{mpsc, Arc};

mod config;
mod constants;
mod decoder;
mod driver_threads;
mod error;
mod numeric;
mod packet;
mod receiver;
mod scan_buffer;
mod stats;

pub use crate::config::{DriverConfig, OverflowPolicy};
pub use crate::constants::{
    AZIMUTH_PADDING, AZIMUTH_REVOLUTION_START, DATAGRAM_SIZE, POINTS_PER_SUBPACKET,
    SUBPACKETS_PER_DATAGRAM,
};
pub use crate::decoder::decode_scan;
pub use crate::driver_threads::{join, DriverThreads};
pub use crate::error::RBLidarError;
pub use crate::packet::{parse_datagram, RawDatagram, RawPoint, RawSubPacket};
pub use crate::receiver::{ScanAssembler, TimestampTracker};
pub use crate::scan_buffer::{PushOutcome, ScanBuffer, ScanEntry};
pub use crate::stats::{DriverStats, StatsSnapshot};
pub use rblidar_data::{PointRecord, Scan};

use crate::constants::{SCAN_CHANNEL_CAPACITY, TERMINATOR_CAPACITY};
use crate::driver_threads::{decode_scans, receive_datagrams};
use crossbeam_channel::{bounded, unbounded};
use log::{debug, info};

/// Function to launch the driver.
///
/// Binds the UDP socket and starts the receiver and decoder threads. The
/// callback runs on the decoder thread once per revolution; the slice it
/// receives is only borrowed for the duration of the call.
///
/// Threads stop when the returned `DriverThreads` is dropped.
pub fn run_driver<F>(config: &DriverConfig, callback: F) -> Result<DriverThreads, RBLidarError>
where
    F: FnMut(&[PointRecord]) + Send + 'static,
{
    config.validate()?;
    let socket = UdpSocket::bind(config.socket_addr()?)?;
    socket.set_read_timeout(Some(config.read_timeout))?;
    let local_addr = socket.local_addr()?;
    info!("Listening for LiDAR datagrams on {local_addr}");

    let stats = Arc::new(DriverStats::default());
    let (receiver_terminator_tx, receiver_terminator_rx) = bounded(TERMINATOR_CAPACITY);
    let (decoder_terminator_tx, decoder_terminator_rx) = bounded(TERMINATOR_CAPACITY);
    // One completed revolution may wait while the previous one is decoded
    let (ready_tx, ready_rx) = bounded::<ScanBuffer>(1);
    let (recycle_tx, recycle_rx) = unbounded::<ScanBuffer>();

    let decoder_stats = Arc::clone(&stats);
    let decoder_thread = std::thread::Builder::new()
        .name("rblidar-decoder".to_string())
        .spawn(move || {
            decode_scans(
                ready_rx,
                recycle_tx,
                decoder_terminator_rx,
                callback,
                decoder_stats,
            );
        })
        .map_err(RBLidarError::ThreadSpawnError)?;

    let assembler = ScanAssembler::new(
        config.scan_capacity,
        config.overflow_policy,
        Arc::clone(&stats),
    );
    let receiver_stats = Arc::clone(&stats);
    let receiver_thread = std::thread::Builder::new()
        .name("rblidar-receiver".to_string())
        .spawn(move || {
            receive_datagrams(
                socket,
                assembler,
                ready_tx,
                recycle_rx,
                receiver_terminator_rx,
                receiver_stats,
            );
        });
    let receiver_thread = match receiver_thread {
        Ok(thread) => thread,
        Err(e) => {
            // Dropping the terminator stops the decoder
            drop(decoder_terminator_tx);
            let _ = decoder_thread.join();
            return Err(RBLidarError::ThreadSpawnError(e));
        }
    };

    Ok(DriverThreads {
        receiver_terminator_tx,
        decoder_terminator_tx,
        receiver_thread: Some(receiver_thread),
        decoder_thread: Some(decoder_thread),
        stats,
        local_addr,
    })
}

/// Launches the driver and delivers each revolution as an owned [`Scan`].
///
/// When the consumer falls more than a few revolutions behind, new
/// revolutions are discarded rather than blocking the decoder.
pub fn run_driver_channel(
    config: &DriverConfig,
) -> Result<(DriverThreads, mpsc::Receiver<Scan>), RBLidarError> {
    let (scan_tx, scan_rx) = mpsc::sync_channel::<Scan>(SCAN_CHANNEL_CAPACITY);
    let driver_threads = run_driver(config, move |points| {
        if let Err(mpsc::TrySendError::Full(_)) = scan_tx.try_send(Scan::from(points)) {
            debug!("Scan consumer is lagging. Dropping a revolution.");
        }
    })?;
    Ok((driver_threads, scan_rx))
}

use crate::constants::RECV_BUFFER_SIZE;
use crate::decoder::decode_scan;
use crate::numeric::to_string;
use crate::packet::parse_datagram;
use crate::receiver::ScanAssembler;
use crate::scan_buffer::ScanBuffer;
use crate::stats::{DriverStats, StatsSnapshot};
use crossbeam_channel::{select, Receiver, Sender, TryRecvError, TrySendError};
use log::{debug, error, info, trace, warn};
use rblidar_data::PointRecord;
use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Struct that contains driver threads.
pub struct DriverThreads {
    pub(crate) receiver_terminator_tx: Sender<bool>,
    pub(crate) decoder_terminator_tx: Sender<bool>,
    pub(crate) receiver_thread: Option<JoinHandle<()>>,
    pub(crate) decoder_thread: Option<JoinHandle<()>>,
    pub(crate) stats: Arc<DriverStats>,
    pub(crate) local_addr: SocketAddr,
}

impl DriverThreads {
    /// Address the receiver socket is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

pub(crate) fn receive_datagrams(
    socket: UdpSocket,
    mut assembler: ScanAssembler,
    ready_tx: Sender<ScanBuffer>,
    recycle_rx: Receiver<ScanBuffer>,
    receiver_terminator_rx: Receiver<bool>,
    stats: Arc<DriverStats>,
) {
    let mut buf = [0u8; RECV_BUFFER_SIZE];
    loop {
        if do_terminate(&receiver_terminator_rx) {
            info!("Receiver stopped");
            return;
        }

        // The read timeout makes this the only suspension point, and bounds it
        let len = match socket.recv(&mut buf) {
            Ok(len) => len,
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                continue
            }
            Err(e) => {
                error!("Failed to receive datagram: {e}");
                continue;
            }
        };
        stats.record_datagram();

        let datagram = match parse_datagram(&buf[..len]) {
            Ok(datagram) => datagram,
            Err(e) => {
                stats.record_rejected_datagram();
                warn!("Skipping datagram: {e}");
                trace!("Skipped datagram head: {}", to_string(&buf[..len.min(8)]));
                continue;
            }
        };

        while let Ok(buffer) = recycle_rx.try_recv() {
            assembler.recycle(buffer);
        }

        for scan in assembler.push_datagram(&datagram) {
            hand_off(&ready_tx, scan, &mut assembler, &stats);
        }
    }
}

/// Passes a completed revolution to the decoder without waiting on it.
/// The ready slot holds one revolution; when it is still occupied the new
/// revolution is dropped.
fn hand_off(
    ready_tx: &Sender<ScanBuffer>,
    scan: ScanBuffer,
    assembler: &mut ScanAssembler,
    stats: &DriverStats,
) {
    match ready_tx.try_send(scan) {
        Ok(()) => {}
        Err(TrySendError::Full(scan)) => {
            stats.record_dropped_revolution();
            warn!(
                "Decoder is busy. Dropping a revolution of {} sub-packets.",
                scan.len()
            );
            assembler.recycle(scan);
        }
        Err(TrySendError::Disconnected(scan)) => {
            debug!("Decoder is gone. Discarding a revolution.");
            assembler.recycle(scan);
        }
    }
}

pub(crate) fn decode_scans<F>(
    ready_rx: Receiver<ScanBuffer>,
    recycle_tx: Sender<ScanBuffer>,
    decoder_terminator_rx: Receiver<bool>,
    mut callback: F,
    stats: Arc<DriverStats>,
) where
    F: FnMut(&[PointRecord]),
{
    let mut points = Vec::<PointRecord>::new();
    loop {
        let next = select! {
            recv(decoder_terminator_rx) -> _ => None,
            recv(ready_rx) -> msg => msg.ok(),
        };
        let Some(scan) = next else {
            break;
        };

        decode_scan(&scan, &mut points);
        trace!(
            "Decoded {} points from {} sub-packets",
            points.len(),
            scan.len()
        );
        callback(points.as_slice());
        stats.record_decoded_revolution(points.len());

        // The receiver may already have stopped
        let _ = recycle_tx.send(scan);
    }
    info!("Decoder stopped");
}

pub(crate) fn do_terminate(terminator_rx: &Receiver<bool>) -> bool {
    match terminator_rx.try_recv() {
        Ok(terminate) => terminate,
        Err(TryRecvError::Empty) => false,
        Err(TryRecvError::Disconnected) => true,
    }
}

/// Function to join driver threads.
/// This function is automatically called when `driver_threads` is dropped.
pub fn join(driver_threads: &mut DriverThreads) {
    let _ = driver_threads.receiver_terminator_tx.try_send(true);
    let _ = driver_threads.decoder_terminator_tx.try_send(true);

    if let Some(thread) = driver_threads.receiver_thread.take() {
        if thread.join().is_err() {
            error!("Receiver thread panicked");
        }
    }
    if let Some(thread) = driver_threads.decoder_thread.take() {
        if thread.join().is_err() {
            error!("Decoder thread panicked");
        }
    }
}

impl Drop for DriverThreads {
    fn drop(&mut self) {
        join(self);
    }
}

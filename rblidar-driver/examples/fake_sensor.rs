use clap::Parser;
use rblidar_driver::{RawDatagram, AZIMUTH_PADDING, POINTS_PER_SUBPACKET, SUBPACKETS_PER_DATAGRAM};
use std::net::UdpSocket;
use std::time::{Duration, Instant};

/// Streams synthetic datagrams, e.g. to exercise `read_scan` without hardware.
#[derive(Parser)]
#[command(about = "Simulates a LiDAR.", disable_version_flag = true)]
struct Args {
    /// Address of the driver
    #[arg(long, default_value = "127.0.0.1:2368")]
    target: String,
    /// Azimuth step between sub-packets in hundredths of a degree
    #[arg(long, default_value_t = 120)]
    step: u16,
    /// Revolutions to send
    #[arg(long, default_value_t = 10)]
    revolutions: usize,
    /// Revolutions per second
    #[arg(long, default_value_t = 10)]
    rate: u32,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let socket = UdpSocket::bind("0.0.0.0:0").unwrap();
    socket.connect(&args.target).unwrap();

    let sub_packets_per_revolution = 36000 / args.step as usize;
    let datagrams_per_revolution = sub_packets_per_revolution.div_ceil(SUBPACKETS_PER_DATAGRAM);
    let period = Duration::from_secs(1) / args.rate / datagrams_per_revolution as u32;
    // device clock in microseconds
    let ticks_per_datagram = period.as_micros() as u32;

    let started = Instant::now();
    let mut timestamp = 1u32;
    for _ in 0..args.revolutions {
        let mut azimuth = 0usize;
        for _ in 0..datagrams_per_revolution {
            let mut datagram = RawDatagram {
                timestamp,
                ..Default::default()
            };
            for sub_packet in datagram.sub_packets.iter_mut() {
                if azimuth >= 36000 {
                    sub_packet.azimuth = AZIMUTH_PADDING;
                    continue;
                }
                sub_packet.azimuth = azimuth as u16;
                for (j, point) in sub_packet.points.iter_mut().enumerate() {
                    // a room with walls about 3 m away
                    point.dist_0 = 3000 + ((azimuth / 100 + j) % 500) as u16;
                    point.rssi_0 = (j * POINTS_PER_SUBPACKET) as u8;
                }
                azimuth += args.step as usize;
            }
            socket.send(&datagram.to_bytes()).unwrap();
            timestamp = timestamp.wrapping_add(ticks_per_datagram).max(1);
            std::thread::sleep(period);
        }
    }
    log::info!(
        "Sent {} revolutions in {:?}",
        args.revolutions,
        started.elapsed()
    );
}

use clap::Parser;
use rblidar_driver::{run_driver_channel, DriverConfig, OverflowPolicy};
use std::time::Duration;

/// Prints a summary of each revolution received from the LiDAR.
#[derive(Parser)]
#[command(about = "Reads data from LiDAR.", disable_version_flag = true)]
struct Args {
    /// Local address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    ip: String,
    #[arg(long, default_value_t = 2368)]
    port: u16,
    /// Nominal sub-packets per revolution
    #[arg(long, default_value_t = 300)]
    capacity: usize,
    /// reject, drop-oldest or grow
    #[arg(long, default_value = "reject")]
    overflow: OverflowPolicy,
    /// Print every revolution as JSON
    #[arg(long)]
    json: bool,
    /// Stop after this many revolutions
    #[arg(long)]
    count: Option<usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = DriverConfig::new(&args.ip, args.port)
        .with_scan_capacity(args.capacity)
        .with_overflow_policy(args.overflow);
    let (driver_threads, scan_rx) = match run_driver_channel(&config) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("Failed to start the driver. Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut received = 0;
    while args.count.map_or(true, |count| received < count) {
        let scan = match scan_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(scan) => scan,
            Err(_) => {
                eprintln!("No revolution within 5 seconds. {:?}", driver_threads.stats());
                continue;
            }
        };
        received += 1;

        if args.json {
            println!("{}", serde_json::to_string(&scan).unwrap());
            continue;
        }
        let (first, last) = match (scan.points.first(), scan.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                println!("revolution {received}: no points");
                continue;
            }
        };
        println!(
            "revolution {}: {} points, {:.2}..{:.2} deg, t={}..{}",
            received,
            scan.len(),
            first.azimuth_degree(),
            last.azimuth_degree(),
            first.timestamp,
            last.timestamp
        );
    }

    println!("{:?}", driver_threads.stats());
    drop(driver_threads);
}

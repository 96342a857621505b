use std::io;
use std::sync::Arc;
use std::thread;

use logger::{ChannelObserver, LogEntry, LogLevel, LogObserver, Logger};
use logger_proc_macro::log;

use dotenv::dotenv;

mod config;

#[log(trace)]
fn connect(host: &str, port: u16) -> Result<(), io::Error> {
    if port < 1024 {
        return Err(io::Error::new(io::ErrorKind::PermissionDenied, "privileged port"));
    }
    Err(io::Error::new(io::ErrorKind::ConnectionRefused, format!("{}:{} refused", host, port)))
}

fn main() {
    dotenv().ok();

    let cfg = match config::Config::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Ignoring logging configuration: {}", err);
            config::Config::default()
        }
    };
    logger::configure(&cfg.logging);

    // Stand-in for a remote telemetry sink: drains entries on its own thread
    let (telemetry, receiver) = ChannelObserver::unbounded();
    let telemetry: Arc<dyn LogObserver> = telemetry;
    logger::add_observer(telemetry.clone());

    let consumer = thread::spawn(move || {
        let mut forwarded = 0usize;
        for (source, entry) in receiver {
            if entry.level() >= LogLevel::Warning {
                eprintln!("[telemetry] {} {} {}", source, entry.level().icon(), entry.message());
            }
            forwarded += 1;
        }
        forwarded
    });

    let ui = Logger::new("ui");
    let overlay: Arc<dyn LogObserver> = Arc::new(|_: &Logger, entry: &LogEntry| {
        if entry.level() >= LogLevel::Warning {
            println!("[overlay] {}", entry.message());
        }
    });
    ui.add_observer(overlay);

    logger::info!("demo starting");

    let network = Logger::new("network");
    logger::set_deferred_delivery(true);
    network.debug("resolving mail host");
    if let Err(err) = connect("localhost", 2525) {
        network.record(LogLevel::Error, "connection failed").error(err).emit();
    }
    logger::warning!(logger: ui, "{} notifications waiting", 3);
    logger::set_deferred_delivery(false);

    logger::status!(logger: ui, "rendered {} widgets", 12);

    logger::remove_observer(&telemetry);
    drop(telemetry);
    match consumer.join() {
        Ok(forwarded) => logger::info!("telemetry forwarded {} entries", forwarded),
        Err(_) => logger::critical!("telemetry consumer panicked"),
    }
}

/*
 * NMEA-GSV: satellites in view decoder.
 * Authors: nmea-gsv contributors.
 * This framework is shipped under Mozilla Public V2 license.
 */

use env_logger::{Builder, Target};

use log::{error, info};

use tokio::{
    signal,
    sync::{mpsc, watch},
};

mod cli;
mod collecter;
mod device;

use crate::{
    cli::Cli,
    collecter::{runtime::Runtime, Collector, Message},
    device::Device,
};

#[tokio::main]
pub async fn main() {
    // stdout is reserved to collected sentences
    let mut builder = Builder::from_default_env();

    builder
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    // cli
    let cli = Cli::new();

    // Settings
    let device_settings = cli.device_settings();
    let settings = cli.settings();

    // init
    let rtm = Runtime::new();

    // Tokio
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let (tx, rx) = mpsc::channel(16);

    let mut collecter = Collector::new(rtm, settings, rx);

    let mut device = Device::open(&device_settings, shutdown_rx);

    let collecter = tokio::spawn(async move {
        collecter.run().await;
    });

    tokio::spawn(async move {
        signal::ctrl_c()
            .await
            .unwrap_or_else(|e| panic!("Tokio signal handling error: {}", e));

        info!("interrupted");
        let _ = shutdown_tx.send(true);
    });

    let device_tx = tx.clone();

    let reader = tokio::task::spawn_blocking(move || {
        let mut buffer = [0; 8192];

        device.consume_all_cb(&mut buffer, |sentence| {
            let msg = match sentence {
                Ok(gsv) => Message::Gsv(gsv),
                Err(e) => Message::Error(e),
            };

            if let Err(e) = device_tx.blocking_send(msg) {
                error!("missed sentence: {}", e);
            }
        })
    });

    match reader.await {
        Ok(Ok(_)) => info!("end of stream"),
        Ok(Err(e)) => error!("{}", e),
        Err(e) => error!("reader failure: {}", e),
    }

    if tx.send(Message::Shutdown).await.is_err() {
        error!("collecter has already terminated");
    }

    collecter
        .await
        .unwrap_or_else(|e| panic!("Collecter failure: {}", e));
}

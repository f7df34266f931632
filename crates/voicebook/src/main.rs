//! Voicebook studio console entry point.

use voicebook::{App, AppCommand, api::ApiClient, config::Config};

use std::{io::BufRead, sync::Arc};

use tokio::sync::{mpsc, watch};
use tracing::{error, info};
use voicebook_core::AudioEngine;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("voicebook=info")
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let (api, invalidated_rx) = match ApiClient::new(config.base_url()) {
        Ok(pair) => pair,
        Err(e) => {
            error!("Failed to build API client: {:?}", e);
            std::process::exit(1);
        }
    };
    let api = Arc::new(api);

    // The engine thread owns every !Send audio resource; the handle is
    // all the app ever touches.
    let audio = AudioEngine::spawn();

    let (command_tx, command_rx) = mpsc::channel(32);
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    // Console forwarding via a single persistent reader thread. Stdin
    // has blocking reads only; when command_rx is dropped (main loop
    // ends), blocking_send() fails and the reader stops.
    let stdin_handle = std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let Some(cmd) = AppCommand::parse(&line) else {
                if !line.trim().is_empty() {
                    println!("Unknown command. Type 'help'.");
                }
                continue;
            };
            if command_tx.blocking_send(cmd).is_err() {
                break;
            }
        }
    });

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        let app = App::new(
            audio.clone(),
            api,
            command_rx,
            invalidated_rx,
            shutdown_tx,
        );

        if let Err(e) = app.run().await {
            error!(error = ?e, "App error");
        }

        if *shutdown_rx.borrow_and_update() {
            info!("Shutdown signal observed");
        }
    });

    audio.shutdown();

    // The stdin reader may still be blocked on a read; it exits with the
    // process. Joining is best-effort only when stdin already closed.
    if stdin_handle.is_finished() {
        let _ = stdin_handle.join();
    }

    info!("Voicebook exited");
}

//! Backend worker: owns the HTTP adapter and a tokio runtime, runs one
//! queued command at a time and reports each outcome back to the UI.

use std::thread;

use client_core::{perform, RecordsApi};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch<A>(api: A, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>)
where
    A: RecordsApi + 'static,
{
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            while let Ok(cmd) = cmd_rx.recv() {
                let name = cmd.name();
                tracing::debug!(command = name, "running backend command");
                let outcome = perform(&api, cmd.into_op()).await;
                if ui_tx.try_send(UiEvent::Records(outcome)).is_err() {
                    tracing::warn!(command = name, "ui event queue unavailable; outcome dropped");
                }
            }
            tracing::info!("backend command queue closed; worker exiting");
        });
    });
}

//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{ClientError, RecordOp, RecordOutcome, RequestFailure};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues a command for the worker. On failure the status line explains why
/// and the caller gets the failed outcome to apply locally.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> Result<(), RecordOutcome> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => {
            *status = "UI command queue is full; please retry".to_string();
            Err(undelivered(cmd.into_op(), status))
        }
        Err(TrySendError::Disconnected(cmd)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
            Err(undelivered(cmd.into_op(), status))
        }
    }
}

fn undelivered(op: RecordOp, reason: &str) -> RecordOutcome {
    tracing::warn!(reason, "backend command was not queued");
    let failure = RequestFailure::Transport(reason.to_string());
    RecordOutcome::Failed(match op {
        RecordOp::Load => ClientError::Fetch(failure),
        RecordOp::Create(_) => ClientError::Create(failure),
        RecordOp::Update { .. } => ClientError::Update(failure),
        RecordOp::Delete(_) => ClientError::Delete(failure),
    })
}

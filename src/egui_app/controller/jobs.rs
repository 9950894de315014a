use std::{
    sync::{
        Arc,
        mpsc::{Receiver, Sender},
    },
    thread,
};

use crate::{
    backend::Backend,
    session::{BatchJob, BatchOutcome, SingleRowJob, SingleRowOutcome},
};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    BatchFinished(BatchOutcome),
    PredictionFinished(SingleRowOutcome),
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    batch_in_progress: bool,
    prediction_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            batch_in_progress: false,
            prediction_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn any_in_progress(&self) -> bool {
        self.batch_in_progress || self.prediction_in_progress
    }

    pub(super) fn begin_batch(&mut self, job: BatchJob, backend: Arc<dyn Backend>) {
        self.batch_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let outcome = job.run(backend.as_ref());
            let _ = tx.send(JobMessage::BatchFinished(outcome));
        });
    }

    pub(super) fn clear_batch(&mut self) {
        self.batch_in_progress = false;
    }

    pub(super) fn begin_prediction(&mut self, job: SingleRowJob, backend: Arc<dyn Backend>) {
        self.prediction_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let outcome = job.run(backend.as_ref());
            let _ = tx.send(JobMessage::PredictionFinished(outcome));
        });
    }

    pub(super) fn clear_prediction(&mut self) {
        self.prediction_in_progress = false;
    }
}

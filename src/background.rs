// The measurement core is synchronous by design: a scan runs to completion on
// the calling thread. This module is the host-side offload layer for callers
// that must not block (interactive frontends, request handlers). Whole rasters
// go in through a dispatcher, round-robin workers scan them, and the finished
// report comes back through a oneshot channel. Each worker owns its scanner,
// so no scan shares state with any other.

use crate::core_modules::error::AnalysisError;
use crate::core_modules::scanner::ImageScanner;
use crate::pipeline::{CalibrationFactor, PipelineConfig, Report, measure};
use image::RgbImage;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Failed to send task to worker pool")]
    SendFailed,

    #[error("Failed to receive result from worker")]
    ReceiveFailed,

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

/// The finished product of one offloaded analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: Report,
    pub processed_image: RgbImage,
}

struct AnalysisTask {
    raster: RgbImage,
    result_sender: oneshot::Sender<Result<AnalysisOutcome, AnalysisError>>,
}

/// A pool of scan workers fed by a round-robin dispatcher.
pub struct WorkerPool {
    task_sender: mpsc::UnboundedSender<AnalysisTask>,
    workers: Vec<tokio::task::JoinHandle<()>>,
}

impl WorkerPool {
    /// Creates a pool with one worker per available CPU.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_pool_size(config, num_cpus::get().max(1))
    }

    pub fn with_pool_size(config: PipelineConfig, pool_size: usize) -> Self {
        let pool_size = pool_size.max(1);
        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<AnalysisTask>();

        // Create a single dispatcher that distributes tasks to workers.
        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..pool_size)
            .map(|_| mpsc::unbounded_channel::<AnalysisTask>())
            .unzip();

        tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                let _ = worker_senders[worker_idx].send(task);
                worker_idx = (worker_idx + 1) % pool_size;
            }
        });

        let mut workers = Vec::new();
        for mut worker_receiver in worker_receivers {
            let scanner = ImageScanner::new(config.scanner.clone());
            let calibration: Option<CalibrationFactor> = config.pixels_per_unit;

            let worker = tokio::spawn(async move {
                while let Some(task) = worker_receiver.recv().await {
                    let outcome = measure(&scanner, calibration, &task.raster).map(
                        |(report, processed_image)| AnalysisOutcome {
                            report,
                            processed_image,
                        },
                    );
                    let _ = task.result_sender.send(outcome);
                }
            });
            workers.push(worker);
        }

        Self {
            task_sender,
            workers,
        }
    }

    /// Queues a raster for analysis and waits for the finished report. The
    /// caller hands over ownership of the raster; the worker allocates its own
    /// visualization output.
    pub async fn process_image(&self, raster: RgbImage) -> Result<AnalysisOutcome, PoolError> {
        let (result_sender, result_receiver) = oneshot::channel();
        let task = AnalysisTask {
            raster,
            result_sender,
        };

        self.task_sender
            .send(task)
            .map_err(|_| PoolError::SendFailed)?;

        match result_receiver.await {
            Ok(outcome) => Ok(outcome?),
            Err(_) => Err(PoolError::ReceiveFailed),
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}

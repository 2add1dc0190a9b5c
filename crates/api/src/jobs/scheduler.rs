//! Job scheduler infrastructure for background tasks.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Job frequency for scheduling.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)] // Seconds and Hourly are available for future jobs
pub enum JobFrequency {
    /// Run every N seconds (for testing).
    Seconds(u64),
    /// Run every N minutes.
    Minutes(u64),
    /// Run every hour.
    Hourly,
}

impl JobFrequency {
    /// Get the duration between job executions.
    pub fn duration(&self) -> Duration {
        match self {
            JobFrequency::Seconds(secs) => Duration::from_secs(*secs),
            JobFrequency::Minutes(mins) => Duration::from_secs(*mins * 60),
            JobFrequency::Hourly => Duration::from_secs(3600),
        }
    }
}

/// Trait for implementing background jobs.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// The name of this job (used for logging).
    fn name(&self) -> &'static str;

    /// The frequency at which this job should run.
    fn frequency(&self) -> JobFrequency;

    /// Execute the job. Returns Ok(()) on success, Err with message on failure.
    async fn execute(&self) -> Result<(), String>;
}

/// Background job scheduler.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    /// Create a new job scheduler.
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            shutdown_tx,
            shutdown_rx,
            handles: Vec::new(),
        }
    }

    /// Register a job with the scheduler.
    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Start all registered jobs.
    pub fn start(&mut self) {
        info!("Starting job scheduler with {} jobs", self.jobs.len());

        for job in &self.jobs {
            let job = Arc::clone(job);
            let mut shutdown_rx = self.shutdown_rx.clone();

            let handle = tokio::spawn(async move {
                let name = job.name();
                let frequency = job.frequency();
                let mut interval = tokio::time::interval(frequency.duration());

                // Skip the first immediate tick
                interval.tick().await;

                info!(job = name, frequency = ?frequency, "Job scheduled");

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let start = std::time::Instant::now();
                            info!(job = name, "Job starting");

                            match job.execute().await {
                                Ok(()) => {
                                    let elapsed = start.elapsed();
                                    info!(
                                        job = name,
                                        elapsed_ms = elapsed.as_millis(),
                                        "Job completed successfully"
                                    );
                                }
                                Err(e) => {
                                    let elapsed = start.elapsed();
                                    error!(
                                        job = name,
                                        elapsed_ms = elapsed.as_millis(),
                                        error = %e,
                                        "Job failed"
                                    );
                                }
                            }
                        }
                        _ = shutdown_rx.changed() => {
                            if *shutdown_rx.borrow() {
                                info!(job = name, "Job shutting down");
                                break;
                            }
                        }
                    }
                }
            });

            self.handles.push(handle);
        }
    }

    /// Initiate graceful shutdown of all jobs.
    /// Returns immediately after signaling shutdown.
    pub fn shutdown(&self) {
        info!("Initiating job scheduler shutdown");
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for all jobs to complete with timeout.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        info!("Waiting for jobs to complete (timeout: {:?})", timeout);

        let shutdown_future = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!("Job task panicked: {}", e);
                }
            }
        };

        match tokio::time::timeout(timeout, shutdown_future).await {
            Ok(()) => info!("All jobs completed gracefully"),
            Err(_) => warn!("Job shutdown timed out after {:?}", timeout),
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TestJob {
        run_count: Arc<AtomicUsize>,
        should_fail: bool,
    }

    #[async_trait::async_trait]
    impl Job for TestJob {
        fn name(&self) -> &'static str {
            "test_job"
        }

        fn frequency(&self) -> JobFrequency {
            JobFrequency::Seconds(1)
        }

        async fn execute(&self) -> Result<(), String> {
            self.run_count.fetch_add(1, Ordering::SeqCst);
            if self.should_fail {
                Err("Test failure".to_string())
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_scheduler_runs_and_shuts_down() {
        let run_count = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(TestJob {
            run_count: Arc::clone(&run_count),
            should_fail: false,
        });

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(5)).await;

        assert!(run_count.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn test_failing_job_keeps_scheduler_alive() {
        let run_count = Arc::new(AtomicUsize::new(0));
        let mut scheduler = JobScheduler::new();
        scheduler.register(TestJob {
            run_count: Arc::clone(&run_count),
            should_fail: true,
        });

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(5)).await;

        // Failures are logged, not fatal; the job kept running
        assert!(run_count.load(Ordering::SeqCst) >= 2);
    }
}

//! Cron scheduler for periodic maintenance tasks.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use markethub_core::config::worker::WorkerConfig;
use markethub_core::error::AppError;
use markethub_database::repositories::notification::NotificationRepository;
use markethub_database::repositories::security::SecurityEventRepository;

/// Cron-based scheduler for periodic background tasks.
pub struct MaintenanceScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
    /// Security event repository.
    security_repo: Arc<SecurityEventRepository>,
    /// Notification repository.
    notification_repo: Arc<NotificationRepository>,
    /// Retention configuration.
    config: WorkerConfig,
}

impl std::fmt::Debug for MaintenanceScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaintenanceScheduler").finish()
    }
}

impl MaintenanceScheduler {
    /// Create a new maintenance scheduler.
    pub async fn new(
        security_repo: Arc<SecurityEventRepository>,
        notification_repo: Arc<NotificationRepository>,
        config: WorkerConfig,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            security_repo,
            notification_repo,
            config,
        })
    }

    /// Register all default scheduled tasks.
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_security_purge().await?;
        self.register_notification_cleanup().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Maintenance scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Maintenance scheduler shut down");
        Ok(())
    }

    /// Security event purge, daily at 3 AM.
    async fn register_security_purge(&self) -> Result<(), AppError> {
        let repo = Arc::clone(&self.security_repo);
        let retention_days = self.config.security_event_retention_days;

        let job = CronJob::new_async("0 0 3 * * *", move |_uuid, _lock| {
            let repo = Arc::clone(&repo);
            Box::pin(async move {
                let cutoff = Utc::now() - Duration::days(retention_days);
                match repo.purge_before(cutoff).await {
                    Ok(removed) => {
                        tracing::info!(removed, "Security event purge complete");
                    }
                    Err(e) => {
                        tracing::error!("Security event purge failed: {}", e);
                    }
                }
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create security_purge schedule: {}", e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add security_purge schedule: {}", e))
        })?;

        tracing::info!("Registered: security_purge (daily at 3AM)");
        Ok(())
    }

    /// Notification cleanup, daily at 2 AM.
    async fn register_notification_cleanup(&self) -> Result<(), AppError> {
        let repo = Arc::clone(&self.notification_repo);
        let retention_days = self.config.notification_retention_days;
        let max_per_user = self.config.max_notifications_per_user;

        let job = CronJob::new_async("0 0 2 * * *", move |_uuid, _lock| {
            let repo = Arc::clone(&repo);
            Box::pin(async move {
                let cutoff = Utc::now() - Duration::days(retention_days);

                let expired = match repo.cleanup_old(cutoff).await {
                    Ok(count) => count,
                    Err(e) => {
                        tracing::error!("Notification cleanup failed: {}", e);
                        return;
                    }
                };

                let overflow = match repo.trim_per_user(max_per_user).await {
                    Ok(count) => count,
                    Err(e) => {
                        tracing::error!("Notification per-user trim failed: {}", e);
                        return;
                    }
                };

                tracing::info!(
                    expired,
                    overflow,
                    "Notification cleanup complete"
                );
            })
        })
        .map_err(|e| {
            AppError::internal(format!(
                "Failed to create notification_cleanup schedule: {}",
                e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!(
                "Failed to add notification_cleanup schedule: {}",
                e
            ))
        })?;

        tracing::info!("Registered: notification_cleanup (daily at 2AM)");
        Ok(())
    }
}

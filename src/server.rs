//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: storage init, migrations,
//! default admin seeding, the REST API, metrics and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::DashboardUserServiceImpl;
use crate::config::{AdminConfig, AppConfig, StorageBackend};
use crate::domain::{DashboardUserDto, DashboardUserQuery, DashboardUserService, PageParameter};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{
    init_database, InMemoryDashboardUserRepository, SeaOrmDashboardUserRepository,
};
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::modules::metrics::MetricsState;
use crate::interfaces::http::{create_api_router, RouterState};
use crate::shared::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the server.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Seed the configured admin account when no users exist (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running server.
///
/// # Examples
///
/// ```rust,no_run
/// use dashboard_admin::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Service backing the dashboard user endpoints.
    pub service: Arc<dyn DashboardUserService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is bound to (resolves port 0).
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting dashboard admin server...");

        let prometheus_handle = prometheus_handle();

        // ── Storage ────────────────────────────────────────────
        let (service, db): (Arc<dyn DashboardUserService>, Option<DatabaseConnection>) =
            match app_cfg.database.backend {
                StorageBackend::Memory => {
                    warn!("Using in-memory storage; data is lost on restart");
                    let repo = Arc::new(InMemoryDashboardUserRepository::new());
                    (Arc::new(DashboardUserServiceImpl::new(repo)), None)
                }
                StorageBackend::Sqlite | StorageBackend::Postgres => {
                    let db = init_database(&app_cfg.database.to_database_config()).await?;
                    if opts.auto_migrate {
                        info!("Running database migrations...");
                        Migrator::up(&db, None).await?;
                        info!("Migrations completed");
                    }
                    let repo = Arc::new(SeaOrmDashboardUserRepository::new(db.clone()));
                    (Arc::new(DashboardUserServiceImpl::new(repo)), Some(db))
                }
            };

        if opts.create_default_admin && app_cfg.admin.seed {
            seed_default_admin(service.as_ref(), &app_cfg.admin).await;
        }

        // ── REST API server ────────────────────────────────────
        let router_state = RouterState {
            metrics: prometheus_handle.map(|handle| MetricsState { handle }),
            health: HealthState::new(db.clone()),
            ..RouterState::new(service.clone())
        }
        .with_paging(app_cfg.paging_policy());
        let api_router = create_api_router(router_state);

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            service,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for shutdown to be triggered, drain the API server within the
    /// configured timeout and close the database.
    pub async fn wait(self) {
        let Self {
            shutdown,
            api_task,
            db,
            ..
        } = self;

        let drained = shutdown
            .shutdown_with_cleanup(|| async move {
                if let Err(e) = api_task.await {
                    error!("REST API server task panicked: {}", e);
                }
            })
            .await;
        if !drained {
            warn!("REST API server did not stop in time");
        }

        if let Some(db) = db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("Dashboard admin shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down dashboard admin server...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global metrics recorder can only be installed once per process, so
/// restarts within one process reuse the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Metrics disabled, failed to install recorder: {}", e);
                None
            }
        })
        .clone()
}

/// Create the configured admin account if no dashboard users exist.
pub async fn seed_default_admin(service: &dyn DashboardUserService, admin: &AdminConfig) {
    let query = DashboardUserQuery::new(None, PageParameter::new(Some(1), Some(1)));
    let existing = match service.list_by_page(&query).await {
        Ok(page) => page.page.total,
        Err(e) => {
            error!("Failed to count dashboard users: {}", e);
            return;
        }
    };
    if existing > 0 {
        return;
    }

    info!("Creating default admin user...");
    let dto = DashboardUserDto {
        id: None,
        user_name: Some(admin.user_name.clone()),
        password: Some(admin.password.clone()),
        role: Some(admin.role),
        enabled: Some(true),
    };
    match service.create_or_update(dto).await {
        Ok(_) => {
            info!("Default admin created: {}", admin.user_name);
            warn!("Please change the default admin password");
        }
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` takes precedence over `logging.level`. Call once at process
/// startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseSection;

    fn memory_config() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 0;
        cfg.server.shutdown_timeout = 5;
        cfg.database = DatabaseSection {
            backend: StorageBackend::Memory,
            ..Default::default()
        };
        cfg
    }

    async fn total(service: &dyn DashboardUserService) -> u64 {
        service
            .list_by_page(&DashboardUserQuery::new(None, PageParameter::default()))
            .await
            .unwrap()
            .page
            .total
    }

    #[tokio::test]
    async fn start_seeds_admin_and_shuts_down() {
        let handle = ServerHandle::start(ServerOptions {
            config: memory_config(),
            ..Default::default()
        })
        .await
        .unwrap();

        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);
        assert_eq!(total(handle.service.as_ref()).await, 1);

        tokio::time::timeout(std::time::Duration::from_secs(10), handle.shutdown())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn seeding_is_skipped_when_users_exist() {
        let repo = Arc::new(InMemoryDashboardUserRepository::new());
        let service = DashboardUserServiceImpl::new(repo);
        let admin = AdminConfig::default();
        seed_default_admin(&service, &admin).await;
        seed_default_admin(&service, &admin).await;
        assert_eq!(total(&service).await, 1);
    }

    #[tokio::test]
    async fn start_without_admin_leaves_table_empty() {
        let handle = ServerHandle::start(ServerOptions {
            config: memory_config(),
            create_default_admin: false,
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(total(handle.service.as_ref()).await, 0);
        handle.shutdown().await;
    }
}

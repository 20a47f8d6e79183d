use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use estate_backoffice_server::adapter;
use estate_backoffice_server::domain;
use estate_backoffice_server::infrastructure;
use estate_backoffice_server::usecase;

use adapter::handler::{self, AppState};
use adapter::middleware::auth::BackofficeAuthState;
use infrastructure::config::Config;
use infrastructure::persistence;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    // 2. Config
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let config_content = std::fs::read_to_string(&config_path)?;
    let cfg: Config = serde_yaml::from_str(&config_content)?;
    info!("starting {}", cfg.app.name);
    adapter::handler::error::set_verbose_errors(!cfg.app.is_production());

    // 3. Database
    let db_pool = if let Some(ref db_cfg) = cfg.database {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| db_cfg.connection_url());
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(db_cfg.max_connections)
            .connect(&url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database connected");
        pool
    } else {
        anyhow::bail!("database configuration is required");
    };

    // 4. Repositories
    let plan_repo: Arc<dyn domain::repository::installment_plan_repository::InstallmentPlanRepository> =
        Arc::new(persistence::installment_plan_repo_impl::InstallmentPlanPostgresRepository::new(db_pool.clone()));
    let project_repo: Arc<dyn domain::repository::project_repository::ProjectRepository> =
        Arc::new(persistence::project_repo_impl::ProjectPostgresRepository::new(db_pool.clone()));
    let property_repo: Arc<dyn domain::repository::property_repository::PropertyRepository> =
        Arc::new(persistence::property_repo_impl::PropertyPostgresRepository::new(db_pool.clone()));
    let size_repo: Arc<dyn domain::repository::property_size_repository::PropertySizeRepository> =
        Arc::new(persistence::property_size_repo_impl::PropertySizePostgresRepository::new(db_pool.clone()));
    let stock_repo: Arc<dyn domain::repository::stock_repository::StockRepository> =
        Arc::new(persistence::stock_repo_impl::StockPostgresRepository::new(db_pool.clone()));
    let customer_repo: Arc<dyn domain::repository::customer_repository::CustomerRepository> =
        Arc::new(persistence::customer_repo_impl::CustomerPostgresRepository::new(db_pool.clone()));
    let co_applicant_repo: Arc<dyn domain::repository::co_applicant_repository::CoApplicantRepository> =
        Arc::new(persistence::co_applicant_repo_impl::CoApplicantPostgresRepository::new(db_pool.clone()));
    let broker_repo: Arc<dyn domain::repository::broker_repository::BrokerRepository> =
        Arc::new(persistence::broker_repo_impl::BrokerPostgresRepository::new(db_pool.clone()));
    let bank_repo: Arc<dyn domain::repository::bank_repository::BankRepository> =
        Arc::new(persistence::bank_repo_impl::BankPostgresRepository::new(db_pool.clone()));
    let plc_repo: Arc<dyn domain::repository::plc_repository::PlcRepository> =
        Arc::new(persistence::plc_repo_impl::PlcPostgresRepository::new(db_pool.clone()));
    let booking_repo: Arc<dyn domain::repository::booking_repository::BookingRepository> =
        Arc::new(persistence::booking_repo_impl::BookingPostgresRepository::new(db_pool.clone()));
    let user_repo: Arc<dyn domain::repository::user_repository::UserRepository> =
        Arc::new(persistence::user_repo_impl::UserPostgresRepository::new(db_pool.clone()));
    let log_repo: Arc<dyn domain::repository::activity_log_repository::ActivityLogRepository> =
        Arc::new(persistence::activity_log_repo_impl::ActivityLogPostgresRepository::new(db_pool.clone()));
    let image_store: Arc<dyn domain::repository::sign_image_store::SignImageStore> =
        Arc::new(infrastructure::storage::local_sign_image_store::LocalSignImageStore::new(
            cfg.upload.dir.clone(),
        ));

    // 5. Auth
    let auth_cfg = cfg
        .auth
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("auth configuration is required"))?;
    let tokens = Arc::new(estate_auth::TokenService::new(
        auth_cfg.jwt_secret.clone(),
        auth_cfg.token_ttl_secs,
    ));
    let auth_state = BackofficeAuthState {
        tokens: tokens.clone(),
    };

    // 6. Use Cases
    let image_policy = usecase::manage_projects::SignImagePolicy {
        max_bytes: cfg.upload.max_file_size_mb * 1024 * 1024,
        allowed_extensions: cfg.upload.allowed_extensions.clone(),
    };
    let state = AppState {
        auth_uc: Arc::new(usecase::authenticate_user::AuthenticateUserUseCase::new(
            user_repo.clone(),
            tokens,
        )),
        users_uc: Arc::new(usecase::manage_users::ManageUsersUseCase::new(
            user_repo.clone(),
            log_repo.clone(),
        )),
        plans_uc: Arc::new(
            usecase::manage_installment_plans::ManageInstallmentPlansUseCase::new(
                plan_repo.clone(),
                log_repo.clone(),
            ),
        ),
        projects_uc: Arc::new(usecase::manage_projects::ManageProjectsUseCase::new(
            project_repo.clone(),
            plan_repo.clone(),
            image_store,
            log_repo.clone(),
            image_policy,
        )),
        properties_uc: Arc::new(usecase::manage_properties::ManagePropertiesUseCase::new(
            property_repo.clone(),
            size_repo,
            customer_repo.clone(),
            log_repo.clone(),
        )),
        stock_uc: Arc::new(usecase::manage_stock::ManageStockUseCase::new(
            stock_repo.clone(),
            project_repo,
            property_repo,
            log_repo.clone(),
        )),
        customers_uc: Arc::new(usecase::register_customers::RegisterCustomersUseCase::new(
            customer_repo.clone(),
            log_repo.clone(),
        )),
        co_applicants_uc: Arc::new(
            usecase::manage_co_applicants::ManageCoApplicantsUseCase::new(
                co_applicant_repo,
                customer_repo.clone(),
                log_repo.clone(),
            ),
        ),
        brokers_uc: Arc::new(usecase::manage_brokers::ManageBrokersUseCase::new(
            broker_repo,
            log_repo.clone(),
        )),
        banks_uc: Arc::new(usecase::manage_banks::ManageBanksUseCase::new(
            bank_repo,
            log_repo.clone(),
        )),
        plcs_uc: Arc::new(usecase::manage_plcs::ManagePlcsUseCase::new(
            plc_repo,
            log_repo.clone(),
        )),
        bookings_uc: Arc::new(usecase::manage_bookings::ManageBookingsUseCase::new(
            booking_repo,
            customer_repo,
            stock_repo,
            log_repo.clone(),
        )),
        logs_uc: Arc::new(usecase::get_activity_logs::GetActivityLogsUseCase::new(
            log_repo,
        )),
        db_pool: Some(db_pool),
        auth_state: Some(auth_state),
    };

    // 7. REST server
    let app = handler::router(state);
    let rest_addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!("REST server listening on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub mod auth_handler;
pub mod bank_handler;
pub mod booking_handler;
pub mod broker_handler;
pub mod co_applicant_handler;
pub mod customer_handler;
pub mod error;
pub mod health;
pub mod installment_plan_handler;
pub mod log_handler;
pub mod plc_handler;
pub mod project_handler;
pub mod property_handler;
pub mod stock_handler;
pub mod user_handler;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Router};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use estate_auth::Claims;
use estate_server_common::ErrorCode;
use estate_validation::validate_pagination;

use crate::adapter::handler::error::AppError;
use crate::adapter::middleware::auth::{auth_middleware, BackofficeAuthState};
use crate::adapter::middleware::rbac::require_permission;
use crate::usecase;

#[derive(Clone)]
pub struct AppState {
    pub auth_uc: Arc<usecase::authenticate_user::AuthenticateUserUseCase>,
    pub users_uc: Arc<usecase::manage_users::ManageUsersUseCase>,
    pub plans_uc: Arc<usecase::manage_installment_plans::ManageInstallmentPlansUseCase>,
    pub projects_uc: Arc<usecase::manage_projects::ManageProjectsUseCase>,
    pub properties_uc: Arc<usecase::manage_properties::ManagePropertiesUseCase>,
    pub stock_uc: Arc<usecase::manage_stock::ManageStockUseCase>,
    pub customers_uc: Arc<usecase::register_customers::RegisterCustomersUseCase>,
    pub co_applicants_uc: Arc<usecase::manage_co_applicants::ManageCoApplicantsUseCase>,
    pub brokers_uc: Arc<usecase::manage_brokers::ManageBrokersUseCase>,
    pub banks_uc: Arc<usecase::manage_banks::ManageBanksUseCase>,
    pub plcs_uc: Arc<usecase::manage_plcs::ManagePlcsUseCase>,
    pub bookings_uc: Arc<usecase::manage_bookings::ManageBookingsUseCase>,
    pub logs_uc: Arc<usecase::get_activity_logs::GetActivityLogsUseCase>,
    pub db_pool: Option<sqlx::PgPool>,
    pub auth_state: Option<BackofficeAuthState>,
}

/// Common `?page=&page_size=` listing parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub fn resolve(&self) -> Result<(u32, u32), AppError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(20);
        validate_pagination(page, page_size).map_err(|e| {
            AppError::bad_request(ErrorCode::new("EST_SERVER_INVALID_PAGINATION"), &e.to_string())
        })?;
        Ok((page, page_size))
    }
}

/// The acting user for activity logging; "system" when the server runs
/// with auth disabled.
pub fn actor_of(claims: &Option<Extension<Claims>>) -> String {
    claims
        .as_ref()
        .map(|Extension(c)| c.user_id.clone())
        .unwrap_or_else(|| "system".to_string())
}

/// Claims required for role-sensitive operations (user admin, logs).
pub fn require_claims(claims: &Option<Extension<Claims>>) -> Result<Claims, AppError> {
    claims
        .as_ref()
        .map(|Extension(c)| c.clone())
        .ok_or_else(|| {
            AppError::unauthorized(
                ErrorCode::new("EST_AUTH_MISSING_CLAIMS"),
                "Authentication required",
            )
        })
}

fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/api/master/get-installment-plans", get(installment_plan_handler::list_plans))
        .route("/api/master/installment-plan/{plan_name}", get(installment_plan_handler::get_plan))
        .route("/api/master/get-projects", get(project_handler::list_projects))
        .route("/api/master/project/{id}", get(project_handler::get_project))
        .route("/api/master/get-properties", get(property_handler::list_properties))
        .route("/api/master/property/{id}", get(property_handler::get_property))
        .route("/api/master/get-property-sizes", get(property_handler::list_property_sizes))
        .route("/api/master/property-size/{id}", get(property_handler::get_property_size))
        .route("/api/master/get-stocks", get(stock_handler::list_stock))
        .route("/api/master/stock/check-project", post(stock_handler::check_project))
        .route("/api/master/stock/check-property", post(stock_handler::check_property))
        .route("/api/master/stock/check-stock-property", post(stock_handler::check_stock_property))
        .route("/api/master/get-customers", get(customer_handler::list_customers))
        .route("/api/master/customer/{customer_id}", get(customer_handler::get_customer))
        .route("/api/master/get-co-applicants", get(co_applicant_handler::list_co_applicants))
        .route("/api/master/co-applicant/{id}", get(co_applicant_handler::get_co_applicant))
        .route("/api/master/get-brokers", get(broker_handler::list_brokers))
        .route("/api/master/broker/{broker_code}", get(broker_handler::get_broker))
        .route("/api/master/get-banks", get(bank_handler::list_banks))
        .route("/api/master/bank/{ifsc_code}", get(bank_handler::get_bank))
        .route("/api/master/get-plcs", get(plc_handler::list_plcs))
        .route("/api/master/plc/{name}", get(plc_handler::get_plc))
        .route("/api/transaction/get-bookings", get(booking_handler::list_bookings))
        .route("/api/transaction/booking/{id}", get(booking_handler::get_booking))
        .route("/api/logs/all", get(log_handler::list_all_logs))
        .route("/api/logs/user/{user_id}", get(log_handler::list_user_logs))
}

fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/api/master/add-new-installment-plan", post(installment_plan_handler::add_plan))
        .route("/api/master/add-installment-details", post(installment_plan_handler::add_details))
        .route("/api/master/installment-plan/{plan_name}", put(installment_plan_handler::update_plan))
        .route("/api/master/add-project", post(project_handler::add_project))
        .route("/api/master/project/{id}", put(project_handler::update_project))
        .route("/api/master/add-property", post(property_handler::add_property))
        .route("/api/master/property/{id}", put(property_handler::update_property))
        .route("/api/master/add-property-size", post(property_handler::add_property_size))
        .route("/api/master/property-size/{id}", put(property_handler::update_property_size))
        .route("/api/master/stock", post(stock_handler::add_stock))
        .route("/api/master/stock/{id}", put(stock_handler::update_stock))
        .route("/api/master/add-customer", post(customer_handler::add_customer))
        .route("/api/master/customer/{customer_id}", put(customer_handler::update_customer))
        .route("/api/master/add-co-applicant", post(co_applicant_handler::add_co_applicant))
        .route("/api/master/co-applicant/{id}", put(co_applicant_handler::update_co_applicant))
        .route("/api/master/add-broker", post(broker_handler::add_broker))
        .route("/api/master/broker/{broker_code}", put(broker_handler::update_broker))
        .route("/api/master/add-bank", post(bank_handler::add_bank))
        .route("/api/master/bank/{ifsc_code}", put(bank_handler::update_bank))
        .route("/api/master/add-plc", post(plc_handler::add_plc))
        .route("/api/master/plc/{name}", put(plc_handler::update_plc))
        .route("/api/transaction/booking", post(booking_handler::add_booking))
        .route("/api/transaction/booking/{id}", put(booking_handler::update_booking))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/master/installment-plan/{plan_name}", delete(installment_plan_handler::delete_plan))
        .route("/api/master/project/{id}", delete(project_handler::delete_project))
        .route("/api/master/property/{id}", delete(property_handler::delete_property))
        .route("/api/master/property-size/{id}", delete(property_handler::delete_property_size))
        .route("/api/master/stock/{id}", delete(stock_handler::delete_stock))
        .route("/api/master/customer/{customer_id}", delete(customer_handler::delete_customer))
        .route("/api/master/co-applicant/{id}", delete(co_applicant_handler::delete_co_applicant))
        .route("/api/master/broker/{broker_code}", delete(broker_handler::delete_broker))
        .route("/api/master/bank/{ifsc_code}", delete(bank_handler::delete_bank))
        .route("/api/master/plc/{name}", delete(plc_handler::delete_plc))
        .route("/api/transaction/booking/{id}", delete(booking_handler::delete_booking))
        .route("/api/users", post(user_handler::create_user).get(user_handler::list_users))
        .route("/api/users/{user_id}", put(user_handler::update_user).delete(user_handler::delete_user))
}

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/api/auth/login", post(auth_handler::login));

    let api_routes = if let Some(ref auth_state) = state.auth_state {
        // 読み取り系ルート（EMPLOYEE 以上）
        let read = read_routes().route_layer(axum::middleware::from_fn(move |req, next| {
            let perm = require_permission("read");
            perm(req, next)
        }));

        // 書き込み系ルート（EMPLOYEE 以上）
        let write = write_routes().route_layer(axum::middleware::from_fn(move |req, next| {
            let perm = require_permission("write");
            perm(req, next)
        }));

        // 管理系ルート（ADMIN 以上）
        let admin = admin_routes().route_layer(axum::middleware::from_fn(move |req, next| {
            let perm = require_permission("admin");
            perm(req, next)
        }));

        read.merge(write)
            .merge(admin)
            .layer(from_fn_with_state(auth_state.clone(), auth_middleware))
    } else {
        // 認証なし（開発環境用）
        read_routes().merge(write_routes()).merge(admin_routes())
    };

    public_routes
        .merge(api_routes)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

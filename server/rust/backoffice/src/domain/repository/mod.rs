pub mod activity_log_repository;
pub mod bank_repository;
pub mod booking_repository;
pub mod broker_repository;
pub mod co_applicant_repository;
pub mod customer_repository;
pub mod installment_plan_repository;
pub mod plc_repository;
pub mod project_repository;
pub mod property_repository;
pub mod property_size_repository;
pub mod sign_image_store;
pub mod stock_repository;
pub mod user_repository;

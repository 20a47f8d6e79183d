pub mod activity_log_repo_impl;
pub mod bank_repo_impl;
pub mod booking_repo_impl;
pub mod broker_repo_impl;
pub mod co_applicant_repo_impl;
pub mod customer_repo_impl;
pub mod installment_plan_repo_impl;
pub mod plc_repo_impl;
pub mod project_repo_impl;
pub mod property_repo_impl;
pub mod property_size_repo_impl;
pub mod stock_repo_impl;
pub mod user_repo_impl;

pub mod authenticate_user;
pub mod get_activity_logs;
pub mod manage_banks;
pub mod manage_bookings;
pub mod manage_brokers;
pub mod manage_co_applicants;
pub mod manage_installment_plans;
pub mod manage_plcs;
pub mod manage_projects;
pub mod manage_properties;
pub mod manage_stock;
pub mod manage_users;
pub mod register_customers;

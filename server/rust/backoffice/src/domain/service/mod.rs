pub mod schedule_service;

pub mod match_service_errors;

pub mod scoring_errors;

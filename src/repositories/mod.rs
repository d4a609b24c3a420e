pub mod quiz_repository;

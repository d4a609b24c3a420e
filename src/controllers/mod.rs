pub mod quiz_controller;

pub mod quiz_routes;

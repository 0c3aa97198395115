pub mod budget_service;
pub mod persist_service;
pub mod render_service;

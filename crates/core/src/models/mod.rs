pub mod expense;
pub mod form;
pub mod state;
pub mod view;

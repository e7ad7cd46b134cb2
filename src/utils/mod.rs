pub mod jwt;
pub mod page;
pub mod parameter_error_handler;
pub mod password;
pub mod validate;

pub use page::{redirect_to, render_page, respond};
pub use parameter_error_handler::{form_error_handler, json_error_handler};

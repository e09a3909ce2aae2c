pub mod health;
pub mod list;
pub mod get;
pub mod create;
pub mod replace;
pub mod delete;

pub use health::health_handler;
pub use list::list_handler;
pub use get::get_handler;
pub use create::create_handler;
pub use replace::replace_handler;
pub use delete::delete_handler;

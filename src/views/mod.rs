pub mod chat;
pub mod flag;
pub mod login;
pub mod shared;

pub use chat::ChatView;
pub use flag::FlagDialog;
pub use login::LoginView;

pub mod callback;
pub mod chat;
pub mod home;
pub mod login;

pub use callback::AuthCallbackPage;
pub use chat::ChatPage;
pub use home::HomePage;
pub use login::LoginPage;

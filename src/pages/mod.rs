//! Page components.

mod dashboard;
mod home;
mod login;
mod sign_up;

pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use sign_up::SignUpPage;

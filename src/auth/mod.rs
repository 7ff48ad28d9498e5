//! Authentication and session management

pub mod clock;
pub mod directory;
pub mod models;
pub mod password;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use directory::{is_valid_email, UserDirectory};
pub use models::{LoginResponse, User, UserInfo, UserType};
pub use password::{validate_password_strength, PasswordHasher, PasswordRule};
pub use session::{Session, SessionStore};

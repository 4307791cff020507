pub mod code;
pub mod coordinates;
pub mod email;
pub mod password;
pub mod person_name;

pub use code::Code;
pub use coordinates::{Coordinates, Latitude, Longitude};
pub use email::Email;
pub use password::Password;
pub use person_name::PersonName;

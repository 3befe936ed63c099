pub mod content;
pub mod course;
pub mod users;

pub use self::content::model::Content;
pub use self::course::model::Course;
pub use self::users::model::User;

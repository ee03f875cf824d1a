pub mod album;
pub mod artist;
pub mod comment;
pub mod song;
pub mod user;

pub use album::Album;
pub use artist::Artist;
pub use comment::Comment;
pub use song::Song;
pub use user::User;

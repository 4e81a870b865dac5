/// API route modules
pub mod albums;
pub mod artists;
pub mod cover;
pub mod health;
pub mod lyrics;
pub mod playlists;
pub mod scan;
pub mod stream;
pub mod tracks;

mod album;
mod artist;
mod audio;
mod lyric;
mod page;
mod playlist;
mod track;

pub use album::{Album, AlbumId};
pub use artist::{Artist, ArtistId};
pub use audio::AudioFormat;
pub use lyric::{Lyric, LyricId};
pub use page::Page;
pub use playlist::{
    CreatePlaylist, Playlist, PlaylistId, PlaylistTrack, PlaylistTrackId, PlaylistType,
    PlaylistWithTracks,
};
pub use track::{CreateTrack, Track, TrackId, TrackWithDetails};

mod http_source;
mod probe;
mod trending;
mod types;
mod ytdlp;

pub use http_source::HttpMediaSource;
pub use probe::{duration_invocation, probe_duration};
pub use trending::{watch_url, TrendingLookup};
pub use types::{FetchedMedia, MediaSource};
pub use ytdlp::YtDlpSource;

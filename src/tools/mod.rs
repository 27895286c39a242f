mod file_tools;
mod format;
mod probe;
mod thumbnail;
mod transcoder;
mod video_scanner;

pub use file_tools::{
    FileStat, ensure_directory_exists, remove_file_best_effort, stat_file, strip_file_scheme,
    uri_to_path, validate_directory_exists,
};
pub use format::{format_duration, format_size, format_timestamp, now_epoch_ms};
pub use probe::{VideoInfo, get_video_info, parse_duration_from_log, probe_duration};
pub use thumbnail::{
    PLACEHOLDER_THUMBNAIL, generate_thumbnail, generate_thumbnails_parallel, thumbnail_cache_path,
};
pub use transcoder::{ConvertOutcome, TARGET_CONTAINER_EXT, TranscodeEngine};
pub use video_scanner::{VideoFileInfo, scan_video_files};

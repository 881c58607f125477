pub mod error;
pub mod file_reqs;
pub mod http;
pub mod login_requests;
pub mod people_reqs;
pub mod tag_reqs;
pub mod video_reqs;

pub mod context;
pub mod gen_components;
pub mod gen_funcs;
pub mod home;
pub mod hooks;
pub mod login;
pub mod misc_func;
pub mod my_page;
pub mod navigation;
pub mod person;
pub mod playback;
pub mod query;
pub mod routes;
pub mod tag;
pub mod video_detail;
pub mod videos;

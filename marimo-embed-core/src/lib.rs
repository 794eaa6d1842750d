pub mod connection;
pub mod convert;
pub mod editor_url;
pub mod filetype;
pub mod proxy;

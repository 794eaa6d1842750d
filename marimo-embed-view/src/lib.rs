//! Host-facing layer of the marimo notebook integration: capability traits
//! for the host's registries and web-view frame, the embedded editor view,
//! the document-window factory, and the activation glue that registers all
//! of it at host bootstrap.

pub mod activation;
pub mod factory;
pub mod host;
pub mod view;

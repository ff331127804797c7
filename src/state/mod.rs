pub mod feed;
pub mod messages;
pub mod network;
pub mod refresher;
pub mod rules;
pub mod selection;
pub mod session;
pub mod settings;
pub mod setup;

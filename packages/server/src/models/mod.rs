pub mod article;
pub mod auth;
pub mod camp;
pub mod form;
pub mod profile;
pub mod resource;
pub mod shared;
pub mod solution;
pub mod workshop;

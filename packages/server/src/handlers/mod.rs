pub mod article;
pub mod auth;
pub mod camp;
pub mod form;
pub mod participation;
pub mod people;
pub mod profile;
pub mod resource;
pub mod solution;
pub mod workshop;

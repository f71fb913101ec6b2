pub mod api;
pub mod common;
pub mod entities;
pub mod live;
pub mod models;
pub mod repositories;
pub mod rules;
pub mod settings;
pub mod usecases;
pub mod workers;

//! Tennis match progression engine.
//!
//! Points feed the active [`models::game::Game`] or [`models::tiebreak::Tiebreak`],
//! completed units bubble up through [`models::set::Set`] into
//! [`models::tennis_match::Match`], and [`services::match_service::MatchService`]
//! maps every engine event onto the persistence collaborator.

pub mod config;
pub mod models;
pub mod repositories;
pub mod rotation;
pub mod services;
pub mod timer;

pub mod activity;
pub mod badge;

pub use activity::estimate_active_days;
pub use badge::{calculate_github_score, calculate_github_score_at};

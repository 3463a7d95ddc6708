//! Pure simulation logic for Dragon Haven Cafe.
//!
//! This crate contains all game rules that are independent of the ECS
//! engine, the filesystem, and any runtime. Functions take plain data and
//! return results, making them unit-testable and portable between the
//! simulation engine, headless harnesses, and any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`affinity`] | Character affinity levels and interaction bonuses |
//! | [`constants`] | Balance constants: decay rates, thresholds, schedules |
//! | [`ingredients`] | Static ingredient catalog (gatherable items) |
//! | [`pricing`] | Dish/ingredient pricing and tip calculation |
//! | [`recipes`] | Static recipe catalog with unlock rules |
//! | [`reputation`] | Reputation tiers, customer volume, price bonuses |
//! | [`satisfaction`] | Weighted customer satisfaction scoring |
//! | [`staffing`] | Staff efficiency, quality, and mistake formulas |

pub mod affinity;
pub mod constants;
pub mod ingredients;
pub mod pricing;
pub mod recipes;
pub mod reputation;
pub mod satisfaction;
pub mod staffing;

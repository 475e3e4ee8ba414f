// handlers/mod.rs - three security tiers
//
// Public (no identity) → Protected (bearer token) → Elevated (superuser).
// Each tier exposes `routes()`; `app::app` applies the tier's middleware.

pub mod elevated;
pub mod protected;
pub mod public;

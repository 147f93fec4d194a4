pub mod area;
pub mod events;
pub mod hit_resolver;
pub mod hover;
pub mod router;

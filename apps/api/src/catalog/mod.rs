// Catalog: the live, swappable set of job postings and substring search over it.
// Sources (builtin seed, JSON file, Postgres) only produce raw postings;
// `CatalogIndex::load` is the single validation and publish point.

pub mod handlers;
pub mod index;
pub mod loader;
pub mod normalize;
pub mod seed;

mod in_memory_registry;
mod pg_file_registry;
mod pg_pool;

pub use in_memory_registry::InMemoryFileRegistry;
pub use pg_file_registry::PgFileRegistry;
pub use pg_pool::create_pool;

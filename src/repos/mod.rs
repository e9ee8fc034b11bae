/*
 * Responsibility
 * - 永続化の境界 (UserRepo trait と実装)
 */
pub mod error;
pub mod memory;
pub mod user_repo;

pub use memory::MemoryUserRepo;
pub use user_repo::{NewUser, PgUserRepo, UserChanges, UserRepo, UserRow};

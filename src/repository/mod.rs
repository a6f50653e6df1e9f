// ==========================================
// Road appraisal - repository layer
// ==========================================
// SQLite persistence behind Arc<Mutex<Connection>>.
// Repositories hold no business rules.
// ==========================================

pub mod error;
pub mod history_repo;
pub mod session_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use history_repo::HistoryRepository;
pub use session_repo::SessionRepository;

//! # ミドルウェア
//!
//! - [`access_guard`] - ベアラートークンによるアクセス制御

pub mod access_guard;

pub use access_guard::{
   AccessGuardState,
   AuthError,
   AuthenticatedRequest,
   SubjectPolicy,
   authenticate,
   require_bearer,
};

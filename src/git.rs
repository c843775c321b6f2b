//! Git integration: author identity and hook installation.

pub mod hooks;
pub mod ident;

pub use hooks::{hook_script, HookInstaller, HOOK_FILES};
pub use ident::{author_ident, git_var, AUTHOR_IDENT_VAR};

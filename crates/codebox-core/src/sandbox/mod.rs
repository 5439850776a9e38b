//! Sandboxed execution of untrusted-ish code snippets
//!
//! The sandbox owns everything between "here is a source string" and "here
//! is what it printed": resolving host toolchains, staging a throwaway
//! workspace, compiling when the language needs it, and running the result
//! under time limits with full process-tree cleanup.

pub mod local;
pub mod policy;
pub mod toolchain;
pub mod workspace;

pub use local::LocalSandbox;
pub use policy::ExecutionPolicy;
pub use toolchain::Toolchain;
pub use workspace::Workspace;

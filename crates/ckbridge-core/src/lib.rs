//! # ckbridge-core
//!
//! Builds command lines for the ck-cmd asset conversion toolchain, runs
//! them through the platform shell and turns failures into a single
//! [`BridgeError`].
//!
//! ## Toolchain
//!
//! Three external executables are driven from here:
//!
//! - `ck-cmd` for animation, rig, skin and model conversion and hkx to xml
//! - `hkxcmd` for xml to hkx
//! - `HavokBehaviorPostProcess` for upgrading legacy behavior files
//!
//! Their locations are resolved once from [`config::ToolPaths`] and handed
//! to [`CkCmd`] explicitly.

pub mod ckcmd;
pub mod commands;
pub mod config;
pub mod error;
pub mod path;
pub mod project;
pub mod runner;

pub use ckcmd::CkCmd;
pub use config::{BridgeConfig, ResolvedTools};
pub use error::{BridgeError, BridgeResult};
pub use project::{MetadataKey, Project, RecentProjects};
pub use runner::CommandRunner;

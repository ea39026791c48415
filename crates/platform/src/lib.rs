#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Platform abstraction layer for hostsetup
//!
//! This crate provides:
//! - The command execution boundary ([`ProcessOperations`])
//! - Host detection (OS family, distribution, firewall, privileges)
//! - The [`PlatformPolicy`] strategy that hides POSIX/Windows differences
//!   in account creation and environment handling

pub mod firewall;
pub mod os;
pub mod policy;
pub mod privileges;
pub mod process;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use policy::{policy_for, PlatformPolicy, PolicySettings, UserResolution};
pub use process::{CommandOutput, HostProcessOperations, PlatformCommand, ProcessOperations};

#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for hostsetup
//!
//! This crate provides the data shared between the setup components:
//! runtime release descriptors, the per-run setup options, database kinds
//! and the host operating system description.

pub mod database;
pub mod options;
pub mod os;
pub mod release;

// Re-export commonly used types
pub use database::DatabaseKind;
pub use options::{DatabaseOptions, SetupOptions};
pub use os::{OsFamily, OsInfo};
pub use release::RuntimeRelease;

use serde::{Deserialize, Serialize};

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    #[default]
    Auto,
    Never,
}

impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

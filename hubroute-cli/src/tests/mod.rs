//! Shared test harness modules for the hubroute CLI.

use super::*;

mod commands;
mod helpers;

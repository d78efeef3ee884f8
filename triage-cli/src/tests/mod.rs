//! Shared test harness modules for the triage CLI.

use super::*;

mod helpers;

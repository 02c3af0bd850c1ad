// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all collaborator adapters must implement.

/// The base trait for all Sova adapters.
///
/// Adapters are shared across tasks behind `Arc<dyn ...>`, so they must be
/// thread-safe. The name identifies the adapter in logs.
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;
}
